//! Translate input into player intent.
//!
//! - [`player_jump`] fires on the jump key's press edge, at most twice
//!   between landings.
//! - [`horizontal_movement`] probes left and right by the configured probe
//!   distance and only lets the player walk towards a side that is clear.
//!   The velocity it sets is integrated by the next tick's physics step.

use bevy_ecs::prelude::*;

use crate::components::animation::Animation;
use crate::components::boxcollider::BoxCollider;
use crate::components::entitykind::EntityKind;
use crate::components::mapposition::MapPosition;
use crate::components::player::Player;
use crate::components::sprite::Sprite;
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::InputState;
use crate::resources::touched::TouchedEntities;
use crate::systems::collision::{Body, probe};

pub fn player_jump(input: Res<InputState>, mut players: Query<(&mut Player, &mut Animation)>) {
    if !input.jump.just_pressed {
        return;
    }
    for (mut player, mut animation) in players.iter_mut() {
        if player.jump() {
            animation.reset();
        }
    }
}

pub fn horizontal_movement(
    input: Res<InputState>,
    config: Res<GameConfig>,
    mut players: Query<(&mut Player, &mut Animation, &MapPosition, &BoxCollider, &Sprite)>,
    others: Query<(Entity, &MapPosition, &BoxCollider, &Sprite), (With<EntityKind>, Without<Player>)>,
    mut touched: ResMut<TouchedEntities>,
) {
    touched.clear();
    let Ok((mut player, mut animation, position, collider, sprite)) = players.single_mut() else {
        return;
    };

    player.velocity.x = 0.0;
    let me = Body::new(position.pos, collider, sprite);
    let bodies = || {
        others
            .iter()
            .map(|(e, p, c, s)| (e, Body::new(p.pos, c, s)))
    };
    let blocked_left = probe(me, -config.probe_distance, bodies());
    let blocked_right = probe(me, config.probe_distance, bodies());

    if input.left.active && blocked_left.is_none() && player.move_left(config.player_velocity) {
        animation.reset();
    }
    if input.right.active && blocked_right.is_none() && player.move_right(config.player_velocity) {
        animation.reset();
    }

    touched.left = blocked_left;
    touched.right = blocked_right;
}
