//! Touch effect dispatch.
//!
//! Runs after both collision passes. Each entity the player touched this tick
//! is visited once, in left, right, vertical order, and the effect its
//! [`EntityKind`] maps to is applied to the player.
//!
//! Touching an enemy kills the player and suppresses every other effect of
//! the tick.

use bevy_ecs::prelude::*;
use log::debug;

use crate::components::entitykind::{EntityKind, TouchEffect};
use crate::components::player::Player;
use crate::resources::touched::TouchedEntities;

/// Apply the effects of `touched` to `player`.
///
/// Returns the entities that were collected and must leave the world.
pub fn apply_touch_effects(player: &mut Player, touched: &[(Entity, EntityKind)]) -> Vec<Entity> {
    let killed = touched
        .iter()
        .any(|(_, kind)| kind.touch_effect() == TouchEffect::Kill);
    if killed {
        player.dead = true;
        return Vec::new();
    }

    let mut collected = Vec::new();
    for (entity, kind) in touched {
        match kind.touch_effect() {
            TouchEffect::Nothing | TouchEffect::Kill => {}
            TouchEffect::Hit => player.make_hit(),
            TouchEffect::Win => player.won = true,
            TouchEffect::Collect => {
                if !collected.contains(entity) {
                    player.score += 1;
                    collected.push(*entity);
                }
            }
        }
    }
    collected
}

pub fn dispatch_touch_effects(
    mut commands: Commands,
    mut players: Query<&mut Player>,
    kinds: Query<&EntityKind>,
    touched: Res<TouchedEntities>,
) {
    let Ok(mut player) = players.single_mut() else {
        return;
    };
    let contacts: Vec<(Entity, EntityKind)> = touched
        .unique()
        .into_iter()
        .filter_map(|entity| kinds.get(entity).ok().map(|kind| (entity, *kind)))
        .collect();
    if contacts.is_empty() {
        return;
    }

    for entity in apply_touch_effects(&mut player, &contacts) {
        debug!("Collected {:?}, score {}", entity, player.score);
        commands.entity(entity).despawn();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entities(n: usize) -> Vec<Entity> {
        let mut world = World::new();
        (0..n).map(|_| world.spawn_empty().id()).collect()
    }

    #[test]
    fn enemy_suppresses_other_effects() {
        let e = entities(3);
        let mut player = Player::new();
        let removed = apply_touch_effects(
            &mut player,
            &[
                (e[0], EntityKind::Collectible),
                (e[1], EntityKind::Goal),
                (e[2], EntityKind::Enemy),
            ],
        );
        assert!(player.dead);
        assert!(!player.won);
        assert_eq!(player.score, 0);
        assert!(removed.is_empty());
    }

    #[test]
    fn collectible_counts_once() {
        let e = entities(1);
        let mut player = Player::new();
        let removed = apply_touch_effects(
            &mut player,
            &[(e[0], EntityKind::Collectible), (e[0], EntityKind::Collectible)],
        );
        assert_eq!(player.score, 1);
        assert_eq!(removed, vec![e[0]]);
    }

    #[test]
    fn hazard_and_goal_combine() {
        let e = entities(3);
        let mut player = Player::new();
        apply_touch_effects(
            &mut player,
            &[
                (e[0], EntityKind::Terrain),
                (e[1], EntityKind::Hazard),
                (e[2], EntityKind::Goal),
            ],
        );
        assert!(player.hit);
        assert!(player.won);
        assert!(!player.dead);
    }
}
