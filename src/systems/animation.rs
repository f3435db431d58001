//! Animation systems.
//!
//! - [`player_animation`] picks the player's bucket from its state, shows
//!   the matching frame and resizes its collider to that frame.
//! - [`hazard_animation`] loops the hazard's on/off bucket.
//!
//! Both advance the entity's counter once per tick. The frame's mask travels
//! with the [`Sprite`], so collision always tests the frame being drawn.
//!
//! # Related
//!
//! - [`crate::components::animation::Animation`] – per-entity playback state
//! - [`crate::resources::animationstore::AnimationStore`] – frame storage

use bevy_ecs::prelude::*;

use crate::components::animation::{ANIMATION_DELAY, Animation};
use crate::components::boxcollider::BoxCollider;
use crate::components::hazard::Hazard;
use crate::components::player::Player;
use crate::components::sprite::{Sprite, SpriteHandle};
use crate::resources::animationstore::AnimationStore;

fn show_frame(frame: &SpriteHandle, sprite: &mut Sprite, collider: &mut BoxCollider) {
    sprite.handle = frame.clone();
    collider.size.x = frame.width as f32;
    collider.size.y = frame.height as f32;
}

pub fn player_animation(
    mut query: Query<(&Player, &mut Animation, &mut Sprite, &mut BoxCollider)>,
    store: Res<AnimationStore>,
) {
    for (player, mut animation, mut sprite, mut collider) in query.iter_mut() {
        animation.bucket = player.animation_bucket();
        let frame = store.current_frame(&animation);
        show_frame(frame, &mut sprite, &mut collider);
        animation.advance();
    }
}

pub fn hazard_animation(
    mut query: Query<(&Hazard, &mut Animation, &mut Sprite, &mut BoxCollider)>,
    store: Res<AnimationStore>,
) {
    for (hazard, mut animation, mut sprite, mut collider) in query.iter_mut() {
        let bucket = hazard.state.bucket();
        if animation.bucket != bucket {
            animation.bucket = bucket.to_string();
            animation.reset();
        }
        let frames = store.frames(&animation.sheet, &animation.bucket);
        let frame = &frames[animation.frame_index(frames.len())];
        show_frame(frame, &mut sprite, &mut collider);
        animation.advance();

        if (animation.counter / ANIMATION_DELAY) as usize > frames.len() {
            animation.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::hazard::HazardState;

    const ON_WIDTHS: [u32; 2] = [10, 20];
    const OFF_WIDTHS: [u32; 2] = [30, 40];

    fn fire_world() -> (World, Entity) {
        let mut store = AnimationStore::new();
        let frames = |widths: [u32; 2]| -> Vec<SpriteHandle> {
            widths.iter().map(|w| SpriteHandle::solid(*w, 64)).collect()
        };
        store.insert("fire", "on", frames(ON_WIDTHS));
        store.insert("fire", "off", frames(OFF_WIDTHS));

        let mut world = World::new();
        world.insert_resource(store);
        let mut hazard = Hazard::default();
        hazard.on();
        let fire = world
            .spawn((
                hazard,
                Animation::new("fire", "on"),
                Sprite::new(SpriteHandle::solid(1, 1)),
                BoxCollider::new(1.0, 1.0),
            ))
            .id();
        (world, fire)
    }

    /// Width of the frame shown after each of `ticks` runs.
    fn run_hazard(world: &mut World, fire: Entity, ticks: usize) -> Vec<u32> {
        let mut schedule = Schedule::default();
        schedule.add_systems(hazard_animation);
        (0..ticks)
            .map(|_| {
                schedule.run(world);
                world.get::<Sprite>(fire).map_or(0, |s| s.handle.width)
            })
            .collect()
    }

    #[test]
    fn hazard_loops_and_wraps_its_counter() {
        let (mut world, fire) = fire_world();
        let len = ON_WIDTHS.len() as u32;

        let shown = run_hazard(&mut world, fire, (len * ANIMATION_DELAY + 1) as usize);
        assert_eq!(shown, vec![10, 10, 10, 20, 20, 20, 10]);
        assert_eq!(world.get::<Animation>(fire).map(|a| a.counter), Some(7));

        // Counter passes len * delay + delay and starts over.
        let shown = run_hazard(&mut world, fire, 5);
        assert_eq!(shown, vec![10, 10, 10, 10, 10]);
        assert_eq!(world.get::<Animation>(fire).map(|a| a.counter), Some(3));
        assert_eq!(world.get::<BoxCollider>(fire).map(|c| c.size.x), Some(10.0));
    }

    #[test]
    fn switching_off_restarts_playback() {
        let (mut world, fire) = fire_world();
        run_hazard(&mut world, fire, 4);
        assert_eq!(world.get::<Animation>(fire).map(|a| a.counter), Some(4));

        if let Some(mut hazard) = world.get_mut::<Hazard>(fire) {
            hazard.off();
        }
        let shown = run_hazard(&mut world, fire, 4);
        assert_eq!(shown, vec![30, 30, 30, 40]);
        let animation = world.get::<Animation>(fire).cloned();
        assert_eq!(animation.as_ref().map(|a| a.bucket.as_str()), Some("off"));
        assert_eq!(animation.map(|a| a.counter), Some(4));
        assert_eq!(world.get::<Hazard>(fire).map(|h| h.state), Some(HazardState::Off));
    }
}
