use bevy_ecs::prelude::*;

use crate::components::mapposition::MapPosition;
use crate::components::player::Player;
use crate::resources::worldtime::WorldTime;

/// Integrate player velocity with the ramped gravity and advance its timers.
///
/// Simple Euler step, one per tick, no sub-stepping.
pub fn player_physics(mut query: Query<(&mut Player, &mut MapPosition)>, time: Res<WorldTime>) {
    for (mut player, mut position) in query.iter_mut() {
        player.integrate(&mut position.pos, time.fps);
    }
}
