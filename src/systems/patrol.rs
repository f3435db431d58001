use bevy_ecs::prelude::*;

use crate::components::mapposition::MapPosition;
use crate::components::patrol::Patrol;

/// Move patrolling enemies one step, reversing at their bounds.
pub fn patrol_movement(mut query: Query<(&mut Patrol, &mut MapPosition)>) {
    for (mut patrol, mut position) in query.iter_mut() {
        position.pos.x = patrol.step(position.pos.x);
    }
}
