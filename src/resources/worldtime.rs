use bevy_ecs::prelude::Resource;

/// Fixed-step simulation clock.
///
/// Physics is expressed per tick, so the only thing systems need is the tick
/// rate, for the gravity ramp and timed windows.
#[derive(Resource, Clone, Copy, Debug)]
pub struct WorldTime {
    pub fps: u32,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime { fps: 60 }
    }
}

impl WorldTime {
    pub fn with_fps(fps: u32) -> Self {
        WorldTime { fps: fps.max(1) }
    }
}
