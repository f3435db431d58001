use bevy_ecs::prelude::Component;

/// Which loop an animated hazard is playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HazardState {
    On,
    #[default]
    Off,
}

impl HazardState {
    pub fn bucket(self) -> &'static str {
        match self {
            HazardState::On => "on",
            HazardState::Off => "off",
        }
    }
}

/// Animated trap (fire). Does not move; touching it makes the player flinch.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Hazard {
    pub state: HazardState,
}

impl Hazard {
    pub fn on(&mut self) {
        self.state = HazardState::On;
    }

    pub fn off(&mut self) {
        self.state = HazardState::Off;
    }
}
