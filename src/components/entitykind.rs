//! Entity kind tag and the per-kind capability table.
//!
//! Every level entity carries exactly one [`EntityKind`]. The collision and
//! effect pipeline treats all entities alike and asks the kind what touching
//! it does ([`EntityKind::touch_effect`]); per-tick behaviors live in the
//! optional [`Hazard`](super::hazard::Hazard) and
//! [`Patrol`](super::patrol::Patrol) components.

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EntityKind {
    #[default]
    None,
    Terrain,
    Hazard,
    Goal,
    Collectible,
    Enemy,
}

/// What happens to the player when it touches an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchEffect {
    Nothing,
    /// Start the flinch / invulnerability window.
    Hit,
    /// The level is won.
    Win,
    /// Score a point and remove the entity from the world.
    Collect,
    /// The player dies.
    Kill,
}

impl EntityKind {
    pub fn touch_effect(self) -> TouchEffect {
        match self {
            EntityKind::None | EntityKind::Terrain => TouchEffect::Nothing,
            EntityKind::Hazard => TouchEffect::Hit,
            EntityKind::Goal => TouchEffect::Win,
            EntityKind::Collectible => TouchEffect::Collect,
            EntityKind::Enemy => TouchEffect::Kill,
        }
    }
}

/// Marker for entities built from the level source; despawned on restart.
#[derive(Component, Debug, Clone, Copy)]
pub struct LevelEntity;
