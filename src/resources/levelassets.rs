//! Sprites and level source needed to (re)build a level.
//!
//! Both resources are plain data, so a level can be respawned on restart
//! without touching the renderer.

use std::path::PathBuf;

use bevy_ecs::prelude::Resource;

use crate::components::sprite::SpriteHandle;

/// Static sprites for every tile kind, resolved once at startup.
#[derive(Resource, Debug, Clone)]
pub struct LevelAssets {
    pub block: SpriteHandle,
    pub goal: SpriteHandle,
    pub collectible: SpriteHandle,
    pub enemy: SpriteHandle,
    /// Fixed backdrop drawn under the level; not scrolled.
    pub background: Option<SpriteHandle>,
}

/// Where the current level comes from.
#[derive(Resource, Debug, Clone)]
pub struct LevelSource {
    pub path: PathBuf,
    pub tile_size: u32,
}
