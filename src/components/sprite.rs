use std::sync::Arc;

use bevy_ecs::prelude::Component;

use crate::components::mask::Mask;

/// Index of a texture owned by [`SpriteStore`](crate::resources::spritestore::SpriteStore).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub usize);

/// A loaded, already-scaled sprite frame.
///
/// Handles are cheap to clone and can live in ECS components; the GPU texture
/// itself stays in the store. `texture` is `None` for frames that only exist
/// for collision (headless worlds).
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteHandle {
    pub texture: Option<TextureId>,
    pub width: u32,
    pub height: u32,
    pub mask: Arc<Mask>,
}

impl SpriteHandle {
    /// Frame without a texture, collision-only.
    pub fn untextured(mask: Mask) -> Self {
        Self {
            texture: None,
            width: mask.width(),
            height: mask.height(),
            mask: Arc::new(mask),
        }
    }

    /// Untextured frame whose every pixel is solid.
    pub fn solid(width: u32, height: u32) -> Self {
        Self::untextured(Mask::filled(width, height))
    }
}

/// Image an entity currently renders, together with its collision mask.
#[derive(Component, Clone, Debug)]
pub struct Sprite {
    pub handle: SpriteHandle,
}

impl Sprite {
    pub fn new(handle: SpriteHandle) -> Self {
        Self { handle }
    }

    pub fn mask(&self) -> &Mask {
        &self.handle.mask
    }
}
