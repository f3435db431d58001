//! Animation resource registry.
//!
//! Stores the frames of every animation bucket, grouped by sheet. A bucket is
//! addressed as `sheet` + `bucket` (e.g. `"player"` + `"run_left"`); the
//! frame shown is `(counter / ANIMATION_DELAY) % frames.len()`.

use bevy_ecs::prelude::Resource;
use rustc_hash::FxHashMap;

use crate::components::animation::Animation;
use crate::components::sprite::SpriteHandle;

/// Central registry of animation frames keyed by `"sheet/bucket"`.
#[derive(Resource, Default, Debug, Clone)]
pub struct AnimationStore {
    pub animations: FxHashMap<String, Vec<SpriteHandle>>,
}

fn key(sheet: &str, bucket: &str) -> String {
    format!("{}/{}", sheet, bucket)
}

impl AnimationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the frames of a bucket.
    pub fn insert(&mut self, sheet: &str, bucket: &str, frames: Vec<SpriteHandle>) {
        self.animations.insert(key(sheet, bucket), frames);
    }

    /// Register every bucket of a loaded sheet.
    pub fn insert_sheet(&mut self, sheet: &str, buckets: FxHashMap<String, Vec<SpriteHandle>>) {
        for (bucket, frames) in buckets {
            self.insert(sheet, &bucket, frames);
        }
    }

    /// Frames of a bucket.
    ///
    /// # Panics
    /// Bucket names come from closed enumerations, so an unknown or empty
    /// bucket means the sheet was built wrong; this panics.
    pub fn frames(&self, sheet: &str, bucket: &str) -> &[SpriteHandle] {
        match self.animations.get(&key(sheet, bucket)) {
            Some(frames) if !frames.is_empty() => frames,
            _ => panic!("animation bucket '{}/{}' is not loaded", sheet, bucket),
        }
    }

    /// Frame to show for an entity's playback state.
    pub fn current_frame(&self, animation: &Animation) -> &SpriteHandle {
        let frames = self.frames(&animation.sheet, &animation.bucket);
        &frames[animation.frame_index(frames.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> AnimationStore {
        let mut store = AnimationStore::new();
        store.insert(
            "fire",
            "on",
            vec![
                SpriteHandle::solid(1, 1),
                SpriteHandle::solid(2, 2),
                SpriteHandle::solid(3, 3),
            ],
        );
        store
    }

    #[test]
    fn current_frame_uses_delay() {
        let store = store();
        let mut anim = Animation::new("fire", "on");
        assert_eq!(store.current_frame(&anim).width, 1);
        anim.counter = 3;
        assert_eq!(store.current_frame(&anim).width, 2);
        anim.counter = 9;
        assert_eq!(store.current_frame(&anim).width, 1);
    }

    #[test]
    #[should_panic(expected = "animation bucket 'player/fly_left' is not loaded")]
    fn unknown_bucket_panics() {
        store().frames("player", "fly_left");
    }
}
