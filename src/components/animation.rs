use bevy_ecs::prelude::Component;

/// Ticks each animation frame stays on screen.
pub const ANIMATION_DELAY: u32 = 3;

/// Per-entity playback state.
///
/// `sheet` selects a family of buckets in the
/// [`AnimationStore`](crate::resources::animationstore::AnimationStore)
/// (e.g. `"player"`), `bucket` the active one inside it (e.g. `"run_left"`).
/// `counter` advances once per tick whatever the bucket is.
#[derive(Debug, Clone, Component, PartialEq, Eq)]
pub struct Animation {
    pub sheet: String,
    pub bucket: String,
    pub counter: u32,
}

impl Animation {
    pub fn new(sheet: impl Into<String>, bucket: impl Into<String>) -> Self {
        Self {
            sheet: sheet.into(),
            bucket: bucket.into(),
            counter: 0,
        }
    }

    /// Restart playback from the first frame.
    pub fn reset(&mut self) {
        self.counter = 0;
    }

    /// Frame index inside a bucket of `len` frames.
    pub fn frame_index(&self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        (self.counter / ANIMATION_DELAY) as usize % len
    }

    pub fn advance(&mut self) {
        self.counter = self.counter.wrapping_add(1);
    }
}
