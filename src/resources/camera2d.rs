//! Shared 2D camera resource and the horizontal scrolling policy.
//!
//! Wraps raylib's [`Camera2D`] so the render system and the camera system
//! agree on a single world/screen transform. Only horizontal scrolling is
//! used: `target.x` is the camera offset, everything else stays fixed.

use bevy_ecs::prelude::Resource;
use raylib::prelude::{Camera2D, Vector2};

/// ECS resource that holds the active 2D camera parameters.
#[derive(Resource, Clone, Copy)]
pub struct Camera2DRes(pub Camera2D);

impl Default for Camera2DRes {
    fn default() -> Self {
        Self::at(0.0)
    }
}

impl Camera2DRes {
    /// Camera scrolled so that world x `offset_x` is at the left screen edge.
    pub fn at(offset_x: f32) -> Self {
        Camera2DRes(Camera2D {
            target: Vector2 {
                x: offset_x,
                y: 0.0,
            },
            offset: Vector2 { x: 0.0, y: 0.0 },
            rotation: 0.0,
            zoom: 1.0,
        })
    }

    pub fn offset_x(&self) -> f32 {
        self.0.target.x
    }

    pub fn set_offset_x(&mut self, offset_x: f32) {
        self.0.target.x = offset_x;
    }
}

/// Horizontal extent of the current level, fixed until restart.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct LevelBounds {
    pub min_x: f32,
    pub max_x: f32,
}

impl LevelBounds {
    pub fn new(min_x: f32, max_x: f32) -> Self {
        Self { min_x, max_x }
    }

    /// Bounds of a list of `(left, right)` edges, or `[0, viewport_width]`
    /// when there are none.
    pub fn from_edges(edges: impl IntoIterator<Item = (f32, f32)>, viewport_width: f32) -> Self {
        let mut bounds: Option<(f32, f32)> = None;
        for (left, right) in edges {
            bounds = Some(match bounds {
                Some((min, max)) => (min.min(left), max.max(right)),
                None => (left, right),
            });
        }
        let (min_x, max_x) = bounds.unwrap_or((0.0, viewport_width));
        Self { min_x, max_x }
    }

    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    /// Camera offset that centers `focus_x` while keeping the view inside the level.
    ///
    /// A level narrower than the viewport does not scroll at all.
    pub fn scroll_offset(&self, focus_x: f32, viewport_width: f32) -> f32 {
        if self.width() <= viewport_width {
            return self.min_x;
        }
        let desired = (focus_x - (viewport_width / 2.0).floor()).floor();
        if desired < self.min_x {
            self.min_x
        } else if desired > self.max_x - viewport_width {
            self.max_x - viewport_width
        } else {
            desired
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrow_level_never_scrolls() {
        let bounds = LevelBounds::new(-50.0, 700.0);
        assert_eq!(bounds.scroll_offset(600.0, 1200.0), -50.0);
        assert_eq!(bounds.scroll_offset(-10_000.0, 1200.0), -50.0);
    }

    #[test]
    fn wide_level_centers_then_clamps() {
        let bounds = LevelBounds::new(0.0, 3000.0);
        assert_eq!(bounds.scroll_offset(1500.0, 1200.0), 900.0);
        assert_eq!(bounds.scroll_offset(100.0, 1200.0), 0.0);
        assert_eq!(bounds.scroll_offset(2990.0, 1200.0), 1800.0);
    }

    #[test]
    fn bounds_from_edges() {
        let bounds = LevelBounds::from_edges([(96.0, 192.0), (-96.0, 0.0), (0.0, 48.0)], 1200.0);
        assert_eq!(bounds, LevelBounds::new(-96.0, 192.0));
        let empty = LevelBounds::from_edges(std::iter::empty(), 1200.0);
        assert_eq!(empty, LevelBounds::new(0.0, 1200.0));
    }

    #[test]
    fn camera_offset_round_trips() {
        let mut cam = Camera2DRes::at(12.0);
        assert_eq!(cam.offset_x(), 12.0);
        cam.set_offset_x(-4.0);
        assert_eq!(cam.offset_x(), -4.0);
        assert_eq!(cam.0.zoom, 1.0);
    }
}
