//! Back-and-forth enemy movement.
//!
//! A [`Patrol`] keeps its entity's x within `[origin_x, origin_x + distance]`,
//! moving `speed` pixels per tick and reversing exactly at either bound.

use bevy_ecs::prelude::Component;

/// Patrol distance of a level enemy, in tiles.
pub const DEFAULT_PATROL_TILES: u32 = 2;
/// Patrol speed of a level enemy, in pixels per tick.
pub const DEFAULT_PATROL_SPEED: f32 = 2.0;

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Patrol {
    pub origin_x: f32,
    pub distance: f32,
    pub speed: f32,
    /// +1 moving right, -1 moving left.
    pub direction: f32,
}

impl Patrol {
    /// Start at `origin_x` heading right.
    pub fn new(origin_x: f32, distance: f32, speed: f32) -> Self {
        Self {
            origin_x,
            distance,
            speed,
            direction: 1.0,
        }
    }

    pub fn max_x(&self) -> f32 {
        self.origin_x + self.distance
    }

    /// Advance one tick from `x` and return the new x.
    pub fn step(&mut self, x: f32) -> f32 {
        let mut x = x + self.speed * self.direction;
        if x > self.max_x() {
            x = self.max_x();
            self.direction = -1.0;
        } else if x < self.origin_x {
            x = self.origin_x;
            self.direction = 1.0;
        }
        x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reverses_at_the_far_bound() {
        let mut patrol = Patrol::new(0.0, 4.0, 2.0);
        let mut x = 0.0;
        x = patrol.step(x);
        assert_eq!((x, patrol.direction), (2.0, 1.0));
        x = patrol.step(x);
        assert_eq!((x, patrol.direction), (4.0, 1.0));
        x = patrol.step(x);
        assert_eq!((x, patrol.direction), (4.0, -1.0));
        x = patrol.step(x);
        assert_eq!((x, patrol.direction), (2.0, -1.0));
    }

    #[test]
    fn reverses_at_the_origin() {
        let mut patrol = Patrol::new(10.0, 20.0, 3.0);
        patrol.direction = -1.0;
        let x = patrol.step(11.0);
        assert_eq!(x, 10.0);
        assert_eq!(patrol.direction, 1.0);
    }

    #[test]
    fn overshoot_is_clamped() {
        let mut patrol = Patrol::new(0.0, 5.0, 2.0);
        let x = patrol.step(4.0);
        assert_eq!(x, 5.0);
        assert_eq!(patrol.direction, -1.0);
    }
}
