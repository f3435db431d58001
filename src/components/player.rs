//! Player state: velocity, jumps, flinch window and terminal flags.
//!
//! The methods here are the player's reactions; the systems in
//! [`crate::systems`] decide when to call them.

use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;
use serde::{Deserialize, Serialize};

/// Downward acceleration in pixels per tick squared.
pub const GRAVITY: f32 = 1.0;
/// Upward velocity given by a jump, in multiples of [`GRAVITY`].
pub const JUMP_STRENGTH: f32 = 8.0;
pub const MAX_JUMPS: u8 = 2;
/// Size used before the first animation frame replaces it.
pub const DEFAULT_PLAYER_SIZE: f32 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    #[default]
    Left,
    Right,
}

impl Facing {
    pub fn suffix(self) -> &'static str {
        match self {
            Facing::Left => "left",
            Facing::Right => "right",
        }
    }
}

#[derive(Component, Debug, Clone, PartialEq)]
pub struct Player {
    /// Pixels per tick.
    pub velocity: Vector2,
    pub facing: Facing,
    /// 0 on the ground, 1 after a jump, 2 after a double jump.
    pub jump_count: u8,
    /// Ticks since last landing; ramps gravity in.
    pub fall_count: u32,
    pub hit: bool,
    pub hit_count: u32,
    pub won: bool,
    pub dead: bool,
    pub score: u32,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    pub fn new() -> Self {
        Self {
            velocity: Vector2 { x: 0.0, y: 0.0 },
            facing: Facing::Left,
            jump_count: 0,
            fall_count: 0,
            hit: false,
            hit_count: 0,
            won: false,
            dead: false,
            score: 0,
        }
    }

    pub fn can_jump(&self) -> bool {
        self.jump_count < MAX_JUMPS
    }

    /// Launch upwards. Returns false (and does nothing) once both jumps are spent.
    pub fn jump(&mut self) -> bool {
        if !self.can_jump() {
            return false;
        }
        self.velocity.y = -GRAVITY * JUMP_STRENGTH;
        self.jump_count += 1;
        if self.jump_count == 1 {
            self.fall_count = 0;
        }
        true
    }

    /// Walk left. Returns true when the facing direction changed.
    pub fn move_left(&mut self, speed: f32) -> bool {
        self.velocity.x = -speed;
        self.turn(Facing::Left)
    }

    /// Walk right. Returns true when the facing direction changed.
    pub fn move_right(&mut self, speed: f32) -> bool {
        self.velocity.x = speed;
        self.turn(Facing::Right)
    }

    fn turn(&mut self, facing: Facing) -> bool {
        if self.facing == facing {
            return false;
        }
        self.facing = facing;
        true
    }

    pub fn make_hit(&mut self) {
        self.hit = true;
    }

    /// One physics step: ramp gravity, integrate `position`, run the flinch timer.
    pub fn integrate(&mut self, position: &mut Vector2, fps: u32) {
        let fps = fps.max(1);
        self.velocity.y += (self.fall_count as f32 / fps as f32 * GRAVITY).min(1.0);
        position.x += self.velocity.x;
        position.y += self.velocity.y;

        if self.hit {
            self.hit_count += 1;
        }
        if self.hit_count > fps * 2 {
            self.hit = false;
            self.hit_count = 0;
        }

        self.fall_count += 1;
    }

    /// Feet touched the top of something.
    pub fn landed(&mut self) {
        self.fall_count = 0;
        self.velocity.y = 0.0;
        self.jump_count = 0;
    }

    /// Head bumped the underside of something.
    ///
    /// The vertical velocity is mirrored, not zeroed, so the player is pushed
    /// down at the speed it was rising.
    pub fn hit_head(&mut self) {
        self.velocity.y = -self.velocity.y;
    }

    /// Animation bucket for the current state, suffixed with the facing.
    pub fn animation_bucket(&self) -> String {
        let state = if self.hit {
            "hit"
        } else if self.velocity.y < 0.0 {
            match self.jump_count {
                1 => "jump",
                2 => "double_jump",
                _ => "idle",
            }
        } else if self.velocity.y > GRAVITY * 2.0 {
            "fall"
        } else if self.velocity.x != 0.0 {
            "run"
        } else {
            "idle"
        };
        format!("{}_{}", state, self.facing.suffix())
    }
}
