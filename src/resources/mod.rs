//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into the ECS world and
//! accessed by systems during execution: input state, timing, asset stores,
//! the camera and the session state machine.
//!
//! Overview
//! - `animationstore` – frames of every animation bucket, keyed by sheet and bucket
//! - `camera2d` – shared 2D camera, level bounds and the scrolling policy
//! - `gameconfig` – INI-backed settings (window, physics tuning, level path)
//! - `gamestate` – authoritative and pending high-level game state
//! - `input` – per-frame keyboard state of keys relevant to the game
//! - `levelassets` – tile sprites and level source used to (re)build a level
//! - `spritestore` – loaded textures and the sprite cache
//! - `touched` – entities touched by the player during the current tick
//! - `worldtime` – fixed tick rate and tick counter
pub mod animationstore;
pub mod camera2d;
pub mod gameconfig;
pub mod gamestate;
pub mod input;
pub mod levelassets;
pub mod spritestore;
pub mod touched;
pub mod worldtime;
