//! ECS components for entities.
//!
//! This module groups all component types that can be attached to entities in
//! the level. Components define data such as position, rendering, collision,
//! animation and per-kind behavior.
//!
//! Submodules overview:
//! - [`animation`] – playback state for bucketed sprite animations
//! - [`boxcollider`] – axis-aligned rectangle used as a collision fast-reject
//! - [`entitykind`] – kind tag, touch-effect table and the level marker
//! - [`hazard`] – on/off animated trap
//! - [`mapposition`] – world-space top-left corner of an entity
//! - [`mask`] – per-pixel opacity maps for precise collision
//! - [`patrol`] – bounded back-and-forth enemy motion
//! - [`player`] – player velocity, jumps, flinch window and score
//! - [`sprite`] – current frame and its collision mask

pub mod animation;
pub mod boxcollider;
pub mod entitykind;
pub mod hazard;
pub mod mapposition;
pub mod mask;
pub mod patrol;
pub mod player;
pub mod sprite;
