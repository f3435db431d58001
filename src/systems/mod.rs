//! Game systems.
//!
//! One module per phase of a tick, listed in the order the tick runs them.
//!
//! Submodules overview
//! - [`input`] – read hardware input and update [`crate::resources::input::InputState`]
//! - [`playercontroller`] – jump on the key edge, walk left/right when unblocked
//! - [`physics`] – gravity ramp and position integration for the player
//! - [`animation`] – player bucket selection and hazard looping
//! - [`patrol`] – back-and-forth enemy motion
//! - [`collision`] – horizontal probes and vertical landing/head-bump resolution
//! - [`effects`] – apply what touching each entity does to the player
//! - [`gamestate`] – terminal conditions, session input and pending transitions
//! - [`render`] – draw the level, HUD and end screens using Raylib
//! - [`camera`] – horizontal scrolling bounded by the level

pub mod animation;
pub mod camera;
pub mod collision;
pub mod effects;
pub mod gamestate;
pub mod input;
pub mod patrol;
pub mod physics;
pub mod playercontroller;
pub mod render;
