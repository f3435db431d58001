//! Event types and observers used by the game.
//!
//! Submodules:
//! - [`gamestate`] – state transition notifications for the high-level game flow
pub mod gamestate;
