//! Input systems.
//!
//! - [`update_input_state`] reads hardware input from Raylib each frame and
//!   writes the results into [`crate::resources::input::InputState`].
//! - [`BoolState::update`] turns raw key readings into held/edge state, so the
//!   edge logic can be driven without a window.
use bevy_ecs::prelude::*;
use raylib::ffi::KeyboardKey;

use crate::resources::input::{BoolState, InputState};

impl BoolState {
    /// Record this frame's raw key readings.
    pub fn update(&mut self, down: bool, pressed: bool) {
        self.active = down;
        self.just_pressed = pressed;
    }
}

/// Poll Raylib for keyboard input and update the `InputState` resource.
pub fn update_input_state(mut input: ResMut<InputState>, mut rl: NonSendMut<raylib::RaylibHandle>) {
    let left = input.left.key_binding;
    let right = input.right.key_binding;
    let jump = input.jump.key_binding;

    let handle: &raylib::RaylibHandle = &rl;
    let read = |key: KeyboardKey| (handle.is_key_down(key), handle.is_key_pressed(key));
    let (down, pressed) = read(left);
    input.left.update(down, pressed);
    let (down, pressed) = read(right);
    input.right.update(down, pressed);
    let (down, pressed) = read(jump);
    input.jump.update(down, pressed);

    // Drains the whole key queue; only whether anything went down matters.
    let mut any = false;
    while rl.get_key_pressed().is_some() {
        any = true;
    }
    input.any_key_pressed = any;
    input.close_requested = rl.window_should_close();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_tracks_press_edge() {
        let mut state = BoolState::default();
        state.update(true, true);
        assert!(state.active && state.just_pressed);
        state.update(true, false);
        assert!(state.active && !state.just_pressed);
        state.update(false, false);
        assert!(!state.active);
    }
}
