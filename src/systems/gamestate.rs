//! Game state systems.
//!
//! Systems here only *request* transitions through [`NextGameState`]; the
//! observer in [`crate::events::gamestate`] applies them.
use crate::components::boxcollider::BoxCollider;
use crate::components::mapposition::MapPosition;
use crate::components::player::Player;
use crate::events::gamestate::GameStateChangedEvent;
use crate::resources::gameconfig::GameConfig;
use crate::resources::gamestate::{GameState, GameStates, NextGameState, NextGameStates};
use crate::resources::input::InputState;
use bevy_ecs::prelude::*;

pub fn check_pending_state(mut commands: Commands, next_state: Res<NextGameState>) {
    if let NextGameStates::Pending(_new_state) = next_state.get() {
        commands.trigger(GameStateChangedEvent {});
    }
}

pub fn state_is_playing(state: Res<GameState>) -> bool {
    matches!(state.get(), GameStates::Playing)
}

pub fn state_is_end_screen(state: Res<GameState>) -> bool {
    matches!(state.get(), GameStates::Won | GameStates::Lost)
}

/// Where the session goes next given the current state and this frame's input.
///
/// Closing the window always quits. On the lose screen any key restarts,
/// on the win screen any key exits.
pub fn next_session_state(current: &GameStates, input: &InputState) -> Option<GameStates> {
    if input.close_requested {
        return Some(GameStates::Quit);
    }
    if !input.any_key_pressed {
        return None;
    }
    match current {
        GameStates::Lost => Some(GameStates::Restarting),
        GameStates::Won => Some(GameStates::Quit),
        _ => None,
    }
}

pub fn session_input(
    input: Res<InputState>,
    state: Res<GameState>,
    mut next_state: ResMut<NextGameState>,
) {
    if let Some(next) = next_session_state(state.get(), &input) {
        next_state.set(next);
    }
}

/// End the round when the player died, fell below the viewport or won.
pub fn check_terminal_conditions(
    players: Query<(&Player, &MapPosition, &BoxCollider)>,
    config: Res<GameConfig>,
    mut next_state: ResMut<NextGameState>,
) {
    let Ok((player, position, collider)) = players.single() else {
        return;
    };
    let (top_left, _) = collider.aabb(position.pos);
    if player.dead || top_left.y > config.window_height as f32 {
        next_state.set(GameStates::Lost);
    } else if player.won {
        next_state.set(GameStates::Won);
    }
}
