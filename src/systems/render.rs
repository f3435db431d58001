//! Rendering.
//!
//! Drawing happens inside raylib's drawing scopes, opened here from the
//! non-send [`RaylibHandle`]. The background and HUD are drawn in screen
//! space, level entities and the player through the shared [`Camera2DRes`].
//!
//! - [`render_playing`] draws a gameplay frame.
//! - [`render_end_screen`] draws the win or lose overlay on top of a frozen
//!   background.
use std::ffi::CString;

use bevy_ecs::prelude::*;
use raylib::ffi;
use raylib::prelude::*;

use crate::components::entitykind::EntityKind;
use crate::components::mapposition::MapPosition;
use crate::components::player::Player;
use crate::components::sprite::{Sprite, SpriteHandle};
use crate::resources::camera2d::Camera2DRes;
use crate::resources::gameconfig::GameConfig;
use crate::resources::gamestate::{GameState, GameStates};
use crate::resources::levelassets::LevelAssets;
use crate::resources::spritestore::SpriteStore;

const HUD_FONT_SIZE: i32 = 30;
const TITLE_FONT_SIZE: i32 = 60;
const SUBTITLE_FONT_SIZE: i32 = 30;
const OVERLAY_ALPHA: u8 = 200;
const WIN_COLOR: Color = Color {
    r: 255,
    g: 215,
    b: 0,
    a: 255,
};
const LOSE_COLOR: Color = Color {
    r: 220,
    g: 20,
    b: 60,
    a: 255,
};

fn draw_handle<D: RaylibDraw>(d: &mut D, store: &SpriteStore, handle: &SpriteHandle, x: f32, y: f32) {
    if let Some(texture) = handle.texture.and_then(|id| store.texture(id)) {
        d.draw_texture(texture, x as i32, y as i32, Color::WHITE);
    }
}

/// Tile the background across the viewport. Not scrolled.
fn draw_background<D: RaylibDraw>(d: &mut D, store: &SpriteStore, assets: &LevelAssets, w: u32, h: u32) {
    let Some(background) = assets.background.as_ref() else {
        return;
    };
    if background.width == 0 || background.height == 0 {
        return;
    }
    for x in (0..w).step_by(background.width as usize) {
        for y in (0..h).step_by(background.height as usize) {
            draw_handle(d, store, background, x as f32, y as f32);
        }
    }
}

type LevelQuery<'w, 's> =
    Query<'w, 's, (&'static MapPosition, &'static Sprite), (With<EntityKind>, Without<Player>)>;
type PlayerQuery<'w, 's> = Query<'w, 's, (&'static Player, &'static MapPosition, &'static Sprite)>;

/// Level entities, then the player on top, through the camera.
fn draw_level(
    d: &mut RaylibDrawHandle,
    store: &SpriteStore,
    camera: &Camera2DRes,
    entities: &LevelQuery,
    players: &PlayerQuery,
) {
    let mut d2 = d.begin_mode2D(camera.0);
    for (position, sprite) in entities.iter() {
        draw_handle(&mut d2, store, &sprite.handle, position.pos.x, position.pos.y);
    }
    for (_, position, sprite) in players.iter() {
        draw_handle(&mut d2, store, &sprite.handle, position.pos.x, position.pos.y);
    }
}

fn text_width(text: &str, font_size: i32) -> i32 {
    match CString::new(text) {
        Ok(c_text) => unsafe { ffi::MeasureText(c_text.as_ptr(), font_size) },
        Err(_) => 0,
    }
}

/// Draw `text` horizontally centered in a viewport `w` pixels wide.
fn draw_centered<D: RaylibDraw>(d: &mut D, text: &str, y: i32, font_size: i32, w: u32, color: Color) {
    let x = (w as i32 - text_width(text, font_size)) / 2;
    d.draw_text(text, x, y, font_size, color);
}

/// Lines shown on the end screen for `state`, with the title color.
pub fn end_screen_text(state: &GameStates) -> Option<(&'static str, &'static str, Color)> {
    match state {
        GameStates::Won => Some(("You Win!", "Press any key to exit", WIN_COLOR)),
        GameStates::Lost => Some((
            "You Lost!",
            "Press any key to restart or close window to quit",
            LOSE_COLOR,
        )),
        _ => None,
    }
}

#[allow(clippy::too_many_arguments)]
pub fn render_playing(
    mut rl: NonSendMut<RaylibHandle>,
    th: NonSend<RaylibThread>,
    store: NonSend<SpriteStore>,
    camera: Res<Camera2DRes>,
    assets: Res<LevelAssets>,
    config: Res<GameConfig>,
    entities: LevelQuery,
    players: PlayerQuery,
) {
    let (w, h) = config.window_size();
    let mut d = rl.begin_drawing(&th);
    d.clear_background(Color::WHITE);
    draw_background(&mut d, &store, &assets, w, h);

    draw_level(&mut d, &store, &camera, &entities, &players);

    if let Ok((player, _, _)) = players.single() {
        d.draw_text(
            &format!("Score: {}", player.score),
            10,
            10,
            HUD_FONT_SIZE,
            Color::WHITE,
        );
    }
}

/// The level stays as it was when the round ended; the camera is frozen.
#[allow(clippy::too_many_arguments)]
pub fn render_end_screen(
    mut rl: NonSendMut<RaylibHandle>,
    th: NonSend<RaylibThread>,
    store: NonSend<SpriteStore>,
    camera: Res<Camera2DRes>,
    assets: Res<LevelAssets>,
    config: Res<GameConfig>,
    state: Res<GameState>,
    entities: LevelQuery,
    players: PlayerQuery,
) {
    let Some((title, subtitle, color)) = end_screen_text(state.get()) else {
        return;
    };
    let (w, h) = config.window_size();
    let mut d = rl.begin_drawing(&th);
    d.clear_background(Color::BLACK);
    draw_background(&mut d, &store, &assets, w, h);
    draw_level(&mut d, &store, &camera, &entities, &players);
    d.draw_rectangle(
        0,
        0,
        w as i32,
        h as i32,
        Color {
            r: 0,
            g: 0,
            b: 0,
            a: OVERLAY_ALPHA,
        },
    );

    let mut title_y = h as i32 / 3;
    if matches!(state.get(), GameStates::Won) {
        let trophy = &assets.goal;
        let x = (w as f32 - trophy.width as f32) / 2.0;
        let y = h as f32 / 4.0;
        draw_handle(&mut d, &store, trophy, x, y);
        title_y = y as i32 + trophy.height as i32 + 20;
    }
    draw_centered(&mut d, title, title_y, TITLE_FONT_SIZE, w, color);
    draw_centered(
        &mut d,
        subtitle,
        title_y + TITLE_FONT_SIZE + 20,
        SUBTITLE_FONT_SIZE,
        w,
        Color::WHITE,
    );
}
