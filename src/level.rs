//! Level source parsing.
//!
//! A level is a grid of characters, one per tile:
//!
//! | symbol     | produces                                        |
//! |------------|-------------------------------------------------|
//! | `P`        | player spawn (last one wins)                    |
//! | `B` or `#` | terrain block                                   |
//! | `F`        | goal                                            |
//! | `Q`        | collectible, half a tile, centered in the cell  |
//! | `E`        | patrolling enemy                                |
//!
//! Anything else is empty space. Rows can be written as a list literal
//! (`LEVEL = ["..P..", 'BBBBB',]`), as bare double-quoted strings, or as plain
//! lines; the first encoding that yields rows wins. The grid is anchored so
//! that its last row touches the bottom of the viewport.

use std::iter::Peekable;
use std::path::Path;
use std::str::Chars;

use log::{info, warn};
use raylib::prelude::Vector2;

use crate::components::entitykind::EntityKind;
use crate::components::patrol::{DEFAULT_PATROL_SPEED, DEFAULT_PATROL_TILES};

/// Where the player appears when the level has no `P`.
pub const DEFAULT_SPAWN: Vector2 = Vector2 { x: 100.0, y: 100.0 };

/// Size of the fire hazard in the demo level, before sprite scaling.
const DEMO_FIRE_SIZE: Vector2 = Vector2 { x: 16.0, y: 32.0 };

/// One entity to spawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub kind: EntityKind,
    pub pos: Vector2,
    pub size: Vector2,
    /// Patrol distance and speed for enemies.
    pub patrol: Option<(f32, f32)>,
}

impl Placement {
    fn tile(kind: EntityKind, x: f32, y: f32, size: f32) -> Self {
        Self {
            kind,
            pos: Vector2::new(x, y),
            size: Vector2::new(size, size),
            patrol: None,
        }
    }
}

/// Parsed level: optional spawn point plus entities in source order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LevelLayout {
    pub spawn: Option<Vector2>,
    pub placements: Vec<Placement>,
}

impl LevelLayout {
    pub fn spawn_or_default(&self) -> Vector2 {
        self.spawn.unwrap_or(DEFAULT_SPAWN)
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}

/// Body of one quoted string; the opening `quote` was already consumed.
fn string_literal(chars: &mut Peekable<Chars>, quote: char) -> Result<String, String> {
    let mut out = String::new();
    loop {
        match chars.next() {
            Some('\\') => match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some(c) => out.push(c),
                None => return Err("unterminated escape".to_string()),
            },
            Some(c) if c == quote => return Ok(out),
            Some('\n') | None => return Err(format!("unterminated {}-quoted string", quote)),
            Some(c) => out.push(c),
        }
    }
}

fn skip_whitespace(chars: &mut Peekable<Chars>) {
    while chars.next_if(|c| c.is_whitespace()).is_some() {}
}

/// Comma-separated `'...'` or `"..."` strings, trailing comma allowed.
fn string_list(body: &str) -> Result<Vec<String>, String> {
    let mut chars = body.chars().peekable();
    let mut rows = Vec::new();
    loop {
        skip_whitespace(&mut chars);
        match chars.next() {
            None => break,
            Some(quote @ ('\'' | '"')) => rows.push(string_literal(&mut chars, quote)?),
            Some(c) => return Err(format!("expected a string, found '{}'", c)),
        }
        skip_whitespace(&mut chars);
        match chars.next() {
            None => break,
            Some(',') => {}
            Some(c) => return Err(format!("expected ',' after a row, found '{}'", c)),
        }
    }
    Ok(rows)
}

/// Rows of a list literal: the text between the first `[` and the last `]`.
fn list_literal_rows(text: &str) -> Option<Vec<String>> {
    let start = text.find('[')?;
    let end = text.rfind(']')?;
    if end < start {
        return None;
    }
    match string_list(&text[start + 1..end]) {
        Ok(rows) if !rows.is_empty() => Some(rows),
        Ok(_) => None,
        Err(e) => {
            warn!("Level list literal did not parse ({}), trying other encodings", e);
            None
        }
    }
}

/// Every non-empty double-quoted string, left to right.
fn quoted_rows(text: &str) -> Option<Vec<String>> {
    let mut rows = Vec::new();
    let mut rest = text;
    while let Some(open) = rest.find('"') {
        let after = &rest[open + 1..];
        match after.find('"') {
            // `""` is not a row; the closing quote may open the next one.
            Some(0) => rest = after,
            Some(close) => {
                rows.push(after[..close].to_string());
                rest = &after[close + 1..];
            }
            None => break,
        }
    }
    if rows.is_empty() { None } else { Some(rows) }
}

fn plain_rows(text: &str) -> Vec<String> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

/// Extract grid rows from level source text.
pub fn parse_rows(text: &str) -> Vec<String> {
    if let Some(rows) = list_literal_rows(text) {
        return rows;
    }
    if let Some(rows) = quoted_rows(text) {
        return rows;
    }
    plain_rows(text)
}

/// Read and parse a level file. A missing or unreadable file is an empty level.
pub fn read_rows(path: &Path) -> Vec<String> {
    match std::fs::read_to_string(path) {
        Ok(text) => parse_rows(&text),
        Err(e) => {
            warn!("Level {} unavailable ({}), using an empty level", path.display(), e);
            Vec::new()
        }
    }
}

/// Turn grid rows into a layout. `viewport_height` anchors the last row.
pub fn build_layout<S: AsRef<str>>(rows: &[S], tile_size: u32, viewport_height: u32) -> LevelLayout {
    let tile = tile_size as i64;
    let base_y = viewport_height as i64 - rows.len() as i64 * tile;
    let mut layout = LevelLayout::default();

    for (row_i, row) in rows.iter().enumerate() {
        for (col_i, ch) in row.as_ref().chars().enumerate() {
            let x = col_i as i64 * tile;
            let y = base_y + row_i as i64 * tile;
            match ch {
                'P' => layout.spawn = Some(Vector2::new(x as f32, y as f32)),
                'B' | '#' => layout.placements.push(Placement::tile(
                    EntityKind::Terrain,
                    x as f32,
                    y as f32,
                    tile as f32,
                )),
                'F' => layout.placements.push(Placement::tile(
                    EntityKind::Goal,
                    x as f32,
                    y as f32,
                    tile as f32,
                )),
                'Q' => {
                    let size = tile / 2;
                    let inset = (tile - size) / 2;
                    layout.placements.push(Placement::tile(
                        EntityKind::Collectible,
                        (x + inset) as f32,
                        (y + inset) as f32,
                        size as f32,
                    ));
                }
                'E' => {
                    let mut enemy =
                        Placement::tile(EntityKind::Enemy, x as f32, y as f32, tile as f32);
                    enemy.patrol = Some((
                        (tile * DEFAULT_PATROL_TILES as i64) as f32,
                        DEFAULT_PATROL_SPEED,
                    ));
                    layout.placements.push(enemy);
                }
                _ => {}
            }
        }
    }
    layout
}

/// Built-in layout used when a level source produces no entities: a long
/// floor, two floating blocks and a burning fire trap.
pub fn demo_layout(tile_size: u32, viewport_width: u32, viewport_height: u32) -> LevelLayout {
    let tile = tile_size.max(1) as i64;
    let w = viewport_width as i64;
    let h = viewport_height as f32;
    let size = tile as f32;
    let mut placements = Vec::new();

    // Python-style floor division so the floor starts left of the screen.
    let first = (-w).div_euclid(tile);
    let last = (w * 2).div_euclid(tile);
    for i in first..last {
        placements.push(Placement::tile(
            EntityKind::Terrain,
            (i * tile) as f32,
            h - size,
            size,
        ));
    }
    placements.push(Placement::tile(EntityKind::Terrain, 0.0, h - size * 2.0, size));
    placements.push(Placement::tile(
        EntityKind::Terrain,
        size * 3.0,
        h - size * 4.0,
        size,
    ));
    placements.push(Placement {
        kind: EntityKind::Hazard,
        pos: Vector2::new(100.0, h - size - 64.0),
        size: DEMO_FIRE_SIZE,
        patrol: None,
    });

    LevelLayout {
        spawn: None,
        placements,
    }
}

/// Load the level at `path`; fall back to the demo layout when it has no entities.
///
/// The spawn point of the file is kept even when the demo layout is used.
pub fn load_layout(path: &Path, tile_size: u32, viewport: (u32, u32)) -> LevelLayout {
    let rows = read_rows(path);
    let mut layout = build_layout(&rows, tile_size, viewport.1);
    info!(
        "Loaded level: {}, player_start={:?}, objects={}",
        path.display(),
        layout.spawn.map(|p| (p.x, p.y)),
        layout.placements.len()
    );
    if layout.is_empty() {
        info!("Level has no objects, using the demo layout");
        let demo = demo_layout(tile_size, viewport.0, viewport.1);
        layout.placements = demo.placements;
    }
    layout
}
