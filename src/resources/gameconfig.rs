//! Game configuration resource.
//!
//! Manages game settings loaded from an INI configuration file. Provides
//! defaults for safe startup so a missing file still yields a playable game.
//!
//! # Configuration File Format
//!
//! ```ini
//! [window]
//! width = 1200
//! height = 710
//! target_fps = 60
//! screen_fps = 30
//!
//! [player]
//! velocity = 5
//! probe_distance = 10
//!
//! [level]
//! path = map.txt
//! tile_size = 96
//!
//! [assets]
//! root = assets
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

/// Default safe values for startup
const DEFAULT_WINDOW_WIDTH: u32 = 1200;
const DEFAULT_WINDOW_HEIGHT: u32 = 710;
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_SCREEN_FPS: u32 = 30;
const DEFAULT_PLAYER_VELOCITY: f32 = 5.0;
const DEFAULT_PROBE_DISTANCE: f32 = DEFAULT_PLAYER_VELOCITY * 2.0;
const DEFAULT_TILE_SIZE: u32 = 96;
const DEFAULT_LEVEL_PATH: &str = "map.txt";
const DEFAULT_ASSETS_ROOT: &str = "assets";
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Game configuration resource.
#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    /// Viewport width in pixels.
    pub window_width: u32,
    /// Viewport height in pixels.
    pub window_height: u32,
    /// Simulation ticks per second while playing.
    pub target_fps: u32,
    /// Poll rate of the win/lose screens.
    pub screen_fps: u32,
    /// Horizontal walking speed in pixels per tick.
    pub player_velocity: f32,
    /// How far ahead the horizontal collision probe looks, in pixels.
    pub probe_distance: f32,
    /// Level source file.
    pub level_path: PathBuf,
    /// Size of a level grid cell in pixels.
    pub tile_size: u32,
    /// Directory holding sprites and backgrounds.
    pub assets_root: PathBuf,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            screen_fps: DEFAULT_SCREEN_FPS,
            player_velocity: DEFAULT_PLAYER_VELOCITY,
            probe_distance: DEFAULT_PROBE_DISTANCE,
            level_path: PathBuf::from(DEFAULT_LEVEL_PATH),
            tile_size: DEFAULT_TILE_SIZE,
            assets_root: PathBuf::from(DEFAULT_ASSETS_ROOT),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply_ini(&config);

        info!(
            "Loaded config: {}x{} window, fps={}, tile={}, level={}",
            self.window_width,
            self.window_height,
            self.target_fps,
            self.tile_size,
            self.level_path.display()
        );

        Ok(())
    }

    /// Load configuration from INI text instead of a file.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply_ini(&config);
        Ok(())
    }

    fn apply_ini(&mut self, config: &Ini) {
        // [window] section
        if let Some(width) = config.getuint("window", "width").ok().flatten() {
            self.window_width = width as u32;
        }
        if let Some(height) = config.getuint("window", "height").ok().flatten() {
            self.window_height = height as u32;
        }
        if let Some(fps) = config.getuint("window", "target_fps").ok().flatten() {
            self.target_fps = (fps as u32).max(1);
        }
        if let Some(fps) = config.getuint("window", "screen_fps").ok().flatten() {
            self.screen_fps = (fps as u32).max(1);
        }

        // [player] section
        if let Some(vel) = config.getfloat("player", "velocity").ok().flatten() {
            self.player_velocity = vel as f32;
        }
        if let Some(probe) = config.getfloat("player", "probe_distance").ok().flatten() {
            self.probe_distance = probe as f32;
        }

        // [level] section
        if let Some(path) = config.get("level", "path") {
            self.level_path = PathBuf::from(path);
        }
        if let Some(size) = config.getuint("level", "tile_size").ok().flatten() {
            self.tile_size = (size as u32).max(2);
        }

        // [assets] section
        if let Some(root) = config.get("assets", "root") {
            self.assets_root = PathBuf::from(root);
        }
    }

    /// Get the window size.
    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }
}
