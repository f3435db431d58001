//! Platformer main entry point.
//!
//! A side-scrolling 2D platformer written in Rust using:
//! - **raylib** for windowing, graphics and input
//! - **bevy_ecs** for entity-component-system architecture
//!
//! # Main Loop
//!
//! 1. Load `config.ini`, apply command line overrides
//! 2. Open the window, load sprites, build the ECS world and the level
//! 3. Every frame:
//!    - read input, request session transitions, apply them
//!    - while playing, run one simulation tick
//!    - draw the level (or the win/lose screen)
//!    - while playing, move the camera
//! 4. Leave the loop once the state machine reaches `Quit`
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --level map.txt
//! ```

// Do not create console on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use std::path::PathBuf;

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use clap::Parser;

use platformer::events::gamestate::observe_gamestate_change_event;
use platformer::game;
use platformer::resources::gameconfig::GameConfig;
use platformer::resources::gamestate::{GameState, GameStates};
use platformer::systems::gamestate::{
    check_pending_state, session_input, state_is_end_screen, state_is_playing,
};
use platformer::systems::input::update_input_state;
use platformer::systems::render::{render_end_screen, render_playing};

/// Side-scrolling platformer
#[derive(Parser)]
#[command(version, about = "Run, jump and collect your way to the trophy.")]
struct Cli {
    /// Configuration file (INI).
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Level source file, overrides `[level] path`.
    #[arg(long, value_name = "PATH")]
    level: Option<PathBuf>,

    /// Tile size in pixels, overrides `[level] tile_size`.
    #[arg(long, value_name = "N")]
    tile_size: Option<u32>,
}

fn load_config(cli: &Cli) -> GameConfig {
    let mut config = GameConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        log::warn!("{}; using defaults", e);
    }
    if let Some(level) = &cli.level {
        config.level_path = level.clone();
    }
    if let Some(tile_size) = cli.tile_size {
        config.tile_size = tile_size.max(2);
    }
    config
}

fn run(config: GameConfig) -> Result<(), String> {
    let (width, height) = config.window_size();
    let (mut rl, thread) = raylib::init()
        .size(width as i32, height as i32)
        .title("Platformer")
        .build();
    rl.set_target_fps(config.target_fps);
    // Disable ESC to exit; closing the window goes through the state machine.
    rl.set_exit_key(None);

    let (sprites, animations, assets) = game::load_assets(&mut rl, &thread, &config)?;
    let target_fps = config.target_fps;
    let screen_fps = config.screen_fps;

    // --------------- ECS world + resources ---------------
    let mut world = World::new();
    game::init_world(&mut world, config);
    world.insert_resource(animations);
    world.insert_resource(assets);
    world.insert_non_send_resource(sprites);
    world.insert_non_send_resource(rl);
    world.insert_non_send_resource(thread);
    world.spawn(Observer::new(observe_gamestate_change_event));
    world.flush();

    game::load_level(&mut world);

    let mut frame = Schedule::default();
    frame.add_systems((update_input_state, session_input, check_pending_state).chain());
    let mut tick = game::build_tick_schedule();
    let mut draw = Schedule::default();
    draw.add_systems((
        render_playing.run_if(state_is_playing),
        render_end_screen.run_if(state_is_end_screen),
    ));
    let mut camera = game::build_camera_schedule();

    // --------------- Main loop ---------------
    let mut current_fps = target_fps;
    loop {
        frame.run(&mut world);

        let state = world.resource::<GameState>().get().clone();
        match state {
            GameStates::Quit => break,
            GameStates::Playing => tick.run(&mut world),
            _ => {}
        }

        draw.run(&mut world);
        if matches!(world.resource::<GameState>().get(), GameStates::Playing) {
            camera.run(&mut world);
        }

        let wanted_fps = match world.resource::<GameState>().get() {
            GameStates::Won | GameStates::Lost => screen_fps,
            _ => target_fps,
        };
        if wanted_fps != current_fps {
            world
                .non_send_resource_mut::<raylib::RaylibHandle>()
                .set_target_fps(wanted_fps);
            current_fps = wanted_fps;
        }
        world.clear_trackers();
    }
    log::info!("Bye");
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = load_config(&cli);
    log::info!(
        "Starting with level {} (tile size {})",
        config.level_path.display(),
        config.tile_size
    );

    if let Err(e) = run(config) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
