//! Game setup: assets, level spawning, restart and the tick schedules.
//!
//! Everything here works on a plain [`World`]. Only [`load_assets`] needs a
//! window; the rest runs headless, which is how the integration tests drive
//! whole ticks.

use std::path::{Path, PathBuf};

use bevy_ecs::prelude::*;
use log::{debug, info};
use raylib::prelude::*;

use crate::components::animation::Animation;
use crate::components::boxcollider::BoxCollider;
use crate::components::entitykind::{EntityKind, LevelEntity};
use crate::components::hazard::Hazard;
use crate::components::mapposition::MapPosition;
use crate::components::patrol::Patrol;
use crate::components::player::{DEFAULT_PLAYER_SIZE, Facing, Player};
use crate::components::sprite::{Sprite, SpriteHandle};
use crate::level::{LevelLayout, Placement, load_layout};
use crate::resources::animationstore::AnimationStore;
use crate::resources::camera2d::{Camera2DRes, LevelBounds};
use crate::resources::gameconfig::GameConfig;
use crate::resources::gamestate::{GameState, GameStates, NextGameState};
use crate::resources::input::InputState;
use crate::resources::levelassets::{LevelAssets, LevelSource};
use crate::resources::spritestore::{SpriteKey, SpriteStore};
use crate::resources::touched::TouchedEntities;
use crate::resources::worldtime::WorldTime;
use crate::systems::animation::{hazard_animation, player_animation};
use crate::systems::camera::update_camera;
use crate::systems::collision::vertical_collision;
use crate::systems::effects::dispatch_touch_effects;
use crate::systems::gamestate::{check_pending_state, check_terminal_conditions};
use crate::systems::patrol::patrol_movement;
use crate::systems::physics::player_physics;
use crate::systems::playercontroller::{horizontal_movement, player_jump};

pub const PLAYER_SHEET: &str = "player";
pub const FIRE_SHEET: &str = "fire";

const PLAYER_SHEET_DIR: &str = "MainCharacters/MaskDude";
const PLAYER_FRAME: i32 = 32;
const FIRE_SHEET_DIR: &str = "Traps/Fire";
const FIRE_FRAME: (i32, i32) = (16, 32);
const TERRAIN_IMAGE: &str = "Terrain/Terrain.png";
/// Top-left of the grass block inside the terrain atlas.
const TERRAIN_CROP: (i32, i32) = (96, 0);
const GOAL_IMAGE: &str = "Items/Checkpoints/End/End (Idle).png";
const COLLECTIBLE_IMAGE: &str = "Traps/Spiked Ball/Spiked Ball.png";
const ENEMY_IMAGE: &str = "Traps/Spike Head/Idle.png";
const BACKGROUND_IMAGE: &str = "Background/Blue.png";

/// Asset lookup: next to the level file first, then the configured root.
struct AssetPaths {
    preferred: PathBuf,
    default: PathBuf,
}

impl AssetPaths {
    fn new(config: &GameConfig) -> Self {
        let level_dir = config
            .level_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Self {
            preferred: level_dir.join("assets"),
            default: config.assets_root.clone(),
        }
    }

    fn preferred(&self, rel: &str) -> PathBuf {
        self.preferred.join(rel)
    }

    fn default(&self, rel: &str) -> PathBuf {
        self.default.join(rel)
    }

    /// First of preferred/default that exists, or the default for the error message.
    fn existing(&self, rel: &str) -> PathBuf {
        let preferred = self.preferred(rel);
        if preferred.exists() {
            preferred
        } else {
            self.default(rel)
        }
    }
}

/// Load every sprite the game uses.
///
/// Returns the texture owner together with the plain-data resources built
/// from it. Missing optional images fall back to the configured asset root;
/// anything missing there is an error.
pub fn load_assets(
    rl: &mut RaylibHandle,
    th: &RaylibThread,
    config: &GameConfig,
) -> Result<(SpriteStore, AnimationStore, LevelAssets), String> {
    let paths = AssetPaths::new(config);
    let tile = config.tile_size.max(2) as i32;
    let mut store = SpriteStore::new();
    let mut animations = AnimationStore::new();

    let player = store.load_sheet_dir(
        rl,
        th,
        &paths.existing(PLAYER_SHEET_DIR),
        PLAYER_FRAME,
        PLAYER_FRAME,
        true,
    )?;
    animations.insert_sheet(PLAYER_SHEET, player);
    let fire = store.load_sheet_dir(
        rl,
        th,
        &paths.existing(FIRE_SHEET_DIR),
        FIRE_FRAME.0,
        FIRE_FRAME.1,
        false,
    )?;
    animations.insert_sheet(FIRE_SHEET, fire);

    let terrain = SpriteKey::new(paths.existing(TERRAIN_IMAGE))
        .cropped(TERRAIN_CROP.0, TERRAIN_CROP.1, tile / 2, tile / 2)
        .scaled(tile, tile);
    let block = store.get_or_load(rl, th, &terrain)?;

    let mut image = |rel: &str, size: i32| {
        let preferred = paths.preferred(rel);
        store.load_with_fallback(
            rl,
            th,
            Some(preferred.as_path()),
            &paths.default(rel),
            [size, size],
        )
    };
    let goal = image(GOAL_IMAGE, tile)?;
    let collectible = image(COLLECTIBLE_IMAGE, tile / 2)?;
    let enemy = image(ENEMY_IMAGE, tile)?;

    let background_key = SpriteKey::new(paths.existing(BACKGROUND_IMAGE));
    let background = match store.get_or_load(rl, th, &background_key) {
        Ok(handle) => Some(handle),
        Err(e) => {
            log::warn!("{}; drawing without a background", e);
            None
        }
    };

    info!(
        "Loaded {} textures, {} animation buckets",
        store.len(),
        animations.animations.len()
    );
    let assets = LevelAssets {
        block,
        goal,
        collectible,
        enemy,
        background,
    };
    Ok((store, animations, assets))
}

/// Insert the session resources that do not depend on a window.
///
/// Asset resources ([`AnimationStore`], [`LevelAssets`]) are inserted by the
/// caller, from [`load_assets`] or from test fixtures.
pub fn init_world(world: &mut World, config: GameConfig) {
    world.insert_resource(LevelSource {
        path: config.level_path.clone(),
        tile_size: config.tile_size,
    });
    world.insert_resource(WorldTime::with_fps(config.target_fps));
    world.insert_resource(config);
    world.insert_resource(InputState::default());
    world.insert_resource(TouchedEntities::default());
    world.insert_resource(GameState::new());
    world.insert_resource(NextGameState::new());
    world.insert_resource(Camera2DRes::default());
    world.insert_resource(LevelBounds::new(0.0, 0.0));
}

fn placement_sprite(
    placement: &Placement,
    assets: &LevelAssets,
    animations: &AnimationStore,
) -> SpriteHandle {
    match placement.kind {
        EntityKind::Terrain => assets.block.clone(),
        EntityKind::Goal => assets.goal.clone(),
        EntityKind::Collectible => assets.collectible.clone(),
        EntityKind::Enemy => assets.enemy.clone(),
        EntityKind::Hazard => animations.frames(FIRE_SHEET, "on")[0].clone(),
        EntityKind::None => SpriteHandle::solid(placement.size.x as u32, placement.size.y as u32),
    }
}

/// Spawn the player and every placement of `layout`, then fix the level
/// bounds and put the camera at the left edge.
pub fn spawn_level(world: &mut World, layout: &LevelLayout) {
    let mut bundles = Vec::with_capacity(layout.placements.len());
    {
        let assets = world.resource::<LevelAssets>();
        let animations = world.resource::<AnimationStore>();
        for placement in &layout.placements {
            let handle = placement_sprite(placement, assets, animations);
            bundles.push((placement, handle));
        }
    }

    for (placement, handle) in bundles {
        let mut entity = world.spawn((
            MapPosition::new(placement.pos.x, placement.pos.y),
            BoxCollider::new(placement.size.x, placement.size.y),
            Sprite::new(handle),
            placement.kind,
            LevelEntity,
        ));
        match placement.kind {
            EntityKind::Hazard => {
                let mut hazard = Hazard::default();
                hazard.on();
                entity.insert((hazard, Animation::new(FIRE_SHEET, hazard.state.bucket())));
            }
            EntityKind::Enemy => {
                if let Some((distance, speed)) = placement.patrol {
                    entity.insert(Patrol::new(placement.pos.x, distance, speed));
                }
            }
            _ => {}
        }
    }

    let spawn = layout.spawn_or_default();
    let player = Player::new();
    let bucket = format!("idle_{}", Facing::default().suffix());
    world.spawn((
        MapPosition::new(spawn.x, spawn.y),
        BoxCollider::new(DEFAULT_PLAYER_SIZE, DEFAULT_PLAYER_SIZE),
        Sprite::new(SpriteHandle::solid(
            DEFAULT_PLAYER_SIZE as u32,
            DEFAULT_PLAYER_SIZE as u32,
        )),
        Animation::new(PLAYER_SHEET, bucket),
        player,
        LevelEntity,
    ));

    let viewport_width = world.resource::<GameConfig>().window_width as f32;
    let bounds = LevelBounds::from_edges(
        layout
            .placements
            .iter()
            .map(|p| (p.pos.x, p.pos.x + p.size.x)),
        viewport_width,
    );
    debug!("Level bounds {:?}", bounds);
    world.insert_resource(bounds);
    world.insert_resource(Camera2DRes::at(bounds.min_x));
}

/// Build the level from its source and spawn it.
pub fn load_level(world: &mut World) {
    let source = world.resource::<LevelSource>().clone();
    let viewport = world.resource::<GameConfig>().window_size();
    let layout = load_layout(&source.path, source.tile_size, viewport);
    spawn_level(world, &layout);
}

/// Tear the level down and rebuild it from its source file.
///
/// The player is recreated, so the score starts again at zero.
pub fn restart_level(world: &mut World) -> Result<(), String> {
    if !world.contains_resource::<LevelSource>() {
        return Err("No level source to restart from".to_string());
    }
    let stale: Vec<Entity> = world
        .query_filtered::<Entity, With<LevelEntity>>()
        .iter(world)
        .collect();
    for entity in stale {
        world.despawn(entity);
    }
    world.resource_mut::<TouchedEntities>().clear();

    load_level(world);
    world.resource_mut::<GameState>().set(GameStates::Playing);
    info!("Level restarted");
    Ok(())
}

/// Systems of one gameplay tick, in order.
///
/// Terminal transitions requested by the tick are applied before it ends, so
/// the frame drawn right after already shows the end screen.
pub fn build_tick_schedule() -> Schedule {
    let mut tick = Schedule::default();
    tick.add_systems(
        (
            player_jump,
            player_physics,
            player_animation,
            hazard_animation,
            patrol_movement,
            horizontal_movement,
            vertical_collision,
            dispatch_touch_effects,
            check_terminal_conditions,
            check_pending_state,
        )
            .chain(),
    );
    tick
}

/// Camera follow, run after the frame was drawn.
pub fn build_camera_schedule() -> Schedule {
    let mut camera = Schedule::default();
    camera.add_systems(update_camera);
    camera
}
