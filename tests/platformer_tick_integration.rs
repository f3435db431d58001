//! Gameplay tick integration tests: landing, walking, touch effects, terminal
//! conditions, patrol, camera and restart, all on a headless world.

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use raylib::prelude::Vector2;

use platformer::components::entitykind::{EntityKind, LevelEntity};
use platformer::components::mapposition::MapPosition;
use platformer::components::patrol::Patrol;
use platformer::components::player::Player;
use platformer::components::sprite::SpriteHandle;
use platformer::events::gamestate::observe_gamestate_change_event;
use platformer::game::{self, FIRE_SHEET, PLAYER_SHEET};
use platformer::level::{LevelLayout, Placement, build_layout};
use platformer::resources::animationstore::AnimationStore;
use platformer::resources::camera2d::{Camera2DRes, LevelBounds};
use platformer::resources::gameconfig::GameConfig;
use platformer::resources::gamestate::{GameState, GameStates, NextGameState};
use platformer::resources::input::InputState;
use platformer::resources::levelassets::LevelAssets;
use platformer::systems::gamestate::check_pending_state;

const TILE: u32 = 96;
const PLAYER_SIZE: u32 = 50;

fn fixture_animations() -> AnimationStore {
    let mut store = AnimationStore::new();
    for state in ["idle", "run", "jump", "double_jump", "fall", "hit"] {
        for facing in ["left", "right"] {
            store.insert(
                PLAYER_SHEET,
                &format!("{}_{}", state, facing),
                vec![SpriteHandle::solid(PLAYER_SIZE, PLAYER_SIZE)],
            );
        }
    }
    for bucket in ["on", "off"] {
        store.insert(
            FIRE_SHEET,
            bucket,
            vec![SpriteHandle::solid(32, 64), SpriteHandle::solid(32, 64)],
        );
    }
    store
}

fn fixture_assets() -> LevelAssets {
    LevelAssets {
        block: SpriteHandle::solid(TILE, TILE),
        goal: SpriteHandle::solid(TILE, TILE),
        collectible: SpriteHandle::solid(TILE / 2, TILE / 2),
        enemy: SpriteHandle::solid(TILE, TILE),
        background: None,
    }
}

fn make_world(config: GameConfig) -> World {
    let mut world = World::new();
    game::init_world(&mut world, config);
    world.insert_resource(fixture_animations());
    world.insert_resource(fixture_assets());
    world.spawn(Observer::new(observe_gamestate_change_event));
    world.flush();
    world
}

fn world_with_layout(layout: &LevelLayout) -> World {
    let mut world = make_world(GameConfig::new());
    game::spawn_level(&mut world, layout);
    world
}

fn world_with_rows(rows: &[&str]) -> World {
    let height = GameConfig::new().window_height;
    world_with_layout(&build_layout(rows, TILE, height))
}

fn placement(kind: EntityKind, x: f32, y: f32, size: f32) -> Placement {
    Placement {
        kind,
        pos: Vector2::new(x, y),
        size: Vector2::new(size, size),
        patrol: None,
    }
}

fn player(world: &mut World) -> (Player, Vector2) {
    let mut query = world.query::<(&Player, &MapPosition)>();
    let (player, position) = query.single(world).unwrap();
    (player.clone(), position.pos)
}

fn state(world: &World) -> GameStates {
    world.resource::<GameState>().get().clone()
}

fn count_kind(world: &mut World, kind: EntityKind) -> usize {
    world
        .query::<&EntityKind>()
        .iter(world)
        .filter(|k| **k == kind)
        .count()
}

/// Run gameplay ticks while the game is playing, at most `max` of them.
fn run_ticks(world: &mut World, max: usize) -> usize {
    let mut schedule = game::build_tick_schedule();
    let mut ran = 0;
    while ran < max && state(world) == GameStates::Playing {
        schedule.run(world);
        ran += 1;
    }
    ran
}

#[test]
fn player_falls_and_lands_on_floor() {
    let mut world = world_with_rows(&["P..", "BBB"]);
    let (_, start) = player(&mut world);
    let floor_top = 710.0 - TILE as f32;
    assert_eq!(start.y, floor_top - TILE as f32);

    run_ticks(&mut world, 300);

    let (p, pos) = player(&mut world);
    assert_eq!(state(&world), GameStates::Playing);
    let bottom = pos.y + PLAYER_SIZE as f32;
    assert!(
        (bottom - floor_top).abs() < 1.0,
        "player bottom {} should rest on {}",
        bottom,
        floor_top
    );
    assert!(p.jump_count == 0);
}

#[test]
fn double_jump_then_lands_again() {
    let mut world = world_with_rows(&["P..", "BBB"]);
    run_ticks(&mut world, 300);

    for _ in 0..3 {
        world.resource_mut::<InputState>().jump.just_pressed = true;
        run_ticks(&mut world, 1);
        world.resource_mut::<InputState>().jump.just_pressed = false;
        run_ticks(&mut world, 2);
    }
    let (p, pos) = player(&mut world);
    assert_eq!(p.jump_count, 2, "third press must be ignored");
    assert!(pos.y < 710.0 - TILE as f32 - PLAYER_SIZE as f32);

    run_ticks(&mut world, 400);
    let (p, _) = player(&mut world);
    assert_eq!(p.jump_count, 0);
}

#[test]
fn probe_stops_player_before_wall() {
    let mut world = world_with_rows(&["P.B.", "BBBB"]);
    run_ticks(&mut world, 200);
    world.resource_mut::<InputState>().right.active = true;
    run_ticks(&mut world, 200);

    let (p, pos) = player(&mut world);
    let wall_left = 2.0 * TILE as f32;
    assert!(pos.x > TILE as f32, "player should have walked, x = {}", pos.x);
    assert!(pos.x + PLAYER_SIZE as f32 <= wall_left);
    assert_eq!(p.facing.suffix(), "right");
}

#[test]
fn right_wins_when_both_directions_held() {
    let mut world = world_with_rows(&["...P...", "BBBBBBB"]);
    run_ticks(&mut world, 200);
    let (_, before) = player(&mut world);
    {
        let mut input = world.resource_mut::<InputState>();
        input.left.active = true;
        input.right.active = true;
    }
    run_ticks(&mut world, 20);
    let (_, after) = player(&mut world);
    assert!(after.x > before.x);
}

#[test]
fn collectible_scores_once_and_disappears() {
    let layout = LevelLayout {
        spawn: Some(Vector2::new(100.0, 100.0)),
        placements: vec![placement(EntityKind::Collectible, 110.0, 110.0, 48.0)],
    };
    let mut world = world_with_layout(&layout);
    world.resource_mut::<InputState>().right.active = true;

    run_ticks(&mut world, 1);
    let (p, _) = player(&mut world);
    assert_eq!(p.score, 1);
    assert_eq!(count_kind(&mut world, EntityKind::Collectible), 0);

    run_ticks(&mut world, 5);
    let (p, _) = player(&mut world);
    assert_eq!(p.score, 1);
}

#[test]
fn enemy_contact_kills_and_blocks_other_effects() {
    let mut enemy = placement(EntityKind::Enemy, 90.0, 90.0, 96.0);
    enemy.patrol = Some((192.0, 2.0));
    let layout = LevelLayout {
        spawn: Some(Vector2::new(100.0, 100.0)),
        placements: vec![
            enemy,
            placement(EntityKind::Goal, 100.0, 120.0, 96.0),
            placement(EntityKind::Collectible, 110.0, 110.0, 48.0),
        ],
    };
    let mut world = world_with_layout(&layout);

    run_ticks(&mut world, 1);
    let (p, _) = player(&mut world);
    assert!(p.dead);
    assert!(!p.won);
    assert_eq!(p.score, 0);
    assert_eq!(count_kind(&mut world, EntityKind::Collectible), 1);
    assert_eq!(state(&world), GameStates::Lost);
}

#[test]
fn falling_off_the_world_loses() {
    let mut world = world_with_layout(&LevelLayout::default());
    let ran = run_ticks(&mut world, 2000);
    assert!(ran < 2000);
    assert_eq!(state(&world), GameStates::Lost);
    let (p, pos) = player(&mut world);
    assert!(!p.dead);
    assert!(pos.y > 710.0);
}

#[test]
fn landing_on_fire_starts_flinch() {
    let layout = LevelLayout {
        spawn: Some(Vector2::new(0.0, 200.0)),
        placements: vec![Placement {
            kind: EntityKind::Hazard,
            pos: Vector2::new(0.0, 300.0),
            size: Vector2::new(16.0, 32.0),
            patrol: None,
        }],
    };
    let mut world = world_with_layout(&layout);

    let mut hit = false;
    for _ in 0..300 {
        run_ticks(&mut world, 1);
        if player(&mut world).0.hit {
            hit = true;
            break;
        }
    }
    assert!(hit);
    assert_eq!(state(&world), GameStates::Playing);
}

#[test]
fn reaching_goal_wins() {
    let layout = LevelLayout {
        spawn: Some(Vector2::new(0.0, 100.0)),
        placements: vec![placement(EntityKind::Goal, 0.0, 300.0, 96.0)],
    };
    let mut world = world_with_layout(&layout);
    run_ticks(&mut world, 500);
    assert_eq!(state(&world), GameStates::Won);
    assert!(player(&mut world).0.won);
}

#[test]
fn patrol_stays_within_bounds() {
    let mut rng = fastrand::Rng::with_seed(42);
    for _ in 0..50 {
        let origin = rng.f32() * 1000.0 - 500.0;
        let distance = 10.0 + rng.f32() * 300.0;
        let speed = 0.5 + rng.f32() * 10.0;
        let mut enemy = placement(EntityKind::Enemy, origin, 0.0, 96.0);
        enemy.patrol = Some((distance, speed));
        let layout = LevelLayout {
            spawn: Some(Vector2::new(origin - 2000.0, -5000.0)),
            placements: vec![enemy],
        };
        let mut world = world_with_layout(&layout);

        let mut schedule = Schedule::default();
        schedule.add_systems(platformer::systems::patrol::patrol_movement);
        let mut query = world.query::<(&Patrol, &MapPosition)>();
        let mut reached_end = false;
        for _ in 0..200 {
            schedule.run(&mut world);
            let (patrol, position) = query.single(&world).unwrap();
            assert!(position.pos.x >= origin);
            assert!(position.pos.x <= origin + distance);
            if position.pos.x == patrol.max_x() {
                reached_end = true;
            }
        }
        if speed * 200.0 > distance {
            assert!(reached_end);
        }
    }
}

#[test]
fn camera_stays_inside_level() {
    let mut rng = fastrand::Rng::with_seed(3);
    let viewport = GameConfig::new().window_width as f32;
    for _ in 0..200 {
        let min_x = rng.f32() * 2000.0 - 1000.0;
        let width = rng.f32() * 5000.0;
        let bounds = LevelBounds::new(min_x, min_x + width);
        let focus = min_x - 1000.0 + rng.f32() * (width + 2000.0);
        let offset = bounds.scroll_offset(focus, viewport);
        if width <= viewport {
            assert_eq!(offset, min_x);
        } else {
            assert!(offset >= min_x);
            assert!(offset <= bounds.max_x - viewport);
        }
    }
}

#[test]
fn camera_follows_player_in_wide_level() {
    let row: String = "B".repeat(40);
    let mut world = world_with_rows(&["P", &row]);
    assert_eq!(world.resource::<Camera2DRes>().offset_x(), 0.0);

    {
        let mut q = world.query::<(&Player, &mut MapPosition)>();
        let (_, mut position) = q.single_mut(&mut world).unwrap();
        position.pos.x = 2000.0;
    }
    let mut camera = game::build_camera_schedule();
    camera.run(&mut world);

    let expected = (2000.0 + PLAYER_SIZE as f32 / 2.0 - 600.0).floor();
    assert_eq!(world.resource::<Camera2DRes>().offset_x(), expected);
}

#[test]
fn restart_rebuilds_level_and_resets_score() {
    let path = std::env::temp_dir().join(format!("platformer_restart_{}.txt", std::process::id()));
    std::fs::write(&path, "LEVEL = [\"P.Q.\", \"BBBB\"]\n").unwrap();

    let mut config = GameConfig::new();
    config.level_path = path.clone();
    let mut world = make_world(config);
    game::load_level(&mut world);
    let initial = world
        .query_filtered::<Entity, With<LevelEntity>>()
        .iter(&world)
        .count();

    run_ticks(&mut world, 200);
    world.resource_mut::<InputState>().right.active = true;
    run_ticks(&mut world, 50);
    assert_eq!(player(&mut world).0.score, 1);
    world.resource_mut::<InputState>().right.active = false;

    world.resource_mut::<GameState>().set(GameStates::Lost);
    world.resource_mut::<NextGameState>().set(GameStates::Restarting);
    let mut schedule = Schedule::default();
    schedule.add_systems(check_pending_state);
    schedule.run(&mut world);
    world.flush();

    assert_eq!(state(&world), GameStates::Playing);
    let after = world
        .query_filtered::<Entity, With<LevelEntity>>()
        .iter(&world)
        .count();
    assert_eq!(after, initial);
    let (p, pos) = player(&mut world);
    assert_eq!(p.score, 0);
    assert_eq!(pos, Vector2::new(0.0, 710.0 - 2.0 * TILE as f32));
    assert_eq!(world.resource::<Camera2DRes>().offset_x(), 0.0);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn empty_level_source_uses_demo_layout() {
    let mut config = GameConfig::new();
    config.level_path = std::env::temp_dir().join("platformer_missing_level.txt");
    let mut world = make_world(config);
    game::load_level(&mut world);

    assert_eq!(count_kind(&mut world, EntityKind::Hazard), 1);
    assert!(count_kind(&mut world, EntityKind::Terrain) > 10);
    let (_, pos) = player(&mut world);
    assert_eq!(pos, Vector2::new(100.0, 100.0));
}

#[test]
fn head_bump_reverses_velocity_quirk() {
    let layout = LevelLayout {
        spawn: Some(Vector2::new(0.0, 200.0)),
        placements: vec![placement(EntityKind::Terrain, 0.0, 100.0, 96.0)],
    };
    let mut world = world_with_layout(&layout);
    world.resource_mut::<InputState>().jump.just_pressed = true;
    run_ticks(&mut world, 1);

    let (p, pos) = player(&mut world);
    // Snapped under the block and sent down at the speed it was rising.
    assert_eq!(pos.y, 196.0);
    assert_eq!(p.velocity.y, 8.0);
}
