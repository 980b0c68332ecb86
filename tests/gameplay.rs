use glam::UVec2;

use ronery::camera::CameraTarget;
use ronery::entity::SPAWN_POSITION;
use ronery::game::GameContext;
use ronery::geometry::world_to_cell;
use ronery::input::{Action, KeyCode};
use ronery::renderer::DrawList;
use ronery::screen::{Screen, ScreenAction, attach};
use ronery::screens::gameplay::{EditMode, GameplayMode, ROTATION_PERIOD};
use ronery::screens::GameplayScreen;
use ronery::tile::Tile;

fn start() -> (GameplayScreen, GameContext) {
    let mut ctx = GameContext::headless();
    let mut game = GameplayScreen::new();
    attach(&mut game, &mut ctx);
    (game, ctx)
}

/// One tick with `keys` tapped.
fn frame(game: &mut GameplayScreen, ctx: &mut GameContext, keys: &[KeyCode]) -> ScreenAction {
    for &key in keys {
        ctx.input.press_key(key);
    }
    game.handle_input(ctx);
    let action = game.update(ctx);
    for &key in keys {
        ctx.input.release_key(key);
    }
    ctx.input.clear_frame_state();
    action
}

/// One tick with the key bound to `action` tapped.
fn tap(game: &mut GameplayScreen, ctx: &mut GameContext, action: Action) -> ScreenAction {
    let key = ctx.keybinds.key(action);
    frame(game, ctx, &[key])
}

fn edit_state(game: &GameplayScreen) -> EditMode {
    match game.mode() {
        GameplayMode::Edit(edit) => edit.clone(),
        other => panic!("not editing: {other:?}"),
    }
}

// ── Session ───────────────────────────────────────────────────────────────────

#[test]
fn attaching_starts_a_session_following_the_player() {
    let (game, ctx) = start();
    let player = ctx.player.unwrap();
    assert_eq!(ctx.world.len(), 9);
    assert_eq!(ctx.camera.target(), CameraTarget::Entity(player));
    assert_eq!(game.mode(), &GameplayMode::Default);
}

#[test]
fn every_update_advances_the_game_tick() {
    let (mut game, mut ctx) = start();
    for _ in 0..5 {
        frame(&mut game, &mut ctx, &[]);
    }
    assert_eq!(ctx.game_tick, 5);
}

#[test]
fn arrows_walk_the_player_until_released() {
    let (mut game, mut ctx) = start();
    let player = ctx.player.unwrap();

    ctx.input.press_key(KeyCode::ArrowRight);
    game.handle_input(&mut ctx);
    game.update(&mut ctx);
    ctx.input.clear_frame_state();
    assert!(ctx.world.get(player).unwrap().walking);
    frame(&mut game, &mut ctx, &[]);

    ctx.input.release_key(KeyCode::ArrowRight);
    game.handle_input(&mut ctx);
    game.update(&mut ctx);
    let p = ctx.world.get(player).unwrap();
    assert!(!p.walking);
    assert!(p.position.x > SPAWN_POSITION.x);
}

#[test]
fn player_on_a_laptop_switches_to_the_computer() {
    let mut ctx = GameContext::headless();
    let cell = world_to_cell(SPAWN_POSITION);
    ctx.level.set(0, cell.x as usize, cell.y as usize, Tile::LAPTOP);
    let mut game = GameplayScreen::new();
    attach(&mut game, &mut ctx);

    match frame(&mut game, &mut ctx, &[]) {
        ScreenAction::Switch(next) => assert_eq!(next.name(), "computer"),
        other => panic!("expected the computer, got {other:?}"),
    }
}

// ── Modes ─────────────────────────────────────────────────────────────────────

#[test]
fn place_writes_the_brush_at_the_cursor() {
    let (mut game, mut ctx) = start();
    tap(&mut game, &mut ctx, Action::ToggleEdit);
    assert!(matches!(game.mode(), GameplayMode::Edit(_)));

    let edit = EditMode { cursor: UVec2::new(3, 4), brush: Tile(7), layer: 0, xray: false };
    game.set_mode(GameplayMode::Edit(edit), &mut ctx);
    tap(&mut game, &mut ctx, Action::Place);

    assert_eq!(ctx.level.layer(0).unwrap()[63], Tile(7));
}

#[test]
fn delete_clears_the_selected_layer_only() {
    let (mut game, mut ctx) = start();
    ctx.level.push_layer();
    ctx.level.set(1, 3, 4, Tile::ROCK);
    let edit = EditMode { cursor: UVec2::new(3, 4), brush: Tile::EMPTY, layer: 1, xray: false };
    game.set_mode(GameplayMode::Edit(edit), &mut ctx);

    tap(&mut game, &mut ctx, Action::Delete);
    assert_eq!(ctx.level.get(1, 3, 4), Some(Tile::EMPTY));
    assert_eq!(ctx.level.get(0, 3, 4), Some(Tile::GRASS));
}

#[test]
fn cursor_and_layer_are_clamped() {
    let (mut game, mut ctx) = start();
    let edit = EditMode { cursor: UVec2::new(14, 0), brush: Tile::EMPTY, layer: 0, xray: false };
    game.set_mode(GameplayMode::Edit(edit), &mut ctx);

    frame(&mut game, &mut ctx, &[KeyCode::ArrowRight]);
    frame(&mut game, &mut ctx, &[KeyCode::ArrowUp]);
    tap(&mut game, &mut ctx, Action::NextLayer);
    tap(&mut game, &mut ctx, Action::PrevLayer);
    tap(&mut game, &mut ctx, Action::PrevLayer);

    let state = edit_state(&game);
    assert_eq!(state.cursor, UVec2::new(14, 0));
    assert_eq!(state.layer, 0);
    assert_eq!(ctx.camera.target(), CameraTarget::Cursor(UVec2::new(14, 0)));
}

#[test]
fn brush_wraps_around_the_registered_range() {
    let (mut game, mut ctx) = start();
    tap(&mut game, &mut ctx, Action::ToggleEdit);
    tap(&mut game, &mut ctx, Action::PrevBrush);
    let last = Tile((ctx.tiles.len() - 1) as u8);
    assert_eq!(edit_state(&game).brush, last);
    tap(&mut game, &mut ctx, Action::NextBrush);
    assert_eq!(edit_state(&game).brush, Tile::EMPTY);
}

#[test]
fn toggling_edit_twice_returns_to_the_player() {
    let (mut game, mut ctx) = start();
    tap(&mut game, &mut ctx, Action::ToggleEdit);
    tap(&mut game, &mut ctx, Action::ToggleEdit);
    assert_eq!(game.mode(), &GameplayMode::Default);
    assert_eq!(ctx.camera.target(), CameraTarget::Entity(ctx.player.unwrap()));
}

#[test]
fn rotation_hops_between_live_entities() {
    let (mut game, mut ctx) = start();
    tap(&mut game, &mut ctx, Action::ToggleRotation);
    assert_eq!(game.mode(), &GameplayMode::EntityFocusRotation);

    for _ in 0..ROTATION_PERIOD * 4 {
        frame(&mut game, &mut ctx, &[]);
        let CameraTarget::Entity(id) = ctx.camera.target() else {
            panic!("rotation must follow an entity");
        };
        assert!(ctx.world.get(id).is_some());
    }

    tap(&mut game, &mut ctx, Action::ToggleRotation);
    assert_eq!(game.mode(), &GameplayMode::Default);
}

#[test]
fn entering_rotation_aims_at_an_entity_right_away() {
    let (mut game, mut ctx) = start();
    ctx.camera.target_position(SPAWN_POSITION, ctx.game_tick);

    game.set_mode(GameplayMode::EntityFocusRotation, &mut ctx);
    let CameraTarget::Entity(id) = ctx.camera.target() else {
        panic!("rotation must pick an entity on entry");
    };
    assert!(ctx.world.get(id).is_some());
}

#[test]
fn zoom_keys_step_the_camera() {
    let (mut game, mut ctx) = start();
    let zoom = ctx.camera.zoom();
    tap(&mut game, &mut ctx, Action::ZoomIn);
    assert_eq!(ctx.camera.zoom(), zoom + 1.0);
    tap(&mut game, &mut ctx, Action::ZoomOut);
    assert_eq!(ctx.camera.zoom(), zoom);
}

// ── Overlays ──────────────────────────────────────────────────────────────────

#[test]
fn escape_opens_and_closes_the_pause_menu() {
    let (mut game, mut ctx) = start();
    frame(&mut game, &mut ctx, &[KeyCode::Escape]);
    assert_eq!(game.overlays().names(), ["pause_menu"]);

    let mut surface = DrawList::new();
    game.draw(&ctx, &mut surface);
    assert!(surface.position_of_text("Paused").is_some());

    frame(&mut game, &mut ctx, &[KeyCode::Escape]);
    assert!(game.overlays().is_empty());
}

#[test]
fn pause_menu_swallows_gameplay_keys() {
    let (mut game, mut ctx) = start();
    frame(&mut game, &mut ctx, &[KeyCode::Escape]);
    tap(&mut game, &mut ctx, Action::ToggleEdit);
    assert_eq!(game.mode(), &GameplayMode::Default);
}

#[test]
fn pause_menu_save_level_writes_the_typed_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("saved.lvl");
    let (mut game, mut ctx) = start();
    ctx.level.set(0, 1, 1, Tile::BRICKS);

    frame(&mut game, &mut ctx, &[KeyCode::Escape]);
    frame(&mut game, &mut ctx, &[KeyCode::ArrowDown]);
    frame(&mut game, &mut ctx, &[KeyCode::Enter]);
    assert_eq!(game.overlays().names(), ["pause_menu", "save_level"]);

    for _ in 0.."level0.lvl".len() {
        frame(&mut game, &mut ctx, &[KeyCode::Backspace]);
    }
    ctx.input.chars_typed.extend(path.to_string_lossy().chars());
    frame(&mut game, &mut ctx, &[]);
    frame(&mut game, &mut ctx, &[KeyCode::ArrowDown]);
    frame(&mut game, &mut ctx, &[KeyCode::Enter]);

    assert_eq!(game.overlays().names(), ["pause_menu"]);
    assert_eq!(std::fs::read(&path).unwrap(), ctx.level.to_bytes());
}

#[test]
fn debug_toggle_shows_the_readout() {
    let (mut game, mut ctx) = start();
    tap(&mut game, &mut ctx, Action::ToggleDebug);
    assert!(ctx.show_debug);

    let mut surface = DrawList::new();
    game.draw(&ctx, &mut surface);
    assert!(surface.position_of_text("TPS:").is_some());
    assert!(surface.position_of_text("CurTilePos").is_some());
}

#[test]
fn main_menu_from_pause_switches_out_of_the_game() {
    let (mut game, mut ctx) = start();
    frame(&mut game, &mut ctx, &[KeyCode::Escape]);
    for _ in 0..3 {
        frame(&mut game, &mut ctx, &[KeyCode::ArrowDown]);
    }
    match frame(&mut game, &mut ctx, &[KeyCode::Enter]) {
        ScreenAction::Switch(next) => assert_eq!(next.name(), "main_menu"),
        other => panic!("expected the main menu, got {other:?}"),
    }
}
