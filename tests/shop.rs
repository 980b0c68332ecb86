use std::fs;
use std::path::PathBuf;

use glam::Vec2;
use image::RgbaImage;

use ronery::assets::asset_key;
use ronery::game::GameContext;
use ronery::input::KeyCode;
use ronery::renderer::{DrawCmd, DrawList};
use ronery::screen::{Screen, ScreenAction, ScreenId, attach};
use ronery::screens::shop::{
    CharacterSource, DialogueBox, MORSHU_GROUPS, Pose, ShopScreen, SpriteMenu, VnCharacter,
};

const MORSHU_JSON: &str = r#"{
    "width": 100, "height": 80,
    "layers": [
        { "name": "morshu_090.png", "index": 0, "width": 100, "height": 80 },
        { "name": "morshu_001.png", "index": 1, "offset_x": 40, "offset_y": 20, "width": 20, "height": 10 },
        { "name": "morshu_002.png", "index": 2, "offset_x": 40, "offset_y": 20, "width": 20, "height": 10 }
    ]
}"#;

/// Descriptor plus two of its three layer files; `morshu_002.png` is left out.
fn morshu_dir(dir: &tempfile::TempDir) -> PathBuf {
    let root = dir.path().join("morshu");
    fs::create_dir_all(&root).unwrap();
    fs::write(root.join("morshu.json"), MORSHU_JSON).unwrap();
    RgbaImage::new(100, 80).save(root.join("morshu_090.png")).unwrap();
    RgbaImage::new(20, 10).save(root.join("morshu_001.png")).unwrap();
    root.join("morshu.json")
}

fn open_shop(sources: Vec<CharacterSource>) -> (ShopScreen, GameContext) {
    let mut ctx = GameContext::headless();
    let mut shop = ShopScreen::with_sources(sources);
    attach(&mut shop, &mut ctx);
    (shop, ctx)
}

fn press(shop: &mut ShopScreen, ctx: &mut GameContext, key: KeyCode) -> ScreenAction {
    ctx.input.press_key(key);
    shop.handle_input(ctx);
    let action = shop.update(ctx);
    ctx.input.release_key(key);
    ctx.input.clear_frame_state();
    action
}

fn facial_index(shop: &ShopScreen) -> usize {
    shop.active().unwrap().groups()[1].current_index()
}

// ── Loading ───────────────────────────────────────────────────────────────────

#[test]
fn shop_is_started_by_name() {
    let id: ScreenId = "shop".parse().unwrap();
    assert_eq!(id, ScreenId::Shop);
    assert_eq!(id.build().name(), "shop");
}

#[test]
fn characters_load_from_their_descriptor_and_share_the_cache() {
    let dir = tempfile::tempdir().unwrap();
    let json = morshu_dir(&dir);
    let (shop, ctx) = open_shop(vec![CharacterSource::new(&json, "Morshu", MORSHU_GROUPS)]);

    let morshu = shop.active().unwrap();
    assert_eq!(morshu.name, "Morshu");
    assert_eq!(morshu.size, Vec2::new(100.0, 80.0));
    assert_eq!(morshu.groups().len(), 2);
    assert_eq!(shop.dialogue().speaker, "Morshu");

    let body = asset_key(&json.parent().unwrap().join("morshu_090.png"));
    assert!(ctx.resources.cached(&body).is_loaded());
    let facial = &morshu.groups()[1].variants()[1];
    assert!(!facial.image.is_loaded());
    assert_eq!(facial.draw_size(), Vec2::new(20.0, 10.0));
}

#[test]
fn unreadable_descriptors_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let json = morshu_dir(&dir);
    let broken = dir.path().join("broken.json");
    fs::write(&broken, "{ not json").unwrap();

    let (shop, _ctx) = open_shop(vec![
        CharacterSource::new(dir.path().join("absent.json"), "Ghost", MORSHU_GROUPS),
        CharacterSource::new(&broken, "Broken", MORSHU_GROUPS),
        CharacterSource::new(&json, "Morshu", MORSHU_GROUPS),
    ]);
    assert_eq!(shop.characters().len(), 1);
    assert_eq!(shop.active().unwrap().name, "Morshu");
}

#[test]
fn an_empty_shop_still_draws_its_dialogue_box() {
    let (shop, ctx) = open_shop(Vec::new());
    let mut list = DrawList::new();
    shop.draw(&ctx, &mut list);
    assert!(shop.active().is_none());
    assert!(list.commands.iter().any(|c| matches!(c, DrawCmd::Fill { rect, .. } if *rect == DialogueBox::RECT)));
}

// ── Editing ───────────────────────────────────────────────────────────────────

#[test]
fn q_and_w_cycle_the_selected_group_with_wraparound() {
    let dir = tempfile::tempdir().unwrap();
    let (mut shop, mut ctx) = open_shop(vec![CharacterSource::new(morshu_dir(&dir), "Morshu", MORSHU_GROUPS)]);

    press(&mut shop, &mut ctx, KeyCode::KeyX);
    assert_eq!(shop.menu().group(), 1);

    press(&mut shop, &mut ctx, KeyCode::KeyW);
    assert_eq!(facial_index(&shop), 1);
    press(&mut shop, &mut ctx, KeyCode::KeyW);
    assert_eq!(facial_index(&shop), 0);
    press(&mut shop, &mut ctx, KeyCode::KeyQ);
    assert_eq!(facial_index(&shop), 1);

    // The body group has one variant and is untouched.
    assert_eq!(shop.active().unwrap().groups()[0].current_index(), 0);
}

#[test]
fn z_and_x_wrap_around_the_groups() {
    let dir = tempfile::tempdir().unwrap();
    let (mut shop, mut ctx) = open_shop(vec![CharacterSource::new(morshu_dir(&dir), "Morshu", MORSHU_GROUPS)]);

    press(&mut shop, &mut ctx, KeyCode::KeyZ);
    assert_eq!(shop.menu().group(), 1);
    press(&mut shop, &mut ctx, KeyCode::KeyX);
    assert_eq!(shop.menu().group(), 0);
}

#[test]
fn tab_brings_the_next_character_to_the_counter() {
    let dir = tempfile::tempdir().unwrap();
    let json = morshu_dir(&dir);
    let (mut shop, mut ctx) = open_shop(vec![
        CharacterSource::new(&json, "Morshu", MORSHU_GROUPS),
        CharacterSource::new(&json, "Morshu's twin", MORSHU_GROUPS),
    ]);

    press(&mut shop, &mut ctx, KeyCode::Tab);
    assert_eq!(shop.active().unwrap().name, "Morshu's twin");
    assert_eq!(shop.dialogue().speaker, "Morshu's twin");
    press(&mut shop, &mut ctx, KeyCode::Tab);
    assert_eq!(shop.active().unwrap().name, "Morshu");
}

#[test]
fn escape_returns_to_the_main_menu() {
    let (mut shop, mut ctx) = open_shop(Vec::new());
    match press(&mut shop, &mut ctx, KeyCode::Escape) {
        ScreenAction::Switch(next) => assert_eq!(next.name(), "main_menu"),
        other => panic!("expected a switch, got {other:?}"),
    }
}

#[test]
fn the_character_bobs_with_the_app_clock() {
    let dir = tempfile::tempdir().unwrap();
    let (mut shop, mut ctx) = open_shop(vec![CharacterSource::new(morshu_dir(&dir), "Morshu", MORSHU_GROUPS)]);
    ctx.app_tick = 40;
    shop.update(&mut ctx);
    assert_eq!(shop.active().unwrap().pose, Pose::idle(40));
}

// ── Drawing ───────────────────────────────────────────────────────────────────

#[test]
fn sprite_menu_lists_the_group_and_highlights_the_current_variant() {
    let dir = tempfile::tempdir().unwrap();
    let (mut shop, mut ctx) = open_shop(vec![CharacterSource::new(morshu_dir(&dir), "Morshu", MORSHU_GROUPS)]);
    press(&mut shop, &mut ctx, KeyCode::KeyX);
    press(&mut shop, &mut ctx, KeyCode::KeyW);

    let mut list = DrawList::new();
    shop.draw(&ctx, &mut list);

    assert!(list.texts().contains(&"facial"));
    assert!(list.texts().contains(&"Morshu"));

    let title_height = ctx.font.measure("facial", SpriteMenu::TITLE_SCALE).y;
    let highlighted = SpriteMenu::cell_rect(1, title_height);
    assert!(list.commands.iter().any(|c| matches!(c, DrawCmd::Fill { rect, .. } if *rect == highlighted)));

    // Thumbnails fit the cell on their longest side.
    let thumb = SpriteMenu::cell_rect(0, title_height).centered(Vec2::new(48.0, 24.0));
    assert!(list.commands.iter().any(|c| matches!(c, DrawCmd::Image { dst, .. } if *dst == thumb)));
}

#[test]
fn layers_composite_in_group_order() {
    let dir = tempfile::tempdir().unwrap();
    let json = morshu_dir(&dir);
    let mut ctx = GameContext::headless();
    let morshu = VnCharacter::load(&json, "Morshu", MORSHU_GROUPS, &mut ctx.resources).unwrap();

    let mut list = DrawList::new();
    morshu.draw(&mut list);
    let dsts: Vec<_> = list
        .commands
        .iter()
        .filter_map(|c| match c {
            DrawCmd::Image { dst, loaded } => Some((dst.pos(), *loaded)),
            _ => None,
        })
        .collect();
    assert_eq!(dsts, [(Vec2::ZERO, true), (Vec2::new(40.0, 20.0), true)]);
}

#[test]
fn missing_layer_files_load_as_missing_images() {
    let dir = tempfile::tempdir().unwrap();
    let json = morshu_dir(&dir);
    fs::remove_file(json.with_file_name("morshu_001.png")).unwrap();

    let mut ctx = GameContext::headless();
    let morshu = VnCharacter::load(&json, "Morshu", MORSHU_GROUPS, &mut ctx.resources).unwrap();
    assert!(morshu.groups()[1].variants().iter().all(|v| !v.image.is_loaded()));
    assert!(morshu.groups()[0].current().image.is_loaded());
}
