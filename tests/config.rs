use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use ronery::config::*;
use ronery::i18n::Localization;
use ronery::input::KeyCode;
use ronery::input::keybinds::{Action, Keybinds};
use ronery::window::WindowMode;

fn write(dir: &tempfile::TempDir, name: &str, text: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, text).unwrap();
    path
}

#[test]
fn missing_config_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = GameConfig::load_or_default(dir.path().join("config.json"));
    assert_eq!(config, GameConfig::default());
    assert_eq!(config.tick_rate, 60);
    assert_eq!(config.initial_zoom, 4.0);
}

#[test]
fn missing_config_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = GameConfig::load(dir.path().join("config.json")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn partial_config_keeps_other_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        &dir,
        "config.json",
        r#"{ "tick_rate": 30, "window": { "mode": "fullscreen" }, "audio": { "music_volume": 0.0 } }"#,
    );
    let config = GameConfig::load(&path).unwrap();
    assert_eq!(config.tick_rate, 30);
    assert_eq!(config.window.mode, WindowMode::Fullscreen);
    assert_eq!(config.window.scale, 2);
    assert_eq!(config.audio.music_volume, 0.0);
    assert_eq!(config.audio.sfx_volume, 1.0);
    assert_eq!(config.level_path, PathBuf::from("level/level0.lvl"));
}

#[test]
fn malformed_config_falls_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "config.json", "{ not json");
    assert!(matches!(GameConfig::load(&path), Err(ConfigError::Parse { .. })));
    assert_eq!(GameConfig::load_or_default(&path), GameConfig::default());
}

#[test]
fn localization_falls_back_per_key() {
    let mut strings = HashMap::new();
    strings.insert("string_play".to_string(), "Играть".to_string());
    let lang = Localization::from_map(strings);
    assert_eq!(lang.get("string_play", "Play"), "Играть");
    assert_eq!(lang.get("string_quit", "Quit"), "Quit");
}

#[test]
fn localization_loads_a_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "ru_ru.json", r#"{ "string_walkable": "Проходимо", "string_solid": "Твёрдо" }"#);
    let lang = Localization::load(&path);
    assert_eq!(lang.len(), 2);
    assert_eq!(lang.get("string_solid", "Solid"), "Твёрдо");
}

#[test]
fn missing_language_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let lang = Localization::load(dir.path().join("xx.json"));
    assert!(lang.is_empty());
    assert_eq!(lang.get("anything", "fallback"), "fallback");
}

#[test]
fn default_keybinds() {
    let binds = Keybinds::default();
    assert_eq!(binds.key(Action::ToggleEdit), KeyCode::F8);
    assert_eq!(binds.key(Action::ZoomIn), KeyCode::KeyP);
    assert_eq!(binds.iter().count(), Action::ALL.len());
}

#[test]
fn keybind_file_overrides_single_actions() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "keybinds.json", r#"{ "zoom_in": "Equal", "place": "Space" }"#);
    let binds = Keybinds::load_or_default(&path);
    assert_eq!(binds.key(Action::ZoomIn), KeyCode::Equal);
    assert_eq!(binds.key(Action::Place), KeyCode::Space);
    assert_eq!(binds.key(Action::ZoomOut), KeyCode::KeyO);
}

#[test]
fn rebinding_moves_the_action() {
    let mut binds = Keybinds::default();
    binds.bind(Action::ToggleDebug, KeyCode::F1);

    let mut input = ronery::input::InputState::new();
    input.press_key(KeyCode::F3);
    assert!(!binds.pressed(Action::ToggleDebug, &input));
    input.press_key(KeyCode::F1);
    assert!(binds.pressed(Action::ToggleDebug, &input));
}

#[test]
fn malformed_keybinds_fall_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "keybinds.json", r#"{ "zoom_in": 5 }"#);
    assert!(Keybinds::load(&path).is_err());
    assert_eq!(Keybinds::load_or_default(&path).key(Action::ZoomIn), KeyCode::KeyP);
}
