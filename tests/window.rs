use ronery::window::*;

#[test]
fn default_is_640x480_at_double_scale() {
    let cfg = WindowConfig::default();
    assert_eq!(cfg.initial_size(), (1280, 960));
    assert_eq!(cfg.logical_width(), 640);
    assert_eq!(cfg.logical_height(), 480);
    assert_eq!(cfg.mode, WindowMode::Windowed);
}

#[test]
fn zero_scale_is_treated_as_one() {
    let cfg = WindowConfig { scale: 0, ..WindowConfig::default() };
    assert_eq!(cfg.initial_size(), (640, 480));
}

#[test]
fn widescreen_window_is_pillarboxed() {
    let cfg = WindowConfig { physical_width: 1280, physical_height: 720, ..WindowConfig::default() };
    let vp = letterbox_viewport(&cfg);
    assert_eq!(vp, Viewport { x: 160.0, y: 0.0, width: 960.0, height: 720.0 });
}

#[test]
fn tall_window_is_letterboxed() {
    let cfg = WindowConfig { physical_width: 640, physical_height: 960, ..WindowConfig::default() };
    let vp = letterbox_viewport(&cfg);
    assert_eq!(vp, Viewport { x: 0.0, y: 240.0, width: 640.0, height: 480.0 });
}

#[test]
fn cursor_maps_into_logical_pixels() {
    let cfg = WindowConfig { physical_width: 1280, physical_height: 720, ..WindowConfig::default() };
    let vp = letterbox_viewport(&cfg);
    assert_eq!(vp.to_logical(160.0, 0.0, 640, 480), Some((0.0, 0.0)));
    assert_eq!(vp.to_logical(640.0, 360.0, 640, 480), Some((320.0, 240.0)));
}

#[test]
fn cursor_on_the_bars_maps_to_nothing() {
    let cfg = WindowConfig { physical_width: 1280, physical_height: 720, ..WindowConfig::default() };
    let vp = letterbox_viewport(&cfg);
    assert_eq!(vp.to_logical(100.0, 360.0, 640, 480), None);
    assert_eq!(vp.to_logical(1120.0, 360.0, 640, 480), None);
}

#[test]
fn empty_viewport_maps_to_nothing() {
    let vp = Viewport { x: 0.0, y: 0.0, width: 0.0, height: 0.0 };
    assert_eq!(vp.to_logical(0.0, 0.0, 640, 480), None);
}

#[test]
fn window_mode_reads_snake_case() {
    let mode: WindowMode = serde_json::from_str("\"borderless\"").unwrap();
    assert_eq!(mode, WindowMode::Borderless);
}
