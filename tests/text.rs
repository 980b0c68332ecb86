use std::fs;

use glam::Vec2;
use image::RgbaImage;
use ronery::assets::ImageHandle;
use ronery::geometry::Rect;
use ronery::renderer::text::*;

fn atlas(cols: u32, rows: u32) -> ImageHandle {
    ImageHandle::new(RgbaImage::new(cols * 7, rows * 9))
}

fn descriptor(dir: &tempfile::TempDir, json: &str) -> FontDescriptor {
    let path = dir.path().join("font.json");
    fs::write(&path, json).unwrap();
    FontDescriptor::load(&path).unwrap()
}

#[test]
fn fallback_metrics() {
    let font = Font::fallback();
    assert_eq!((font.glyph_width, font.glyph_height, font.line_height), (7, 9, 11));
    assert!(!font.atlas().is_loaded());
    assert_eq!(font.glyph_rect('A'), None);
}

#[test]
fn measure_is_advance_times_chars() {
    let font = Font::fallback();
    assert_eq!(font.measure("", 1.0), Vec2::new(0.0, 9.0));
    assert_eq!(font.measure("TPS: 60", 1.0), Vec2::new(56.0, 9.0));
    assert_eq!(font.advance(3.0), 24.0);
}

#[test]
fn descriptor_defaults_line_height() {
    let dir = tempfile::tempdir().unwrap();
    let desc = descriptor(
        &dir,
        r#"{ "name": "system", "asset": "font_system.png", "glyph_width": 7, "glyph_height": 9 }"#,
    );
    let font = Font::new(&desc, ImageHandle::missing());
    assert_eq!(font.name, "system");
    assert_eq!(font.line_height, 11);
}

#[test]
fn atlas_key_is_next_to_the_descriptor() {
    let dir = tempfile::tempdir().unwrap();
    let desc = descriptor(
        &dir,
        r#"{ "name": "s", "asset": "glyphs.png", "glyph_width": 7, "glyph_height": 9, "line_height": 12 }"#,
    );
    assert!(desc.atlas_key().ends_with("/glyphs.png"), "{}", desc.atlas_key());
    assert!(desc.atlas_key().starts_with(&dir.path().to_string_lossy().replace('\\', "/")));
}

#[test]
fn descriptor_without_glyph_size_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("font.json");
    fs::write(&path, r#"{ "name": "s", "asset": "glyphs.png" }"#).unwrap();
    assert!(FontDescriptor::load(&path).is_err());
}

#[test]
fn glyph_rects_walk_the_grid() {
    let dir = tempfile::tempdir().unwrap();
    let desc = descriptor(&dir, r#"{ "name": "s", "asset": "a.png", "glyph_width": 7, "glyph_height": 9 }"#);
    let font = Font::new(&desc, atlas(16, 12));

    assert_eq!(font.glyph_rect(' '), Some(Rect::new(0.0, 0.0, 7.0, 9.0)));
    // 'A' is cell 33: row 2, column 1.
    assert_eq!(font.glyph_rect('A'), Some(Rect::new(7.0, 18.0, 7.0, 9.0)));
    // 'а' (U+0430) is cell 144: row 9, column 0.
    assert_eq!(font.glyph_rect('а'), Some(Rect::new(0.0, 81.0, 7.0, 9.0)));
}

#[test]
fn glyphs_past_a_short_atlas_are_missing() {
    let dir = tempfile::tempdir().unwrap();
    let desc = descriptor(&dir, r#"{ "name": "s", "asset": "a.png", "glyph_width": 7, "glyph_height": 9 }"#);
    let font = Font::new(&desc, atlas(16, 6));
    assert!(font.glyph_rect('A').is_some());
    assert_eq!(font.glyph_rect('Я'), None);
}

#[test]
fn unknown_characters_use_the_question_mark() {
    assert_eq!(glyph_index('✓'), glyph_index('?'));
    assert_eq!(glyph_index('ё'), 96 + 0x51);
}
