use glam::Vec2;
use image::{Rgba, RgbaImage};
use ronery::assets::ImageHandle;
use ronery::geometry::Rect;
use ronery::renderer::*;

// ── Color ─────────────────────────────────────────────────────────────────

#[test]
fn rgba8_round_trips_through_color() {
    let c = Color::from_rgba8(12, 34, 56, 78);
    assert_eq!(c.to_rgba8(), [12, 34, 56, 78]);
}

#[test]
fn out_of_range_components_are_clamped() {
    assert_eq!(Color::rgba(2.0, -1.0, 0.5, 1.0).to_rgba8(), [255, 0, 128, 255]);
}

#[test]
fn hsl_endpoints_of_the_health_ramp() {
    assert_eq!(Color::from_hsl(0.0, 1.0, 0.5).to_rgba8(), [255, 0, 0, 255]);
    let green = Color::from_hsl(0.33, 1.0, 0.5).to_rgba8();
    assert!(green[1] == 255 && green[0] < 10 && green[2] < 10, "{green:?}");
}

#[test]
fn modulate_multiplies_components() {
    let c = Color::WHITE.modulate(Color::rgba(0.5, 0.25, 1.0, 0.5));
    assert_eq!(c, Color::rgba(0.5, 0.25, 1.0, 0.5));
}

// ── FrameBuffer ───────────────────────────────────────────────────────────

#[test]
fn new_buffer_is_opaque_black() {
    let fb = FrameBuffer::default();
    assert_eq!((fb.width(), fb.height()), (640, 480));
    assert_eq!(fb.pixel(639, 479), Some([0, 0, 0, 255]));
    assert_eq!(fb.as_bytes().len(), 640 * 480 * 4);
}

#[test]
fn clear_overwrites_alpha() {
    let mut fb = FrameBuffer::new(2, 2);
    fb.clear(Color::TRANSPARENT);
    assert_eq!(fb.pixel(1, 1), Some([0, 0, 0, 0]));
}

#[test]
fn transparent_fill_changes_nothing() {
    let mut fb = FrameBuffer::new(2, 2);
    fb.fill_rect(Rect::new(0.0, 0.0, 2.0, 2.0), Color::TRANSPARENT);
    assert_eq!(fb.pixel(0, 0), Some([0, 0, 0, 255]));
}

#[test]
fn stroke_leaves_the_inside_untouched() {
    let mut fb = FrameBuffer::new(5, 5);
    fb.stroke_rect(Rect::new(0.0, 0.0, 5.0, 5.0), 1.0, Color::WHITE);
    assert_eq!(fb.pixel(0, 0), Some([255, 255, 255, 255]));
    assert_eq!(fb.pixel(4, 2), Some([255, 255, 255, 255]));
    assert_eq!(fb.pixel(2, 2), Some([0, 0, 0, 255]));
}

#[test]
fn missing_image_draws_nothing() {
    let mut fb = FrameBuffer::new(2, 2);
    fb.draw_image(&ImageHandle::missing(), None, Rect::new(0.0, 0.0, 2.0, 2.0), Color::WHITE);
    assert_eq!(fb.pixel(0, 0), Some([0, 0, 0, 255]));
}

#[test]
fn source_rect_selects_a_sheet_cell() {
    let mut img = RgbaImage::new(2, 1);
    img.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
    img.put_pixel(1, 0, Rgba([0, 255, 0, 255]));
    let handle = ImageHandle::new(img);

    let mut fb = FrameBuffer::new(2, 2);
    fb.draw_image(&handle, Some(Rect::new(1.0, 0.0, 1.0, 1.0)), Rect::new(0.0, 0.0, 2.0, 2.0), Color::WHITE);
    assert_eq!(fb.pixel(0, 0), Some([0, 255, 0, 255]));
    assert_eq!(fb.pixel(1, 1), Some([0, 255, 0, 255]));
}

#[test]
fn tint_multiplies_image_pixels() {
    let handle = ImageHandle::new(RgbaImage::from_pixel(1, 1, Rgba([255, 255, 255, 255])));
    let mut fb = FrameBuffer::new(1, 1);
    fb.draw_image(&handle, None, Rect::new(0.0, 0.0, 1.0, 1.0), Color::RED);
    assert_eq!(fb.pixel(0, 0), Some([255, 0, 0, 255]));
}

#[test]
fn blit_uses_the_natural_size() {
    let handle = ImageHandle::new(RgbaImage::from_pixel(2, 2, Rgba([255, 255, 255, 255])));
    let mut fb = FrameBuffer::new(8, 8);
    fb.blit(&handle, Vec2::new(1.0, 1.0), 2.0);
    assert_eq!(fb.pixel(4, 4), Some([255, 255, 255, 255]));
    assert_eq!(fb.pixel(5, 5), Some([0, 0, 0, 255]));
}

#[test]
fn fallback_font_draws_solid_cells_and_skips_spaces() {
    let font = Font::fallback();
    let mut fb = FrameBuffer::new(32, 16);
    fb.draw_text(&font, " A", Vec2::ZERO, 1.0, Color::WHITE);
    assert_eq!(fb.pixel(3, 4), Some([0, 0, 0, 255]));
    assert_eq!(fb.pixel(8 + 3, 4), Some([255, 255, 255, 255]));
}

// ── DrawList ──────────────────────────────────────────────────────────────

#[test]
fn draw_list_records_in_order() {
    let font = Font::fallback();
    let mut list = DrawList::new();
    list.fill_rect(Rect::screen(), Color::BLACK);
    list.draw_text(&font, "first", Vec2::ZERO, 1.0, Color::WHITE);
    list.draw_image(&ImageHandle::missing(), None, Rect::screen(), Color::WHITE);
    list.draw_text(&font, "second line", Vec2::ZERO, 2.0, Color::RED);

    assert_eq!(list.commands.len(), 4);
    assert_eq!(list.texts(), vec!["first", "second line"]);
    assert_eq!(list.position_of_text("second"), Some(3));
    assert_eq!(list.commands[2], DrawCmd::Image { dst: Rect::screen(), loaded: false });

    list.clear();
    assert!(list.commands.is_empty());
}

#[test]
fn stroke_records_four_fills() {
    let mut list = DrawList::new();
    list.stroke_rect(Rect::new(0.0, 0.0, 10.0, 10.0), 2.0, Color::WHITE);
    assert_eq!(list.commands.len(), 4);
    assert!(list.commands.iter().all(|c| matches!(c, DrawCmd::Fill { .. })));
}
