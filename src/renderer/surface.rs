use glam::Vec2;

use super::color::Color;
use super::text::Font;
use crate::assets::ImageHandle;
use crate::geometry::Rect;

/// Something screens draw into. All coordinates are logical screen pixels.
pub trait Surface {
    fn size(&self) -> Vec2;

    /// Alpha-blended solid rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Draw `src` (the whole image when `None`) stretched into `dst`,
    /// multiplied by `tint`. Missing images draw nothing.
    fn draw_image(&mut self, image: &ImageHandle, src: Option<Rect>, dst: Rect, tint: Color);

    /// Single- or multi-line text with its top-left corner at `pos`.
    fn draw_text(&mut self, font: &Font, text: &str, pos: Vec2, scale: f32, color: Color);

    /// Rectangle outline `width` pixels thick, drawn inside `rect`.
    fn stroke_rect(&mut self, rect: Rect, width: f32, color: Color) {
        self.fill_rect(Rect::new(rect.x, rect.y, rect.w, width), color);
        self.fill_rect(Rect::new(rect.x, rect.bottom() - width, rect.w, width), color);
        self.fill_rect(Rect::new(rect.x, rect.y + width, width, rect.h - 2.0 * width), color);
        self.fill_rect(Rect::new(rect.right() - width, rect.y + width, width, rect.h - 2.0 * width), color);
    }

    /// Whole image at its natural size, scaled by `scale`.
    fn blit(&mut self, image: &ImageHandle, pos: Vec2, scale: f32) {
        if let Some((w, h)) = image.size() {
            let dst = Rect::new(pos.x, pos.y, w as f32 * scale, h as f32 * scale);
            self.draw_image(image, None, dst, Color::WHITE);
        }
    }
}

// ── DrawList ─────────────────────────────────────────────────────────────────

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Fill { rect: Rect, color: Color },
    Image { dst: Rect, loaded: bool },
    Text { text: String, pos: Vec2, scale: f32, color: Color },
}

/// Surface that records calls instead of rasterising them.
#[derive(Debug, Default)]
pub struct DrawList {
    pub commands: Vec<DrawCmd>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every drawn string, in draw order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCmd::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Index of the first text command containing `needle`.
    pub fn position_of_text(&self, needle: &str) -> Option<usize> {
        self.commands
            .iter()
            .position(|c| matches!(c, DrawCmd::Text { text, .. } if text.contains(needle)))
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl Surface for DrawList {
    fn size(&self) -> Vec2 {
        Rect::screen().size()
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCmd::Fill { rect, color });
    }

    fn draw_image(&mut self, image: &ImageHandle, _src: Option<Rect>, dst: Rect, _tint: Color) {
        self.commands.push(DrawCmd::Image { dst, loaded: image.is_loaded() });
    }

    fn draw_text(&mut self, _font: &Font, text: &str, pos: Vec2, scale: f32, color: Color) {
        self.commands.push(DrawCmd::Text { text: text.to_string(), pos, scale, color });
    }
}
