// ── Software frame buffer ─────────────────────────────────────────────────────
//
// Every screen draws into one fixed-size RGBA image. The GPU only ever sees
// the finished frame, uploaded once per redraw.

use glam::Vec2;
use image::{Rgba, RgbaImage};

use super::color::Color;
use super::surface::Surface;
use super::text::Font;
use crate::assets::ImageHandle;
use crate::geometry::{Rect, SCREEN_HEIGHT, SCREEN_WIDTH};

pub struct FrameBuffer {
    pixels: RgbaImage,
}

/// Straight-alpha "over" of `src` onto `dst`.
fn blend(dst: &mut Rgba<u8>, src: [f32; 4]) {
    let a = src[3];
    if a <= 0.0 {
        return;
    }
    for i in 0..3 {
        let d = dst.0[i] as f32 / 255.0;
        let v = src[i] * a + d * (1.0 - a);
        dst.0[i] = (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    }
    let da = dst.0[3] as f32 / 255.0;
    dst.0[3] = ((a + da * (1.0 - a)).clamp(0.0, 1.0) * 255.0).round() as u8;
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self { pixels: RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 255])) }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Overwrite every pixel.
    pub fn clear(&mut self, color: Color) {
        let px = Rgba(color.to_rgba8());
        for p in self.pixels.pixels_mut() {
            *p = px;
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        (x < self.width() && y < self.height()).then(|| self.pixels.get_pixel(x, y).0)
    }

    /// Tightly packed RGBA8 rows, top to bottom.
    pub fn as_bytes(&self) -> &[u8] {
        self.pixels.as_raw()
    }

    /// Integer pixel span of `rect` clipped to the buffer.
    fn clip(&self, rect: Rect) -> Option<(u32, u32, u32, u32)> {
        let x0 = rect.x.round().max(0.0);
        let y0 = rect.y.round().max(0.0);
        let x1 = rect.right().round().min(self.width() as f32);
        let y1 = rect.bottom().round().min(self.height() as f32);
        (x1 > x0 && y1 > y0).then_some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new(SCREEN_WIDTH, SCREEN_HEIGHT)
    }
}

impl Surface for FrameBuffer {
    fn size(&self) -> Vec2 {
        Vec2::new(self.width() as f32, self.height() as f32)
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let Some((x0, y0, x1, y1)) = self.clip(rect) else { return };
        let src = [color.r, color.g, color.b, color.a];
        for y in y0..y1 {
            for x in x0..x1 {
                blend(self.pixels.get_pixel_mut(x, y), src);
            }
        }
    }

    fn draw_image(&mut self, image: &ImageHandle, src: Option<Rect>, dst: Rect, tint: Color) {
        let Some(img) = image.get() else { return };
        let src = src.unwrap_or_else(|| Rect::new(0.0, 0.0, img.width() as f32, img.height() as f32));
        if dst.w <= 0.0 || dst.h <= 0.0 || src.w <= 0.0 || src.h <= 0.0 {
            return;
        }
        let Some((x0, y0, x1, y1)) = self.clip(dst) else { return };
        let sx_scale = src.w / dst.w;
        let sy_scale = src.h / dst.h;

        for y in y0..y1 {
            let sy = (src.y + (y as f32 + 0.5 - dst.y) * sy_scale).floor();
            if sy < 0.0 || sy >= img.height() as f32 || sy >= src.bottom() {
                continue;
            }
            for x in x0..x1 {
                let sx = (src.x + (x as f32 + 0.5 - dst.x) * sx_scale).floor();
                if sx < 0.0 || sx >= img.width() as f32 || sx >= src.right() {
                    continue;
                }
                let s = img.get_pixel(sx as u32, sy as u32).0;
                let c = [
                    s[0] as f32 / 255.0 * tint.r,
                    s[1] as f32 / 255.0 * tint.g,
                    s[2] as f32 / 255.0 * tint.b,
                    s[3] as f32 / 255.0 * tint.a,
                ];
                blend(self.pixels.get_pixel_mut(x, y), c);
            }
        }
    }

    fn draw_text(&mut self, font: &Font, text: &str, pos: Vec2, scale: f32, color: Color) {
        let gw = font.glyph_width as f32 * scale;
        let gh = font.glyph_height as f32 * scale;
        let mut pen = pos;
        for ch in text.chars() {
            if ch == '\n' {
                pen = Vec2::new(pos.x, pen.y + font.line_height as f32 * scale);
                continue;
            }
            let dst = Rect::new(pen.x, pen.y, gw, gh);
            match font.glyph_rect(ch) {
                Some(src) => self.draw_image(font.atlas(), Some(src), dst, color),
                None if !ch.is_whitespace() => {
                    self.fill_rect(Rect::new(dst.x + scale, dst.y + scale, gw - 2.0 * scale, gh - 2.0 * scale), color);
                }
                None => {}
            }
            pen.x += font.advance(scale);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_is_clipped_to_the_buffer() {
        let mut fb = FrameBuffer::new(4, 4);
        fb.fill_rect(Rect::new(-10.0, 2.0, 100.0, 100.0), Color::WHITE);
        assert_eq!(fb.pixel(0, 1), Some([0, 0, 0, 255]));
        assert_eq!(fb.pixel(3, 3), Some([255, 255, 255, 255]));
        assert_eq!(fb.pixel(4, 0), None);
    }

    #[test]
    fn half_alpha_blends_toward_the_source() {
        let mut fb = FrameBuffer::new(1, 1);
        fb.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::WHITE.with_alpha(0.5));
        let [r, g, b, a] = fb.pixel(0, 0).unwrap();
        assert_eq!((r, g, b, a), (128, 128, 128, 255));
    }

    #[test]
    fn image_is_scaled_nearest_neighbour() {
        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        img.put_pixel(1, 0, Rgba([0, 0, 255, 255]));
        let handle = ImageHandle::new(img);

        let mut fb = FrameBuffer::new(4, 2);
        fb.draw_image(&handle, None, Rect::new(0.0, 0.0, 4.0, 2.0), Color::WHITE);
        assert_eq!(fb.pixel(1, 1), Some([255, 0, 0, 255]));
        assert_eq!(fb.pixel(2, 0), Some([0, 0, 255, 255]));
    }
}
