use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::Deserialize;

use crate::assets::{ImageHandle, asset_key};
use crate::config::{ConfigError, read_json};
use crate::geometry::Rect;

// ── Glyph table layout ───────────────────────────────────────────────────────
//
// The atlas is a grid of equally sized cells. Printable ASCII (U+0020..U+007F)
// occupies the first 96 cells, Cyrillic (U+0400..U+045F) the next 96. Any
// other character is drawn as '?'.

const LATIN_FIRST: u32 = 0x0020;
const LATIN_LAST: u32 = 0x007F;
const CYRILLIC_FIRST: u32 = 0x0400;
const CYRILLIC_LAST: u32 = 0x045F;
const CYRILLIC_OFFSET: u32 = 96;

/// Horizontal gap between glyph cells when drawing, in unscaled pixels.
pub const GLYPH_SPACING: u32 = 1;

/// Atlas cell index of `ch`.
pub fn glyph_index(ch: char) -> u32 {
    let c = ch as u32;
    if (LATIN_FIRST..=LATIN_LAST).contains(&c) {
        c - LATIN_FIRST
    } else if (CYRILLIC_FIRST..=CYRILLIC_LAST).contains(&c) {
        CYRILLIC_OFFSET + c - CYRILLIC_FIRST
    } else {
        '?' as u32 - LATIN_FIRST
    }
}

// ── FontDescriptor ───────────────────────────────────────────────────────────

/// JSON font description:
///
/// ```json
/// { "name": "system", "asset": "font_system.png",
///   "glyph_width": 7, "glyph_height": 9, "line_height": 11 }
/// ```
///
/// `asset` is resolved relative to the descriptor's directory.
#[derive(Debug, Clone, Deserialize)]
pub struct FontDescriptor {
    pub name: String,
    pub asset: String,
    pub glyph_width: u32,
    pub glyph_height: u32,
    #[serde(default)]
    pub line_height: u32,
    #[serde(skip)]
    dir: PathBuf,
}

impl FontDescriptor {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let mut desc: FontDescriptor = read_json(path)?;
        desc.dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Ok(desc)
    }

    /// Cache key of the glyph atlas image.
    pub fn atlas_key(&self) -> String {
        asset_key(&self.dir.join(&self.asset))
    }
}

// ── Font ─────────────────────────────────────────────────────────────────────

/// Fixed-cell bitmap font.
#[derive(Debug, Clone)]
pub struct Font {
    pub name: String,
    pub glyph_width: u32,
    pub glyph_height: u32,
    pub line_height: u32,
    atlas: ImageHandle,
}

impl Font {
    pub fn new(desc: &FontDescriptor, atlas: ImageHandle) -> Self {
        let line_height = if desc.line_height == 0 { desc.glyph_height + 2 } else { desc.line_height };
        Self {
            name: desc.name.clone(),
            glyph_width: desc.glyph_width.max(1),
            glyph_height: desc.glyph_height.max(1),
            line_height,
            atlas,
        }
    }

    /// 7×9 metrics with no atlas; glyphs draw as solid cells.
    pub fn fallback() -> Self {
        Self {
            name: "fallback".to_string(),
            glyph_width: 7,
            glyph_height: 9,
            line_height: 11,
            atlas: ImageHandle::missing(),
        }
    }

    pub fn atlas(&self) -> &ImageHandle {
        &self.atlas
    }

    /// Source rectangle of `ch` inside the atlas, `None` without an atlas or
    /// when the cell lies outside it.
    pub fn glyph_rect(&self, ch: char) -> Option<Rect> {
        let (aw, ah) = self.atlas.size()?;
        let cols = aw / self.glyph_width;
        if cols == 0 {
            return None;
        }
        let i = glyph_index(ch);
        let x = (i % cols) * self.glyph_width;
        let y = (i / cols) * self.glyph_height;
        (y + self.glyph_height <= ah).then(|| {
            Rect::new(x as f32, y as f32, self.glyph_width as f32, self.glyph_height as f32)
        })
    }

    /// Pen advance per character at `scale`.
    pub fn advance(&self, scale: f32) -> f32 {
        (self.glyph_width + GLYPH_SPACING) as f32 * scale
    }

    /// Size of a single-line string: `(glyph_width + 1) * chars * scale` by
    /// `glyph_height * scale`.
    pub fn measure(&self, text: &str, scale: f32) -> Vec2 {
        let chars = text.chars().count() as f32;
        Vec2::new(self.advance(scale) * chars, self.glyph_height as f32 * scale)
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::fallback()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cyrillic_follows_latin_block() {
        assert_eq!(glyph_index(' '), 0);
        assert_eq!(glyph_index('A'), 33);
        assert_eq!(glyph_index('\u{0400}'), 96);
        assert_eq!(glyph_index('П'), 96 + 0x41F - 0x400);
        assert_eq!(glyph_index('€'), glyph_index('?'));
    }

    #[test]
    fn measure_counts_chars_not_bytes() {
        let font = Font::fallback();
        assert_eq!(font.measure("Пуск", 2.0), Vec2::new(8.0 * 4.0 * 2.0, 18.0));
    }
}
