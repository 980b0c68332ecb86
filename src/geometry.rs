// =============================================================================
// GEOMETRY.RS: screen, tile and rectangle math
//
// Everything in the game lives in one of three coordinate spaces:
// - screen space: logical frame-buffer pixels (640 × 480)
// - world space:  pixels on the level grid, before camera zoom
// - cell space:   tile column/row on the level grid (16 px per tile)
// =============================================================================

use glam::{IVec2, UVec2, Vec2};

/// Logical frame-buffer width in pixels.
pub const SCREEN_WIDTH: u32 = 640;
/// Logical frame-buffer height in pixels.
pub const SCREEN_HEIGHT: u32 = 480;
/// Edge length of one level tile in world pixels.
pub const TILE_SIZE: u32 = 16;

/// Center of the logical screen.
#[inline]
pub fn screen_center() -> Vec2 {
    Vec2::new(SCREEN_WIDTH as f32 / 2.0, SCREEN_HEIGHT as f32 / 2.0)
}

/// Cell containing a world-space point. Floors toward negative infinity so
/// that points left of / above the grid map to negative cells.
#[inline]
pub fn world_to_cell(pos: Vec2) -> IVec2 {
    (pos / TILE_SIZE as f32).floor().as_ivec2()
}

/// World-space center of a cell.
#[inline]
pub fn cell_center(cell: UVec2) -> Vec2 {
    cell.as_vec2() * TILE_SIZE as f32 + Vec2::splat(TILE_SIZE as f32 / 2.0)
}

/// Source rectangle of frame `index` on a sprite sheet laid out in rows of
/// `columns` square cells of `size` pixels.
#[inline]
pub fn sheet_cell(index: u32, columns: u32, size: u32) -> Rect {
    let col = index % columns.max(1);
    let row = index / columns.max(1);
    Rect::new((col * size) as f32, (row * size) as f32, size as f32, size as f32)
}

// =============================================================================
// RECT
// =============================================================================

/// Axis-aligned rectangle with a top-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    /// The whole logical screen.
    pub fn screen() -> Self {
        Self::new(0.0, 0.0, SCREEN_WIDTH as f32, SCREEN_HEIGHT as f32)
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.w, self.h)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Half-open containment: the left/top edges are inside, the right/bottom
    /// edges are not.
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.y >= self.y && p.x < self.right() && p.y < self.bottom()
    }

    pub fn translate(&self, delta: Vec2) -> Self {
        Self::new(self.x + delta.x, self.y + delta.y, self.w, self.h)
    }

    /// Position of `p` relative to the top-left corner.
    #[inline]
    pub fn local(&self, p: Vec2) -> Vec2 {
        p - self.pos()
    }

    /// Overlap of two rectangles, or `None` when they are disjoint.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());
        (x1 > x0 && y1 > y0).then(|| Rect::new(x0, y0, x1 - x0, y1 - y0))
    }

    /// Rectangle of `size` centered inside `self`.
    pub fn centered(&self, size: Vec2) -> Rect {
        Rect::from_pos_size(self.pos() + (self.size() - size) * 0.5, size)
    }
}

// =============================================================================
// EASING
// =============================================================================

/// Half-period sine fade from 0 to 1, used by splash-style fade-ins.
#[inline]
pub fn sin_fade(t: f32) -> f32 {
    (t.clamp(0.0, 1.0) * std::f32::consts::FRAC_PI_2).sin()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_world_positions_floor_to_negative_cells() {
        assert_eq!(world_to_cell(Vec2::new(-1.0, 15.9)), IVec2::new(-1, 0));
        assert_eq!(world_to_cell(Vec2::new(16.0, 32.0)), IVec2::new(1, 2));
    }

    #[test]
    fn intersect_of_touching_rects_is_none() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(a.intersect(&b).is_none());
    }

    #[test]
    fn sheet_cells_wrap_by_row() {
        assert_eq!(sheet_cell(5, 4, 16), Rect::new(16.0, 16.0, 16.0, 16.0));
        assert_eq!(sheet_cell(3, 4, 16).x, 48.0);
    }
}
