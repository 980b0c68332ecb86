//! Layered tile grid and its on-disk byte format.
//!
//! A level file is a plain concatenation of layers. Every layer is
//! `LEVEL_WIDTH * LEVEL_HEIGHT` bytes, one byte per cell, row-major. The file
//! length alone determines the layer count.

use std::fs;
use std::path::Path;

use glam::Vec2;

use crate::geometry::{TILE_SIZE, world_to_cell};
use crate::tile::{Tile, TileRegistry};

pub const LEVEL_WIDTH: usize = 15;
pub const LEVEL_HEIGHT: usize = 15;
/// Bytes per serialized layer.
pub const LAYER_BYTES: usize = LEVEL_WIDTH * LEVEL_HEIGHT;

#[derive(Debug, thiserror::Error)]
pub enum LevelError {
    #[error("level file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("level data is empty")]
    Empty,
    #[error("level data has {len} bytes, {trailing} past the last full 225-byte layer")]
    TrailingBytes { len: usize, trailing: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Level {
    width: usize,
    height: usize,
    layers: Vec<Vec<Tile>>,
}

impl Level {
    /// A level with `layer_count` layers of `EMPTY`.
    pub fn new(width: usize, height: usize, layer_count: usize) -> Self {
        Self { width, height, layers: vec![vec![Tile::EMPTY; width * height]; layer_count] }
    }

    /// Standard 15×15 level with a single grass layer.
    pub fn blank() -> Self {
        let mut level = Self::new(LEVEL_WIDTH, LEVEL_HEIGHT, 1);
        level.layers[0].fill(Tile::GRASS);
        level
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn layer(&self, index: usize) -> Option<&[Tile]> {
        self.layers.get(index).map(Vec::as_slice)
    }

    pub fn layers(&self) -> impl Iterator<Item = &[Tile]> {
        self.layers.iter().map(Vec::as_slice)
    }

    pub fn push_layer(&mut self) {
        self.layers.push(vec![Tile::EMPTY; self.width * self.height]);
    }

    /// Flat row-major index of an in-bounds cell.
    pub fn cell_index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    pub fn get(&self, layer: usize, x: usize, y: usize) -> Option<Tile> {
        let i = self.cell_index(x, y)?;
        self.layers.get(layer).map(|l| l[i])
    }

    /// Write one cell. Returns `false` (and leaves the level untouched) when the
    /// layer or cell is out of range.
    pub fn set(&mut self, layer: usize, x: usize, y: usize, tile: Tile) -> bool {
        let Some(i) = self.cell_index(x, y) else { return false };
        match self.layers.get_mut(layer) {
            Some(l) => {
                l[i] = tile;
                true
            }
            None => false,
        }
    }

    /// Cell index under a world-space point, `None` outside the grid.
    pub fn cell_at_world(&self, pos: Vec2) -> Option<usize> {
        let cell = world_to_cell(pos);
        if cell.x < 0 || cell.y < 0 {
            return None;
        }
        self.cell_index(cell.x as usize, cell.y as usize)
    }

    /// Non-empty tiles at a cell, in layer order.
    pub fn tiles_at(&self, cell: usize) -> impl Iterator<Item = Tile> + '_ {
        self.layers.iter().filter_map(move |l| l.get(cell).copied()).filter(|t| !t.is_empty())
    }

    /// True when any tile under `pos` is solid. Points off the grid are solid.
    pub fn is_solid_at(&self, pos: Vec2, tiles: &TileRegistry) -> bool {
        match self.cell_at_world(pos) {
            Some(cell) => self.tiles_at(cell).any(|t| !tiles.is_walkable(t)),
            None => true,
        }
    }

    /// Replace `from` with `to` in every layer at one cell. Returns the number
    /// of cells changed.
    pub fn replace_at(&mut self, cell: usize, from: Tile, to: Tile) -> usize {
        let mut changed = 0;
        for layer in &mut self.layers {
            if let Some(t) = layer.get_mut(cell) {
                if *t == from {
                    *t = to;
                    changed += 1;
                }
            }
        }
        changed
    }

    /// Replace `from` with `to` everywhere in the level.
    pub fn replace_all(&mut self, from: Tile, to: Tile) -> usize {
        let mut changed = 0;
        for t in self.layers.iter_mut().flatten() {
            if *t == from {
                *t = to;
                changed += 1;
            }
        }
        changed
    }

    /// World-space size of the grid.
    pub fn world_size(&self) -> Vec2 {
        Vec2::new((self.width as u32 * TILE_SIZE) as f32, (self.height as u32 * TILE_SIZE) as f32)
    }

    // ── Serialization ────────────────────────────────────────────────────────

    /// Parse a standard 15×15 level. Each full 225-byte chunk becomes a layer.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, LevelError> {
        if bytes.is_empty() {
            return Err(LevelError::Empty);
        }
        let trailing = bytes.len() % LAYER_BYTES;
        if trailing != 0 {
            return Err(LevelError::TrailingBytes { len: bytes.len(), trailing });
        }
        let layers = bytes
            .chunks_exact(LAYER_BYTES)
            .map(|chunk| chunk.iter().copied().map(Tile).collect())
            .collect();
        Ok(Self { width: LEVEL_WIDTH, height: LEVEL_HEIGHT, layers })
    }

    /// Concatenate all layers in order; the exact inverse of [`Level::from_bytes`].
    pub fn to_bytes(&self) -> Vec<u8> {
        self.layers.iter().flatten().map(|t| t.0).collect()
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        let level = Self::from_bytes(&bytes)?;
        log::info!("loaded level {} ({} layers)", path.display(), level.layer_count());
        Ok(level)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), LevelError> {
        let path = path.as_ref();
        log::info!("writing level file {}", path.display());
        fs::write(path, self.to_bytes())?;
        Ok(())
    }
}

impl Default for Level {
    fn default() -> Self {
        Self::blank()
    }
}
