//! Tile ids and the descriptor table that gives them meaning.
//!
//! A [`Tile`] is a single byte stored in level layers. What the byte means
//! (its display name, whether entities can walk over it) lives in a
//! [`TileRegistry`] that is built once at startup and passed around by
//! reference.

use std::fmt;

use crate::geometry::{Rect, TILE_SIZE, sheet_cell};

/// Tiles per row on the tile sheet.
pub const TILESET_COLUMNS: u32 = 8;

/// One level cell value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Tile(pub u8);

impl Tile {
    pub const EMPTY: Tile = Tile(0);
    pub const GRASS: Tile = Tile(1);
    pub const SAND: Tile = Tile(2);
    pub const WATER: Tile = Tile(3);
    pub const VOID: Tile = Tile(4);
    pub const HOUSE_WALL: Tile = Tile(5);
    pub const CARVED_STONE: Tile = Tile(6);
    pub const BRICKS: Tile = Tile(7);
    pub const ROCK: Tile = Tile(8);
    pub const DOOR: Tile = Tile(9);
    pub const BARRIER: Tile = Tile(13);
    pub const SWITCH: Tile = Tile(14);
    pub const SWITCH_ACTIVE: Tile = Tile(15);
    pub const THORNS: Tile = Tile(25);
    pub const THORNS_ACTIVE: Tile = Tile(26);
    pub const BUTTON: Tile = Tile(27);
    pub const BUTTON_PUSHED: Tile = Tile(28);
    pub const LAPTOP: Tile = Tile(41);
    pub const HOUSE_FLOOR: Tile = Tile(42);

    #[inline]
    pub fn id(self) -> u8 {
        self.0
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self == Tile::EMPTY
    }

    /// Source rectangle of this tile on the tile sheet.
    pub fn sheet_rect(self) -> Rect {
        sheet_cell(self.0 as u32, TILESET_COLUMNS, TILE_SIZE)
    }
}

impl From<u8> for Tile {
    fn from(v: u8) -> Self {
        Tile(v)
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ── Descriptor table ─────────────────────────────────────────────────────────

/// Static facts about a tile id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileDescriptor {
    /// Localization key, e.g. `tile_id_grass`.
    pub name_key: &'static str,
    /// Name used when the key has no translation.
    pub display_name: &'static str,
    /// Whether entities may stand on / walk through the tile.
    pub walkable: bool,
}

const fn desc(name_key: &'static str, display_name: &'static str, walkable: bool) -> TileDescriptor {
    TileDescriptor { name_key, display_name, walkable }
}

/// Standard tile set. The index of each entry is its tile id, which is also
/// its cell index in the 16-column tile-map image.
const STANDARD_TILES: &[TileDescriptor] = &[
    desc("tile_id_empty", "Empty", true),
    desc("tile_id_grass", "Grass", true),
    desc("tile_id_sand", "Sand", true),
    desc("tile_id_water", "Water", true),
    desc("tile_id_void", "Void", true),
    desc("tile_id_house_wall", "House Wall", false),
    desc("tile_id_carved_stone", "Carved Stone", false),
    desc("tile_id_bricks", "Bricks", false),
    desc("tile_id_rock", "Rock", false),
    desc("tile_id_door", "Door", false),
    desc("tile_id_wall_corner_l", "Corner Bricks (Left)", true),
    desc("tile_id_wall_corner_r", "Corner Bricks (Right)", true),
    desc("tile_id_window", "Window", true),
    desc("tile_id_barrier", "Barrier", false),
    desc("tile_id_switch", "Switch", true),
    desc("tile_id_switch_active", "Pushed Switch", true),
    desc("tile_id_roof_nw", "Roof (Top-Left)", false),
    desc("tile_id_roof_top", "Roof (Top)", false),
    desc("tile_id_roof_ne", "Roof (Top-Right)", false),
    desc("tile_id_roof_left", "Roof (Left)", false),
    desc("tile_id_roof", "Roof (Center)", false),
    desc("tile_id_roof_right", "Roof (Right)", false),
    desc("tile_id_roof_sw", "Roof (Bottom-Left)", false),
    desc("tile_id_roof_bottom", "Roof (Bottom)", false),
    desc("tile_id_roof_se", "Roof (Bottom-Right)", false),
    desc("tile_id_thorns", "Thorns", true),
    desc("tile_id_thorns_active", "Activated Thorns", true),
    desc("tile_id_button", "Button", true),
    desc("tile_id_button_pushed", "Pushed Button", true),
    desc("tile_id_blender_nw", "Blender (Top-Left)", true),
    desc("tile_id_blender_top", "Blender (Top)", true),
    desc("tile_id_blender_ne", "Blender (Top-Right)", true),
    desc("tile_id_blender_left", "Blender (Left)", true),
    desc("tile_id_blender_right", "Blender (Right)", true),
    desc("tile_id_blender_sw", "Blender (Bottom-Left)", true),
    desc("tile_id_blender_bottom", "Blender (Bottom)", true),
    desc("tile_id_blender_se", "Blender (Bottom-Right)", true),
    desc("tile_id_table_bottom", "Table (Bottom)", false),
    desc("tile_id_table_top", "Table (Top)", false),
    desc("tile_id_bed_top", "Bed (Top)", false),
    desc("tile_id_bed_bottom", "Bed (Bottom)", false),
    desc("tile_id_laptop", "Laptop", true),
    desc("tile_id_house_floor", "Floor", true),
    desc("tile_id_house_inner_wall", "House Wall (Inner)", false),
    desc("tile_id_mine", "Mine", true),
    desc("tile_id_mine_flag", "Mine Flag", false),
    desc("tile_id_blood_digit_1", "Blood Digit 1", true),
    desc("tile_id_blood_digit_2", "Blood Digit 2", true),
    desc("tile_id_blood_digit_3", "Blood Digit 3", true),
    desc("tile_id_blood_digit_4", "Blood Digit 4", true),
    desc("tile_id_blood_digit_5", "Blood Digit 5", true),
    desc("tile_id_blood_digit_6", "Blood Digit 6", true),
    desc("tile_id_blood_digit_7", "Blood Digit 7", true),
    desc("tile_id_blood_digit_8", "Blood Digit 8", true),
    desc("tile_id_blood_digit_9", "Blood Digit 9", true),
    desc("tile_id_blood_digit_0", "Blood Digit 0", true),
    desc("tile_id_sokoban_box", "Sokoban Box", false),
    desc("tile_id_popping_barrier_pushed", "Popping Barrier (Pushed)", true),
    desc("tile_id_popping_barrier", "Popping Barrier", true),
    desc("tile_id_popping_barrier_active", "Popping Barrier (Active)", false),
    desc("tile_id_weight", "Weight", false),
    desc("tile_id_arrow_right", "Arrow Right", true),
    desc("tile_id_berry_bush", "Berried Bush", false),
    desc("tile_id_ball", "Ball", false),
    desc("tile_id_honey_ball", "Honey Ball", true),
    desc("tile_id_elevator", "Elevator", true),
    desc("tile_id_target", "Target", true),
    desc("tile_id_fence_single_top", "Fence Single (Top)", false),
    desc("tile_id_paved_road", "Paved Road", true),
    desc("tile_id_pit", "Pit", true),
    desc("tile_id_tree_1", "Tree 1", true),
    desc("tile_id_bush", "Bush", false),
    desc("tile_id_well", "Well", false),
    desc("tile_id_fence_nw", "Fence (NW)", false),
    desc("tile_id_paved_road_2", "Paved Road 2", true),
    desc("tile_id_castle_tower", "Castle Tower", false),
    desc("tile_id_tree_2", "Tree 2", true),
    desc("tile_id_tree_3", "Tree 3", true),
    desc("tile_id_flower_1", "Red Flower", true),
    desc("tile_id_slab", "Slab", false),
    desc("tile_id_arrow_left", "Arrow Left", true),
    desc("tile_id_aid", "Aid", true),
    desc("tile_id_blue_rose", "Blue Rose", true),
    desc("tile_id_color_digit_1", "Color Digit 1", true),
    desc("tile_id_color_digit_2", "Color Digit 2", true),
    desc("tile_id_color_digit_3", "Color Digit 3", true),
    desc("tile_id_poop", "Poop", true),
];

// ── TileRegistry ─────────────────────────────────────────────────────────────

/// Read-only tile id → descriptor lookup.
///
/// Ids are dense: every id below [`TileRegistry::len`] is registered.
#[derive(Debug, Clone)]
pub struct TileRegistry {
    descriptors: Vec<TileDescriptor>,
}

impl TileRegistry {
    /// The game's tile set.
    pub fn standard() -> Self {
        Self { descriptors: STANDARD_TILES.to_vec() }
    }

    /// Build a registry from an explicit table. Entry `i` describes `Tile(i)`;
    /// entries beyond 256 are ignored.
    pub fn from_descriptors(descriptors: impl IntoIterator<Item = TileDescriptor>) -> Self {
        Self { descriptors: descriptors.into_iter().take(256).collect() }
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub fn get(&self, tile: Tile) -> Option<&TileDescriptor> {
        self.descriptors.get(tile.0 as usize)
    }

    pub fn is_registered(&self, tile: Tile) -> bool {
        (tile.0 as usize) < self.descriptors.len()
    }

    /// Unregistered ids are walkable; only a descriptor can make a tile solid.
    pub fn is_walkable(&self, tile: Tile) -> bool {
        self.get(tile).map_or(true, |d| d.walkable)
    }

    /// Next registered id after `tile`, wrapping from the last id to the first.
    pub fn next_registered(&self, tile: Tile) -> Tile {
        let n = self.descriptors.len();
        if n == 0 {
            return tile;
        }
        let cur = (tile.0 as usize).min(n - 1);
        Tile(((cur + 1) % n) as u8)
    }

    /// Previous registered id before `tile`, wrapping from the first id to the last.
    pub fn prev_registered(&self, tile: Tile) -> Tile {
        let n = self.descriptors.len();
        if n == 0 {
            return tile;
        }
        let cur = (tile.0 as usize).min(n - 1);
        Tile(((cur + n - 1) % n) as u8)
    }
}

impl Default for TileRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
