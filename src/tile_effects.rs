//! What tiles do to the entities standing on them, and what leaving a tile
//! does to the level.
//!
//! Runs once per entity per game tick, right after the entity has walked:
//! first leave detection against the previous cell, then the standing rules
//! for every non-empty tile under the entity.

use crate::entity::Entity;
use crate::level::Level;
use crate::tile::Tile;

pub const VOID_DAMAGE: f32 = 0.1;
pub const THORNS_DAMAGE: f32 = 10.0;
pub const WATER_SLOWDOWN: f32 = 0.5;

/// Something a tile asks the surrounding screen to do.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TileTrigger {
    /// The player stepped onto a laptop.
    EnterComputer,
}

/// Leave detection followed by standing effects for one entity.
pub fn process_entity(entity: &mut Entity, level: &mut Level) -> Option<TileTrigger> {
    let current = level.cell_at_world(entity.position);
    let entered = current != entity.prev_cell;
    if entered {
        if let Some(prev) = entity.prev_cell {
            on_leave(level, prev);
        }
        entity.prev_cell = current;
    }

    let cell = current?;
    apply_standing(entity, level, cell, entered)
}

/// Re-arm the thorns at `cell`. Leaving thorns also releases every pushed
/// switch in the level; leaving any other cell changes nothing else.
pub fn on_leave(level: &mut Level, cell: usize) {
    if level.replace_at(cell, Tile::THORNS, Tile::THORNS_ACTIVE) > 0 {
        level.replace_all(Tile::SWITCH_ACTIVE, Tile::SWITCH);
    }
}

/// Apply every standing rule for the tiles at `cell`, in layer order.
///
/// `entered` is true on the first tick the entity spends on this cell.
pub fn apply_standing(
    entity: &mut Entity,
    level: &mut Level,
    cell: usize,
    entered: bool,
) -> Option<TileTrigger> {
    entity.speed_modifier = entity.base_speed_modifier;

    let mut trigger = None;
    let tiles: Vec<Tile> = level.tiles_at(cell).collect();
    for tile in tiles {
        match tile {
            Tile::VOID => entity.damage(VOID_DAMAGE),
            Tile::WATER => entity.speed_modifier *= WATER_SLOWDOWN,
            Tile::THORNS_ACTIVE => entity.damage(THORNS_DAMAGE),
            Tile::SWITCH => {
                if level.replace_at(cell, Tile::SWITCH, Tile::SWITCH_ACTIVE) > 0 {
                    level.replace_all(Tile::THORNS_ACTIVE, Tile::THORNS);
                }
            }
            Tile::BUTTON => {
                level.replace_at(cell, Tile::BUTTON, Tile::BUTTON_PUSHED);
            }
            Tile::LAPTOP if entity.is_player() && entered => {
                trigger = Some(TileTrigger::EnterComputer);
            }
            _ => {}
        }
    }
    trigger
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{EntityId, EntityKind, NpcKind};
    use glam::Vec2;

    fn standing_at(kind: EntityKind, x: usize, y: usize) -> Entity {
        let mut e = Entity::new(EntityId(0), kind);
        e.position = Vec2::new(x as f32 * 16.0 + 8.0, y as f32 * 16.0 + 8.0);
        e
    }

    #[test]
    fn water_halves_the_base_modifier_every_tick() {
        let mut level = Level::blank();
        level.set(0, 2, 2, Tile::WATER);
        let mut e = standing_at(EntityKind::Wanderer(NpcKind::Morgen), 2, 2);
        for _ in 0..5 {
            process_entity(&mut e, &mut level);
        }
        assert_eq!(e.speed_modifier, 0.75 * WATER_SLOWDOWN);
    }

    #[test]
    fn laptop_fires_only_on_entry() {
        let mut level = Level::blank();
        level.push_layer();
        level.set(1, 3, 3, Tile::LAPTOP);
        let mut e = standing_at(EntityKind::Player, 3, 3);
        assert_eq!(process_entity(&mut e, &mut level), Some(TileTrigger::EnterComputer));
        assert_eq!(process_entity(&mut e, &mut level), None);
    }

    #[test]
    fn npcs_ignore_laptops() {
        let mut level = Level::blank();
        level.set(0, 3, 3, Tile::LAPTOP);
        let mut e = standing_at(EntityKind::Wanderer(NpcKind::Michael), 3, 3);
        assert_eq!(process_entity(&mut e, &mut level), None);
    }
}
