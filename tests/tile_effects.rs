use glam::{UVec2, Vec2};

use ronery::entity::{Entity, EntityId, EntityKind, MAX_HEALTH, NpcKind, World};
use ronery::geometry::cell_center;
use ronery::level::Level;
use ronery::tile::Tile;
use ronery::tile_effects::*;

fn at(kind: EntityKind, x: u32, y: u32) -> Entity {
    let mut e = Entity::new(EntityId(7), kind);
    e.position = cell_center(UVec2::new(x, y));
    e
}

fn two_layers() -> Level {
    let mut level = Level::blank();
    level.push_layer();
    level
}

// ── Standing effects ──────────────────────────────────────────────────────────

#[test]
fn void_drains_full_health_in_exactly_a_thousand_ticks() {
    let mut level = Level::blank();
    level.set(0, 1, 1, Tile::VOID);

    let world = World::new();
    let id = world.spawn(EntityKind::Wanderer(NpcKind::Flan));
    world.with_entity(id, |e| e.position = cell_center(UVec2::new(1, 1)));

    let tick = |level: &mut Level| {
        for e in world.write().iter_mut() {
            process_entity(e, level);
        }
    };

    for _ in 0..999 {
        tick(&mut level);
        assert!(world.remove_dead().is_empty());
    }
    assert_eq!(world.with_entity(id, |e| e.health), Some(0.1));

    tick(&mut level);
    assert_eq!(world.with_entity(id, |e| e.health), Some(0.0));
    assert_eq!(world.remove_dead(), vec![id]);
    assert!(world.is_empty());
}

#[test]
fn damage_stays_on_the_health_grid() {
    let mut e = at(EntityKind::Player, 0, 0);
    for _ in 0..250 {
        e.damage(VOID_DAMAGE);
    }
    assert_eq!(e.health, 75.0);
    e.damage(THORNS_DAMAGE);
    assert_eq!(e.health, 65.0);
    assert!(!e.is_dead());
}

#[test]
fn stacked_tiles_all_apply_in_one_tick() {
    let mut level = two_layers();
    level.set(0, 4, 4, Tile::WATER);
    level.set(1, 4, 4, Tile::THORNS_ACTIVE);
    let mut e = at(EntityKind::Player, 4, 4);
    process_entity(&mut e, &mut level);
    assert_eq!(e.health, MAX_HEALTH - THORNS_DAMAGE);
    assert_eq!(e.speed_modifier, WATER_SLOWDOWN);
}

#[test]
fn speed_recovers_after_leaving_water() {
    let mut level = Level::blank();
    level.set(0, 4, 4, Tile::WATER);
    let mut e = at(EntityKind::Player, 4, 4);
    process_entity(&mut e, &mut level);
    e.position = cell_center(UVec2::new(5, 4));
    process_entity(&mut e, &mut level);
    assert_eq!(e.speed_modifier, 1.0);
}

#[test]
fn button_stays_pushed() {
    let mut level = two_layers();
    level.set(1, 2, 2, Tile::BUTTON);
    let mut e = at(EntityKind::Player, 2, 2);
    process_entity(&mut e, &mut level);
    assert_eq!(level.get(1, 2, 2), Some(Tile::BUTTON_PUSHED));
    e.position = cell_center(UVec2::new(3, 2));
    process_entity(&mut e, &mut level);
    assert_eq!(level.get(1, 2, 2), Some(Tile::BUTTON_PUSHED));
}

// ── Switch and thorns ─────────────────────────────────────────────────────────

#[test]
fn switch_disarms_every_thorn_once() {
    let mut level = two_layers();
    level.set(1, 2, 2, Tile::SWITCH);
    level.set(1, 10, 10, Tile::THORNS_ACTIVE);
    level.set(1, 11, 10, Tile::THORNS_ACTIVE);

    let mut e = at(EntityKind::Player, 2, 2);
    process_entity(&mut e, &mut level);
    assert_eq!(level.get(1, 2, 2), Some(Tile::SWITCH_ACTIVE));
    assert_eq!(level.get(1, 10, 10), Some(Tile::THORNS));
    assert_eq!(level.get(1, 11, 10), Some(Tile::THORNS));

    // A thorn re-armed while the switch is held stays armed.
    level.set(1, 10, 10, Tile::THORNS_ACTIVE);
    process_entity(&mut e, &mut level);
    assert_eq!(level.get(1, 10, 10), Some(Tile::THORNS_ACTIVE));
}

#[test]
fn stepping_off_a_switch_keeps_it_pushed() {
    let mut level = two_layers();
    level.set(1, 2, 2, Tile::SWITCH);
    level.set(1, 3, 2, Tile::THORNS_ACTIVE);

    let mut e = at(EntityKind::Player, 2, 2);
    process_entity(&mut e, &mut level);
    assert_eq!(level.get(1, 3, 2), Some(Tile::THORNS));

    // Onto the disarmed thorns: no damage, the switch stays down.
    e.position = cell_center(UVec2::new(3, 2));
    process_entity(&mut e, &mut level);
    assert_eq!(e.health, MAX_HEALTH);
    assert_eq!(level.get(1, 2, 2), Some(Tile::SWITCH_ACTIVE));
}

#[test]
fn leaving_thorns_rearms_them_and_releases_switches() {
    let mut level = two_layers();
    level.set(1, 2, 2, Tile::SWITCH);
    level.set(1, 3, 2, Tile::THORNS_ACTIVE);

    let mut e = at(EntityKind::Player, 2, 2);
    process_entity(&mut e, &mut level);
    e.position = cell_center(UVec2::new(3, 2));
    process_entity(&mut e, &mut level);

    e.position = cell_center(UVec2::new(4, 2));
    process_entity(&mut e, &mut level);
    assert_eq!(level.get(1, 3, 2), Some(Tile::THORNS_ACTIVE));
    assert_eq!(level.get(1, 2, 2), Some(Tile::SWITCH));
}

#[test]
fn unrelated_moves_leave_switches_alone() {
    let mut level = two_layers();
    level.set(1, 2, 2, Tile::SWITCH);
    level.set(0, 6, 6, Tile::GRASS);
    level.set(0, 7, 6, Tile::GRASS);

    let mut player = at(EntityKind::Player, 2, 2);
    process_entity(&mut player, &mut level);
    assert_eq!(level.get(1, 2, 2), Some(Tile::SWITCH_ACTIVE));

    let mut npc = at(EntityKind::Wanderer(NpcKind::Morgen), 6, 6);
    process_entity(&mut npc, &mut level);
    npc.position = cell_center(UVec2::new(7, 6));
    process_entity(&mut npc, &mut level);
    assert_eq!(level.get(1, 2, 2), Some(Tile::SWITCH_ACTIVE));
}

#[test]
fn off_grid_entities_are_left_alone() {
    let mut level = Level::blank();
    let mut e = at(EntityKind::Player, 0, 0);
    e.position = Vec2::new(-50.0, -50.0);
    assert_eq!(process_entity(&mut e, &mut level), None);
    assert_eq!(e.prev_cell, None);
}

// ── Triggers ──────────────────────────────────────────────────────────────────

#[test]
fn laptop_fires_again_after_stepping_off_and_back() {
    let mut level = Level::blank();
    level.set(0, 6, 6, Tile::LAPTOP);
    let mut e = at(EntityKind::Player, 6, 6);
    assert_eq!(process_entity(&mut e, &mut level), Some(TileTrigger::EnterComputer));
    e.position = cell_center(UVec2::new(7, 6));
    assert_eq!(process_entity(&mut e, &mut level), None);
    e.position = cell_center(UVec2::new(6, 6));
    assert_eq!(process_entity(&mut e, &mut level), Some(TileTrigger::EnterComputer));
}
