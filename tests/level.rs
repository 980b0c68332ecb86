use ronery::level::*;
use ronery::tile::Tile;

use glam::Vec2;

// ── Files ─────────────────────────────────────────────────────────────────────

#[test]
fn two_layer_file_round_trips_byte_for_byte() {
    let mut bytes: Vec<u8> = (0..LAYER_BYTES).map(|i| (i % 43) as u8).collect();
    bytes.extend(std::iter::repeat_n(0u8, LAYER_BYTES));
    bytes[LAYER_BYTES + 63] = 41;
    assert_eq!(bytes.len(), 450);

    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("in.lvl");
    let dst = dir.path().join("out.lvl");
    std::fs::write(&src, &bytes).unwrap();

    let level = Level::load(&src).unwrap();
    assert_eq!(level.layer_count(), 2);
    assert_eq!(level.get(1, 3, 4), Some(Tile::LAPTOP));

    level.save(&dst).unwrap();
    assert_eq!(std::fs::read(&dst).unwrap(), bytes);
}

#[test]
fn partial_layer_is_rejected() {
    let bytes = vec![1u8; LAYER_BYTES + 10];
    assert!(matches!(Level::from_bytes(&bytes), Err(LevelError::TrailingBytes { .. })));
}

#[test]
fn empty_file_is_rejected() {
    assert!(Level::from_bytes(&[]).is_err());
}

#[test]
fn missing_file_is_an_error_not_a_panic() {
    let dir = tempfile::tempdir().unwrap();
    assert!(Level::load(dir.path().join("nope.lvl")).is_err());
}

// ── Cells ─────────────────────────────────────────────────────────────────────

#[test]
fn cells_are_row_major() {
    let mut level = Level::new(LEVEL_WIDTH, LEVEL_HEIGHT, 1);
    assert!(level.set(0, 3, 4, Tile::BRICKS));
    assert_eq!(level.layer(0).unwrap()[4 * 15 + 3], Tile::BRICKS);
}

#[test]
fn out_of_range_writes_are_ignored() {
    let mut level = Level::blank();
    let before = level.clone();
    assert!(!level.set(0, 15, 0, Tile::ROCK));
    assert!(!level.set(3, 0, 0, Tile::ROCK));
    assert_eq!(level, before);
}

#[test]
fn world_points_outside_the_grid_have_no_cell() {
    let level = Level::blank();
    assert_eq!(level.cell_at_world(Vec2::new(-1.0, 5.0)), None);
    assert_eq!(level.cell_at_world(Vec2::new(240.0, 5.0)), None);
    assert_eq!(level.cell_at_world(Vec2::new(17.0, 33.0)), Some(2 * 15 + 1));
}

#[test]
fn replace_all_touches_every_layer() {
    let mut level = Level::new(LEVEL_WIDTH, LEVEL_HEIGHT, 2);
    level.set(0, 0, 0, Tile::THORNS_ACTIVE);
    level.set(1, 5, 5, Tile::THORNS_ACTIVE);
    assert_eq!(level.replace_all(Tile::THORNS_ACTIVE, Tile::THORNS), 2);
    assert_eq!(level.get(1, 5, 5), Some(Tile::THORNS));
}
