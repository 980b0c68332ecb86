//! World, entity and HUD drawing for the gameplay screen.

use std::collections::HashMap;

use glam::Vec2;

use crate::assets::{ImageHandle, ResourceCache, paths};
use crate::camera::CameraTarget;
use crate::entity::{Entity, EntityKind, MAX_HEALTH, NpcKind, SPRITE_ANCHOR, Spell, SpellKind};
use crate::game::GameContext;
use crate::geometry::{Rect, SCREEN_HEIGHT, SCREEN_WIDTH, TILE_SIZE, sheet_cell};
use crate::renderer::{Color, Surface};
use crate::screen::widgets::draw_panel;
use crate::tile::Tile;

const SPRITE_COLUMNS: u32 = 4;
const EXPLOSION_FRAMES: u64 = 12;

/// Images the gameplay screen holds while attached.
#[derive(Debug, Clone, Default)]
pub struct Sprites {
    pub tiles: ImageHandle,
    pub cursor: ImageHandle,
    pub explosion: ImageHandle,
    pub spell: ImageHandle,
    entities: HashMap<&'static str, ImageHandle>,
}

impl Sprites {
    pub fn load(resources: &mut ResourceCache) -> Self {
        let kinds = [
            EntityKind::Player,
            EntityKind::Wanderer(NpcKind::Michael),
            EntityKind::Wanderer(NpcKind::Morgen),
            EntityKind::Wanderer(NpcKind::Flan),
            EntityKind::Wanderer(NpcKind::Monobear),
        ];
        let entities = kinds
            .into_iter()
            .map(|kind| (kind.sprite_path(), resources.image(kind.sprite_path())))
            .collect();
        Self {
            tiles: resources.image(paths::TILE_MAP),
            cursor: resources.image(paths::TILE_CURSOR),
            explosion: resources.image(paths::EXPLOSION),
            spell: resources.image(paths::SPELL_MONOBEAR_EXPLOSION),
            entities,
        }
    }

    pub fn entity(&self, kind: EntityKind) -> Option<&ImageHandle> {
        self.entities.get(kind.sprite_path())
    }
}

// ── World ────────────────────────────────────────────────────────────────────

/// Every non-empty tile of every layer, bottom layer first.
pub fn draw_world(ctx: &GameContext, surface: &mut dyn Surface, sprites: &Sprites) {
    surface.fill_rect(Rect::screen(), Color::BLACK);

    let zoom = ctx.camera.zoom();
    let size = Vec2::splat(TILE_SIZE as f32 * zoom);
    let width = ctx.level.width();
    for layer in ctx.level.layers() {
        for (i, &tile) in layer.iter().enumerate() {
            if tile.is_empty() {
                continue;
            }
            let world = Vec2::new((i % width) as f32, (i / width) as f32) * TILE_SIZE as f32;
            let pos = ctx.camera.world_to_screen(world);
            let dst = Rect::from_pos_size(pos, size);
            if dst.intersect(&Rect::screen()).is_none() {
                continue;
            }
            surface.draw_image(&sprites.tiles, Some(tile.sheet_rect()), dst, Color::WHITE);
        }
    }
}

// ── Entities ─────────────────────────────────────────────────────────────────

/// Sprite frame for an entity: one row per look direction, three walk
/// frames advancing with speed.
pub fn sprite_frame(entity: &Entity, tick: u64) -> u32 {
    let walk = if entity.walking {
        let anim = (tick as f32 * entity.speed()) as u32;
        anim / 4 % 3
    } else {
        0
    };
    entity.look as u32 * 4 + walk
}

pub fn draw_entity(ctx: &GameContext, surface: &mut dyn Surface, sprites: &Sprites, entity: &Entity) {
    let zoom = ctx.camera.zoom();
    let pos = ctx.camera.world_to_screen(entity.position) - SPRITE_ANCHOR * zoom;
    let src = sheet_cell(sprite_frame(entity, ctx.game_tick), SPRITE_COLUMNS, TILE_SIZE);
    if let Some(image) = sprites.entity(entity.kind) {
        let dst = Rect::from_pos_size(pos, Vec2::splat(TILE_SIZE as f32 * zoom));
        surface.draw_image(image, Some(src), dst, Color::WHITE);
    }
    draw_health_bar(ctx, surface, entity);
}

/// Health colour: green at full health, through yellow, to red at zero.
pub fn health_color(health: f32) -> Color {
    let f = (health / MAX_HEALTH).clamp(0.0, 1.0);
    Color::from_hsl(f * f * 0.33, 1.0, 0.5)
}

fn draw_health_bar(ctx: &GameContext, surface: &mut dyn Surface, entity: &Entity) {
    let zoom = ctx.camera.zoom();
    let tile = TILE_SIZE as f32;
    let offset = Vec2::new(-tile / 2.0, -(tile + 4.0));
    let pos = ctx.camera.world_to_screen(entity.position + offset);

    surface.fill_rect(Rect::new(pos.x, pos.y, 16.0 * zoom, 3.0 * zoom), Color::BLACK);
    let fill = (entity.health / MAX_HEALTH).max(0.0) * (tile - 2.0) * zoom;
    surface.fill_rect(Rect::new(pos.x + zoom, pos.y + zoom, fill, zoom), health_color(entity.health));

    let focused = ctx.camera.target() == CameraTarget::Entity(entity.id);
    let color = if focused { Color::RED } else { Color::WHITE };
    let class = ctx.text(entity.kind.class_key(), entity.kind.class_fallback());
    surface.draw_text(&ctx.font, class, pos - Vec2::new(0.0, 11.0), 1.0, color);
}

pub fn draw_spell(ctx: &GameContext, surface: &mut dyn Surface, sprites: &Sprites, caster: &Entity, spell: &Spell) {
    match spell.kind {
        SpellKind::MonobearExplosion => {
            let pos = ctx.camera.world_to_screen(caster.position);
            surface.blit(&sprites.spell, pos - Vec2::splat(16.0), 1.0);
            surface.draw_text(&ctx.font, spell.label(), pos, 1.0, Color::WHITE);

            let zoom = ctx.camera.zoom();
            let frame = (ctx.game_tick / 4 % EXPLOSION_FRAMES) as u32;
            let size = Vec2::splat(TILE_SIZE as f32 * zoom);
            let dst = Rect::from_pos_size(pos - size * 0.5, size);
            surface.draw_image(&sprites.explosion, Some(sheet_cell(frame, 4, TILE_SIZE)), dst, Color::WHITE);
        }
    }
}

/// Per-entity readout shown while debug is on.
pub fn debug_lines(ctx: &GameContext, entity: &Entity) -> Vec<String> {
    let cell = |c: Option<usize>| c.map_or_else(|| "-".to_string(), |c| c.to_string());
    vec![
        format!("x: {:.6}, y: {:.6}", entity.position.x, entity.position.y),
        format!("walking: {}", entity.walking),
        format!("health: {:.6}", entity.health),
        format!("CurTilePos: {}", cell(ctx.level.cell_at_world(entity.position))),
        format!("PrevTilePos: {}", cell(entity.prev_cell)),
    ]
}

pub fn draw_debug_info(ctx: &GameContext, surface: &mut dyn Surface, entity: &Entity) {
    let tile = TILE_SIZE as f32;
    let mut pos = ctx.camera.world_to_screen(entity.position + Vec2::new(tile / 2.0, -tile));
    for line in debug_lines(ctx, entity) {
        surface.draw_text(&ctx.font, &line, pos, 1.0, Color::WHITE);
        pos.y += ctx.font.line_height as f32;
    }
}

// ── HUD ──────────────────────────────────────────────────────────────────────

/// Mode name in a panel at the top-left corner.
pub fn draw_mode_title(ctx: &GameContext, surface: &mut dyn Surface, text: &str) {
    let scale = 2.0;
    let glyph = Vec2::new(ctx.font.glyph_width as f32, ctx.font.glyph_height as f32) * scale;
    let dim = ctx.font.measure(text, scale);
    draw_panel(surface, Rect::from_pos_size(Vec2::ZERO, dim + glyph * 2.0));
    surface.draw_text(&ctx.font, text, glyph, scale, Color::RED);
}

/// Portrait, class and health of the entity the camera follows.
pub fn draw_focused_entity_info(ctx: &GameContext, surface: &mut dyn Surface, sprites: &Sprites) {
    let CameraTarget::Entity(id) = ctx.camera.target() else { return };
    let Some(entity) = ctx.world.get(id) else { return };

    let panel = Rect::new(64.0, SCREEN_HEIGHT as f32 - 128.0, SCREEN_WIDTH as f32 - 128.0, 128.0);
    draw_panel(surface, panel);

    if let Some(image) = sprites.entity(entity.kind) {
        let portrait = Rect::new(panel.x + 16.0, panel.y + 16.0, 64.0, 64.0);
        surface.draw_image(image, Some(sheet_cell(12, SPRITE_COLUMNS, TILE_SIZE)), portrait, Color::WHITE);
    }

    let text_x = panel.x + TILE_SIZE as f32 * 4.0 + 32.0;
    let class = ctx.text(entity.kind.class_key(), entity.kind.class_fallback());
    surface.draw_text(&ctx.font, class, Vec2::new(text_x, panel.y + 32.0), 2.0, Color::WHITE);

    let health = entity.health / MAX_HEALTH;
    if health > 0.0 {
        surface.fill_rect(Rect::new(text_x, panel.y + 56.0, 128.0, 16.0), Color::BLACK);
        let fill = Rect::new(text_x + 4.0, panel.y + 60.0, health * 120.0, 8.0);
        surface.fill_rect(fill, health_color(entity.health));
    } else {
        let pos = Vec2::new(text_x, panel.y + 56.0);
        surface.draw_text(&ctx.font, "Thank you for watching!", pos, 2.0, Color::RED);
    }
}

/// Tile preview with its name, walkability and id.
pub fn draw_tile_tooltip(ctx: &GameContext, surface: &mut dyn Surface, sprites: &Sprites, tile: Tile, title: &str) {
    let panel = Rect::new(0.0, SCREEN_HEIGHT as f32 - 96.0, 256.0, 96.0);
    draw_panel(surface, panel);

    let margin = 8.0;
    let preview = Rect::new(margin * 2.0, panel.bottom() - 64.0 - margin * 2.0, 64.0, 64.0);
    surface.draw_image(&sprites.tiles, Some(tile.sheet_rect()), preview, Color::WHITE);

    let mut pos = Vec2::new(preview.right() + margin, preview.y);
    surface.draw_text(&ctx.font, title, pos, 2.0, Color::WHITE);
    pos.y += ctx.font.line_height as f32 * 2.0;

    let (name, name_color) = match ctx.tiles.get(tile) {
        Some(desc) => (ctx.text(desc.name_key, desc.display_name), Color::WHITE),
        None => (ctx.text("string_unknown", "Unknown"), Color::RED),
    };
    surface.draw_text(&ctx.font, name, pos, 1.0, name_color);
    pos.y += ctx.font.line_height as f32 + 4.0;

    if ctx.tiles.is_registered(tile) {
        let (text, color) = if ctx.tiles.is_walkable(tile) {
            (ctx.text("string_walkable", "Walkable"), Color::from_rgba8(80, 140, 255, 255))
        } else {
            (ctx.text("string_solid", "Solid"), Color::RED)
        };
        surface.draw_text(&ctx.font, text, pos, 1.0, color);
        pos.y += ctx.font.line_height as f32 + 4.0;
    }

    surface.draw_text(&ctx.font, &format!("ID: {}", tile.id()), pos, 1.0, Color::GRAY);
}
