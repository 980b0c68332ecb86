//! Gameplay modes: who owns the arrow keys and where the camera looks.

use glam::{UVec2, Vec2};
use rand::Rng;

use super::render::{self, Sprites};
use crate::entity::LookDirection;
use crate::game::GameContext;
use crate::geometry::{Rect, TILE_SIZE};
use crate::input::{Action, KeyCode};
use crate::renderer::{Color, Surface};
use crate::tile::Tile;

/// Game ticks between camera hops in rotation mode.
pub const ROTATION_PERIOD: u64 = 16;

/// Outcome of offering input to the active mode.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ModeInput {
    /// Not handled; the gameplay screen checks its own keys.
    Ignored,
    Consumed,
    /// Consumed, and the mode asks to return to `Default`.
    Leave,
}

// ── EditMode ─────────────────────────────────────────────────────────────────

/// Tile painter state.
#[derive(Debug, Clone, PartialEq)]
pub struct EditMode {
    pub cursor: UVec2,
    pub brush: Tile,
    pub layer: usize,
    /// Show the tile under the cursor on the selected layer instead of the
    /// brush preview.
    pub xray: bool,
}

impl EditMode {
    pub fn new() -> Self {
        Self { cursor: UVec2::ZERO, brush: Tile::EMPTY, layer: 0, xray: false }
    }

    /// Tile currently stored at the cursor on the selected layer.
    pub fn tile_under_cursor(&self, ctx: &GameContext) -> Tile {
        ctx.level
            .get(self.layer, self.cursor.x as usize, self.cursor.y as usize)
            .unwrap_or(Tile::EMPTY)
    }

    fn handle_input(&mut self, ctx: &mut GameContext) -> ModeInput {
        let input = &ctx.input;
        let max_x = ctx.level.width().saturating_sub(1) as u32;
        let max_y = ctx.level.height().saturating_sub(1) as u32;
        let before = self.cursor;

        if input.is_key_pressed(KeyCode::ArrowRight) {
            self.cursor.x = (self.cursor.x + 1).min(max_x);
        }
        if input.is_key_pressed(KeyCode::ArrowLeft) {
            self.cursor.x = self.cursor.x.saturating_sub(1);
        }
        if input.is_key_pressed(KeyCode::ArrowUp) {
            self.cursor.y = self.cursor.y.saturating_sub(1);
        }
        if input.is_key_pressed(KeyCode::ArrowDown) {
            self.cursor.y = (self.cursor.y + 1).min(max_y);
        }
        if self.cursor != before {
            ctx.camera.move_cursor(self.cursor, ctx.game_tick);
        }

        let (x, y) = (self.cursor.x as usize, self.cursor.y as usize);
        let binds = &ctx.keybinds;
        if binds.pressed(Action::Place, input) {
            ctx.level.set(self.layer, x, y, self.brush);
        }
        if binds.pressed(Action::Delete, input) {
            ctx.level.set(self.layer, x, y, Tile::EMPTY);
        }
        if binds.pressed(Action::PrevBrush, input) {
            self.brush = ctx.tiles.prev_registered(self.brush);
        }
        if binds.pressed(Action::NextBrush, input) {
            self.brush = ctx.tiles.next_registered(self.brush);
        }
        if binds.pressed(Action::ToggleXray, input) {
            self.xray = !self.xray;
        }
        if binds.pressed(Action::PrevLayer, input) {
            self.layer = self.layer.saturating_sub(1);
        }
        if binds.pressed(Action::NextLayer, input) {
            self.layer = (self.layer + 1).min(ctx.level.layer_count().saturating_sub(1));
        }

        if binds.pressed(Action::ToggleEdit, input) {
            return ModeInput::Leave;
        }
        ModeInput::Ignored
    }

    fn draw(&self, ctx: &GameContext, surface: &mut dyn Surface, sprites: &Sprites) {
        let sub = if self.xray {
            ctx.text("string_edit_mode_xray", "x-ray")
        } else {
            ctx.text("string_edit_mode_paint", "Paint")
        };
        let title = format!("{} ({sub})", ctx.text("string_edit_mode", "Edit Mode"));
        render::draw_mode_title(ctx, surface, &title);

        let zoom = ctx.camera.zoom();
        let world = (self.cursor * TILE_SIZE).as_vec2();
        let pos = ctx.camera.world_to_screen(world);

        if let Some((w, h)) = sprites.cursor.size() {
            let dst = Rect::new(pos.x - 2.0 * zoom, pos.y - 2.0 * zoom, w as f32 * zoom, h as f32 * zoom);
            surface.draw_image(&sprites.cursor, None, dst, Color::WHITE);
        }

        let cell = Rect::from_pos_size(pos, Vec2::splat(TILE_SIZE as f32 * zoom));
        let selected = self.tile_under_cursor(ctx);
        if self.xray {
            // Highlight backing, then the stored tile on top.
            surface.draw_image(&sprites.tiles, Some(Tile(63).sheet_rect()), cell, Color::WHITE);
            surface.draw_image(&sprites.tiles, Some(selected.sheet_rect()), cell, Color::WHITE);
            let label = format!("{}: {}", ctx.text("string_layer", "Layer"), self.layer);
            surface.draw_text(&ctx.font, &label, pos - Vec2::new(0.0, 16.0), 2.0, Color::WHITE);
            render::draw_tile_tooltip(ctx, surface, sprites, self.brush, ctx.text("string_brush", "Brush"));
        } else {
            let pulse = 0.8 + (ctx.game_tick as f32 / 2.0).sin() * 0.2;
            surface.draw_image(
                &sprites.tiles,
                Some(self.brush.sheet_rect()),
                cell,
                Color::WHITE.with_alpha(pulse),
            );
            let title = format!("{}: {}", ctx.text("string_layer", "Layer"), self.layer);
            render::draw_tile_tooltip(ctx, surface, sprites, selected, &title);
        }
    }
}

impl Default for EditMode {
    fn default() -> Self {
        Self::new()
    }
}

// ── GameplayMode ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum GameplayMode {
    /// Arrow keys walk the player; the camera follows the player.
    Default,
    /// The camera hops between random entities; no direct control.
    EntityFocusRotation,
    Edit(EditMode),
}

impl GameplayMode {
    /// Point the camera at what this mode looks at. Called once per
    /// transition.
    pub fn enter(&self, ctx: &mut GameContext) {
        match self {
            GameplayMode::Default => {
                if let Some(player) = ctx.player {
                    ctx.camera.target_entity(player, ctx.game_tick);
                }
            }
            GameplayMode::EntityFocusRotation => focus_random_entity(ctx),
            GameplayMode::Edit(edit) => ctx.camera.target_cursor(edit.cursor, ctx.game_tick),
        }
    }

    pub fn handle_input(&mut self, ctx: &mut GameContext) -> ModeInput {
        match self {
            GameplayMode::Default => walk_player(ctx),
            GameplayMode::EntityFocusRotation => {
                if ctx.keybinds.pressed(Action::ToggleRotation, &ctx.input) {
                    ModeInput::Leave
                } else {
                    ModeInput::Ignored
                }
            }
            GameplayMode::Edit(edit) => edit.handle_input(ctx),
        }
    }

    pub fn update(&mut self, ctx: &mut GameContext) {
        if !matches!(self, GameplayMode::EntityFocusRotation) || ctx.game_tick % ROTATION_PERIOD != 0 {
            return;
        }
        focus_random_entity(ctx);
    }

    pub fn draw(&self, ctx: &GameContext, surface: &mut dyn Surface, sprites: &Sprites) {
        match self {
            GameplayMode::Default => {}
            GameplayMode::EntityFocusRotation => {
                let title = ctx.text("string_entity_focus_rotation", "Entity Focus Rotation");
                render::draw_mode_title(ctx, surface, title);
                render::draw_focused_entity_info(ctx, surface, sprites);
            }
            GameplayMode::Edit(edit) => edit.draw(ctx, surface, sprites),
        }
    }
}

/// Aim the camera at a uniformly picked live entity, if any.
fn focus_random_entity(ctx: &mut GameContext) {
    let ids = ctx.world.ids();
    if ids.is_empty() {
        return;
    }
    let pick = ids[ctx.rng.gen_range(0..ids.len())];
    ctx.camera.target_entity(pick, ctx.game_tick);
}

/// Arrow keys start and stop the player's walk. Releasing any movement key
/// stops it.
fn walk_player(ctx: &mut GameContext) -> ModeInput {
    let Some(player) = ctx.player else { return ModeInput::Ignored };
    let binds = &ctx.keybinds;
    let input = &ctx.input;

    let moves = [
        (Action::MoveRight, LookDirection::Right),
        (Action::MoveLeft, LookDirection::Left),
        (Action::MoveUp, LookDirection::Up),
        (Action::MoveDown, LookDirection::Down),
    ];

    if moves.iter().any(|&(action, _)| binds.released(action, input)) {
        ctx.world.with_entity(player, |e| e.end_walk());
        return ModeInput::Consumed;
    }
    for (action, look) in moves {
        if binds.pressed(action, input) {
            ctx.world.with_entity(player, |e| e.start_walk(look));
            return ModeInput::Consumed;
        }
    }
    ModeInput::Ignored
}
