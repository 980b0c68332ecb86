use glam::Vec2;

use crate::game::GameContext;
use crate::renderer::{Color, Surface};

/// Builds one line of the debug readout.
type DebugLine = fn(&GameContext) -> String;

fn tick_rate(ctx: &GameContext) -> String {
    format!("TPS: {:.2}, TPS Max: {}", ctx.stats.tps, ctx.config.tick_rate)
}

fn frame_rate(ctx: &GameContext) -> String {
    format!("FPS: {:.2}", ctx.stats.fps)
}

fn player_position(ctx: &GameContext) -> String {
    match ctx.player.and_then(|id| ctx.world.position_of(id)) {
        Some(p) => format!("World pos x: {:.6}, y: {:.6}", p.x, p.y),
        None => "World pos: -".to_string(),
    }
}

fn player_cell(ctx: &GameContext) -> String {
    let cell = ctx
        .player
        .and_then(|id| ctx.world.position_of(id))
        .and_then(|p| ctx.level.cell_at_world(p));
    match cell {
        Some(cell) => format!("Tile pos: {cell}"),
        None => "Tile pos: -".to_string(),
    }
}

/// Text readout drawn over the gameplay view while debug is on.
pub struct DebugScreen {
    lines: Vec<DebugLine>,
}

impl DebugScreen {
    pub fn new() -> Self {
        Self { lines: vec![tick_rate, frame_rate, player_position, player_cell] }
    }

    pub fn lines(&self, ctx: &GameContext) -> Vec<String> {
        self.lines.iter().map(|line| line(ctx)).collect()
    }

    pub fn draw(&self, ctx: &GameContext, surface: &mut dyn Surface) {
        for (i, line) in self.lines(ctx).iter().enumerate() {
            let pos = Vec2::new(0.0, 24.0 * i as f32);
            surface.draw_text(&ctx.font, line, pos + Vec2::ONE, 1.0, Color::BLACK);
            surface.draw_text(&ctx.font, line, pos, 1.0, Color::WHITE);
        }
    }
}

impl Default for DebugScreen {
    fn default() -> Self {
        Self::new()
    }
}
