use glam::Vec2;

use super::BootScreen;
use crate::game::GameContext;
use crate::geometry::Rect;
use crate::renderer::{Color, Surface};
use crate::screen::{Screen, ScreenAction};

/// Ticks until every line is visible.
pub const REVEAL_TICKS: u64 = 60;
/// Ticks before the boot logo.
pub const BIOS_TICKS: u64 = 120;

pub const BIOS_LINES: [&str; 11] = [
    "Adward Modular BIOS v05312",
    "(c) Adward Inc. 1998-2001",
    "",
    "Main Processor: Intel Core i9-12900K",
    "RDRAM Clock: 5000MHz",
    "Memory Test: 2625400K OK",
    "",
    "PNP Init Completed",
    "",
    "IDE Slot 0: STA241243622124",
    "IDE Slot 1: Optiarc MB62134",
];

/// Number of lines shown `elapsed` ticks after power-on.
pub fn visible_lines(elapsed: u64) -> usize {
    let t = (elapsed as f32 / REVEAL_TICKS as f32).min(1.0);
    (BIOS_LINES.len() as f32 * t) as usize
}

/// POST text, revealed line by line.
#[derive(Default)]
pub struct BiosScreen {
    started_at: u64,
    elapsed: u64,
}

impl BiosScreen {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Screen for BiosScreen {
    fn name(&self) -> &str {
        "bios"
    }

    fn on_attach(&mut self, ctx: &mut GameContext) {
        self.started_at = ctx.app_tick;
        self.elapsed = 0;
    }

    fn update(&mut self, ctx: &mut GameContext) -> ScreenAction {
        self.elapsed = ctx.app_tick - self.started_at;
        if self.elapsed >= BIOS_TICKS {
            return ScreenAction::Switch(Box::new(BootScreen::new()));
        }
        ScreenAction::None
    }

    fn draw(&self, ctx: &GameContext, surface: &mut dyn Surface) {
        surface.fill_rect(Rect::screen(), Color::BLACK);
        let scale = 2.0;
        let step = ctx.font.line_height as f32 * scale;
        for (i, line) in BIOS_LINES.iter().take(visible_lines(self.elapsed)).enumerate() {
            let pos = Vec2::new(16.0, 16.0 + i as f32 * step);
            surface.draw_text(&ctx.font, line, pos, scale, Color::WHITE);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_reveal_over_the_first_second() {
        assert_eq!(visible_lines(0), 0);
        assert_eq!(visible_lines(30), 5);
        assert_eq!(visible_lines(60), BIOS_LINES.len());
        assert_eq!(visible_lines(500), BIOS_LINES.len());
    }
}
