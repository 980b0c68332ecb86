use glam::Vec2;

use crate::assets::{ImageHandle, paths};
use crate::game::GameContext;
use crate::geometry::{Rect, screen_center, sheet_cell};
use crate::renderer::{Color, Surface};
use crate::screen::{Propagation, Screen, ScreenAction};

/// Ticks the goodbye stays up before the process exits.
pub const FAREWELL_TICKS: u64 = 180;

/// Goodbye animation shown after "Exit" in the main menu.
#[derive(Default)]
pub struct FarewellScreen {
    wave: ImageHandle,
    started_at: u64,
}

impl FarewellScreen {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Screen for FarewellScreen {
    fn name(&self) -> &str {
        "farewell"
    }

    fn load_resources(&mut self, ctx: &mut GameContext) {
        self.wave = ctx.resources.image(paths::SEEYA);
    }

    fn unload_resources(&mut self, _ctx: &mut GameContext) {
        self.wave = ImageHandle::missing();
    }

    fn on_attach(&mut self, ctx: &mut GameContext) {
        self.started_at = ctx.app_tick;
        ctx.audio.stop_music(1.0);
    }

    fn handle_input(&mut self, _ctx: &mut GameContext) -> Propagation {
        Propagation::Stop
    }

    fn update(&mut self, ctx: &mut GameContext) -> ScreenAction {
        if ctx.app_tick - self.started_at > FAREWELL_TICKS {
            ScreenAction::Exit(0)
        } else {
            ScreenAction::None
        }
    }

    fn draw(&self, ctx: &GameContext, surface: &mut dyn Surface) {
        surface.fill_rect(Rect::screen(), Color::BLACK);

        let text = ctx.text("string_seeya", "See you again.");
        let dim = ctx.font.measure(text, 2.0);
        surface.draw_text(&ctx.font, text, screen_center() - dim * 0.5, 2.0, Color::WHITE);

        let frame = (ctx.app_tick / 8 % 3) as u32;
        let size = Vec2::splat(16.0 * 4.0);
        let center = screen_center() + Vec2::new(0.0, dim.y + 100.0);
        let dst = Rect::from_pos_size(center - size * 0.5, size);
        surface.draw_image(&self.wave, Some(sheet_cell(frame, 4, 16)), dst, Color::WHITE);
    }
}
