use glam::Vec2;

use super::MainMenuScreen;
use crate::game::GameContext;
use crate::geometry::Rect;
use crate::renderer::{Color, Surface};
use crate::screen::{Screen, ScreenAction};

/// Shown while the background loader is still running.
#[derive(Default)]
pub struct LoadingScreen;

impl LoadingScreen {
    pub fn new() -> Self {
        Self
    }
}

impl Screen for LoadingScreen {
    fn name(&self) -> &str {
        "loading"
    }

    fn on_attach(&mut self, ctx: &mut GameContext) {
        ctx.start_loader();
    }

    fn update(&mut self, ctx: &mut GameContext) -> ScreenAction {
        if ctx.assets_ready {
            ScreenAction::Switch(Box::new(MainMenuScreen::new()))
        } else {
            ScreenAction::None
        }
    }

    fn draw(&self, ctx: &GameContext, surface: &mut dyn Surface) {
        surface.fill_rect(Rect::screen(), Color::BLACK);
        surface.draw_text(&ctx.font, "Loading...", Vec2::new(10.0, 10.0), 2.0, Color::WHITE);

        // Keep the newest lines on screen.
        let log = ctx.loading_log();
        let rows = 27;
        let start = log.len().saturating_sub(rows);
        for (i, line) in log[start..].iter().enumerate() {
            let pos = Vec2::new(10.0, 32.0 + i as f32 * 16.0);
            surface.draw_text(&ctx.font, line, pos, 1.0, Color::WHITE);
        }
    }
}
