use glam::Vec2;

use super::DesktopScreen;
use crate::assets::{ImageHandle, paths};
use crate::game::GameContext;
use crate::geometry::{Rect, screen_center};
use crate::renderer::{Color, Surface};
use crate::screen::{Screen, ScreenAction};

/// Ticks the boot logo stays up.
pub const BOOT_TICKS: u64 = 120;

#[derive(Default)]
pub struct BootScreen {
    logo: ImageHandle,
    started_at: u64,
}

impl BootScreen {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Screen for BootScreen {
    fn name(&self) -> &str {
        "xp-boot"
    }

    fn load_resources(&mut self, ctx: &mut GameContext) {
        self.logo = ctx.resources.image(paths::BOOT_LOGO);
    }

    fn unload_resources(&mut self, _ctx: &mut GameContext) {
        self.logo = ImageHandle::missing();
    }

    fn on_attach(&mut self, ctx: &mut GameContext) {
        self.started_at = ctx.app_tick;
    }

    fn update(&mut self, ctx: &mut GameContext) -> ScreenAction {
        if ctx.app_tick - self.started_at >= BOOT_TICKS {
            return ScreenAction::Switch(Box::new(DesktopScreen::new()));
        }
        ScreenAction::None
    }

    fn draw(&self, _ctx: &GameContext, surface: &mut dyn Surface) {
        surface.fill_rect(Rect::screen(), Color::BLACK);
        if let Some((w, h)) = self.logo.size() {
            let size = Vec2::new(w as f32, h as f32);
            surface.draw_image(&self.logo, None, Rect::from_pos_size(screen_center() - size * 0.5, size), Color::WHITE);
        }
    }
}
