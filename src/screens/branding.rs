use glam::Vec2;

use super::{LoadingScreen, MainMenuScreen};
use crate::assets::{ImageHandle, paths};
use crate::game::GameContext;
use crate::geometry::{Rect, screen_center, sin_fade};
use crate::input::KeyCode;
use crate::renderer::{Color, Surface};
use crate::screen::{Propagation, Screen, ScreenAction};

/// Ticks the logo takes to fade in.
pub const FADE_TICKS: u64 = 60;
/// Ticks before moving on when not skipped.
pub const SHOW_TICKS: u64 = 120;

/// Studio logo on white at startup.
#[derive(Default)]
pub struct BrandingScreen {
    logo: ImageHandle,
    started_at: u64,
    elapsed: u64,
    skip: bool,
}

impl BrandingScreen {
    pub fn new() -> Self {
        Self::default()
    }

    fn fade(&self) -> f32 {
        if self.elapsed < FADE_TICKS {
            sin_fade(self.elapsed as f32 / FADE_TICKS as f32)
        } else {
            1.0
        }
    }
}

impl Screen for BrandingScreen {
    fn name(&self) -> &str {
        "branding"
    }

    fn load_resources(&mut self, ctx: &mut GameContext) {
        self.logo = ctx.resources.image(paths::BRANDING_LOGO);
    }

    fn unload_resources(&mut self, _ctx: &mut GameContext) {
        self.logo = ImageHandle::missing();
    }

    fn on_attach(&mut self, ctx: &mut GameContext) {
        self.started_at = ctx.app_tick;
        ctx.start_loader();
    }

    fn handle_input(&mut self, ctx: &mut GameContext) -> Propagation {
        if ctx.input.is_key_pressed(KeyCode::Space) {
            self.skip = true;
            return Propagation::Stop;
        }
        Propagation::Continue
    }

    fn update(&mut self, ctx: &mut GameContext) -> ScreenAction {
        self.elapsed = ctx.app_tick - self.started_at;
        if self.elapsed < SHOW_TICKS && !self.skip {
            return ScreenAction::None;
        }
        if ctx.assets_ready {
            ScreenAction::Switch(Box::new(MainMenuScreen::new()))
        } else {
            ScreenAction::Switch(Box::new(LoadingScreen::new()))
        }
    }

    fn draw(&self, _ctx: &GameContext, surface: &mut dyn Surface) {
        surface.fill_rect(Rect::screen(), Color::WHITE);
        if let Some((w, h)) = self.logo.size() {
            let size = Vec2::new(w as f32, h as f32);
            let dst = Rect::from_pos_size(screen_center() - size * 0.5, size);
            surface.draw_image(&self.logo, None, dst, Color::WHITE.with_alpha(self.fade()));
        }
    }
}
