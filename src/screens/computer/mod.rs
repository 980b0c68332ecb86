//! The laptop: a BIOS and boot sequence in front of a small window manager.
//!
//! [`ComputerScreen`] owns its own [`ScreenSlot`], so the boot screens and
//! the desktop switch among themselves without touching the top-level game.
//! Leaving (Escape on the desktop, or Right Ctrl + R anywhere) switches the
//! outer manager to the screen the computer was opened from.

pub mod bios;
pub mod boot;
pub mod desktop;
pub mod window;

pub use bios::BiosScreen;
pub use boot::BootScreen;
pub use desktop::DesktopScreen;
pub use window::{Hwnd, WindowKind, XpWindow};

use glam::Vec2;

use crate::audio::keys;
use crate::game::GameContext;
use crate::geometry::{Rect, SCREEN_WIDTH};
use crate::input::KeyCode;
use crate::renderer::{Color, Surface};
use crate::screen::widgets::draw_panel;
use crate::screen::{Propagation, Screen, ScreenAction, ScreenId, ScreenSlot};

const TIP_SLIDE_TICKS: f32 = 30.0;
const TIP_HOLD_UNTIL: f32 = 120.0;
const TIP_HIDE_AFTER: f32 = 150.0;
const TIP_SCALE: f32 = 2.0;

/// Vertical position of the release tip `elapsed` ticks after power-on, for
/// a tip of height `h`. Slides in from above, holds, slides out, then hides.
pub fn tip_y(elapsed: u64, h: f32) -> Option<f32> {
    let t = elapsed as f32;
    if t <= TIP_SLIDE_TICKS {
        Some(-h + 2.0 * h * t / TIP_SLIDE_TICKS)
    } else if t <= TIP_HOLD_UNTIL {
        Some(h)
    } else if t <= TIP_HIDE_AFTER {
        Some(-h + 2.0 * h * (1.0 - (t - TIP_HOLD_UNTIL) / TIP_SLIDE_TICKS))
    } else {
        None
    }
}

pub struct ComputerScreen {
    inner: ScreenSlot,
    next: ScreenId,
    boot: bool,
    started_at: u64,
    elapsed: u64,
    release: bool,
}

impl ComputerScreen {
    /// Full power-on: BIOS, boot logo, then the desktop.
    pub fn new(next: ScreenId) -> Self {
        Self {
            inner: ScreenSlot::new(),
            next,
            boot: true,
            started_at: 0,
            elapsed: 0,
            release: false,
        }
    }

    /// Straight to the desktop.
    pub fn desktop_only(next: ScreenId) -> Self {
        Self { boot: false, ..Self::new(next) }
    }

    pub fn next(&self) -> ScreenId {
        self.next
    }

    /// Name of the screen running inside the computer.
    pub fn inner_name(&self) -> Option<&str> {
        self.inner.name()
    }

    fn leave(&self) -> ScreenAction {
        log::info!("leaving the computer for {:?}", self.next);
        ScreenAction::Switch(self.next.build())
    }
}

impl Screen for ComputerScreen {
    fn name(&self) -> &str {
        "computer"
    }

    fn on_attach(&mut self, ctx: &mut GameContext) {
        self.started_at = ctx.app_tick;
        ctx.audio.play_music(keys::COMPUTER_MUSIC, 1.0);
        let first: Box<dyn Screen> = if self.boot {
            Box::new(BiosScreen::new())
        } else {
            Box::new(DesktopScreen::new())
        };
        self.inner.set(first, ctx);
    }

    fn on_detach(&mut self, ctx: &mut GameContext) {
        self.inner.clear(ctx);
    }

    fn handle_input(&mut self, ctx: &mut GameContext) -> Propagation {
        let input = &ctx.input;
        if input.is_key_held(KeyCode::ControlRight) && input.is_key_pressed(KeyCode::KeyR) {
            self.release = true;
            return Propagation::Stop;
        }
        self.inner.handle_input(ctx);
        Propagation::Stop
    }

    fn update(&mut self, ctx: &mut GameContext) -> ScreenAction {
        self.elapsed = ctx.app_tick - self.started_at;
        if std::mem::take(&mut self.release) {
            return self.leave();
        }

        match self.inner.update(ctx) {
            ScreenAction::None => ScreenAction::None,
            ScreenAction::Switch(screen) => {
                self.inner.set(screen, ctx);
                ScreenAction::None
            }
            ScreenAction::Leave => self.leave(),
            ScreenAction::Exit(code) => ScreenAction::Exit(code),
            ScreenAction::Push(screen) => {
                log::warn!("the computer has no overlays; switching to {}", screen.name());
                self.inner.set(screen, ctx);
                ScreenAction::None
            }
            ScreenAction::Pop => ScreenAction::None,
        }
    }

    fn draw(&self, ctx: &GameContext, surface: &mut dyn Surface) {
        self.inner.draw(ctx, surface);

        let tip = ctx.text("string_pc_release_tip", "Press Right Ctrl + R to release");
        let dim = ctx.font.measure(tip, TIP_SCALE);
        let pad = Vec2::new(ctx.font.glyph_width as f32, ctx.font.glyph_height as f32) * TIP_SCALE;
        let size = dim + pad * 2.0;
        if let Some(y) = tip_y(self.elapsed, size.y) {
            let panel = Rect::new((SCREEN_WIDTH as f32 - size.x) / 2.0, y, size.x, size.y);
            draw_panel(surface, panel);
            surface.draw_text(&ctx.font, tip, panel.pos() + pad, TIP_SCALE, Color::RED);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_tip_slides_in_holds_and_hides() {
        let h = 20.0;
        assert_eq!(tip_y(0, h), Some(-20.0));
        assert_eq!(tip_y(15, h), Some(0.0));
        assert_eq!(tip_y(30, h), Some(20.0));
        assert_eq!(tip_y(100, h), Some(20.0));
        assert_eq!(tip_y(150, h), Some(-20.0));
        assert_eq!(tip_y(151, h), None);
    }
}
