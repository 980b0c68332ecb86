//! Screens and the managers that own them.
//!
//! A screen never holds a reference to its manager. It reports what should
//! happen next by returning a [`ScreenAction`] from `update`; the manager that
//! owns it applies the action, or hands it to the manager above.

pub mod stack;
pub mod widgets;

pub use stack::ScreenStack;

use std::str::FromStr;

use crate::game::GameContext;
use crate::renderer::Surface;

/// Whether a key event should reach the screens below.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Propagation {
    Continue,
    /// Consumed; nothing below sees this frame's input.
    Stop,
}

/// Structural request returned by [`Screen::update`].
pub enum ScreenAction {
    None,
    /// Open an overlay on the nearest stack.
    Push(Box<dyn Screen>),
    /// Close the overlay that returned this.
    Pop,
    /// Replace the screen in the nearest single-slot manager.
    Switch(Box<dyn Screen>),
    /// Leave the enclosing nested screen (the computer).
    Leave,
    /// Quit the process with this status.
    Exit(i32),
}

impl ScreenAction {
    pub fn is_none(&self) -> bool {
        matches!(self, ScreenAction::None)
    }
}

impl std::fmt::Debug for ScreenAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScreenAction::None => write!(f, "None"),
            ScreenAction::Push(s) => write!(f, "Push({})", s.name()),
            ScreenAction::Pop => write!(f, "Pop"),
            ScreenAction::Switch(s) => write!(f, "Switch({})", s.name()),
            ScreenAction::Leave => write!(f, "Leave"),
            ScreenAction::Exit(code) => write!(f, "Exit({code})"),
        }
    }
}

pub trait Screen: Send {
    fn name(&self) -> &str;

    fn load_resources(&mut self, _ctx: &mut GameContext) {}
    fn unload_resources(&mut self, _ctx: &mut GameContext) {}
    fn on_attach(&mut self, _ctx: &mut GameContext) {}
    fn on_detach(&mut self, _ctx: &mut GameContext) {}

    /// React to this frame's input. Only called while the screen is on top,
    /// or while every screen above it returned `Continue`.
    fn handle_input(&mut self, _ctx: &mut GameContext) -> Propagation {
        Propagation::Continue
    }

    fn update(&mut self, ctx: &mut GameContext) -> ScreenAction;

    fn draw(&self, ctx: &GameContext, surface: &mut dyn Surface);
}

/// Attach a screen to a manager: `on_attach`, then `load_resources`.
pub fn attach(screen: &mut dyn Screen, ctx: &mut GameContext) {
    log::info!("attaching screen {}", screen.name());
    screen.on_attach(ctx);
    screen.load_resources(ctx);
}

/// Detach a screen from its manager: `on_detach`, then `unload_resources`.
pub fn detach(screen: &mut dyn Screen, ctx: &mut GameContext) {
    log::info!("detaching screen {}", screen.name());
    screen.on_detach(ctx);
    screen.unload_resources(ctx);
}

// ── ScreenSlot ───────────────────────────────────────────────────────────────

/// Manager that holds at most one screen.
#[derive(Default)]
pub struct ScreenSlot {
    current: Option<Box<dyn Screen>>,
}

impl ScreenSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Detach the current screen (if any) and attach `screen` in its place.
    pub fn set(&mut self, mut screen: Box<dyn Screen>, ctx: &mut GameContext) {
        if let Some(mut old) = self.current.take() {
            detach(old.as_mut(), ctx);
        }
        attach(screen.as_mut(), ctx);
        self.current = Some(screen);
    }

    /// Detach and return the current screen.
    pub fn clear(&mut self, ctx: &mut GameContext) -> Option<Box<dyn Screen>> {
        let mut old = self.current.take()?;
        detach(old.as_mut(), ctx);
        Some(old)
    }

    pub fn current(&self) -> Option<&dyn Screen> {
        self.current.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.current.as_ref().map(|s| s.name())
    }

    pub fn handle_input(&mut self, ctx: &mut GameContext) -> Propagation {
        match self.current.as_mut() {
            Some(s) => s.handle_input(ctx),
            None => Propagation::Continue,
        }
    }

    pub fn update(&mut self, ctx: &mut GameContext) -> ScreenAction {
        match self.current.as_mut() {
            Some(s) => s.update(ctx),
            None => ScreenAction::None,
        }
    }

    pub fn draw(&self, ctx: &GameContext, surface: &mut dyn Surface) {
        if let Some(s) = self.current.as_ref() {
            s.draw(ctx, surface);
        }
    }
}

// ── ScreenId ─────────────────────────────────────────────────────────────────

/// Screens that can be started by name from the command line.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ScreenId {
    MainMenu,
    Branding,
    Desktop,
    FontTest,
    Shop,
    Game,
}

#[derive(Debug, thiserror::Error)]
#[error("unknown screen '{0}'")]
pub struct UnknownScreen(pub String);

impl FromStr for ScreenId {
    type Err = UnknownScreen;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "main-menu" => Ok(ScreenId::MainMenu),
            "branding" => Ok(ScreenId::Branding),
            "cherryos-desktop" => Ok(ScreenId::Desktop),
            "font-test" => Ok(ScreenId::FontTest),
            "shop" => Ok(ScreenId::Shop),
            "game" => Ok(ScreenId::Game),
            other => Err(UnknownScreen(other.to_string())),
        }
    }
}

impl ScreenId {
    /// A fresh instance of the screen.
    pub fn build(self) -> Box<dyn Screen> {
        use crate::screens::{
            BrandingScreen, ComputerScreen, FontTestScreen, GameplayScreen, MainMenuScreen, ShopScreen,
        };
        match self {
            ScreenId::MainMenu => Box::new(MainMenuScreen::new()),
            ScreenId::Branding => Box::new(BrandingScreen::new()),
            ScreenId::Desktop => Box::new(ComputerScreen::desktop_only(ScreenId::MainMenu)),
            ScreenId::FontTest => Box::new(FontTestScreen::new()),
            ScreenId::Game => Box::new(GameplayScreen::new()),
            ScreenId::Shop => Box::new(ShopScreen::new()),
        }
    }

    /// Whether starting here needs the assets loaded up front.
    pub fn needs_assets(self) -> bool {
        !matches!(self, ScreenId::Branding)
    }
}
