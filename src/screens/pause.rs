use super::{MainMenuScreen, SaveLevelScreen, SettingsScreen, menu_overlay_input};
use crate::game::GameContext;
use crate::renderer::Surface;
use crate::screen::widgets::{Widget, WidgetContainer};
use crate::screen::{Propagation, Screen, ScreenAction};

/// What a pause menu button does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseCommand {
    /// Close the overlay.
    Resume,
    /// Open the save-level prompt on top.
    SaveLevel,
    Settings,
    /// Abandon the session for the title menu.
    MainMenu,
}

/// In-game pause overlay. Swallows all input while open.
pub struct PauseMenu {
    menu: WidgetContainer<PauseCommand>,
    close: bool,
}

impl PauseMenu {
    /// Empty menu; the buttons are built on attach in the loaded language.
    pub fn new() -> Self {
        Self { menu: WidgetContainer::new("Paused"), close: false }
    }
}

impl Default for PauseMenu {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for PauseMenu {
    fn name(&self) -> &str {
        "pause_menu"
    }

    fn on_attach(&mut self, ctx: &mut GameContext) {
        self.menu = WidgetContainer::new("Paused")
            .with(Widget::button(ctx.text("string_resume_game", "Resume Game"), PauseCommand::Resume))
            .with(Widget::button(ctx.text("string_save_level", "Save Level"), PauseCommand::SaveLevel))
            .with(Widget::button(ctx.text("string_settings", "Settings"), PauseCommand::Settings))
            .with(Widget::button(ctx.text("string_main_menu", "Main Menu"), PauseCommand::MainMenu));
    }

    fn handle_input(&mut self, ctx: &mut GameContext) -> Propagation {
        menu_overlay_input(&mut self.menu, ctx, &mut self.close)
    }

    /// Escape and Resume pop the overlay; Main Menu replaces the whole
    /// gameplay screen.
    fn update(&mut self, _ctx: &mut GameContext) -> ScreenAction {
        if std::mem::take(&mut self.close) {
            return ScreenAction::Pop;
        }
        match self.menu.take_activated() {
            Some(PauseCommand::Resume) => ScreenAction::Pop,
            Some(PauseCommand::SaveLevel) => ScreenAction::Push(Box::new(SaveLevelScreen::new())),
            Some(PauseCommand::Settings) => ScreenAction::Push(Box::new(SettingsScreen::new())),
            Some(PauseCommand::MainMenu) => ScreenAction::Switch(Box::new(MainMenuScreen::new())),
            None => ScreenAction::None,
        }
    }

    fn draw(&self, ctx: &GameContext, surface: &mut dyn Surface) {
        self.menu.draw(&ctx.font, surface);
    }
}
