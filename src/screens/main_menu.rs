use super::{FarewellScreen, GameplayScreen};
use crate::audio::keys;
use crate::game::GameContext;
use crate::renderer::Surface;
use crate::screen::widgets::{Widget, WidgetContainer};
use crate::screen::{Propagation, Screen, ScreenAction};

/// What a title menu button does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    NewGame,
    LoadSave,
    Settings,
    Exit,
}

/// Title menu. Built on attach so labels follow the loaded language.
/// New Game starts a session, Exit goes to the farewell screen.
pub struct MainMenuScreen {
    menu: WidgetContainer<MenuCommand>,
}

impl MainMenuScreen {
    pub fn new() -> Self {
        Self { menu: WidgetContainer::new("Main Menu") }
    }

    /// The button list, for inspecting focus and labels.
    pub fn menu(&self) -> &WidgetContainer<MenuCommand> {
        &self.menu
    }
}

impl Default for MainMenuScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for MainMenuScreen {
    fn name(&self) -> &str {
        "main_menu"
    }

    fn on_attach(&mut self, ctx: &mut GameContext) {
        self.menu = WidgetContainer::new("Main Menu")
            .with(Widget::button(ctx.text("string_new_game", "New Game"), MenuCommand::NewGame))
            .with(Widget::button(ctx.text("string_load_save", "Load Save"), MenuCommand::LoadSave))
            .with(Widget::button(ctx.text("string_settings", "Settings"), MenuCommand::Settings))
            .with(Widget::button(ctx.text("string_exit", "Exit"), MenuCommand::Exit));
        ctx.audio.play_music(keys::MAIN_MENU_MUSIC, 1.0);
    }

    fn handle_input(&mut self, ctx: &mut GameContext) -> Propagation {
        self.menu.handle_input(&ctx.input)
    }

    fn update(&mut self, _ctx: &mut GameContext) -> ScreenAction {
        match self.menu.take_activated() {
            Some(MenuCommand::NewGame) => ScreenAction::Switch(Box::new(GameplayScreen::new())),
            Some(MenuCommand::Exit) => ScreenAction::Switch(Box::new(FarewellScreen::new())),
            // Not implemented yet.
            Some(MenuCommand::LoadSave | MenuCommand::Settings) | None => ScreenAction::None,
        }
    }

    fn draw(&self, ctx: &GameContext, surface: &mut dyn Surface) {
        self.menu.draw(&ctx.font, surface);
    }
}
