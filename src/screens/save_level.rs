use super::menu_overlay_input;
use crate::game::GameContext;
use crate::renderer::Surface;
use crate::screen::widgets::{Widget, WidgetContainer};
use crate::screen::{Propagation, Screen, ScreenAction};

/// File name offered when the overlay opens.
pub const DEFAULT_LEVEL_FILE: &str = "level0.lvl";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveCommand {
    FileName,
    Save,
}

/// Asks for a file name and writes the current level there.
pub struct SaveLevelScreen {
    menu: WidgetContainer<SaveCommand>,
    close: bool,
}

impl SaveLevelScreen {
    pub fn new() -> Self {
        Self { menu: WidgetContainer::new("Save Level"), close: false }
    }

    pub fn file_name(&self) -> &str {
        self.menu.find(SaveCommand::FileName).map_or(DEFAULT_LEVEL_FILE, Widget::text)
    }
}

impl Default for SaveLevelScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for SaveLevelScreen {
    fn name(&self) -> &str {
        "save_level"
    }

    fn on_attach(&mut self, ctx: &mut GameContext) {
        self.menu = WidgetContainer::new(ctx.text("string_save_level", "Save Level"))
            .with(Widget::edit_box(DEFAULT_LEVEL_FILE, SaveCommand::FileName))
            .with(Widget::button(ctx.text("string_verb_save", "Save"), SaveCommand::Save));
    }

    fn handle_input(&mut self, ctx: &mut GameContext) -> Propagation {
        menu_overlay_input(&mut self.menu, ctx, &mut self.close)
    }

    fn update(&mut self, ctx: &mut GameContext) -> ScreenAction {
        if self.menu.take_activated() == Some(SaveCommand::Save) {
            let path = self.file_name().to_string();
            match ctx.level.save(&path) {
                Ok(()) => log::info!("level written to {path}"),
                Err(e) => log::error!("could not save level to {path}: {e}"),
            }
            return ScreenAction::Pop;
        }
        if std::mem::take(&mut self.close) { ScreenAction::Pop } else { ScreenAction::None }
    }

    fn draw(&self, ctx: &GameContext, surface: &mut dyn Surface) {
        self.menu.draw(&ctx.font, surface);
    }
}
