use super::menu_overlay_input;
use crate::game::GameContext;
use crate::input::Action;
use crate::renderer::Surface;
use crate::screen::widgets::{Widget, WidgetContainer};
use crate::screen::{Propagation, Screen, ScreenAction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsCommand {
    Language,
    Keybinds,
    Music,
    MusicVolume,
}

/// Settings overlay. The slider tracks the music volume live.
pub struct SettingsScreen {
    menu: WidgetContainer<SettingsCommand>,
    close: bool,
}

impl SettingsScreen {
    pub fn new() -> Self {
        Self { menu: WidgetContainer::new("Settings"), close: false }
    }

    pub fn volume(&self) -> Option<f32> {
        self.menu.find(SettingsCommand::MusicVolume).and_then(Widget::value)
    }
}

impl Default for SettingsScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for SettingsScreen {
    fn name(&self) -> &str {
        "settings"
    }

    fn on_attach(&mut self, ctx: &mut GameContext) {
        let language = format!("{} (Language)", ctx.text("string_language", "Language"));
        self.menu = WidgetContainer::new("Settings")
            .with(Widget::button(language, SettingsCommand::Language))
            .with(Widget::button(ctx.text("string_keybinds", "Keybinds"), SettingsCommand::Keybinds))
            .with(Widget::button(ctx.text("string_music", "Music"), SettingsCommand::Music))
            .with(Widget::slider(ctx.audio.music_volume(), SettingsCommand::MusicVolume));
    }

    fn handle_input(&mut self, ctx: &mut GameContext) -> Propagation {
        menu_overlay_input(&mut self.menu, ctx, &mut self.close)
    }

    fn update(&mut self, ctx: &mut GameContext) -> ScreenAction {
        if let Some(volume) = self.volume() {
            if (volume - ctx.audio.music_volume()).abs() > f32::EPSILON {
                ctx.audio.set_music_volume(volume);
            }
        }

        if std::mem::take(&mut self.close) {
            return ScreenAction::Pop;
        }
        match self.menu.take_activated() {
            // Only one language pack ships; both entries open the bindings list.
            Some(SettingsCommand::Language | SettingsCommand::Keybinds) => {
                ScreenAction::Push(Box::new(KeybindScreen::new()))
            }
            Some(SettingsCommand::Music | SettingsCommand::MusicVolume) | None => ScreenAction::None,
        }
    }

    fn draw(&self, ctx: &GameContext, surface: &mut dyn Surface) {
        self.menu.draw(&ctx.font, surface);
    }
}

// ── KeybindScreen ────────────────────────────────────────────────────────────

/// Bindings shown on the keybind list.
pub const LISTED_ACTIONS: [Action; 6] = [
    Action::MoveUp,
    Action::MoveLeft,
    Action::MoveDown,
    Action::MoveRight,
    Action::ToggleEdit,
    Action::ToggleDebug,
];

/// Read-only list of the current key bindings.
pub struct KeybindScreen {
    menu: WidgetContainer<Action>,
    close: bool,
}

impl KeybindScreen {
    pub fn new() -> Self {
        Self { menu: WidgetContainer::new("Keybinds"), close: false }
    }

    pub fn labels(&self) -> Vec<&str> {
        self.menu.widgets().iter().map(|w| w.label.as_str()).collect()
    }
}

impl Default for KeybindScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for KeybindScreen {
    fn name(&self) -> &str {
        "keybinds"
    }

    fn on_attach(&mut self, ctx: &mut GameContext) {
        let mut menu = WidgetContainer::new(ctx.text("string_keybinds", "Keybinds"));
        for action in LISTED_ACTIONS {
            let label = format!("{}: {:?}", action.label(), ctx.keybinds.key(action));
            menu.push(Widget::button(label, action));
        }
        self.menu = menu;
    }

    fn handle_input(&mut self, ctx: &mut GameContext) -> Propagation {
        menu_overlay_input(&mut self.menu, ctx, &mut self.close)
    }

    fn update(&mut self, _ctx: &mut GameContext) -> ScreenAction {
        // Rebinding is not supported; activations are dropped.
        self.menu.take_activated();
        if std::mem::take(&mut self.close) { ScreenAction::Pop } else { ScreenAction::None }
    }

    fn draw(&self, ctx: &GameContext, surface: &mut dyn Surface) {
        self.menu.draw(&ctx.font, surface);
    }
}
