//! Every concrete screen of the game.

pub mod branding;
pub mod computer;
pub mod debug;
pub mod farewell;
pub mod gameplay;
pub mod loading;
pub mod main_menu;
pub mod pause;
pub mod save_level;
pub mod settings;
pub mod shop;

pub use branding::BrandingScreen;
pub use computer::{ComputerScreen, DesktopScreen};
pub use debug::DebugScreen;
pub use farewell::FarewellScreen;
pub use font_test::FontTestScreen;
pub use gameplay::GameplayScreen;
pub use loading::LoadingScreen;
pub use main_menu::MainMenuScreen;
pub use pause::PauseMenu;
pub use save_level::SaveLevelScreen;
pub use settings::{KeybindScreen, SettingsScreen};
pub use shop::ShopScreen;

use crate::game::GameContext;
use crate::input::KeyCode;
use crate::screen::Propagation;
use crate::screen::widgets::WidgetContainer;

/// Input for a menu overlay: the menu first, then Escape requests a close.
/// Overlays are opaque, so the result is always `Stop`.
pub(crate) fn menu_overlay_input<C: Copy>(
    menu: &mut WidgetContainer<C>,
    ctx: &mut GameContext,
    close: &mut bool,
) -> Propagation {
    if menu.handle_input(&ctx.input) == Propagation::Continue && ctx.input.is_key_pressed(KeyCode::Escape) {
        *close = true;
    }
    Propagation::Stop
}
