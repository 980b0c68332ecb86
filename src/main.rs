use std::str::FromStr;

use anyhow::Context as _;

use ronery::audio::AudioContext;
use ronery::config::{CONFIG_FILE, GameConfig};
use ronery::engine::EngineBuilder;
use ronery::game::{Game, GameContext};
use ronery::screen::{Screen, ScreenId};
use ronery::screens::BrandingScreen;

/// Value of `--screen=<name>`, if given.
fn screen_arg() -> Option<String> {
    std::env::args().find_map(|arg| arg.strip_prefix("--screen=").map(str::to_string))
}

/// The screen named on the command line, or `None` for the branded startup.
fn initial_screen(name: Option<&str>) -> Option<(ScreenId, Box<dyn Screen>)> {
    let name = name?;
    let id = match ScreenId::from_str(name) {
        Ok(id) => id,
        Err(e) => {
            log::warn!("{e}; starting normally");
            return None;
        }
    };
    Some((id, id.build()))
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = GameConfig::load_or_default(CONFIG_FILE);
    let audio = AudioContext::new(config.audio.clone());
    let mut ctx = GameContext::new(config.clone(), audio);

    let screen: Box<dyn Screen> = match initial_screen(screen_arg().as_deref()) {
        Some((id, screen)) => {
            if id.needs_assets() {
                ctx.load_now();
            }
            screen
        }
        None => Box::new(BrandingScreen::new()),
    };

    let mut game = Game::new(ctx);
    game.set_screen(screen);

    let code = EngineBuilder::new()
        .with_window(config.window)
        .with_ups(config.tick_rate)
        .run(game)
        .context("the game stopped unexpectedly")?;

    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}
