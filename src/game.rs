//! Shared game state and the top-level screen slot.

use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::assets::{LoadedAssets, Loader, ResourceCache, load_blocking};
use crate::audio::AudioContext;
use crate::camera::Camera;
use crate::config::GameConfig;
use crate::entity::{EntityId, EntityKind, NpcKind, World};
use crate::i18n::Localization;
use crate::input::{InputState, Keybinds};
use crate::level::Level;
use crate::renderer::{Font, Surface};
use crate::screen::{Screen, ScreenAction, ScreenSlot};
use crate::tile::TileRegistry;

/// NPCs spawned next to the player when a session starts.
pub const STARTING_NPCS: usize = 8;

/// Measured update and draw rates, refreshed once a second.
#[derive(Debug, Clone)]
pub struct FrameStats {
    pub tps: f32,
    pub fps: f32,
    window_start: Instant,
    ticks: u32,
    frames: u32,
}

impl FrameStats {
    pub fn record_tick(&mut self) {
        self.ticks += 1;
        self.roll();
    }

    pub fn record_frame(&mut self) {
        self.frames += 1;
        self.roll();
    }

    fn roll(&mut self) {
        let elapsed = self.window_start.elapsed().as_secs_f32();
        if elapsed >= 1.0 {
            self.tps = self.ticks as f32 / elapsed;
            self.fps = self.frames as f32 / elapsed;
            self.ticks = 0;
            self.frames = 0;
            self.window_start = Instant::now();
        }
    }
}

impl Default for FrameStats {
    fn default() -> Self {
        Self { tps: 0.0, fps: 0.0, window_start: Instant::now(), ticks: 0, frames: 0 }
    }
}

/// Everything screens read and write besides their own fields.
pub struct GameContext {
    pub config: GameConfig,
    pub tiles: TileRegistry,
    pub lang: Localization,
    pub keybinds: Keybinds,
    pub input: InputState,
    pub resources: ResourceCache,
    pub audio: AudioContext,
    pub font: Font,
    pub level: Level,
    pub world: World,
    pub camera: Camera,
    pub player: Option<EntityId>,
    /// Ticks since startup, advanced for every screen.
    pub app_tick: u64,
    /// Ticks of simulated gameplay; only the gameplay screen advances it.
    pub game_tick: u64,
    pub show_debug: bool,
    pub assets_ready: bool,
    pub loader: Option<Loader>,
    pub rng: SmallRng,
    pub stats: FrameStats,
    exit_code: Option<i32>,
}

impl GameContext {
    pub fn new(config: GameConfig, audio: AudioContext) -> Self {
        Self {
            tiles: TileRegistry::standard(),
            lang: Localization::new(),
            keybinds: Keybinds::default(),
            input: InputState::new(),
            resources: ResourceCache::new(),
            audio,
            font: Font::fallback(),
            level: Level::blank(),
            world: World::new(),
            camera: Camera::default(),
            player: None,
            app_tick: 0,
            game_tick: 0,
            show_debug: false,
            assets_ready: false,
            loader: None,
            rng: SmallRng::from_entropy(),
            stats: FrameStats::default(),
            exit_code: None,
            config,
        }
    }

    /// Context with default configuration, no audio device and a fixed RNG
    /// seed, for driving screens without a window.
    pub fn headless() -> Self {
        let mut ctx = Self::new(GameConfig::default(), AudioContext::disabled());
        ctx.rng = SmallRng::seed_from_u64(0);
        ctx
    }

    /// Localized text for `id`.
    pub fn text<'a>(&'a self, id: &str, fallback: &'a str) -> &'a str {
        self.lang.get(id, fallback)
    }

    pub fn request_exit(&mut self, code: i32) {
        log::info!("exit requested with status {code}");
        self.exit_code = Some(code);
    }

    pub fn exit_code(&self) -> Option<i32> {
        self.exit_code
    }

    // ── Asset installation ───────────────────────────────────────────────────

    pub fn start_loader(&mut self) {
        if self.loader.is_none() && !self.assets_ready {
            self.loader = Some(Loader::start(&self.config));
        }
    }

    /// Load everything on the calling thread.
    pub fn load_now(&mut self) {
        let assets = load_blocking(&self.config, |line| log::info!("{line}"));
        self.install(assets);
    }

    /// Check the background loader and install its result once it arrives.
    pub fn poll_loader(&mut self) {
        let Some(assets) = self.loader.as_mut().and_then(Loader::poll) else { return };
        self.install(assets);
    }

    /// Lines reported by the background loader so far.
    pub fn loading_log(&self) -> &[String] {
        match &self.loader {
            Some(loader) => loader.log(),
            None => &[],
        }
    }

    /// Take a finished preload into use and start a fresh session.
    pub fn install(&mut self, assets: LoadedAssets) {
        for (key, image) in assets.images {
            self.resources.insert_image(key, image);
        }
        for (name, sound) in assets.sounds {
            self.audio.insert_sound(&name, sound);
        }
        if let Some(level) = assets.level {
            self.level = level;
        }
        self.lang = assets.lang;
        self.keybinds = assets.keybinds;
        if let Some(desc) = assets.font {
            let atlas = self.resources.image(&desc.atlas_key());
            self.font = Font::new(&desc, atlas);
        }
        self.new_session();
        self.assets_ready = true;
        log::info!("assets ready");
    }

    /// Replace the population with a player and the starting NPCs and point
    /// the camera at the player.
    pub fn new_session(&mut self) {
        self.world.clear();
        let player = self.world.spawn(EntityKind::Player);
        for _ in 0..STARTING_NPCS {
            self.world.spawn(EntityKind::Wanderer(NpcKind::Michael));
        }
        self.player = Some(player);
        self.camera.set_zoom(self.config.initial_zoom);
        self.camera.target_entity(player, self.game_tick);
    }
}

// ── Game ─────────────────────────────────────────────────────────────────────

/// Top-level driver: one current screen, ticked and drawn by the engine.
pub struct Game {
    pub ctx: GameContext,
    slot: ScreenSlot,
}

impl Game {
    pub fn new(ctx: GameContext) -> Self {
        Self { ctx, slot: ScreenSlot::new() }
    }

    pub fn set_screen(&mut self, screen: Box<dyn Screen>) {
        self.slot.set(screen, &mut self.ctx);
    }

    pub fn current_screen(&self) -> Option<&str> {
        self.slot.name()
    }

    /// One fixed-rate tick: loader, input, update, then the requested action.
    pub fn tick(&mut self) {
        self.ctx.poll_loader();

        self.slot.handle_input(&mut self.ctx);
        let action = self.slot.update(&mut self.ctx);
        self.apply(action);

        self.ctx.app_tick += 1;
        self.ctx.stats.record_tick();
    }

    fn apply(&mut self, action: ScreenAction) {
        match action {
            ScreenAction::None => {}
            ScreenAction::Switch(screen) => self.set_screen(screen),
            ScreenAction::Push(screen) => {
                log::warn!("no overlay stack at the top level; switching to {}", screen.name());
                self.set_screen(screen);
            }
            ScreenAction::Pop | ScreenAction::Leave => {
                log::warn!("{action:?} has nothing to leave at the top level");
            }
            ScreenAction::Exit(code) => self.ctx.request_exit(code),
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        self.slot.draw(&self.ctx, surface);
    }

    /// Detach the current screen before shutdown.
    pub fn shutdown(&mut self) {
        self.slot.clear(&mut self.ctx);
        self.ctx.audio.stop_music(0.2);
    }

    pub fn exit_code(&self) -> Option<i32> {
        self.ctx.exit_code()
    }
}
