//! The in-game screen: level, entities, camera and the overlay stack.

pub mod mode;
pub mod render;

pub use mode::{EditMode, GameplayMode, ModeInput, ROTATION_PERIOD};
pub use render::Sprites;

use super::{ComputerScreen, DebugScreen, PauseMenu};
use crate::audio::keys;
use crate::game::GameContext;
use crate::input::{Action, KeyCode};
use crate::renderer::Surface;
use crate::screen::{Propagation, Screen, ScreenAction, ScreenId, ScreenStack};
use crate::tile_effects::TileTrigger;

/// Zoom change per key press.
pub const ZOOM_STEP: f32 = 1.0;

pub struct GameplayScreen {
    mode: GameplayMode,
    overlays: ScreenStack,
    debug: DebugScreen,
    sprites: Sprites,
}

impl GameplayScreen {
    pub fn new() -> Self {
        Self {
            mode: GameplayMode::Default,
            overlays: ScreenStack::new(),
            debug: DebugScreen::new(),
            sprites: Sprites::default(),
        }
    }

    pub fn mode(&self) -> &GameplayMode {
        &self.mode
    }

    pub fn overlays(&self) -> &ScreenStack {
        &self.overlays
    }

    /// Replace the mode with a fresh one and retarget the camera.
    pub fn set_mode(&mut self, mode: GameplayMode, ctx: &mut GameContext) {
        log::debug!("gameplay mode {mode:?}");
        mode.enter(ctx);
        self.mode = mode;
    }

    pub fn push_overlay(&self, screen: Box<dyn Screen>, ctx: &mut GameContext) {
        self.overlays.push(screen, ctx);
    }

    /// Advance every entity once, in list order. Returns the first tile
    /// trigger raised.
    fn update_entities(ctx: &mut GameContext) -> Option<TileTrigger> {
        let mut trigger = None;
        let mut entities = ctx.world.write();
        for entity in entities.iter_mut() {
            let fired = entity.update(&mut ctx.level, &ctx.tiles, ctx.game_tick, &mut ctx.rng);
            if trigger.is_none() {
                trigger = fired;
            }
        }
        trigger
    }
}

impl Default for GameplayScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for GameplayScreen {
    fn name(&self) -> &str {
        "gameplay"
    }

    fn load_resources(&mut self, ctx: &mut GameContext) {
        self.sprites = Sprites::load(&mut ctx.resources);
    }

    fn unload_resources(&mut self, _ctx: &mut GameContext) {
        self.sprites = Sprites::default();
    }

    fn on_attach(&mut self, ctx: &mut GameContext) {
        if ctx.world.is_empty() {
            ctx.new_session();
        }
        self.set_mode(GameplayMode::Default, ctx);
        ctx.audio.play_music(keys::LEVEL_MUSIC, 1.0);
    }

    fn on_detach(&mut self, ctx: &mut GameContext) {
        self.overlays.clear(ctx);
    }

    fn handle_input(&mut self, ctx: &mut GameContext) -> Propagation {
        if self.overlays.handle_input(ctx) == Propagation::Stop {
            return Propagation::Stop;
        }

        match self.mode.handle_input(ctx) {
            ModeInput::Ignored => {}
            ModeInput::Consumed => return Propagation::Stop,
            ModeInput::Leave => {
                self.set_mode(GameplayMode::Default, ctx);
                return Propagation::Stop;
            }
        }

        let binds = &ctx.keybinds;
        let input = &ctx.input;
        let escape = input.is_key_pressed(KeyCode::Escape);
        let edit = binds.pressed(Action::ToggleEdit, input);
        let rotation = binds.pressed(Action::ToggleRotation, input);
        let debug = binds.pressed(Action::ToggleDebug, input);
        let zoom_out = binds.pressed(Action::ZoomOut, input);
        let zoom_in = binds.pressed(Action::ZoomIn, input);

        if escape {
            self.overlays.push(Box::new(PauseMenu::new()), ctx);
        }
        if edit {
            self.set_mode(GameplayMode::Edit(EditMode::new()), ctx);
        }
        if rotation {
            self.set_mode(GameplayMode::EntityFocusRotation, ctx);
        }
        if debug {
            ctx.show_debug = !ctx.show_debug;
        }
        if zoom_out {
            ctx.camera.zoom_by(-ZOOM_STEP);
        }
        if zoom_in {
            ctx.camera.zoom_by(ZOOM_STEP);
        }
        Propagation::Stop
    }

    fn update(&mut self, ctx: &mut GameContext) -> ScreenAction {
        let outer = self.overlays.update(ctx);
        if !outer.is_none() {
            return outer;
        }

        self.mode.update(ctx);
        let trigger = Self::update_entities(ctx);

        let dead = ctx.world.remove_dead();
        if !dead.is_empty() {
            log::info!("removed {} dead entities", dead.len());
        }

        let world = &ctx.world;
        ctx.camera.update(ctx.game_tick, |id| world.position_of(id));
        ctx.game_tick += 1;

        match trigger {
            Some(TileTrigger::EnterComputer) => {
                ScreenAction::Switch(Box::new(ComputerScreen::new(ScreenId::Game)))
            }
            None => ScreenAction::None,
        }
    }

    fn draw(&self, ctx: &GameContext, surface: &mut dyn Surface) {
        render::draw_world(ctx, surface, &self.sprites);

        let mut entities = ctx.world.snapshot();
        entities.sort_by(|a, b| a.position.y.total_cmp(&b.position.y));
        for entity in &entities {
            render::draw_entity(ctx, surface, &self.sprites, entity);
            for spell in &entity.spells {
                render::draw_spell(ctx, surface, &self.sprites, entity, spell);
            }
        }
        if ctx.show_debug {
            for entity in &entities {
                render::draw_debug_info(ctx, surface, entity);
            }
        }

        self.mode.draw(ctx, surface, &self.sprites);
        self.overlays.draw(ctx, surface);

        if ctx.show_debug {
            self.debug.draw(ctx, surface);
        }
    }
}
