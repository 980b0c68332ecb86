//! Shop demo: a layered character behind the counter, a picker for swapping
//! its layer variants, and a dialogue box.
//!
//! Keys: Q/W previous/next variant, Z/X previous/next group, Tab next
//! character, Escape back to the main menu.

pub mod character;

pub use character::{
    ENDOU_GROUPS, GroupMapping, LayerEntry, LayeredImage, MORSHU_GROUPS, Pose, SpriteGroup, SpriteVariant,
    VnCharacter,
};

use std::path::PathBuf;

use glam::Vec2;

use super::MainMenuScreen;
use crate::assets::ImageHandle;
use crate::game::GameContext;
use crate::geometry::{Rect, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::input::KeyCode;
use crate::renderer::{Color, Font, FontDescriptor, Surface};
use crate::screen::widgets::draw_panel;
use crate::screen::{Propagation, Screen, ScreenAction};

pub const BACKGROUND_IMAGE: &str = "assets/shop/background.png";
pub const TABLE_IMAGE: &str = "assets/shop/table.png";
pub const MENU_FONT: &str = "assets/fonts/fantasy.json";

/// Side of one thumbnail cell in the sprite menu.
pub const MENU_CELL: f32 = 48.0;
pub const MENU_COLUMNS: usize = 5;

/// Where a character comes from: descriptor path, display name, groups.
#[derive(Debug, Clone)]
pub struct CharacterSource {
    pub path: PathBuf,
    pub name: String,
    pub groups: &'static [GroupMapping],
}

impl CharacterSource {
    pub fn new(path: impl Into<PathBuf>, name: &str, groups: &'static [GroupMapping]) -> Self {
        Self { path: path.into(), name: name.to_string(), groups }
    }
}

/// Characters of the stock shop, the first one behind the counter.
pub fn default_sources() -> Vec<CharacterSource> {
    vec![
        CharacterSource::new("assets/shop/morshu/morshu.json", "Morshu", MORSHU_GROUPS),
        CharacterSource::new("assets/shop/test/endou/endou.json", "Endou", ENDOU_GROUPS),
    ]
}

// ── DialogueBox ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct DialogueBox {
    pub speaker: String,
}

impl DialogueBox {
    pub const RECT: Rect = Rect::new(0.0, 0.0, 128.0, 128.0);

    pub fn draw(&self, font: &Font, surface: &mut dyn Surface) {
        draw_panel(surface, Self::RECT);
        surface.draw_text(font, &self.speaker, Self::RECT.pos() + Vec2::splat(16.0), 1.0, Color::WHITE);
    }
}

// ── SpriteMenu ───────────────────────────────────────────────────────────────

/// Right-hand panel listing the variants of the selected group as
/// thumbnails, the current one highlighted.
#[derive(Debug, Clone, Default)]
pub struct SpriteMenu {
    group: usize,
}

impl SpriteMenu {
    pub const TITLE_SCALE: f32 = 2.0;

    pub fn rect() -> Rect {
        let w = MENU_CELL * MENU_COLUMNS as f32;
        Rect::new(SCREEN_WIDTH as f32 - w, 0.0, w, SCREEN_HEIGHT as f32)
    }

    /// Selected group index.
    pub fn group(&self) -> usize {
        self.group
    }

    pub fn next_group(&mut self, count: usize) {
        self.group = if count == 0 { 0 } else { (self.group + 1) % count };
    }

    pub fn prev_group(&mut self, count: usize) {
        self.group = if count == 0 { 0 } else { (self.group + count - 1) % count };
    }

    /// Keep the selection inside a character with `count` groups.
    pub fn clamp(&mut self, count: usize) {
        if self.group >= count {
            self.group = 0;
        }
    }

    /// Thumbnail cell `index`, row-major below a title `title_height` tall.
    pub fn cell_rect(index: usize, title_height: f32) -> Rect {
        let origin = Self::rect().pos() + Vec2::new(0.0, title_height * 3.0);
        let col = (index % MENU_COLUMNS) as f32;
        let row = (index / MENU_COLUMNS) as f32;
        Rect::new(origin.x + col * MENU_CELL, origin.y + row * MENU_CELL, MENU_CELL, MENU_CELL)
    }

    pub fn draw(&self, character: &VnCharacter, font: &Font, surface: &mut dyn Surface) {
        let panel = Self::rect();
        draw_panel(surface, panel);
        let Some(group) = character.group(self.group) else {
            return;
        };

        let title_height = font.measure(&group.name, Self::TITLE_SCALE).y;
        surface.draw_text(font, &group.name, Vec2::new(panel.x, title_height), Self::TITLE_SCALE, Color::WHITE);

        for (i, variant) in group.variants().iter().enumerate() {
            let cell = Self::cell_rect(i, title_height);
            if i == group.current_index() {
                surface.fill_rect(cell, Color::from_rgba8(0, 255, 0, 128));
            }
            let size = variant.draw_size();
            let longest = size.x.max(size.y);
            if longest <= 0.0 {
                continue;
            }
            surface.draw_image(&variant.image, None, cell.centered(size * (MENU_CELL / longest)), Color::WHITE);
        }
    }
}

// ── ShopScreen ───────────────────────────────────────────────────────────────

pub struct ShopScreen {
    sources: Vec<CharacterSource>,
    characters: Vec<VnCharacter>,
    active: usize,
    menu: SpriteMenu,
    dialogue: DialogueBox,
    background: ImageHandle,
    table: ImageHandle,
    menu_font: Option<Font>,
    leave: bool,
}

impl ShopScreen {
    pub fn new() -> Self {
        Self::with_sources(default_sources())
    }

    pub fn with_sources(sources: Vec<CharacterSource>) -> Self {
        Self {
            sources,
            characters: Vec::new(),
            active: 0,
            menu: SpriteMenu::default(),
            dialogue: DialogueBox::default(),
            background: ImageHandle::missing(),
            table: ImageHandle::missing(),
            menu_font: None,
            leave: false,
        }
    }

    /// Characters that loaded, in source order.
    pub fn characters(&self) -> &[VnCharacter] {
        &self.characters
    }

    /// The character behind the counter.
    pub fn active(&self) -> Option<&VnCharacter> {
        self.characters.get(self.active)
    }

    pub fn menu(&self) -> &SpriteMenu {
        &self.menu
    }

    pub fn dialogue(&self) -> &DialogueBox {
        &self.dialogue
    }

    fn select(&mut self, index: usize) {
        self.active = index;
        if let Some(c) = self.characters.get(index) {
            self.menu.clamp(c.groups().len());
            self.dialogue.speaker = c.name.clone();
        }
    }

    fn current_group(&mut self) -> Option<&mut SpriteGroup> {
        let group = self.menu.group();
        self.characters.get_mut(self.active)?.group_mut(group)
    }
}

impl Default for ShopScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for ShopScreen {
    fn name(&self) -> &str {
        "shop"
    }

    fn load_resources(&mut self, ctx: &mut GameContext) {
        self.background = ctx.resources.image(BACKGROUND_IMAGE);
        self.table = ctx.resources.image(TABLE_IMAGE);
        self.menu_font = match FontDescriptor::load(MENU_FONT) {
            Ok(desc) => Some(Font::new(&desc, ctx.resources.image(&desc.atlas_key()))),
            Err(e) => {
                log::warn!("{e}; the sprite menu uses the default font");
                None
            }
        };

        self.characters.clear();
        for source in &self.sources {
            match VnCharacter::load(&source.path, &source.name, source.groups, &mut ctx.resources) {
                Ok(c) => self.characters.push(c),
                Err(e) => log::warn!("skipping {}: {e}", source.name),
            }
        }
        self.select(0);
    }

    fn unload_resources(&mut self, _ctx: &mut GameContext) {
        self.characters.clear();
        self.menu_font = None;
        self.background = ImageHandle::missing();
        self.table = ImageHandle::missing();
    }

    fn handle_input(&mut self, ctx: &mut GameContext) -> Propagation {
        let input = &ctx.input;
        let groups = self.active().map_or(0, |c| c.groups().len());

        if input.is_key_pressed(KeyCode::KeyQ) {
            if let Some(g) = self.current_group() {
                g.prev();
            }
        }
        if input.is_key_pressed(KeyCode::KeyW) {
            if let Some(g) = self.current_group() {
                g.next();
            }
        }
        if input.is_key_pressed(KeyCode::KeyZ) {
            self.menu.prev_group(groups);
        }
        if input.is_key_pressed(KeyCode::KeyX) {
            self.menu.next_group(groups);
        }
        if input.is_key_pressed(KeyCode::Tab) && !self.characters.is_empty() {
            self.select((self.active + 1) % self.characters.len());
        }
        if input.is_key_pressed(KeyCode::Escape) {
            self.leave = true;
        }
        Propagation::Stop
    }

    fn update(&mut self, ctx: &mut GameContext) -> ScreenAction {
        if std::mem::take(&mut self.leave) {
            return ScreenAction::Switch(Box::new(MainMenuScreen::new()));
        }
        if let Some(c) = self.characters.get_mut(self.active) {
            c.pose = Pose::idle(ctx.app_tick);
        }
        ScreenAction::None
    }

    fn draw(&self, ctx: &GameContext, surface: &mut dyn Surface) {
        let screen = Rect::screen();
        surface.fill_rect(screen, Color::BLACK);
        surface.draw_image(&self.background, None, screen, Color::WHITE);

        if let Some(c) = self.active() {
            c.draw(surface);
        }
        if let Some((w, h)) = self.table.size() {
            let (w, h) = (w as f32, h as f32);
            let dst = Rect::new((screen.w - w) / 2.0, screen.h - h, w, h);
            surface.draw_image(&self.table, None, dst, Color::WHITE);
        }

        if let Some(c) = self.active() {
            let font = self.menu_font.as_ref().unwrap_or(&ctx.font);
            self.menu.draw(c, font, surface);
        }
        self.dialogue.draw(&ctx.font, surface);
    }
}
