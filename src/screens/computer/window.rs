//! Top-level windows of the desktop minigame.

use glam::Vec2;

use crate::assets::{ImageHandle, ResourceCache, paths};
use crate::geometry::Rect;
use crate::renderer::{Color, Font, Surface};

pub const CAPTION_HEIGHT: f32 = 30.0;
pub const FRAME_SIDE: f32 = 4.0;
pub const FRAME_BOTTOM: f32 = 5.0;
/// Inset of the close button from the top-right corner.
pub const CLOSE_INSET: f32 = 5.0;
pub const CLOSE_SIZE: f32 = 21.0;

pub const MESSAGE_BOX_SIZE: Vec2 = Vec2::new(266.0, 126.0);
pub const RUN_SIZE: Vec2 = Vec2::new(320.0, 240.0);
pub const WINDOW_LIST_RECT: Rect = Rect::new(10.0, 10.0, 240.0, 320.0);
pub const TASKBAR_HEIGHT: f32 = 30.0;
pub const START_BUTTON_SIZE: Vec2 = Vec2::new(100.0, 30.0);

const MESSAGE_BUTTONS: [&str; 3] = ["Кратко", "ДА", "НЕТ"];
const MESSAGE_BUTTON_SIZE: Vec2 = Vec2::new(75.0, 23.0);

/// Window handle, unique per desktop session.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Hwnd(pub u32);

#[derive(Debug, Clone, PartialEq)]
pub enum WindowKind {
    /// Bottom bar. Owns the start button and keeps it in place when moved.
    Taskbar,
    StartButton,
    MessageBox { message: String },
    /// Lists the titles of every top-level window.
    WindowList,
    Run,
}

/// What a left-button press on a window started.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ButtonDown {
    Nothing,
    /// Pressed inside the close button; closing waits for the release.
    Close,
    /// Pressed on the title bar; the desktop starts dragging.
    Grab,
}

/// Images shared by every window. Missing images fall back to flat fills.
#[derive(Debug, Clone, Default)]
pub struct XpSkin {
    pub wallpaper: ImageHandle,
    pub taskband: ImageHandle,
    pub start_button: ImageHandle,
    pub caption: ImageHandle,
    pub frame_left: ImageHandle,
    pub frame_right: ImageHandle,
    pub frame_bottom: ImageHandle,
    pub close_button: ImageHandle,
    pub close_glyph: ImageHandle,
    pub icon_error: ImageHandle,
}

impl XpSkin {
    pub fn load(resources: &mut ResourceCache) -> Self {
        Self {
            wallpaper: resources.image(paths::WALLPAPER),
            taskband: resources.image(paths::TASKBAND),
            start_button: resources.image(paths::START_BUTTON),
            caption: resources.image(paths::XP_CAPTION),
            frame_left: resources.image(paths::XP_FRAME_LEFT),
            frame_right: resources.image(paths::XP_FRAME_RIGHT),
            frame_bottom: resources.image(paths::XP_FRAME_BOTTOM),
            close_button: resources.image(paths::XP_CLOSE_BUTTON),
            close_glyph: resources.image(paths::XP_CLOSE_GLYPH),
            icon_error: resources.image(paths::XP_ICON_ERROR),
        }
    }
}

/// Draw row `state` of a sheet with `states` equal rows stacked vertically,
/// over a flat `fallback` fill.
fn draw_stated(surface: &mut dyn Surface, image: &ImageHandle, state: u32, states: u32, dst: Rect, fallback: Color) {
    surface.fill_rect(dst, fallback);
    if let Some((w, h)) = image.size() {
        let row = h as f32 / states.max(1) as f32;
        let src = Rect::new(0.0, row * state as f32, w as f32, row);
        surface.draw_image(image, Some(src), dst, Color::WHITE);
    }
}

// ── XpWindow ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct XpWindow {
    pub hwnd: Hwnd,
    pub rect: Rect,
    pub title: String,
    pub kind: WindowKind,
    pub close_hover: bool,
    pub close_down: bool,
    /// Windows attached to this one, moved along with it.
    pub children: Vec<XpWindow>,
}

impl XpWindow {
    pub fn new(hwnd: Hwnd, title: impl Into<String>, kind: WindowKind, rect: Rect) -> Self {
        Self {
            hwnd,
            rect,
            title: title.into(),
            kind,
            close_hover: false,
            close_down: false,
            children: Vec::new(),
        }
    }

    pub fn pos(&self) -> Vec2 {
        self.rect.pos()
    }

    pub fn contains(&self, p: Vec2) -> bool {
        self.rect.contains(p)
    }

    /// Close button zone, in window-local coordinates.
    pub fn in_close_zone(&self, local: Vec2) -> bool {
        local.x >= self.rect.w - CLOSE_INSET - CLOSE_SIZE
            && local.y >= CLOSE_INSET
            && local.x < self.rect.w - CLOSE_INSET
            && local.y < CAPTION_HEIGHT - CLOSE_INSET
    }

    /// Title bar zone, in window-local coordinates. Edges are inclusive.
    pub fn in_title_zone(&self, local: Vec2) -> bool {
        local.x >= 0.0 && local.y >= 0.0 && local.x <= self.rect.w && local.y <= CAPTION_HEIGHT
    }

    pub fn set_position(&mut self, pos: Vec2) {
        self.rect.x = pos.x;
        self.rect.y = pos.y;
    }

    /// Called after every position change.
    pub fn on_move(&mut self) {
        if self.kind == WindowKind::Taskbar {
            let pos = self.pos();
            for child in &mut self.children {
                child.set_position(pos);
            }
        }
    }

    pub fn on_mouse_move(&mut self, cursor: Vec2) {
        self.close_hover = self.in_close_zone(self.rect.local(cursor));
    }

    pub fn on_lbutton_down(&mut self, cursor: Vec2) -> ButtonDown {
        let local = self.rect.local(cursor);
        if self.in_close_zone(local) {
            self.close_down = true;
            return ButtonDown::Close;
        }
        if self.in_title_zone(local) {
            self.on_move();
            return ButtonDown::Grab;
        }
        ButtonDown::Nothing
    }

    /// Returns true when the release completes a close-button click.
    pub fn on_lbutton_up(&mut self) -> bool {
        std::mem::take(&mut self.close_down)
    }

    // ── Drawing ──────────────────────────────────────────────────────────────

    /// `titles` lists every top-level window, for the window list.
    pub fn draw(&self, surface: &mut dyn Surface, font: &Font, skin: &XpSkin, active: bool, titles: &[&str]) {
        match &self.kind {
            WindowKind::Taskbar => self.draw_taskbar(surface, font, skin),
            WindowKind::StartButton => {
                draw_stated(surface, &skin.start_button, 0, 3, self.rect, Color::START_GREEN);
                let label = "Пуск";
                let dim = font.measure(label, 2.0);
                let pos = self.rect.pos() + (self.rect.size() - dim) * 0.5;
                surface.draw_text(font, label, pos + Vec2::ONE, 2.0, Color::BLACK);
                surface.draw_text(font, label, pos, 2.0, Color::WHITE);
            }
            WindowKind::MessageBox { message } => {
                self.draw_frame(surface, font, skin, active);
                let (x, y) = (self.rect.x, self.rect.y);
                surface.blit(&skin.icon_error, Vec2::new(x + FRAME_SIDE + 12.0, y + FRAME_SIDE + 12.0 + 30.0), 1.0);

                let dim = font.measure(message, 1.0);
                let text_pos = Vec2::new(x + FRAME_SIDE + 12.0 + 20.0 + 32.0, y + 46.0 + (32.0 - dim.y) / 2.0);
                surface.draw_text(font, message, text_pos, 1.0, Color::BLACK);

                let xs = [x + FRAME_SIDE + 11.0, x + 96.0, x + 177.0];
                for (label, bx) in MESSAGE_BUTTONS.iter().zip(xs) {
                    let button = Rect::from_pos_size(Vec2::new(bx, y + 90.0), MESSAGE_BUTTON_SIZE);
                    surface.fill_rect(button, Color::from_rgba8(244, 244, 240, 255));
                    surface.stroke_rect(button, 1.0, Color::from_rgba8(0, 60, 116, 255));
                    let dim = font.measure(label, 1.0);
                    surface.draw_text(font, label, button.pos() + (button.size() - dim) * 0.5, 1.0, Color::BLACK);
                }
            }
            WindowKind::WindowList => {
                self.draw_frame(surface, font, skin, active);
                let client = Vec2::new(self.rect.x + FRAME_SIDE + 4.0, self.rect.y + CAPTION_HEIGHT + 4.0);
                for (i, title) in titles.iter().enumerate() {
                    let pos = client + Vec2::new(0.0, i as f32 * font.line_height as f32);
                    surface.draw_text(font, title, pos, 1.0, Color::BLACK);
                }
            }
            WindowKind::Run => {
                self.draw_frame(surface, font, skin, active);
            }
        }
    }

    fn draw_taskbar(&self, surface: &mut dyn Surface, font: &Font, skin: &XpSkin) {
        draw_stated(surface, &skin.taskband, 0, 1, self.rect, Color::TASKBAR_BLUE);
        for child in &self.children {
            child.draw(surface, font, skin, false, &[]);
        }
        let clock = clock_text();
        let dim = font.measure(&clock, 1.0);
        let pos = Vec2::new(self.rect.right() - 64.0, self.rect.y + (self.rect.h - dim.y) / 2.0);
        surface.draw_text(font, &clock, pos, 1.0, Color::WHITE);
    }

    /// Caption, side frames, bottom frame, client area and close button.
    fn draw_frame(&self, surface: &mut dyn Surface, font: &Font, skin: &XpSkin, active: bool) {
        let r = self.rect;
        let state = if active { 0 } else { 1 };
        let caption_color = if active { Color::TITLE_BLUE } else { Color::from_rgba8(122, 150, 223, 255) };
        let body_h = r.h - CAPTION_HEIGHT - FRAME_BOTTOM;

        draw_stated(surface, &skin.caption, state, 2, Rect::new(r.x, r.y, r.w, CAPTION_HEIGHT), caption_color);
        draw_stated(surface, &skin.frame_left, state, 2, Rect::new(r.x, r.y + CAPTION_HEIGHT, FRAME_SIDE, body_h), caption_color);
        draw_stated(
            surface,
            &skin.frame_right,
            state,
            2,
            Rect::new(r.right() - FRAME_SIDE, r.y + CAPTION_HEIGHT, FRAME_SIDE, body_h),
            caption_color,
        );
        draw_stated(surface, &skin.frame_bottom, state, 2, Rect::new(r.x, r.bottom() - FRAME_BOTTOM, r.w, FRAME_BOTTOM), caption_color);

        let dim = font.measure(&self.title, 2.0);
        surface.draw_text(font, &self.title, Vec2::new(r.x + 28.0, r.y + (CAPTION_HEIGHT - dim.y) / 2.0), 2.0, Color::WHITE);

        let client = Rect::new(r.x + FRAME_SIDE, r.y + CAPTION_HEIGHT, r.w - 2.0 * FRAME_SIDE, body_h);
        surface.fill_rect(client, Color::WINDOW_FACE);

        // Normal, hover, pressed; inactive windows use the second half of the sheet.
        let mut button_state = if self.close_down { 2 } else if self.close_hover { 1 } else { 0 };
        if !active {
            button_state += 4;
        }
        let close = Rect::new(r.right() - CLOSE_INSET - CLOSE_SIZE, r.y + CLOSE_INSET, CLOSE_SIZE, CLOSE_SIZE);
        draw_stated(surface, &skin.close_button, button_state, 8, close, Color::CLOSE_RED);
        let glyph = Rect::new(close.x + 4.0, close.y + 4.0, 13.0, 13.0);
        surface.draw_image(&skin.close_glyph, Some(Rect::new(0.0, 0.0, 13.0, 13.0)), glyph, Color::WHITE);
    }
}

/// Wall-clock time as `H:MM`.
///
/// The taskbar shows UTC, not local time: the standard library has no
/// time-zone database and nothing in our dependency stack provides one.
pub fn clock_text() -> String {
    let secs = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format_clock(secs)
}

/// `H:MM` for a count of seconds since the Unix epoch, in UTC.
pub fn format_clock(unix_secs: u64) -> String {
    let minutes = unix_secs / 60 % 60;
    let hours = unix_secs / 3600 % 24;
    format!("{hours}:{minutes:02}")
}
