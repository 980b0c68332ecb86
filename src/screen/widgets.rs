//! Keyboard-driven menu widgets.
//!
//! A [`WidgetContainer`] lays its widgets out in a centred column and moves
//! focus between them with the arrow keys. Activating a widget records its
//! command; the owning screen collects it with
//! [`WidgetContainer::take_activated`] during `update`.

use glam::Vec2;

use super::Propagation;
use crate::geometry::{Rect, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::input::{InputState, KeyCode};
use crate::renderer::{Color, Font, Surface};

pub const WIDGET_WIDTH: f32 = 200.0;
pub const WIDGET_HEIGHT: f32 = 40.0;
pub const WIDGET_GAP: f32 = 4.0;
pub const SLIDER_STEP: f32 = 0.1;
const TEXT_SCALE: f32 = 2.0;

#[derive(Debug, Clone, PartialEq)]
pub enum WidgetKind {
    Button,
    Slider { value: f32 },
    EditBox { text: String },
}

#[derive(Debug, Clone)]
pub struct Widget<C> {
    pub label: String,
    pub kind: WidgetKind,
    pub command: C,
    rect: Rect,
}

impl<C> Widget<C> {
    fn with_kind(label: impl Into<String>, kind: WidgetKind, command: C) -> Self {
        Self { label: label.into(), kind, command, rect: Rect::new(0.0, 0.0, WIDGET_WIDTH, WIDGET_HEIGHT) }
    }

    pub fn button(label: impl Into<String>, command: C) -> Self {
        Self::with_kind(label, WidgetKind::Button, command)
    }

    pub fn slider(value: f32, command: C) -> Self {
        Self::with_kind("", WidgetKind::Slider { value: value.clamp(0.0, 1.0) }, command)
    }

    pub fn edit_box(text: impl Into<String>, command: C) -> Self {
        Self::with_kind("", WidgetKind::EditBox { text: text.into() }, command)
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn value(&self) -> Option<f32> {
        match self.kind {
            WidgetKind::Slider { value } => Some(value),
            _ => None,
        }
    }

    pub fn text(&self) -> &str {
        match &self.kind {
            WidgetKind::EditBox { text } => text,
            _ => &self.label,
        }
    }

    /// Keys the focused widget handles itself. `Stop` means consumed.
    fn handle_key(&mut self, input: &InputState) -> Propagation {
        match &mut self.kind {
            WidgetKind::Button => Propagation::Continue,
            WidgetKind::Slider { value } => {
                if input.is_key_pressed(KeyCode::ArrowLeft) {
                    *value = ((*value - SLIDER_STEP) * 10.0).round().max(0.0) / 10.0;
                    Propagation::Stop
                } else if input.is_key_pressed(KeyCode::ArrowRight) {
                    *value = ((*value + SLIDER_STEP) * 10.0).round().min(10.0) / 10.0;
                    Propagation::Stop
                } else {
                    Propagation::Continue
                }
            }
            WidgetKind::EditBox { text } => {
                if input.is_key_pressed(KeyCode::Backspace) {
                    text.pop();
                    return Propagation::Stop;
                }
                text.extend(input.chars_typed.iter().filter(|c| !c.is_control()));
                Propagation::Continue
            }
        }
    }

    fn draw(&self, font: &Font, surface: &mut dyn Surface, focused: bool) {
        let r = self.rect;
        match &self.kind {
            WidgetKind::Button => {
                let color = if focused { Color::YELLOW } else { Color::RED };
                draw_centered(font, surface, &self.label, r, color);
            }
            WidgetKind::Slider { value } => {
                surface.fill_rect(r, Color::from_rgba8(48, 40, 32, 255));
                surface.stroke_rect(r, 2.0, Color::from_rgba8(120, 100, 70, 255));
                let knob = Rect::new(r.x + 8.0 + (r.w - 48.0) * value, r.y + 8.0, 32.0, r.h - 16.0);
                let knob_color = if focused { Color::YELLOW } else { Color::GRAY };
                surface.fill_rect(knob, knob_color);
            }
            WidgetKind::EditBox { text } => {
                surface.fill_rect(r, Color::from_rgba8(48, 40, 32, 255));
                surface.stroke_rect(r, 2.0, Color::from_rgba8(120, 100, 70, 255));
                if focused {
                    surface.fill_rect(r, Color::from_rgba8(0, 255, 0, 64));
                }
                draw_centered(font, surface, text, r, Color::WHITE);
            }
        }
    }
}

/// Framed backing panel used by menus and in-game tooltips.
pub fn draw_panel(surface: &mut dyn Surface, rect: Rect) {
    surface.fill_rect(rect, Color::from_rgba8(32, 26, 20, 230));
    surface.stroke_rect(rect, 3.0, Color::from_rgba8(96, 140, 64, 255));
}

fn draw_centered(font: &Font, surface: &mut dyn Surface, text: &str, r: Rect, color: Color) {
    let dim = font.measure(text, TEXT_SCALE);
    let pos = r.pos() + (r.size() - dim) * 0.5;
    surface.draw_text(font, text, pos, TEXT_SCALE, color);
}

// ── WidgetContainer ──────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct WidgetContainer<C> {
    title: String,
    widgets: Vec<Widget<C>>,
    focus: Option<usize>,
    activated: Option<C>,
}

impl<C: Copy> WidgetContainer<C> {
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into(), widgets: Vec::new(), focus: None, activated: None }
    }

    /// Append a widget. The first widget added takes focus.
    pub fn push(&mut self, widget: Widget<C>) {
        self.widgets.push(widget);
        if self.focus.is_none() {
            self.focus = Some(0);
        }
        self.layout();
    }

    pub fn with(mut self, widget: Widget<C>) -> Self {
        self.push(widget);
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn widgets(&self) -> &[Widget<C>] {
        &self.widgets
    }

    pub fn focused(&self) -> Option<usize> {
        self.focus
    }

    pub fn focused_widget(&self) -> Option<&Widget<C>> {
        self.widgets.get(self.focus?)
    }

    /// First widget bound to `command`.
    pub fn find(&self, command: C) -> Option<&Widget<C>>
    where
        C: PartialEq,
    {
        self.widgets.iter().find(|w| w.command == command)
    }

    pub fn focus_next(&mut self) {
        if let Some(i) = self.focus {
            self.focus = Some((i + 1) % self.widgets.len());
        }
    }

    pub fn focus_prev(&mut self) {
        if let Some(i) = self.focus {
            let n = self.widgets.len();
            self.focus = Some((i + n - 1) % n);
        }
    }

    /// Command of the widget activated since the last call.
    pub fn take_activated(&mut self) -> Option<C> {
        self.activated.take()
    }

    /// Focused widget first, then tab-stop navigation and activation.
    /// An empty container consumes nothing.
    pub fn handle_input(&mut self, input: &InputState) -> Propagation {
        let Some(i) = self.focus else { return Propagation::Continue };

        if self.widgets[i].handle_key(input) == Propagation::Stop {
            return Propagation::Stop;
        }

        if input.is_key_pressed(KeyCode::ArrowDown) || input.is_key_pressed(KeyCode::ArrowRight) {
            self.focus_next();
            return Propagation::Stop;
        }
        if input.is_key_pressed(KeyCode::ArrowUp) || input.is_key_pressed(KeyCode::ArrowLeft) {
            self.focus_prev();
            return Propagation::Stop;
        }
        if input.is_key_pressed(KeyCode::Enter) {
            self.activated = Some(self.widgets[i].command);
            return Propagation::Stop;
        }
        Propagation::Continue
    }

    fn content_size(&self) -> Vec2 {
        let w = self.widgets.iter().map(|w| w.rect.w).fold(0.0, f32::max);
        let h = self.widgets.iter().map(|w| w.rect.h + WIDGET_GAP).sum();
        Vec2::new(w, h)
    }

    fn layout(&mut self) {
        let size = self.content_size();
        let x = (SCREEN_WIDTH as f32 - size.x) / 2.0;
        let mut y = 64.0 + (SCREEN_HEIGHT as f32 - size.y) / 2.0;
        for w in &mut self.widgets {
            w.rect.x = x;
            w.rect.y = y;
            y += w.rect.h + WIDGET_GAP;
        }
    }

    /// Dimmed backdrop, frame, title and widgets.
    pub fn draw(&self, font: &Font, surface: &mut dyn Surface) {
        surface.fill_rect(Rect::screen(), Color::DIM);

        let size = self.content_size();
        let x = (SCREEN_WIDTH as f32 - size.x) / 2.0;
        let y = (SCREEN_HEIGHT as f32 - size.y) / 2.0;
        draw_panel(surface, Rect::new(x - 32.0, y - 32.0, size.x + 64.0, size.y + 128.0));

        let title_dim = font.measure(&self.title, TEXT_SCALE);
        let title_pos = Vec2::new((SCREEN_WIDTH as f32 - title_dim.x) / 2.0, y);
        surface.draw_text(font, &self.title, title_pos, TEXT_SCALE, Color::WHITE);

        for (i, w) in self.widgets.iter().enumerate() {
            w.draw(font, surface, self.focus == Some(i));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_is_centred_below_the_title() {
        let menu = WidgetContainer::new("t").with(Widget::button("a", 0)).with(Widget::button("b", 1));
        let h = 2.0 * (WIDGET_HEIGHT + WIDGET_GAP);
        let first = menu.widgets()[0].rect();
        assert_eq!(first.x, (640.0 - WIDGET_WIDTH) / 2.0);
        assert_eq!(first.y, 64.0 + (480.0 - h) / 2.0);
        assert_eq!(menu.widgets()[1].rect().y, first.y + WIDGET_HEIGHT + WIDGET_GAP);
    }
}
