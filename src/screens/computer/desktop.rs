//! The desktop: a z-ordered window list with click-to-front and title-bar
//! dragging.

use glam::Vec2;

use super::window::{
    ButtonDown, Hwnd, MESSAGE_BOX_SIZE, RUN_SIZE, START_BUTTON_SIZE, TASKBAR_HEIGHT, WINDOW_LIST_RECT,
    WindowKind, XpSkin, XpWindow,
};
use crate::audio::keys;
use crate::game::GameContext;
use crate::geometry::{Rect, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::input::{KeyCode, MouseButton};
use crate::renderer::{Color, Surface};
use crate::screen::{Propagation, Screen, ScreenAction};

/// Offset between cascaded windows.
pub const CASCADE_STEP: f32 = 10.0;

/// Window being dragged and where the cursor holds it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Grab {
    pub hwnd: Hwnd,
    pub offset: Vec2,
}

pub struct DesktopScreen {
    /// Index 0 is the back; the last window is in front.
    windows: Vec<XpWindow>,
    active: Option<Hwnd>,
    grab: Option<Grab>,
    hwnd_counter: u32,
    default_pos: Vec2,
    leave: bool,
    skin: XpSkin,
}

impl DesktopScreen {
    /// An empty desktop with only the taskbar.
    pub fn new() -> Self {
        let mut desktop = Self {
            windows: Vec::new(),
            active: None,
            grab: None,
            hwnd_counter: 0,
            default_pos: Vec2::splat(CASCADE_STEP),
            leave: false,
            skin: XpSkin::default(),
        };

        let bar = Rect::new(0.0, SCREEN_HEIGHT as f32 - TASKBAR_HEIGHT, SCREEN_WIDTH as f32, TASKBAR_HEIGHT);
        let mut taskbar = XpWindow::new(desktop.next_hwnd(), "_CiceronUI", WindowKind::Taskbar, bar);
        let start = Rect::from_pos_size(bar.pos(), START_BUTTON_SIZE);
        taskbar.children.push(XpWindow::new(desktop.next_hwnd(), "_CiceronStart", WindowKind::StartButton, start));
        desktop.windows.push(taskbar);
        desktop
    }

    pub fn windows(&self) -> &[XpWindow] {
        &self.windows
    }

    pub fn window(&self, hwnd: Hwnd) -> Option<&XpWindow> {
        self.windows.iter().find(|w| w.hwnd == hwnd)
    }

    pub fn active(&self) -> Option<Hwnd> {
        self.active
    }

    pub fn grab(&self) -> Option<Grab> {
        self.grab
    }

    /// Handles in z-order, back to front.
    pub fn z_order(&self) -> Vec<Hwnd> {
        self.windows.iter().map(|w| w.hwnd).collect()
    }

    fn next_hwnd(&mut self) -> Hwnd {
        let hwnd = Hwnd(self.hwnd_counter);
        self.hwnd_counter += 1;
        hwnd
    }

    /// Position for the next window, stepping the cascade.
    fn cascade(&mut self, size: Vec2) -> Vec2 {
        let pos = self.default_pos;
        if self.default_pos.y + size.y < SCREEN_HEIGHT as f32 {
            self.default_pos.y += CASCADE_STEP;
        }
        self.default_pos.x += CASCADE_STEP;
        if self.default_pos.x >= SCREEN_WIDTH as f32 {
            self.default_pos = Vec2::ZERO;
        }
        pos
    }

    /// Add a window at an explicit rect, in front of the others.
    pub fn add_window(&mut self, title: impl Into<String>, kind: WindowKind, rect: Rect) -> Hwnd {
        let hwnd = self.next_hwnd();
        let window = XpWindow::new(hwnd, title, kind, rect);
        log::debug!("created window {:?} '{}'", hwnd, window.title);
        self.windows.push(window);
        hwnd
    }

    /// Add a window at the next cascade position.
    pub fn create_window(&mut self, title: impl Into<String>, kind: WindowKind, size: Vec2) -> Hwnd {
        let pos = self.cascade(size);
        self.add_window(title, kind, Rect::from_pos_size(pos, size))
    }

    pub fn message_box(&mut self, ctx: &mut GameContext, title: &str, message: &str) -> Hwnd {
        ctx.audio.play(keys::CRITICAL_STOP);
        self.create_window(title, WindowKind::MessageBox { message: message.to_string() }, MESSAGE_BOX_SIZE)
    }

    pub fn run_window(&mut self) -> Hwnd {
        self.create_window("Run", WindowKind::Run, RUN_SIZE)
    }

    /// Remove a window by handle. Returns false when no window has it.
    pub fn destroy(&mut self, hwnd: Hwnd) -> bool {
        let before = self.windows.len();
        self.windows.retain(|w| w.hwnd != hwnd);
        if self.active == Some(hwnd) {
            self.active = None;
        }
        if self.grab.is_some_and(|g| g.hwnd == hwnd) {
            self.grab = None;
        }
        let removed = self.windows.len() != before;
        if removed {
            log::debug!("destroyed window {hwnd:?}");
        }
        removed
    }

    /// Ignored while a window is being dragged.
    pub fn set_active(&mut self, hwnd: Hwnd) {
        if self.grab.is_none() {
            self.active = Some(hwnd);
        }
    }

    /// Index of the frontmost window under `p`.
    pub fn hit_test(&self, p: Vec2) -> Option<usize> {
        self.windows.iter().rposition(|w| w.contains(p))
    }

    // ── Mouse protocol ───────────────────────────────────────────────────────

    /// Drag the grabbed window to the cursor.
    pub fn drag(&mut self, cursor: Vec2) {
        let Some(grab) = self.grab else { return };
        self.active = Some(grab.hwnd);
        if let Some(window) = self.windows.iter_mut().find(|w| w.hwnd == grab.hwnd) {
            window.set_position(cursor - grab.offset);
            window.on_move();
        }
    }

    /// Hover notification for the frontmost window under the cursor.
    pub fn hover(&mut self, cursor: Vec2) {
        let hit = self.hit_test(cursor);
        for (i, window) in self.windows.iter_mut().enumerate() {
            if Some(i) == hit {
                window.on_mouse_move(cursor);
            } else {
                window.close_hover = false;
            }
        }
    }

    /// Bring the window under the cursor to the front and activate it.
    pub fn press(&mut self, cursor: Vec2) {
        let Some(index) = self.hit_test(cursor) else { return };
        let window = self.windows.remove(index);
        let hwnd = window.hwnd;
        let offset = cursor - window.pos();
        self.windows.push(window);
        self.set_active(hwnd);

        let outcome = match self.windows.last_mut() {
            Some(window) => window.on_lbutton_down(cursor),
            None => ButtonDown::Nothing,
        };
        if outcome == ButtonDown::Grab {
            self.grab = Some(Grab { hwnd, offset });
        }
    }

    /// End any drag; a release completing a close click destroys the window.
    pub fn release(&mut self, cursor: Vec2) {
        self.grab = None;
        let Some(index) = self.hit_test(cursor) else { return };
        if self.windows[index].on_lbutton_up() {
            let hwnd = self.windows[index].hwnd;
            self.destroy(hwnd);
        }
    }

    /// One tick of the mouse protocol: drag, hover, press, release.
    pub fn step_mouse(&mut self, cursor: Vec2, pressed: bool, released: bool) {
        self.drag(cursor);
        self.hover(cursor);
        if pressed {
            self.press(cursor);
        }
        if released {
            self.release(cursor);
        }
    }
}

impl Default for DesktopScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for DesktopScreen {
    fn name(&self) -> &str {
        "desktop"
    }

    fn load_resources(&mut self, ctx: &mut GameContext) {
        self.skin = XpSkin::load(&mut ctx.resources);
    }

    fn unload_resources(&mut self, _ctx: &mut GameContext) {
        self.skin = XpSkin::default();
    }

    fn on_attach(&mut self, _ctx: &mut GameContext) {
        self.add_window("Top-level windows", WindowKind::WindowList, WINDOW_LIST_RECT);
    }

    fn handle_input(&mut self, ctx: &mut GameContext) -> Propagation {
        if ctx.input.is_key_pressed(KeyCode::Escape) {
            self.leave = true;
        }
        Propagation::Stop
    }

    fn update(&mut self, ctx: &mut GameContext) -> ScreenAction {
        if std::mem::take(&mut self.leave) {
            return ScreenAction::Leave;
        }
        let input = &ctx.input;
        self.step_mouse(
            input.mouse(),
            input.is_mouse_pressed(MouseButton::Left),
            input.is_mouse_released(MouseButton::Left),
        );
        ScreenAction::None
    }

    fn draw(&self, ctx: &GameContext, surface: &mut dyn Surface) {
        surface.fill_rect(Rect::screen(), Color::DESKTOP_BLUE);
        surface.draw_image(&self.skin.wallpaper, None, Rect::screen(), Color::WHITE);

        let titles: Vec<&str> = self.windows.iter().map(|w| w.title.as_str()).collect();
        for window in &self.windows {
            let active = self.active == Some(window.hwnd);
            window.draw(surface, &ctx.font, &self.skin, active, &titles);
        }
    }
}
