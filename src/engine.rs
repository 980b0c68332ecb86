//! Window, event loop and fixed-rate tick driver.

use std::sync::Arc;
use std::time::Instant;

use anyhow::Context as _;
use glam::Vec2;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::{Window, WindowId};

use crate::game::Game;
use crate::geometry::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::renderer::{Color, FrameBuffer, Renderer};
use crate::window::{WindowConfig, apply_window_settings};

// ── EngineBuilder ───────────────────────────────────────────────────────────

/// Window settings and tick rate for [`EngineBuilder::run`]. Defaults to
/// `WindowConfig::default()` at 60 updates per second.
pub struct EngineBuilder {
    window: WindowConfig,
    /// Fixed simulation rate in ticks per second.
    target_ups: u32,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self { window: WindowConfig::default(), target_ups: 60 }
    }
}

impl EngineBuilder {
    /// Same as `EngineBuilder::default()`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Window size, scale and mode applied when the window opens.
    pub fn with_window(mut self, window: WindowConfig) -> Self { self.window = window; self }
    /// Fixed game ticks per second; at least 1.
    pub fn with_ups(mut self, ups: u32) -> Self { self.target_ups = ups.max(1); self }

    /// Run `game` until it requests an exit or the window closes. Returns the
    /// requested exit status, 0 when the window was simply closed.
    pub fn run(self, game: Game) -> anyhow::Result<i32> {
        let event_loop = EventLoop::new().context("cannot create the event loop")?;
        let fixed_dt = 1.0 / self.target_ups as f32;
        let mut app = App {
            config: self,
            game,
            renderer: None,
            frame: FrameBuffer::new(SCREEN_WIDTH, SCREEN_HEIGHT),
            last_instant: None,
            accumulator: 0.0,
            fixed_dt,
            fatal: None,
        };
        event_loop.run_app(&mut app).context("event loop failed")?;

        app.game.shutdown();
        if let Some(err) = app.fatal {
            return Err(err);
        }
        Ok(app.game.exit_code().unwrap_or(0))
    }
}

// ── App (winit ApplicationHandler) ──────────────────────────────────────────

/// Event-loop state owned by `run`.
struct App {
    config: EngineBuilder,
    game: Game,
    /// Created on the first `resumed`; `None` until the window exists.
    renderer: Option<Renderer>,
    /// Logical 640×480 frame every screen draws into.
    frame: FrameBuffer,
    /// Time of the previous redraw, for the frame delta.
    last_instant: Option<Instant>,
    /// Seconds of simulation owed, drained in `fixed_dt` steps.
    accumulator: f32,
    fixed_dt: f32,
    /// Startup failure surfaced by `run` after the loop exits.
    fatal: Option<anyhow::Error>,
}

impl App {
    /// Open the window with the configured title, size and mode, then bring
    /// up the GPU presenter for it.
    fn create_renderer(&self, event_loop: &ActiveEventLoop) -> anyhow::Result<Renderer> {
        let (w, h) = self.config.window.initial_size();
        let window = event_loop
            .create_window(
                Window::default_attributes()
                    .with_title(&self.config.window.title)
                    .with_inner_size(winit::dpi::PhysicalSize::new(w, h)),
            )
            .context("cannot create the window")?;
        apply_window_settings(&window, &self.config.window);

        let mut window_config = self.config.window.clone();
        let size = window.inner_size();
        window_config.physical_width = size.width;
        window_config.physical_height = size.height;

        let renderer = pollster::block_on(Renderer::new(Arc::new(window), &window_config))
            .context("cannot initialise the GPU")?;
        Ok(renderer)
    }

    /// Run the ticks owed since the last frame. Returns false once the game
    /// has asked to exit.
    fn catch_up(&mut self, elapsed: f32) -> bool {
        self.accumulator += elapsed;
        while self.accumulator >= self.fixed_dt {
            self.game.tick();
            // Presses belong to the first tick that sees them.
            self.game.ctx.input.clear_frame_state();
            if self.game.exit_code().is_some() {
                return false;
            }
            self.accumulator -= self.fixed_dt;
        }
        true
    }
}

impl ApplicationHandler for App {
    /// First resume creates the window; a failure stops the loop and is
    /// returned from `run`.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.renderer.is_some() {
            return;
        }
        match self.create_renderer(event_loop) {
            Ok(renderer) => self.renderer = Some(renderer),
            Err(err) => {
                self.fatal = Some(err);
                event_loop.exit();
            }
        }
    }

    /// Redraw continuously; ticks are paced by the accumulator, not by events.
    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(renderer) = self.renderer.as_ref() {
            renderer.window.request_redraw();
        }
    }

    /// Feed input into `InputState`; on redraw, tick then draw then present.
    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(renderer) = self.renderer.as_mut() else { return };
        let input = &mut self.game.ctx.input;

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::Resized(size) => renderer.resize(size),

            WindowEvent::CursorMoved { position, .. } => {
                let viewport = renderer.viewport();
                let logical = viewport.to_logical(position.x as f32, position.y as f32, SCREEN_WIDTH, SCREEN_HEIGHT);
                if let Some((x, y)) = logical {
                    input.set_mouse_pos(Vec2::new(x, y));
                }
            }

            WindowEvent::MouseInput { button, state, .. } => match state {
                ElementState::Pressed => input.press_mouse(button),
                ElementState::Released => input.release_mouse(button),
            },

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        ref text,
                        ..
                    },
                ..
            } => match state {
                ElementState::Pressed => {
                    input.press_key(code);
                    // Printable characters for edit boxes.
                    if let Some(t) = text {
                        input.chars_typed.extend(t.chars().filter(|ch| !ch.is_control()));
                    }
                }
                ElementState::Released => input.release_key(code),
            },

            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let elapsed = match self.last_instant {
                    Some(prev) => now.duration_since(prev).as_secs_f32().min(0.25),
                    None => self.fixed_dt,
                };
                self.last_instant = Some(now);

                if !self.catch_up(elapsed) {
                    event_loop.exit();
                    return;
                }

                self.frame.clear(Color::BLACK);
                self.game.draw(&mut self.frame);
                self.game.ctx.stats.record_frame();

                let Some(renderer) = self.renderer.as_mut() else { return };
                match renderer.present(&self.frame) {
                    Ok(()) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        let size = renderer.window.inner_size();
                        renderer.resize(size);
                    }
                    Err(e) => log::error!("present failed: {e}"),
                }
            }

            _ => {}
        }
    }
}
