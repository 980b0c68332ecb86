pub mod config;

pub use config::{WindowConfig, WindowMode};

use winit::dpi::PhysicalSize;
use winit::window::{Fullscreen, Window};

/// Apply `config` to `window`, updating decorations, fullscreen state, and size.
///
/// `Fullscreen` picks the current monitor's video mode closest in area to the
/// requested size and falls back to borderless when no monitor is known.
pub fn apply_window_settings(window: &Window, config: &WindowConfig) {
    match config.mode {
        WindowMode::Windowed => {
            window.set_fullscreen(None);
            window.set_decorations(true);
            let (w, h) = config.initial_size();
            // The resize handler reconciles the final size.
            let _ = window.request_inner_size(PhysicalSize::new(w, h));
        }

        WindowMode::Fullscreen => {
            let (w, h) = config.initial_size();
            let fullscreen = match window.current_monitor() {
                Some(monitor) => {
                    let target_area = w as u64 * h as u64;
                    let best = monitor.video_modes().min_by_key(|vm| {
                        let s = vm.size();
                        (s.width as u64 * s.height as u64).abs_diff(target_area)
                    });
                    match best {
                        Some(vm) => Fullscreen::Exclusive(vm),
                        None => Fullscreen::Borderless(Some(monitor)),
                    }
                }
                None => Fullscreen::Borderless(None),
            };
            window.set_fullscreen(Some(fullscreen));
        }

        WindowMode::Borderless => {
            window.set_fullscreen(Some(Fullscreen::Borderless(None)));
        }
    }
}

// ── Letterbox viewport math ───────────────────────────────────────────────────

/// Axis-aligned rectangle in physical pixels that centres the frame buffer
/// while preserving its aspect ratio (letterbox / pillarbox).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// Map a physical window position to logical frame-buffer pixels.
    /// Returns `None` outside the viewport or when it has no area.
    pub fn to_logical(&self, px: f32, py: f32, logical_w: u32, logical_h: u32) -> Option<(f32, f32)> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return None;
        }
        let lx = (px - self.x) / self.width * logical_w as f32;
        let ly = (py - self.y) / self.height * logical_h as f32;
        let inside = lx >= 0.0 && ly >= 0.0 && lx < logical_w as f32 && ly < logical_h as f32;
        inside.then_some((lx, ly))
    }
}

/// Largest uniformly scaled copy of the logical resolution that fits the
/// physical window, centred on both axes:
/// ```text
/// scale = min(physical_width / logical_width, physical_height / logical_height)
/// ```
pub fn letterbox_viewport(config: &WindowConfig) -> Viewport {
    let lw = config.logical_width() as f32;
    let lh = config.logical_height() as f32;
    let pw = config.physical_width as f32;
    let ph = config.physical_height as f32;

    let scale = (pw / lw).min(ph / lh);
    let width = lw * scale;
    let height = lh * scale;

    Viewport { x: (pw - width) / 2.0, y: (ph - height) / 2.0, width, height }
}
