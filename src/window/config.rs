use serde::{Deserialize, Serialize};

use crate::geometry::{SCREEN_HEIGHT, SCREEN_WIDTH};

// ── WindowMode ────────────────────────────────────────────────────────────────

/// Controls how the OS window is presented.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowMode {
    /// Standard decorated window at `scale` times the frame-buffer size.
    #[default]
    Windowed,
    /// Exclusive hardware fullscreen at the closest video mode.
    Fullscreen,
    /// Borderless window sized to match the monitor's native resolution.
    Borderless,
}

// ── WindowConfig ──────────────────────────────────────────────────────────────

/// Window configuration snapshot.
///
/// - **physical** dimensions are the actual pixel size of the OS window.
/// - **logical** dimensions are always the 640 × 480 frame buffer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    /// Integer upscale of the frame buffer for the initial window size.
    pub scale: u32,
    pub mode: WindowMode,
    /// Actual window width in physical pixels, updated on resize.
    #[serde(skip)]
    pub physical_width: u32,
    /// Actual window height in physical pixels, updated on resize.
    #[serde(skip)]
    pub physical_height: u32,
}

impl WindowConfig {
    pub fn logical_width(&self) -> u32 {
        SCREEN_WIDTH
    }

    pub fn logical_height(&self) -> u32 {
        SCREEN_HEIGHT
    }

    /// Window size requested at startup.
    pub fn initial_size(&self) -> (u32, u32) {
        let scale = self.scale.max(1);
        (SCREEN_WIDTH * scale, SCREEN_HEIGHT * scale)
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        let scale = 2;
        Self {
            title: "Ronery".to_string(),
            scale,
            mode: WindowMode::Windowed,
            physical_width: SCREEN_WIDTH * scale,
            physical_height: SCREEN_HEIGHT * scale,
        }
    }
}
