//! Image cache and the background asset loader.
//!
//! Missing files never stop the game: a failed load is logged once and
//! yields an empty [`ImageHandle`] that draws as nothing.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use image::RgbaImage;
use kira::sound::static_sound::StaticSoundData;
use walkdir::WalkDir;

use crate::audio::SOUND_FILES;
use crate::config::GameConfig;
use crate::i18n::Localization;
use crate::input::Keybinds;
use crate::level::Level;
use crate::renderer::text::FontDescriptor;

/// Image paths the game draws by name.
pub mod paths {
    pub const TILE_MAP: &str = "assets/tilemap2.png";
    pub const TILE_CURSOR: &str = "assets/tile_selector.png";
    pub const BRANDING_LOGO: &str = "assets/aragajaga.png";
    pub const EXPLOSION: &str = "assets/explosion.png";
    pub const SPELL_MONOBEAR_EXPLOSION: &str = "assets/spell_monobear_explosion.png";
    pub const BOOT_LOGO: &str = "assets/boot.png";
    pub const SEEYA: &str = "assets/seeya.png";
    pub const WALLPAPER: &str = "assets/computer/wallpaper.png";
    pub const TASKBAND: &str = "assets/computer/taskband.png";
    pub const START_BUTTON: &str = "assets/computer/appmenu.png";
    pub const XP_CAPTION: &str = "assets/computer/frame_caption.png";
    pub const XP_FRAME_LEFT: &str = "assets/computer/frame_left.png";
    pub const XP_FRAME_RIGHT: &str = "assets/computer/frame_right.png";
    pub const XP_FRAME_BOTTOM: &str = "assets/computer/frame_bottom.png";
    pub const XP_CLOSE_BUTTON: &str = "assets/computer/close_button.png";
    pub const XP_CLOSE_GLYPH: &str = "assets/computer/close_glyph.png";
    pub const XP_ICON_ERROR: &str = "assets/computer/icon_error.png";
}

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot decode {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Decode one image file into RGBA8.
pub fn load_image(path: &Path) -> Result<RgbaImage, AssetError> {
    let img = image::open(path).map_err(|source| match source {
        image::ImageError::IoError(source) => AssetError::Io { path: path.to_path_buf(), source },
        source => AssetError::Image { path: path.to_path_buf(), source },
    })?;
    Ok(img.to_rgba8())
}

/// Cache key for a path: forward slashes on every platform.
pub fn asset_key(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

// ── ImageHandle ──────────────────────────────────────────────────────────────

/// Shared decoded image, possibly absent.
#[derive(Debug, Clone, Default)]
pub struct ImageHandle(Option<Arc<RgbaImage>>);

impl ImageHandle {
    pub fn new(image: RgbaImage) -> Self {
        Self(Some(Arc::new(image)))
    }

    pub fn missing() -> Self {
        Self(None)
    }

    pub fn get(&self) -> Option<&RgbaImage> {
        self.0.as_deref()
    }

    pub fn is_loaded(&self) -> bool {
        self.0.is_some()
    }

    pub fn size(&self) -> Option<(u32, u32)> {
        self.get().map(RgbaImage::dimensions)
    }
}

// ── ResourceCache ────────────────────────────────────────────────────────────

/// Path-keyed image cache. Each path is read from disk at most once; a
/// failure is remembered as a missing handle.
#[derive(Debug, Default)]
pub struct ResourceCache {
    images: HashMap<String, ImageHandle>,
}

impl ResourceCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn image(&mut self, path: &str) -> ImageHandle {
        if let Some(handle) = self.images.get(path) {
            return handle.clone();
        }
        let handle = match load_image(Path::new(path)) {
            Ok(img) => ImageHandle::new(img),
            Err(e) => {
                log::warn!("{e}");
                ImageHandle::missing()
            }
        };
        self.images.insert(path.to_string(), handle.clone());
        handle
    }

    /// Cached handle without touching the disk.
    pub fn cached(&self, path: &str) -> ImageHandle {
        self.images.get(path).cloned().unwrap_or_default()
    }

    pub fn insert_image(&mut self, path: impl Into<String>, image: RgbaImage) -> ImageHandle {
        let handle = ImageHandle::new(image);
        self.images.insert(path.into(), handle.clone());
        handle
    }

    /// Forget a path; the next request reloads it.
    pub fn release(&mut self, path: &str) -> bool {
        self.images.remove(path).is_some()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.images.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

// ── Loader ───────────────────────────────────────────────────────────────────

/// Everything the preload pass produces.
#[derive(Default)]
pub struct LoadedAssets {
    pub images: Vec<(String, RgbaImage)>,
    pub sounds: Vec<(String, StaticSoundData)>,
    pub level: Option<Level>,
    pub lang: Localization,
    pub keybinds: Keybinds,
    pub font: Option<FontDescriptor>,
}

enum LoaderMessage {
    Progress(String),
    Done(Box<LoadedAssets>),
}

/// Read every asset the game needs, reporting one line per step.
pub fn load_blocking(config: &GameConfig, mut progress: impl FnMut(String)) -> LoadedAssets {
    let mut out = LoadedAssets::default();

    progress(format!("Scanning {}", config.asset_root.display()));
    for entry in WalkDir::new(&config.asset_root).into_iter().filter_map(Result::ok) {
        let path = entry.path();
        let is_png = path.extension().is_some_and(|e| e.eq_ignore_ascii_case("png"));
        if !entry.file_type().is_file() || !is_png {
            continue;
        }
        match load_image(path) {
            Ok(img) => {
                let key = asset_key(path);
                progress(format!("Loaded {key}"));
                out.images.push((key, img));
            }
            Err(e) => log::warn!("{e}"),
        }
    }

    for (name, file) in SOUND_FILES {
        match StaticSoundData::from_file(file) {
            Ok(sound) => {
                progress(format!("Loaded sound {name}"));
                out.sounds.push((name.to_string(), sound));
            }
            Err(e) => log::warn!("cannot load sound {file}: {e}"),
        }
    }

    progress(format!("Loading level {}", config.level_path.display()));
    out.level = match Level::load(&config.level_path) {
        Ok(level) => Some(level),
        Err(e) => {
            log::warn!("{e}; starting with a blank level");
            None
        }
    };

    progress(format!("Loading language {}", config.language_path.display()));
    out.lang = Localization::load(&config.language_path);
    out.keybinds = Keybinds::load_or_default(&config.keybinds_path);
    out.font = FontDescriptor::load(&config.font_path)
        .map_err(|e| log::warn!("{e}; using the built-in font"))
        .ok();

    progress("Done".to_string());
    out
}

/// Background preload started once at boot. The frame loop polls it without
/// blocking.
pub struct Loader {
    rx: Receiver<LoaderMessage>,
    log: Vec<String>,
    finished: bool,
}

impl Loader {
    pub fn start(config: &GameConfig) -> Self {
        let (tx, rx) = mpsc::channel();
        let config = config.clone();
        let spawned = thread::Builder::new().name("asset-loader".into()).spawn(move || {
            let progress_tx = tx.clone();
            let assets = load_blocking(&config, |line| {
                log::info!("{line}");
                let _ = progress_tx.send(LoaderMessage::Progress(line));
            });
            let _ = tx.send(LoaderMessage::Done(Box::new(assets)));
        });
        if let Err(e) = spawned {
            log::error!("failed to start the asset loader: {e}");
        }
        Self { rx, log: Vec::new(), finished: false }
    }

    /// Drain pending progress lines. Returns the bundle exactly once, on the
    /// poll that sees the loader finish.
    pub fn poll(&mut self) -> Option<LoadedAssets> {
        if self.finished {
            return None;
        }
        loop {
            match self.rx.try_recv() {
                Ok(LoaderMessage::Progress(line)) => self.log.push(line),
                Ok(LoaderMessage::Done(assets)) => {
                    self.finished = true;
                    return Some(*assets);
                }
                Err(TryRecvError::Empty) => return None,
                Err(TryRecvError::Disconnected) => {
                    log::error!("asset loader stopped without a result");
                    self.finished = true;
                    return Some(LoadedAssets::default());
                }
            }
        }
    }

    pub fn log(&self) -> &[String] {
        &self.log
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}
