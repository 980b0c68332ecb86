//! Game actions and the keys bound to them.
//!
//! Every action has a default key. A JSON object such as
//! `{ "zoom_in": "Equal", "place": "Space" }` overrides individual bindings;
//! actions it does not mention keep their defaults.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{ActionMap, InputState, KeyCode};
use crate::config::{ConfigError, read_json};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    ToggleRotation,
    ToggleEdit,
    NextLayer,
    PrevLayer,
    NextBrush,
    PrevBrush,
    Place,
    Delete,
    ToggleXray,
    ToggleDebug,
    ZoomOut,
    ZoomIn,
}

impl Action {
    pub const ALL: [Action; 16] = [
        Action::MoveLeft,
        Action::MoveRight,
        Action::MoveUp,
        Action::MoveDown,
        Action::ToggleRotation,
        Action::ToggleEdit,
        Action::NextLayer,
        Action::PrevLayer,
        Action::NextBrush,
        Action::PrevBrush,
        Action::Place,
        Action::Delete,
        Action::ToggleXray,
        Action::ToggleDebug,
        Action::ZoomOut,
        Action::ZoomIn,
    ];

    pub fn default_key(self) -> KeyCode {
        match self {
            Action::MoveLeft => KeyCode::ArrowLeft,
            Action::MoveRight => KeyCode::ArrowRight,
            Action::MoveUp => KeyCode::ArrowUp,
            Action::MoveDown => KeyCode::ArrowDown,
            Action::ToggleRotation => KeyCode::F7,
            Action::ToggleEdit => KeyCode::F8,
            Action::NextLayer => KeyCode::KeyX,
            Action::PrevLayer => KeyCode::KeyZ,
            Action::NextBrush => KeyCode::NumpadAdd,
            Action::PrevBrush => KeyCode::NumpadSubtract,
            Action::Place => KeyCode::Enter,
            Action::Delete => KeyCode::Delete,
            Action::ToggleXray => KeyCode::KeyS,
            Action::ToggleDebug => KeyCode::F3,
            Action::ZoomOut => KeyCode::KeyO,
            Action::ZoomIn => KeyCode::KeyP,
        }
    }

    /// Human-readable name shown on the keybind screen.
    pub fn label(self) -> &'static str {
        match self {
            Action::MoveLeft => "Move left",
            Action::MoveRight => "Move right",
            Action::MoveUp => "Move up",
            Action::MoveDown => "Move down",
            Action::ToggleRotation => "Entity rotation",
            Action::ToggleEdit => "Level editor",
            Action::NextLayer => "Editor: next layer",
            Action::PrevLayer => "Editor: previous layer",
            Action::NextBrush => "Editor: next tile",
            Action::PrevBrush => "Editor: previous tile",
            Action::Place => "Editor: place",
            Action::Delete => "Editor: delete",
            Action::ToggleXray => "Editor: x-ray",
            Action::ToggleDebug => "Debug info",
            Action::ZoomOut => "Zoom out",
            Action::ZoomIn => "Zoom in",
        }
    }
}

/// Current binding of every [`Action`].
#[derive(Debug, Clone)]
pub struct Keybinds {
    keys: BTreeMap<Action, KeyCode>,
    map: ActionMap<Action>,
}

impl Keybinds {
    pub fn key(&self, action: Action) -> KeyCode {
        self.keys.get(&action).copied().unwrap_or_else(|| action.default_key())
    }

    pub fn bind(&mut self, action: Action, key: KeyCode) {
        self.keys.insert(action, key);
        self.map.unbind(action);
        self.map.bind(action, key);
    }

    /// Bindings in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Action, KeyCode)> + '_ {
        Action::ALL.iter().map(|&a| (a, self.key(a)))
    }

    pub fn pressed(&self, action: Action, input: &InputState) -> bool {
        self.map.is_pressed(action, input)
    }

    pub fn held(&self, action: Action, input: &InputState) -> bool {
        self.map.is_held(action, input)
    }

    pub fn released(&self, action: Action, input: &InputState) -> bool {
        self.map.is_released(action, input)
    }

    /// Defaults overlaid with the bindings found in a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let overrides: BTreeMap<Action, KeyCode> = read_json(path.as_ref())?;
        let mut binds = Self::default();
        for (action, key) in overrides {
            binds.bind(action, key);
        }
        log::info!("loaded keybinds from {}", path.as_ref().display());
        Ok(binds)
    }

    /// Like [`Keybinds::load`], falling back to the defaults when the file is
    /// missing or malformed.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(binds) => binds,
            Err(ConfigError::Io { .. }) => Self::default(),
            Err(e) => {
                log::warn!("{e}; using default keybinds");
                Self::default()
            }
        }
    }
}

impl Default for Keybinds {
    fn default() -> Self {
        let mut binds = Self { keys: BTreeMap::new(), map: ActionMap::new() };
        for action in Action::ALL {
            binds.bind(action, action.default_key());
        }
        binds
    }
}
