//! Flat string tables keyed by message id.

use std::collections::HashMap;
use std::path::Path;

use crate::config::read_json;

#[derive(Debug, Clone, Default)]
pub struct Localization {
    strings: HashMap<String, String>,
}

impl Localization {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a `{ "id": "text", ... }` table. A missing or malformed file gives
    /// an empty table, so every lookup falls back.
    pub fn load(path: impl AsRef<Path>) -> Self {
        match read_json::<HashMap<String, String>>(path.as_ref()) {
            Ok(strings) => {
                log::info!("loaded {} strings from {}", strings.len(), path.as_ref().display());
                Self { strings }
            }
            Err(e) => {
                log::warn!("{e}; using built-in strings");
                Self::default()
            }
        }
    }

    pub fn from_map(strings: HashMap<String, String>) -> Self {
        Self { strings }
    }

    pub fn insert(&mut self, id: impl Into<String>, text: impl Into<String>) {
        self.strings.insert(id.into(), text.into());
    }

    /// Translated text for `id`, or `fallback` when the table lacks it.
    pub fn get<'a>(&'a self, id: &str, fallback: &'a str) -> &'a str {
        self.strings.get(id).map_or(fallback, String::as_str)
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}
