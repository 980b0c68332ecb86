use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use kira::{
    Volume,
    manager::{AudioManager, AudioManagerSettings, backend::DefaultBackend},
    sound::static_sound::{StaticSoundData, StaticSoundHandle, StaticSoundSettings},
    tween::Tween,
};

use crate::config::AudioSettings;

/// Sound keys the game plays by name.
pub mod keys {
    pub const MAIN_MENU_MUSIC: &str = "bgm/main_menu";
    pub const COMPUTER_MUSIC: &str = "bgm/computer";
    pub const CRITICAL_STOP: &str = "winxp/critical_stop";
    pub const LEVEL_MUSIC: &str = "bgm/level0";
}

/// Sound key and file of every preloaded sound.
pub const SOUND_FILES: &[(&str, &str)] = &[
    ("bgm/stage_prepare", "sound/prepare.ogg"),
    (keys::MAIN_MENU_MUSIC, "sound/bgm_main_menu.ogg"),
    (keys::LEVEL_MUSIC, "sound/bgm_level0.ogg"),
    (keys::COMPUTER_MUSIC, "sound/computer.ogg"),
    (keys::CRITICAL_STOP, "sound/critical_stop.ogg"),
];

fn tween(secs: f32) -> Tween {
    Tween { duration: Duration::from_secs_f32(secs), ..Default::default() }
}

pub struct AudioContext {
    /// `None` when audio hardware is unavailable (headless / CI / no audio device).
    manager: Option<AudioManager>,
    sounds: HashMap<String, StaticSoundData>,
    active_music: Option<(String, StaticSoundHandle)>,
    settings: AudioSettings,
}

impl AudioContext {
    pub fn new(settings: AudioSettings) -> Self {
        let manager = match AudioManager::<DefaultBackend>::new(AudioManagerSettings::default()) {
            Ok(m) => Some(m),
            Err(e) => {
                log::warn!("failed to initialize audio: {e}; audio disabled");
                None
            }
        };
        Self { manager, sounds: HashMap::new(), active_music: None, settings }
    }

    /// A context that never touches an audio device.
    pub fn disabled() -> Self {
        Self { manager: None, sounds: HashMap::new(), active_music: None, settings: AudioSettings::default() }
    }

    /// Returns true if audio hardware is available.
    pub fn is_available(&self) -> bool {
        self.manager.is_some()
    }

    /// Load a sound file (OGG, WAV) into memory under `name`.
    pub fn load_sound<P: AsRef<Path>>(&mut self, name: &str, path: P) {
        match StaticSoundData::from_file(path.as_ref()) {
            Ok(sound) => self.insert_sound(name, sound),
            Err(e) => log::warn!("failed to load sound '{name}' from '{}': {e}", path.as_ref().display()),
        }
    }

    pub fn insert_sound(&mut self, name: &str, sound: StaticSoundData) {
        self.sounds.insert(name.to_string(), sound);
    }

    pub fn has_sound(&self, name: &str) -> bool {
        self.sounds.contains_key(name)
    }

    /// Play a sound once at the effects volume.
    pub fn play(&mut self, name: &str) {
        let Some(manager) = self.manager.as_mut() else { return };
        let Some(data) = self.sounds.get(name) else {
            log::debug!("sound '{name}' not loaded");
            return;
        };
        let settings =
            StaticSoundSettings::new().volume(Volume::Amplitude(self.settings.sfx_volume as f64));
        if let Err(e) = manager.play(data.clone().with_settings(settings)) {
            log::warn!("failed to play '{name}': {e}");
        }
    }

    /// Loop `name` as background music, fading out whatever was playing.
    /// Asking for the track that is already playing does nothing.
    pub fn play_music(&mut self, name: &str, fade_in_secs: f32) {
        if self.active_music.as_ref().is_some_and(|(current, _)| current == name) {
            return;
        }
        self.stop_music(0.5);

        let volume = self.settings.music_volume as f64;
        let Some(manager) = self.manager.as_mut() else { return };
        let Some(data) = self.sounds.get(name) else {
            log::debug!("music '{name}' not loaded");
            return;
        };

        let settings = StaticSoundSettings::new().loop_region(0.0..).volume(Volume::Amplitude(0.0));
        match manager.play(data.clone().with_settings(settings)) {
            Ok(mut handle) => {
                let _ = handle.set_volume(Volume::Amplitude(volume), tween(fade_in_secs));
                self.active_music = Some((name.to_string(), handle));
            }
            Err(e) => log::warn!("failed to play music '{name}': {e}"),
        }
    }

    pub fn stop_music(&mut self, fade_out_secs: f32) {
        if let Some((_, mut handle)) = self.active_music.take() {
            let _ = handle.stop(tween(fade_out_secs));
        }
    }

    pub fn music_volume(&self) -> f32 {
        self.settings.music_volume
    }

    /// Change the music volume, applying it to the current track. 0.0 mutes.
    pub fn set_music_volume(&mut self, volume: f32) {
        self.settings.music_volume = volume.clamp(0.0, 1.0);
        if let Some((_, handle)) = self.active_music.as_mut() {
            let _ = handle.set_volume(Volume::Amplitude(self.settings.music_volume as f64), tween(0.1));
        }
    }
}

impl Default for AudioContext {
    fn default() -> Self {
        Self::disabled()
    }
}
