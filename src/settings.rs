//! Player preferences
//!
//! Read from LocalStorage on the web; natively from the JSON file
//! named by `PONG_SETTINGS`.

#[cfg(not(target_arch = "wasm32"))]
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Keys for each control, compared case-insensitively against
/// `KeyboardEvent.key`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub up: Vec<String>,
    pub down: Vec<String>,
    /// Start / pause / resume
    pub toggle: Vec<String>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            up: vec!["w".into(), "ArrowUp".into()],
            down: vec!["s".into(), "ArrowDown".into()],
            toggle: vec![" ".into()],
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub keys: KeyBindings,
    /// Pause a running match when the window loses focus
    pub pause_on_blur: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            keys: KeyBindings::default(),
            pause_on_blur: true,
        }
    }
}

impl Settings {
    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "cpu_pong_settings";

    /// Environment variable naming a native settings file
    pub const PATH_ENV: &'static str = "PONG_SETTINGS";

    /// Parse settings JSON, falling back to defaults on error
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring invalid settings: {}", e);
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Load settings from LocalStorage (WASM only)
    ///
    /// On first visit the defaults are stored so they can be edited.
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json(&json);
            }
        }

        log::info!("Using default settings");
        let settings = Self::default();
        settings.save();
        settings
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if storage.set_item(Self::STORAGE_KEY, &self.to_json()).is_ok() {
                log::info!("Settings saved");
            }
        }
    }

    /// Load settings from `$PONG_SETTINGS` if set
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        match std::env::var_os(Self::PATH_ENV) {
            Some(path) => Self::load_from(Path::new(&path)),
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Read a settings file; a missing file is created with the defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => {
                log::info!("Loaded settings from {}", path.display());
                Self::from_json(&json)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("Writing default settings to {}", path.display());
                let settings = Self::default();
                if let Err(e) = settings.save_to(path) {
                    log::warn!("Cannot write settings {}: {}", path.display(), e);
                }
                settings
            }
            Err(e) => {
                log::warn!("Cannot read settings {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings to `$PONG_SETTINGS`; does nothing if it is unset
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        let Some(path) = std::env::var_os(Self::PATH_ENV) else {
            return;
        };
        let path = Path::new(&path);
        match self.save_to(path) {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::warn!("Cannot write settings {}: {}", path.display(), e),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        std::fs::write(path, self.to_json())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_bind_classic_keys() {
        let settings = Settings::default();
        assert!(settings.keys.up.contains(&"w".to_string()));
        assert!(settings.keys.down.contains(&"s".to_string()));
        assert_eq!(settings.keys.toggle, vec![" ".to_string()]);
        assert!(settings.pause_on_blur);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{"pause_on_blur": false}"#);
        assert!(!settings.pause_on_blur);
        assert_eq!(settings.keys, KeyBindings::default());

        let settings = Settings::from_json(r#"{"keys": {"up": ["i"]}}"#);
        assert_eq!(settings.keys.up, vec!["i".to_string()]);
        assert_eq!(settings.keys.down, KeyBindings::default().down);
    }

    #[test]
    fn test_invalid_json_falls_back() {
        assert_eq!(Settings::from_json("not json"), Settings::default());
    }

    #[test]
    fn test_json_round_trip() {
        let mut settings = Settings::default();
        settings.keys.toggle.push("p".into());
        assert_eq!(Settings::from_json(&settings.to_json()), settings);
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn scratch_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("cpu-pong-{}-{}.json", name, std::process::id()))
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_save_then_load_from_file() {
        let path = scratch_path("saved");
        let mut settings = Settings::default();
        settings.pause_on_blur = false;
        settings.keys.up = vec!["i".into()];

        settings.save_to(&path).unwrap();
        let loaded = Settings::load_from(&path);
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded, settings);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_missing_file_is_created_with_defaults() {
        let path = scratch_path("missing");
        let _ = std::fs::remove_file(&path);

        assert_eq!(Settings::load_from(&path), Settings::default());
        let written = std::fs::read_to_string(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(Settings::from_json(&written), Settings::default());
    }
}
