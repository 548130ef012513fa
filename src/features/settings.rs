//! Application settings persistence
//!
//! Handles saving and loading user preferences.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::KeyBindings;
use crate::danmaku::DanmakuConfig;

/// Application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Playback and video view behaviour
    pub player: PlayerSettings,
    /// Danmaku overlay layout
    pub danmaku: DanmakuSettings,
    /// Display and interface settings
    pub display: DisplaySettings,
    /// Custom keybindings
    pub keybindings: KeyBindings,
}

/// Playback-related settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    /// Leave fullscreen when the file ends
    pub close_on_end_of_file: bool,
    /// Primary action enters fullscreen
    pub allow_fullscreen: bool,
    /// Seek step for the forward/backward actions
    pub seek_step_secs: u32,
    /// How long a temporary OSD stays up
    pub osd_show_secs: f64,
    /// Playback rate while the speed button is held
    pub speed_boost: f64,
    /// Referrer header sent with media requests
    pub referrer: Option<String>,
}

/// Danmaku overlay settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DanmakuSettings {
    /// Show danmaku at startup
    pub enabled: bool,
    pub font_size: f32,
    pub line_spacing: f32,
    /// Upper bound on lanes, never above 20
    pub max_lines: usize,
    /// Seconds a scroll comment takes to cross the screen
    pub scroll_secs: f64,
    /// Seconds a top/bottom comment stays up
    pub fixed_secs: f64,
    /// Overlay opacity (0.0 - 1.0)
    pub opacity: f32,
}

/// Display and interface settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Dark mode enabled
    pub dark_mode: bool,
    /// Application language
    pub language: String,
    /// Power saving mode - caps the overlay redraw rate
    pub power_saving_mode: bool,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            close_on_end_of_file: true,
            allow_fullscreen: true,
            seek_step_secs: 10,
            osd_show_secs: 5.0,
            speed_boost: 2.0,
            referrer: None,
        }
    }
}

impl Default for DanmakuSettings {
    fn default() -> Self {
        let config = DanmakuConfig::default();
        Self {
            enabled: true,
            font_size: config.font_size,
            line_spacing: config.line_spacing,
            max_lines: config.max_lines,
            scroll_secs: config.scroll_seconds,
            fixed_secs: config.fixed_seconds,
            opacity: 1.0,
        }
    }
}

impl DanmakuSettings {
    /// Scheduler configuration, with out-of-range values replaced by defaults
    pub fn to_config(&self) -> DanmakuConfig {
        let defaults = DanmakuConfig::default();
        let positive = |value: f64, fallback: f64| {
            if value.is_finite() && value > 0.0 {
                value
            } else {
                fallback
            }
        };

        DanmakuConfig {
            font_size: if self.font_size > 0.0 {
                self.font_size
            } else {
                defaults.font_size
            },
            line_spacing: self.line_spacing.max(0.0),
            max_lines: self.max_lines.min(defaults.max_lines),
            scroll_seconds: positive(self.scroll_secs, defaults.scroll_seconds),
            fixed_seconds: positive(self.fixed_secs, defaults.fixed_seconds),
        }
    }
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            dark_mode: true,
            language: "zh".to_string(),
            power_saving_mode: false,
        }
    }
}

impl Settings {
    /// Get the settings file path
    pub fn file_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("tv", "danmu", "DanmuTV")
            .map(|dirs| dirs.config_dir().join("settings.json"))
    }

    /// Load settings from file, or return defaults if not found
    pub fn load() -> Self {
        Self::file_path()
            .and_then(|path| match Self::load_from_file(&path) {
                Ok(settings) => Some(settings),
                Err(e) => {
                    tracing::debug!("Using default settings ({}): {}", path.display(), e);
                    None
                }
            })
            .unwrap_or_default()
    }

    /// Load settings from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self, SettingsError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| SettingsError::Io(e.to_string()))?;
        serde_json::from_str(&content).map_err(|e| SettingsError::Parse(e.to_string()))
    }

    /// Save settings to the default file
    pub fn save(&self) -> Result<(), SettingsError> {
        if let Some(path) = Self::file_path() {
            self.save_to_file(&path)
        } else {
            Err(SettingsError::Io(
                "Could not determine config directory".to_string(),
            ))
        }
    }

    /// Save settings to a specific file
    pub fn save_to_file(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| SettingsError::Io(e.to_string()))?;
        }

        let content =
            serde_json::to_string_pretty(self).map_err(|e| SettingsError::Parse(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| SettingsError::Io(e.to_string()))?;
        Ok(())
    }
}

/// Errors that can occur with settings
#[derive(Debug, Clone)]
pub enum SettingsError {
    Io(String),
    Parse(String),
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "IO error: {}", e),
            SettingsError::Parse(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for SettingsError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(settings.player.close_on_end_of_file);
        assert!(settings.player.allow_fullscreen);
        assert_eq!(settings.player.seek_step_secs, 10);
        assert_eq!(settings.player.speed_boost, 2.0);
        assert!(settings.danmaku.enabled);
        assert_eq!(settings.danmaku.font_size, 30.0);
        assert_eq!(settings.danmaku.max_lines, 20);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{ "player": { "seek_step_secs": 30 } }"#).unwrap();
        assert_eq!(settings.player.seek_step_secs, 30);
        assert!(settings.player.close_on_end_of_file);
        assert_eq!(settings.danmaku.scroll_secs, 8.0);
        assert_eq!(settings.display.language, "zh");
    }

    #[test]
    fn test_save_and_reload() {
        let path = std::env::temp_dir()
            .join(format!("danmu-tv-settings-{}", std::process::id()))
            .join("settings.json");
        let mut settings = Settings::default();
        settings.player.referrer = Some("https://example.com".to_string());
        settings.danmaku.font_size = 24.0;
        settings.save_to_file(&path).unwrap();

        let loaded = Settings::load_from_file(&path).unwrap();
        assert_eq!(loaded.player.referrer.as_deref(), Some("https://example.com"));
        assert_eq!(loaded.danmaku.font_size, 24.0);

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_load_errors() {
        let missing = Settings::load_from_file(Path::new("/nonexistent/danmu-tv.json"));
        assert!(matches!(missing, Err(SettingsError::Io(_))));

        let path = std::env::temp_dir().join(format!("danmu-tv-bad-{}.json", std::process::id()));
        std::fs::write(&path, "{ not json").unwrap();
        let bad = Settings::load_from_file(&path);
        assert!(matches!(bad, Err(SettingsError::Parse(_))));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_danmaku_config_sanitised() {
        let settings = DanmakuSettings {
            enabled: true,
            font_size: -1.0,
            line_spacing: -5.0,
            max_lines: 99,
            scroll_secs: 0.0,
            fixed_secs: f64::NAN,
            ..Default::default()
        };
        let config = settings.to_config();
        assert_eq!(config.font_size, 30.0);
        assert_eq!(config.line_spacing, 0.0);
        assert_eq!(config.max_lines, 20);
        assert_eq!(config.scroll_seconds, 8.0);
        assert_eq!(config.fixed_seconds, 8.0);
    }
}
