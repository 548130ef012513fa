//! Internationalization (i18n) support for the player OSD
//!
//! Structure:
//! - i18n.rs: Core types (Language, Key, Locale) and translation lookup
//! - en.rs: English translations
//! - zh.rs: Chinese translations

mod en;
mod zh;

use std::collections::HashMap;

/// Supported languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    English,
    Chinese,
}

impl Language {
    /// Get language code
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Chinese => "zh",
        }
    }

    /// Parse a settings language code, English for anything unknown
    pub fn from_code(code: &str) -> Self {
        Self::all()
            .iter()
            .copied()
            .find(|lang| code.eq_ignore_ascii_case(lang.code()))
            .unwrap_or_default()
    }

    /// All available languages
    pub fn all() -> &'static [Language] {
        &[Language::English, Language::Chinese]
    }
}

/// Translation keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    AppName,

    // OSD
    Untitled,
    OnlineCount,
    Loading,
    Play,
    Pause,
    DanmakuOn,
    DanmakuOff,
    EnterFullscreen,
    ExitFullscreen,
    SpeedBoost,
    SeekForward,
    SeekBackward,
}

/// Get translation for a key in the specified language
pub fn t(lang: Language, key: Key) -> &'static str {
    let translations: &HashMap<Key, &'static str> = match lang {
        Language::English => en::translations(),
        Language::Chinese => zh::translations(),
    };

    translations.get(&key).copied().unwrap_or("???")
}

/// Localization context that can be passed around
#[derive(Debug, Clone, Copy, Default)]
pub struct Locale {
    pub language: Language,
}

impl Locale {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    /// Get translation for a key
    pub fn get(&self, key: Key) -> &'static str {
        t(self.language, key)
    }

    /// Translation with a single `{}` placeholder filled in
    pub fn format(&self, key: Key, value: impl std::fmt::Display) -> String {
        self.get(key).replacen("{}", &value.to_string(), 1)
    }
}
