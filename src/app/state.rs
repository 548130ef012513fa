// src/app/state.rs
//! Application state definitions

use std::path::PathBuf;

use crate::features::Settings;
use crate::i18n::Locale;
use crate::player::LoadRequest;
use crate::ui::fullscreen::ViewStack;
use crate::ui::video_view::{SharedClock, SharedCore};

/// Main application state
pub struct App {
    /// Core infrastructure (player core, clock, settings)
    pub core: CoreState,
    /// UI state (video views, window)
    pub ui: UiState,
}

/// Core Infrastructure & Services
pub struct CoreState {
    pub player: SharedCore,
    pub clock: SharedClock,
    pub settings: Settings,
    pub locale: Locale,
}

impl CoreState {
    pub fn new(player: SharedCore, clock: SharedClock, settings: Settings, locale: Locale) -> Self {
        Self {
            player,
            clock,
            settings,
            locale,
        }
    }
}

/// UI state
pub struct UiState {
    /// Windowed view and, while active, the fullscreen view on top
    pub views: ViewStack,
    /// Main window id
    pub window_id: Option<iced::window::Id>,
    pub window_size: iced::Size,
    /// Speed key is down, swallows auto-repeat
    pub speed_key_held: bool,
}

impl UiState {
    pub fn new(window_size: iced::Size) -> Self {
        Self {
            views: ViewStack::new(),
            window_id: None,
            window_size,
            speed_key_held: false,
        }
    }
}

/// What to play at startup
#[derive(Debug, Clone, Default)]
pub struct Launch {
    pub media: Option<LoadRequest>,
    pub danmaku: Option<PathBuf>,
    pub title: Option<String>,
    pub online_count: Option<u64>,
    /// Start in fullscreen
    pub fullscreen: bool,
}
