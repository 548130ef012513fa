//! Application messages

use iced::Size;
use iced::keyboard::{Key, Modifiers};

use crate::danmaku::SharedFontSystem;
use crate::player::{PlayerEvent, SubscriptionId};

/// Application messages
#[derive(Clone)]
pub enum Message {
    /// No-op message for event interception
    Noop,

    // ============ Frame & Window ============
    /// Redraw tick while the video surface is on screen
    Frame,
    /// Window resized
    WindowResized(Size),
    /// Window close button or system close
    RequestClose,
    /// Keyboard key pressed
    KeyPressed(Key, Modifiers),
    /// Keyboard key released (hold actions)
    KeyReleased(Key, Modifiers),

    // ============ Player ============
    /// Event delivered on a view's subscription
    PlayerEvent(SubscriptionId, PlayerEvent),
    /// Subscription channel closed
    PlayerEventsEnded(SubscriptionId),
    /// Font system loaded for danmaku measurement
    FontSystemReady(SharedFontSystem),

    // ============ Video view actions ============
    TogglePlayback,
    SeekForward,
    SeekBackward,
    /// Tap on the video surface
    ToggleOsd,
    ToggleDanmaku,
    ToggleFullscreen,
    /// Remote "OK"
    Primary,
    /// Remote "Back"
    Cancel,
    /// Progress slider dragged to a fraction
    SeekPreview(f32),
    /// Progress slider released
    SeekRelease,
    /// Speed button pressed
    SpeedPress,
    /// Speed button released
    SpeedRelease,
}

impl std::fmt::Debug for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Use a macro to reduce boilerplate for simple variants
        macro_rules! simple {
            ($name:literal) => { write!(f, $name) };
            ($name:literal, $($arg:tt)*) => { write!(f, concat!($name, "({})"), format_args!($($arg)*)) };
        }

        match self {
            // High-frequency messages - keep minimal (no data)
            Self::Frame => simple!("Frame"),
            Self::Noop => simple!("Noop"),

            Self::WindowResized(size) => {
                simple!("WindowResized", "{}x{}", size.width, size.height)
            }
            Self::RequestClose => simple!("RequestClose"),
            Self::KeyPressed(key, _) => simple!("KeyPressed", "{:?}", key),
            Self::KeyReleased(key, _) => simple!("KeyReleased", "{:?}", key),

            Self::PlayerEvent(id, event) => simple!("PlayerEvent", "{}, {:?}", id, event),
            Self::PlayerEventsEnded(id) => simple!("PlayerEventsEnded", "{}", id),
            Self::FontSystemReady(_) => simple!("FontSystemReady"),

            Self::TogglePlayback => simple!("TogglePlayback"),
            Self::SeekForward => simple!("SeekForward"),
            Self::SeekBackward => simple!("SeekBackward"),
            Self::ToggleOsd => simple!("ToggleOsd"),
            Self::ToggleDanmaku => simple!("ToggleDanmaku"),
            Self::ToggleFullscreen => simple!("ToggleFullscreen"),
            Self::Primary => simple!("Primary"),
            Self::Cancel => simple!("Cancel"),
            Self::SeekPreview(fraction) => simple!("SeekPreview", "{:.3}", fraction),
            Self::SeekRelease => simple!("SeekRelease"),
            Self::SpeedPress => simple!("SpeedPress"),
            Self::SpeedRelease => simple!("SpeedRelease"),
        }
    }
}
