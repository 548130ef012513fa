//! Player thread communication types
//!
//! - `PlayerCommand` - Commands sent from the UI thread to the player thread
//! - `PlayerEvent` - Events published by the player thread to subscribers
//! - `SharedPlaybackState` - Thread-safe state for non-blocking UI reads
//!
//! ## Architecture
//! ```text
//! UI Thread (PlayerHandle) --[PlayerCommand]--> Player Thread (Timeline)
//! UI Thread (subscriber)   <--[PlayerEvent]---- Player Thread (via EventBus)
//! UI Thread                <--[SharedState]---- Player Thread (non-blocking reads)
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use super::load::LoadRequest;
use crate::danmaku::Comment;

// ============ Commands (UI -> Player Thread) ============

/// Seek destinations
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SeekTarget {
    /// Offset from the current position in seconds
    Relative(f64),
    /// Position in seconds
    Absolute(f64),
    /// Position as a percentage (0-100) of the duration
    AbsolutePercent(f64),
}

/// Commands sent from UI thread to player thread
///
/// Fire-and-forget: failures only show up as missing follow-up events.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerCommand {
    /// Replace the current media
    Load(LoadRequest),
    /// Parse a danmaku file into the shared comment buffer
    LoadDanmaku { path: PathBuf },
    Resume,
    Pause,
    Stop,
    Seek(SeekTarget),
    /// Playback rate, 1.0 is normal
    SetSpeed { speed: f64 },
    /// Render surface size changed
    SetFrameSize { width: u32, height: u32 },
    /// Exit the player thread
    Shutdown,
}

// ============ Events (Player Thread -> UI) ============

/// Events published by the player thread, in emission order
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    /// Playback resumed (or started after loading)
    Resumed,
    Paused,
    /// A new file started opening
    StartFile,
    /// Buffering or seeking began
    LoadingStarted,
    /// Buffering or seeking finished
    LoadingEnded,
    Stopped,
    /// File opened and ready
    Loaded,
    DurationChanged { duration: f64 },
    /// Emitted whenever the whole-second position changes
    ProgressChanged { playback_time: f64, duration: f64 },
    /// Danmaku buffer replaced
    DanmakuLoaded { count: usize },
    EndOfFile,
    /// Network throughput while loading
    CacheSpeedChanged { bytes_per_sec: u64 },
}

// ============ Shared State ============

/// Where the core is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoreStatus {
    /// Nothing loaded
    #[default]
    Idle,
    /// Opening a file, buffering or seeking
    Loading,
    /// Media open (playing or paused, see `paused`)
    Active,
    /// Reached the end of the file
    Ended,
}

/// Inner state protected by RwLock
#[derive(Debug, Clone)]
struct PlaybackStateInner {
    status: CoreStatus,
    paused: bool,
    playback_time: f64,
    duration: f64,
    speed: f64,
    frame_size: (u32, u32),
    danmaku_loaded: bool,
    danmaku_visible: bool,
}

impl Default for PlaybackStateInner {
    fn default() -> Self {
        Self {
            status: CoreStatus::Idle,
            paused: false,
            playback_time: 0.0,
            duration: 0.0,
            speed: 1.0,
            frame_size: (0, 0),
            danmaku_loaded: false,
            danmaku_visible: true,
        }
    }
}

/// Thread-safe shared playback state
///
/// UI thread reads this without blocking on the player thread.
/// The comment buffer sits behind its own mutex and is only ever copied out.
#[derive(Clone, Default)]
pub struct SharedPlaybackState {
    inner: Arc<RwLock<PlaybackStateInner>>,
    danmaku: Arc<Mutex<Vec<Comment>>>,
}

impl std::fmt::Debug for SharedPlaybackState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.read();
        f.debug_struct("SharedPlaybackState")
            .field("status", &inner.status)
            .field("paused", &inner.paused)
            .field("playback_time", &inner.playback_time)
            .field("duration", &inner.duration)
            .finish()
    }
}

impl SharedPlaybackState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> CoreStatus {
        self.inner.read().status
    }

    pub fn playback_time(&self) -> f64 {
        self.inner.read().playback_time
    }

    pub fn duration(&self) -> f64 {
        self.inner.read().duration
    }

    pub fn is_paused(&self) -> bool {
        self.inner.read().paused
    }

    /// Not advancing: nothing loaded, loading, or at the end
    pub fn is_idle(&self) -> bool {
        self.inner.read().status != CoreStatus::Active
    }

    pub fn speed(&self) -> f64 {
        self.inner.read().speed
    }

    pub fn frame_size(&self) -> (u32, u32) {
        self.inner.read().frame_size
    }

    pub fn danmaku_loaded(&self) -> bool {
        self.inner.read().danmaku_loaded
    }

    pub fn danmaku_visible(&self) -> bool {
        self.inner.read().danmaku_visible
    }

    /// Copy of the comment buffer, ascending by time
    pub fn danmaku_snapshot(&self) -> Vec<Comment> {
        self.danmaku.lock().clone()
    }

    // ---- Update methods ----

    pub fn set_status(&self, status: CoreStatus) {
        self.inner.write().status = status;
    }

    pub fn set_paused(&self, paused: bool) {
        self.inner.write().paused = paused;
    }

    pub fn set_playback_time(&self, playback_time: f64) {
        self.inner.write().playback_time = playback_time;
    }

    pub fn set_duration(&self, duration: f64) {
        self.inner.write().duration = duration;
    }

    pub fn set_speed(&self, speed: f64) {
        self.inner.write().speed = speed;
    }

    pub fn set_frame_size(&self, width: u32, height: u32) {
        self.inner.write().frame_size = (width, height);
    }

    pub fn set_danmaku_visible(&self, visible: bool) {
        self.inner.write().danmaku_visible = visible;
    }

    /// Replace the comment buffer
    pub fn set_danmaku(&self, comments: Vec<Comment>) {
        *self.danmaku.lock() = comments;
        self.inner.write().danmaku_loaded = true;
    }

    pub fn clear_danmaku(&self) {
        self.danmaku.lock().clear();
        self.inner.write().danmaku_loaded = false;
    }
}

// ============ Channel Types ============

/// Sender for player commands (held by PlayerHandle)
pub type PlayerCommandSender = tokio::sync::mpsc::UnboundedSender<PlayerCommand>;

/// Receiver for player commands (held by player thread)
pub type PlayerCommandReceiver = tokio::sync::mpsc::UnboundedReceiver<PlayerCommand>;

/// Sender for player events (one per subscriber, held by EventBus)
pub type PlayerEventSender = tokio::sync::mpsc::UnboundedSender<PlayerEvent>;

/// Receiver for player events (held by a subscription)
pub type PlayerEventReceiver = tokio::sync::mpsc::UnboundedReceiver<PlayerEvent>;

/// Create a new player command channel
pub fn player_command_channel() -> (PlayerCommandSender, PlayerCommandReceiver) {
    tokio::sync::mpsc::unbounded_channel()
}

/// Create a new player event channel
pub fn player_event_channel() -> (PlayerEventSender, PlayerEventReceiver) {
    tokio::sync::mpsc::unbounded_channel()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::danmaku::{CommentKind, Rgb};

    #[test]
    fn test_default_state() {
        let state = SharedPlaybackState::new();
        assert_eq!(state.status(), CoreStatus::Idle);
        assert!(state.is_idle());
        assert!(!state.is_paused());
        assert!(state.danmaku_visible());
        assert!(!state.danmaku_loaded());
        assert_eq!(state.speed(), 1.0);
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let state = SharedPlaybackState::new();
        state.set_danmaku(vec![Comment::new("a", CommentKind::Scroll, 1.0, Rgb::WHITE)]);
        assert!(state.danmaku_loaded());

        let mut snapshot = state.danmaku_snapshot();
        snapshot[0].text.push('!');
        assert_eq!(state.danmaku_snapshot()[0].text, "a");

        state.clear_danmaku();
        assert!(!state.danmaku_loaded());
        assert!(state.danmaku_snapshot().is_empty());
    }

    #[test]
    fn test_active_is_not_idle() {
        let state = SharedPlaybackState::new();
        state.set_status(CoreStatus::Active);
        assert!(!state.is_idle());
        state.set_status(CoreStatus::Ended);
        assert!(state.is_idle());
    }
}
