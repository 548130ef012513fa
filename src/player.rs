//! Player core
//!
//! The video view only talks to the player through two traits:
//! - `PlaybackClock`: playback time, duration and pause/idle state
//! - `PlayerCore`: the clock plus the danmaku buffer, event subscription and
//!   fire-and-forget commands
//!
//! `PlayerHandle` implements both on top of a dedicated player thread
//! (`thread`), which publishes `PlayerEvent`s through an `EventBus`.

pub mod bus;
pub mod events;
mod handle;
pub mod load;
pub mod thread;

use std::path::PathBuf;

pub use bus::{EventBus, EventSubscription, SubscriptionId};
pub use events::{PlayerCommand, PlayerEvent, PlayerEventReceiver, SeekTarget, SharedPlaybackState};
pub use handle::PlayerHandle;
pub use load::{EdlSegment, LoadRequest};
pub use thread::{PlayerThreadHandle, spawn_player_thread};

use crate::danmaku::Comment;

/// Read side of the playback clock
pub trait PlaybackClock {
    /// Current position in seconds
    fn playback_time(&self) -> f64;
    /// Total length in seconds, 0 when unknown
    fn duration(&self) -> f64;
    fn is_paused(&self) -> bool;
    /// Not advancing: loading, buffering, ended or nothing loaded
    fn is_idle(&self) -> bool;
    /// Playback rate, 1.0 is normal
    fn playback_rate(&self) -> f64;
}

/// Everything the video view needs from the player
pub trait PlayerCore: PlaybackClock + Send + Sync {
    fn danmaku_loaded(&self) -> bool;
    /// Copy of the loaded comments, ascending by time
    fn danmaku_snapshot(&self) -> Vec<Comment>;
    fn danmaku_visible(&self) -> bool;
    fn set_danmaku_visible(&self, visible: bool);

    fn subscribe(&self) -> EventSubscription;

    fn load_media(&self, request: LoadRequest);
    fn load_danmaku(&self, path: PathBuf);
    fn resume(&self);
    fn pause(&self);
    fn stop(&self);
    fn seek(&self, target: SeekTarget);
    fn set_speed(&self, speed: f64);
    fn set_frame_size(&self, width: u32, height: u32);

    fn toggle_pause(&self) {
        if self.is_paused() {
            self.resume();
        } else {
            self.pause();
        }
    }
}

/// In-memory core for tests
#[cfg(test)]
pub mod testing {
    use std::path::PathBuf;
    use std::sync::Arc;

    use parking_lot::Mutex;

    use super::*;

    #[derive(Debug, Default)]
    struct FakeState {
        playback_time: f64,
        duration: f64,
        paused: bool,
        idle: bool,
        speed: Option<f64>,
        comments: Option<Vec<Comment>>,
        danmaku_hidden: bool,
        commands: Vec<PlayerCommand>,
    }

    /// Records commands and lets tests drive time, state and events
    #[derive(Debug)]
    pub struct FakeCore {
        state: Mutex<FakeState>,
        bus: Arc<EventBus>,
    }

    impl FakeCore {
        pub fn new() -> Self {
            Self {
                state: Mutex::new(FakeState::default()),
                bus: EventBus::new(),
            }
        }

        pub fn set_time(&self, seconds: f64) {
            self.state.lock().playback_time = seconds;
        }

        pub fn set_duration(&self, seconds: f64) {
            self.state.lock().duration = seconds;
        }

        pub fn set_paused(&self, paused: bool) {
            self.state.lock().paused = paused;
        }

        pub fn set_comments(&self, comments: Vec<Comment>) {
            self.state.lock().comments = Some(comments);
        }

        pub fn emit(&self, event: PlayerEvent) {
            self.bus.emit(event);
        }

        pub fn subscriber_count(&self) -> usize {
            self.bus.subscriber_count()
        }

        /// Commands received so far, clearing the log
        pub fn take_commands(&self) -> Vec<PlayerCommand> {
            std::mem::take(&mut self.state.lock().commands)
        }

        fn record(&self, command: PlayerCommand) {
            self.state.lock().commands.push(command);
        }
    }

    impl PlaybackClock for FakeCore {
        fn playback_time(&self) -> f64 {
            self.state.lock().playback_time
        }

        fn duration(&self) -> f64 {
            self.state.lock().duration
        }

        fn is_paused(&self) -> bool {
            self.state.lock().paused
        }

        fn is_idle(&self) -> bool {
            self.state.lock().idle
        }

        fn playback_rate(&self) -> f64 {
            self.state.lock().speed.unwrap_or(1.0)
        }
    }

    impl PlayerCore for FakeCore {
        fn danmaku_loaded(&self) -> bool {
            self.state.lock().comments.is_some()
        }

        fn danmaku_snapshot(&self) -> Vec<Comment> {
            self.state.lock().comments.clone().unwrap_or_default()
        }

        fn danmaku_visible(&self) -> bool {
            !self.state.lock().danmaku_hidden
        }

        fn set_danmaku_visible(&self, visible: bool) {
            self.state.lock().danmaku_hidden = !visible;
        }

        fn subscribe(&self) -> EventSubscription {
            self.bus.subscribe()
        }

        fn load_media(&self, request: LoadRequest) {
            self.record(PlayerCommand::Load(request));
        }

        fn load_danmaku(&self, path: PathBuf) {
            self.record(PlayerCommand::LoadDanmaku { path });
        }

        fn resume(&self) {
            self.state.lock().paused = false;
            self.record(PlayerCommand::Resume);
        }

        fn pause(&self) {
            self.state.lock().paused = true;
            self.record(PlayerCommand::Pause);
        }

        fn stop(&self) {
            self.record(PlayerCommand::Stop);
        }

        fn seek(&self, target: SeekTarget) {
            self.record(PlayerCommand::Seek(target));
        }

        fn set_speed(&self, speed: f64) {
            self.state.lock().speed = Some(speed);
            self.record(PlayerCommand::SetSpeed { speed });
        }

        fn set_frame_size(&self, width: u32, height: u32) {
            self.record(PlayerCommand::SetFrameSize { width, height });
        }
    }
}
