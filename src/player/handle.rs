//! Player handle for non-blocking control from the UI thread
//!
//! `PlayerHandle` sends commands to the player thread and returns
//! immediately. State is read from `SharedPlaybackState` without blocking.

use std::path::PathBuf;
use std::sync::Arc;

use super::bus::{EventBus, EventSubscription};
use super::events::{PlayerCommand, PlayerCommandSender, SeekTarget, SharedPlaybackState};
use super::load::LoadRequest;
use super::{PlaybackClock, PlayerCore};
use crate::danmaku::Comment;

/// Handle for controlling the player from the UI thread
#[derive(Clone)]
pub struct PlayerHandle {
    command_tx: PlayerCommandSender,
    state: SharedPlaybackState,
    bus: Arc<EventBus>,
}

impl std::fmt::Debug for PlayerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerHandle")
            .field("state", &self.state)
            .field("bus", &self.bus)
            .finish()
    }
}

impl PlayerHandle {
    pub fn new(command_tx: PlayerCommandSender, state: SharedPlaybackState, bus: Arc<EventBus>) -> Self {
        Self {
            command_tx,
            state,
            bus,
        }
    }

    fn send(&self, command: PlayerCommand) {
        if self.command_tx.send(command).is_err() {
            tracing::warn!("Player thread is gone, command dropped");
        }
    }

    /// Ask the player thread to exit
    pub fn shutdown(&self) {
        let _ = self.command_tx.send(PlayerCommand::Shutdown);
    }

    pub fn state(&self) -> &SharedPlaybackState {
        &self.state
    }
}

impl PlaybackClock for PlayerHandle {
    fn playback_time(&self) -> f64 {
        self.state.playback_time()
    }

    fn duration(&self) -> f64 {
        self.state.duration()
    }

    fn is_paused(&self) -> bool {
        self.state.is_paused()
    }

    fn is_idle(&self) -> bool {
        self.state.is_idle()
    }

    fn playback_rate(&self) -> f64 {
        self.state.speed()
    }
}

impl PlayerCore for PlayerHandle {
    fn danmaku_loaded(&self) -> bool {
        self.state.danmaku_loaded()
    }

    fn danmaku_snapshot(&self) -> Vec<Comment> {
        self.state.danmaku_snapshot()
    }

    fn danmaku_visible(&self) -> bool {
        self.state.danmaku_visible()
    }

    fn set_danmaku_visible(&self, visible: bool) {
        self.state.set_danmaku_visible(visible);
    }

    fn subscribe(&self) -> EventSubscription {
        self.bus.subscribe()
    }

    fn load_media(&self, request: LoadRequest) {
        tracing::info!("Loading media: {} [{}]", request.url, request.options());
        self.send(PlayerCommand::Load(request));
    }

    fn load_danmaku(&self, path: PathBuf) {
        self.send(PlayerCommand::LoadDanmaku { path });
    }

    fn resume(&self) {
        self.send(PlayerCommand::Resume);
    }

    fn pause(&self) {
        self.send(PlayerCommand::Pause);
    }

    fn stop(&self) {
        self.send(PlayerCommand::Stop);
    }

    fn seek(&self, target: SeekTarget) {
        self.send(PlayerCommand::Seek(target));
    }

    fn set_speed(&self, speed: f64) {
        self.send(PlayerCommand::SetSpeed { speed });
    }

    fn set_frame_size(&self, width: u32, height: u32) {
        self.send(PlayerCommand::SetFrameSize { width, height });
    }
}
