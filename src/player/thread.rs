//! Player thread implementation
//!
//! Runs a headless playback timeline in a dedicated thread. Commands arrive
//! from `PlayerHandle`; a 20ms ticker advances the clock, finishes simulated
//! opening/seeking latency and publishes events through the `EventBus`.
//!
//! No decoding happens here. The timeline reproduces the event sequence a
//! media engine emits (start-file, loading, duration, progress, end-of-file),
//! which is all the video view consumes.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::Context;
use tokio::time::MissedTickBehavior;

use super::bus::EventBus;
use super::events::{
    CoreStatus, PlayerCommand, PlayerCommandReceiver, PlayerEvent, SeekTarget, SharedPlaybackState,
    player_command_channel,
};
use super::handle::PlayerHandle;
use super::load::LoadRequest;
use crate::danmaku::{Comment, parse_danmaku_xml};
use crate::utils::{Clock, MonotonicClock};

const TICK_INTERVAL: Duration = Duration::from_millis(20);

/// Time to "open" a file
const OPEN_LATENCY: f64 = 0.5;

/// Time to complete a seek
const SEEK_LATENCY: f64 = 0.15;

/// How often throughput is reported while loading
const CACHE_REPORT_INTERVAL: f64 = 0.25;

/// Nominal network throughput reported while loading
const SIMULATED_CACHE_SPEED: u64 = 2 * 1024 * 1024;

pub struct PlayerThreadHandle {
    pub handle: PlayerHandle,
    thread_handle: Option<JoinHandle<()>>,
}

impl PlayerThreadHandle {
    /// Stop the thread and wait up to `timeout` for it to exit
    pub fn join(mut self, timeout: Duration) -> anyhow::Result<()> {
        if let Some(handle) = self.thread_handle.take() {
            self.handle.shutdown();

            let start = std::time::Instant::now();
            loop {
                if handle.is_finished() {
                    let _ = handle.join();
                    return Ok(());
                }
                if start.elapsed() > timeout {
                    anyhow::bail!("Player thread did not exit in time");
                }
                thread::sleep(Duration::from_millis(10));
            }
        }
        Ok(())
    }
}

impl Drop for PlayerThreadHandle {
    fn drop(&mut self) {
        self.handle.shutdown();
    }
}

/// Spawn the player thread
///
/// The thread owns a current-thread tokio runtime that multiplexes the
/// command channel with the tick timer.
pub fn spawn_player_thread() -> anyhow::Result<PlayerThreadHandle> {
    let (command_tx, command_rx) = player_command_channel();
    let state = SharedPlaybackState::new();
    let bus = EventBus::new();

    let handle = PlayerHandle::new(command_tx, state.clone(), bus.clone());

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("Failed to build player runtime")?;

    let thread_handle = thread::Builder::new()
        .name("player-core".to_string())
        .spawn(move || {
            runtime.block_on(player_thread_main(command_rx, state, bus));
        })
        .context("Failed to spawn player thread")?;

    Ok(PlayerThreadHandle {
        handle,
        thread_handle: Some(thread_handle),
    })
}

async fn player_thread_main(
    mut command_rx: PlayerCommandReceiver,
    state: SharedPlaybackState,
    bus: Arc<EventBus>,
) {
    tracing::info!("Player thread started");

    let clock = MonotonicClock::new();
    let mut timeline = Timeline::new(state, bus);
    let mut ticker = tokio::time::interval(TICK_INTERVAL);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            command = command_rx.recv() => match command {
                Some(command) => {
                    if !timeline.handle_command(command, clock.now_secs()) {
                        break;
                    }
                }
                None => break,
            },
            _ = ticker.tick() => timeline.tick(clock.now_secs()),
        }
    }

    tracing::info!("Player thread exited");
}

/// Read and parse a danmaku XML file
fn read_danmaku_file(path: &Path) -> anyhow::Result<Vec<Comment>> {
    let file = File::open(path).with_context(|| format!("Cannot open {}", path.display()))?;
    let comments = parse_danmaku_xml(BufReader::new(file))?;
    Ok(comments)
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Idle,
    /// Waiting for the file to open (`opening`) or a seek to land
    Loading { ready_at: f64, opening: bool },
    Active,
    Ended,
}

/// Playback clock state machine driven by wall-clock seconds
struct Timeline {
    state: SharedPlaybackState,
    bus: Arc<EventBus>,
    phase: Phase,
    paused: bool,
    position: f64,
    duration: f64,
    speed: f64,
    /// Wall-clock time `position` was last advanced to
    anchor: f64,
    last_second: Option<i64>,
    last_cache_report: f64,
}

impl Timeline {
    fn new(state: SharedPlaybackState, bus: Arc<EventBus>) -> Self {
        Self {
            state,
            bus,
            phase: Phase::Idle,
            paused: false,
            position: 0.0,
            duration: 0.0,
            speed: 1.0,
            anchor: 0.0,
            last_second: None,
            last_cache_report: 0.0,
        }
    }

    /// Apply one command; `false` means shut down
    fn handle_command(&mut self, command: PlayerCommand, now: f64) -> bool {
        match command {
            PlayerCommand::Load(request) => self.load(request, now),
            PlayerCommand::LoadDanmaku { path } => self.load_danmaku(path),
            PlayerCommand::Resume => self.resume(now),
            PlayerCommand::Pause => self.pause(now),
            PlayerCommand::Stop => self.stop(),
            PlayerCommand::Seek(target) => self.seek(target, now),
            PlayerCommand::SetSpeed { speed } => self.set_speed(speed, now),
            PlayerCommand::SetFrameSize { width, height } => {
                tracing::debug!("Frame size: {}x{}", width, height);
                self.state.set_frame_size(width, height);
            }
            PlayerCommand::Shutdown => return false,
        }
        true
    }

    fn tick(&mut self, now: f64) {
        match self.phase {
            Phase::Loading { ready_at, opening } => {
                if now >= ready_at {
                    self.finish_loading(opening, now);
                } else if now - self.last_cache_report >= CACHE_REPORT_INTERVAL {
                    self.report_cache_speed(now);
                }
            }
            Phase::Active if !self.paused => {
                self.advance(now);
                if self.duration > 0.0 && self.position >= self.duration {
                    self.position = self.duration;
                    self.report_progress(true);
                    self.phase = Phase::Ended;
                    self.publish();
                    tracing::info!("End of file at {:.1}s", self.position);
                    self.emit(PlayerEvent::EndOfFile);
                } else {
                    self.report_progress(false);
                    self.publish();
                }
            }
            _ => {}
        }
    }

    fn load(&mut self, request: LoadRequest, now: f64) {
        self.state.clear_danmaku();
        self.phase = Phase::Loading {
            ready_at: now + OPEN_LATENCY,
            opening: true,
        };
        self.paused = false;
        self.position = request.start as f64;
        self.duration = request.duration_hint.unwrap_or(0.0);
        self.anchor = now;
        self.last_second = None;

        self.state.set_duration(0.0);
        self.publish();
        self.emit(PlayerEvent::StartFile);
        self.emit(PlayerEvent::LoadingStarted);
        self.report_cache_speed(now);
    }

    fn finish_loading(&mut self, opening: bool, now: f64) {
        self.phase = Phase::Active;
        self.anchor = now;
        self.publish();
        self.emit(PlayerEvent::LoadingEnded);
        if opening {
            self.state.set_duration(self.duration);
            self.emit(PlayerEvent::Loaded);
            self.emit(PlayerEvent::DurationChanged {
                duration: self.duration,
            });
            if !self.paused {
                self.emit(PlayerEvent::Resumed);
            }
        }
        self.report_progress(true);
    }

    fn load_danmaku(&mut self, path: PathBuf) {
        match read_danmaku_file(&path) {
            Ok(comments) => {
                let count = comments.len();
                tracing::info!("Loaded {} danmaku from {}", count, path.display());
                self.state.set_danmaku(comments);
                self.emit(PlayerEvent::DanmakuLoaded { count });
            }
            Err(e) => tracing::warn!("Failed to load danmaku: {:#}", e),
        }
    }

    fn resume(&mut self, now: f64) {
        if matches!(self.phase, Phase::Idle | Phase::Ended) || !self.paused {
            tracing::debug!("Resume ignored in {:?}", self.phase);
            return;
        }
        self.paused = false;
        self.anchor = now;
        self.publish();
        self.emit(PlayerEvent::Resumed);
    }

    fn pause(&mut self, now: f64) {
        if matches!(self.phase, Phase::Idle | Phase::Ended) || self.paused {
            tracing::debug!("Pause ignored in {:?}", self.phase);
            return;
        }
        self.advance(now);
        self.paused = true;
        self.publish();
        self.emit(PlayerEvent::Paused);
    }

    fn stop(&mut self) {
        self.phase = Phase::Idle;
        self.paused = false;
        self.position = 0.0;
        self.duration = 0.0;
        self.last_second = None;
        self.state.set_duration(0.0);
        self.publish();
        self.emit(PlayerEvent::Stopped);
    }

    fn seek(&mut self, target: SeekTarget, now: f64) {
        if self.phase == Phase::Idle {
            tracing::warn!("Seek ignored, nothing loaded");
            return;
        }
        self.advance(now);

        let position = match target {
            SeekTarget::Relative(offset) => self.position + offset,
            SeekTarget::Absolute(seconds) => seconds,
            SeekTarget::AbsolutePercent(percent) => {
                if self.duration <= 0.0 {
                    tracing::warn!("Percent seek ignored, duration unknown");
                    return;
                }
                self.duration * percent / 100.0
            }
        };
        if !position.is_finite() {
            return;
        }
        let position = if self.duration > 0.0 {
            position.clamp(0.0, self.duration)
        } else {
            position.max(0.0)
        };
        tracing::debug!("Seek {:.2}s -> {:.2}s", self.position, position);

        let opening = matches!(self.phase, Phase::Loading { opening: true, .. });
        self.position = position;
        self.phase = Phase::Loading {
            ready_at: now + SEEK_LATENCY,
            opening,
        };
        self.publish();
        self.emit(PlayerEvent::LoadingStarted);
    }

    fn set_speed(&mut self, speed: f64, now: f64) {
        if !speed.is_finite() || speed <= 0.0 {
            tracing::warn!("Invalid playback speed {}", speed);
            return;
        }
        self.advance(now);
        self.speed = speed;
        self.state.set_speed(speed);
    }

    /// Move `position` forward to wall-clock `now` if playing
    fn advance(&mut self, now: f64) {
        if self.phase == Phase::Active && !self.paused {
            self.position += (now - self.anchor).max(0.0) * self.speed;
        }
        self.anchor = now;
    }

    fn report_progress(&mut self, force: bool) {
        let second = self.position.floor() as i64;
        if force || self.last_second != Some(second) {
            self.last_second = Some(second);
            self.emit(PlayerEvent::ProgressChanged {
                playback_time: self.position,
                duration: self.duration,
            });
        }
    }

    fn report_cache_speed(&mut self, now: f64) {
        self.last_cache_report = now;
        self.emit(PlayerEvent::CacheSpeedChanged {
            bytes_per_sec: SIMULATED_CACHE_SPEED,
        });
    }

    fn publish(&self) {
        let status = match self.phase {
            Phase::Idle => CoreStatus::Idle,
            Phase::Loading { .. } => CoreStatus::Loading,
            Phase::Active => CoreStatus::Active,
            Phase::Ended => CoreStatus::Ended,
        };
        self.state.set_status(status);
        self.state.set_paused(self.paused);
        self.state.set_playback_time(self.position);
    }

    fn emit(&self, event: PlayerEvent) {
        self.bus.emit(event);
    }
}
