//! Video view state
//!
//! One `VideoView` exists per on-screen player surface (the windowed page
//! and, while active, the fullscreen surface). It owns the OSD labels and
//! timer, the danmaku scheduler for its surface, and the event subscription
//! to the player core. Player events are applied through `handle_event`,
//! after the app has marshaled them onto the UI thread.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, info, warn};

use super::gesture::{GestureInput, SpeedChange, SpeedGesture};
use super::osd::OsdTimer;
use crate::danmaku::{DanmakuScheduler, Viewport};
use crate::features::settings::PlayerSettings;
use crate::player::{
    EventSubscription, PlayerCore, PlayerEvent, PlayerEventReceiver, SeekTarget, SubscriptionId,
};
use crate::utils::{Clock, format_speed, format_time, progress_fraction};

pub type SharedCore = Arc<dyn PlayerCore>;
pub type SharedClock = Arc<dyn Clock>;

static NEXT_VIEW_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a video view within the view stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewId(u64);

impl ViewId {
    fn next() -> Self {
        Self(NEXT_VIEW_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl std::fmt::Display for ViewId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "view-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackIcon {
    #[default]
    Playing,
    Paused,
}

/// Receiving end of a view's subscription, forwarded by the app
#[derive(Debug)]
pub struct EventStream {
    pub id: SubscriptionId,
    pub receiver: PlayerEventReceiver,
}

/// Something the view asks its owner to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewEffect {
    EnterFullscreen,
    ExitFullscreen,
    /// Playback stopped, remove the view
    Close,
}

/// Behaviour switches taken from the player settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewOptions {
    pub allow_fullscreen: bool,
    pub close_on_eof: bool,
    pub seek_step: f64,
    pub osd_show_secs: f64,
    pub speed_boost: f64,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self::from(&PlayerSettings::default())
    }
}

impl From<&PlayerSettings> for ViewOptions {
    fn from(settings: &PlayerSettings) -> Self {
        Self {
            allow_fullscreen: settings.allow_fullscreen,
            close_on_eof: settings.close_on_end_of_file,
            seek_step: settings.seek_step_secs as f64,
            osd_show_secs: settings.osd_show_secs,
            speed_boost: settings.speed_boost,
        }
    }
}

/// State carried between the windowed and fullscreen surfaces
#[derive(Debug, Clone, PartialEq)]
pub struct ViewSnapshot {
    pub title: String,
    pub online_count: Option<u64>,
    pub duration: f64,
    pub duration_label: String,
    pub elapsed_label: String,
    pub progress: f32,
    pub osd: OsdTimer,
    pub icon: PlaybackIcon,
    pub loading: bool,
    pub cache_label: Option<String>,
}

pub struct VideoView {
    id: ViewId,
    core: SharedCore,
    clock: SharedClock,
    options: ViewOptions,
    fullscreen: bool,

    title: String,
    online_count: Option<u64>,
    duration: f64,
    duration_label: String,
    elapsed_label: String,
    progress: f32,
    osd: OsdTimer,
    icon: PlaybackIcon,
    danmaku_on: bool,
    loading: bool,
    cache_label: Option<String>,

    /// Slider fraction while the user is dragging
    preview: Option<f32>,
    gesture: SpeedGesture,
    frame_size: Option<(u32, u32)>,
    scheduler: DanmakuScheduler,
    subscription: Option<EventSubscription>,
}

impl std::fmt::Debug for VideoView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoView")
            .field("id", &self.id)
            .field("fullscreen", &self.fullscreen)
            .field("title", &self.title)
            .field("subscription", &self.subscription_id())
            .field("scheduler", &self.scheduler)
            .finish_non_exhaustive()
    }
}

impl VideoView {
    pub fn new(
        core: SharedCore,
        clock: SharedClock,
        options: ViewOptions,
        scheduler: DanmakuScheduler,
    ) -> Self {
        let mut view = Self {
            id: ViewId::next(),
            core,
            clock,
            options,
            fullscreen: false,
            title: String::new(),
            online_count: None,
            duration: 0.0,
            duration_label: format_time(0.0),
            elapsed_label: format_time(0.0),
            progress: 0.0,
            osd: OsdTimer::hidden(),
            icon: PlaybackIcon::Playing,
            danmaku_on: true,
            loading: false,
            cache_label: None,
            preview: None,
            gesture: SpeedGesture::Idle,
            frame_size: None,
            scheduler,
            subscription: None,
        };
        view.refresh_icons();
        view
    }

    /// Fresh full-viewport surface sharing this view's core and settings
    pub fn spawn_fullscreen(&self) -> Self {
        let mut view = Self::new(
            self.core.clone(),
            self.clock.clone(),
            self.options,
            self.scheduler.fork(),
        );
        view.fullscreen = true;
        view
    }

    pub fn id(&self) -> ViewId {
        self.id
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn allows_fullscreen(&self) -> bool {
        self.options.allow_fullscreen
    }

    pub fn core(&self) -> &SharedCore {
        &self.core
    }

    // ============ Subscription ============

    /// Subscribe to player events; `None` if already subscribed
    pub fn subscribe(&mut self) -> Option<EventStream> {
        if let Some(existing) = &self.subscription {
            warn!("{} already subscribed as {}, ignoring", self.id, existing.id());
            return None;
        }

        let mut subscription = self.core.subscribe();
        let receiver = subscription.take_receiver()?;
        let id = subscription.id();
        debug!("{} subscribed as {}", self.id, id);
        self.subscription = Some(subscription);
        Some(EventStream { id, receiver })
    }

    /// Release the subscription; a no-op when not subscribed
    pub fn unsubscribe(&mut self) {
        match self.subscription.take() {
            Some(mut subscription) => {
                debug!("{} unsubscribed {}", self.id, subscription.id());
                subscription.release();
            }
            None => debug!("{} not subscribed, nothing to release", self.id),
        }
    }

    pub fn subscription_id(&self) -> Option<SubscriptionId> {
        self.subscription.as_ref().map(EventSubscription::id)
    }

    // ============ Player events ============

    /// Apply one player event to the view
    pub fn handle_event(&mut self, event: PlayerEvent) -> Option<ViewEffect> {
        match event {
            PlayerEvent::Resumed => {
                self.show_osd(true);
                self.set_loading(false);
                self.icon = PlaybackIcon::Playing;
            }
            PlayerEvent::Paused => {
                self.show_osd(false);
                self.icon = PlaybackIcon::Paused;
            }
            PlayerEvent::StartFile => {
                self.show_osd(false);
                self.set_duration(0.0);
                self.set_playback_time(0.0);
                self.set_progress(0.0);
            }
            PlayerEvent::LoadingStarted => self.set_loading(true),
            PlayerEvent::LoadingEnded => {
                self.set_loading(false);
                self.scheduler.reset();
            }
            PlayerEvent::Stopped => {
                self.set_loading(false);
                self.show_osd(false);
            }
            PlayerEvent::Loaded => debug!("{} media loaded", self.id),
            PlayerEvent::DurationChanged { duration } => self.set_duration(duration),
            PlayerEvent::ProgressChanged {
                playback_time,
                duration,
            } => {
                // The slider owns the labels while dragging
                if self.preview.is_none() {
                    self.set_playback_time(playback_time);
                    self.set_progress(progress_fraction(playback_time, duration));
                }
            }
            PlayerEvent::DanmakuLoaded { count } => {
                debug!("{} taking {} comments", self.id, count);
                self.scheduler.set_comments(self.core.danmaku_snapshot());
            }
            PlayerEvent::EndOfFile => {
                self.show_osd(false);
                if self.options.close_on_eof && self.fullscreen {
                    return Some(ViewEffect::ExitFullscreen);
                }
            }
            PlayerEvent::CacheSpeedChanged { bytes_per_sec } => {
                if self.loading {
                    self.cache_label = Some(format_speed(bytes_per_sec));
                }
            }
        }
        None
    }

    // ============ Exposed to the UI ============

    pub fn set_progress(&mut self, progress: f32) {
        self.progress = progress.clamp(0.0, 1.0);
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn set_duration(&mut self, duration: f64) {
        self.duration = duration.max(0.0);
        self.duration_label = format_time(duration);
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn set_playback_time(&mut self, seconds: f64) {
        self.elapsed_label = format_time(seconds);
    }

    /// Show the OSD, temporarily or pinned until `hide_osd`
    pub fn show_osd(&mut self, temporary: bool) {
        if temporary {
            self.osd.show_for(self.clock.now_secs(), self.options.osd_show_secs);
        } else {
            self.osd.pin();
        }
    }

    pub fn hide_osd(&mut self) {
        self.osd.hide();
    }

    pub fn toggle_osd(&mut self) {
        self.osd
            .toggle(self.clock.now_secs(), self.options.osd_show_secs);
    }

    pub fn osd_visible(&self) -> bool {
        self.osd.is_visible(self.clock.now_secs())
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_online_count(&mut self, count: Option<u64>) {
        self.online_count = count;
    }

    pub fn online_count(&self) -> Option<u64> {
        self.online_count
    }

    pub fn elapsed_label(&self) -> &str {
        &self.elapsed_label
    }

    pub fn duration_label(&self) -> &str {
        &self.duration_label
    }

    pub fn icon(&self) -> PlaybackIcon {
        self.icon
    }

    pub fn danmaku_on(&self) -> bool {
        self.danmaku_on
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn cache_label(&self) -> Option<&str> {
        self.cache_label.as_deref()
    }

    pub fn speed_boosted(&self) -> bool {
        self.gesture.is_boosted()
    }

    pub fn speed_boost(&self) -> f64 {
        self.options.speed_boost
    }

    pub fn scheduler(&self) -> &DanmakuScheduler {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut DanmakuScheduler {
        &mut self.scheduler
    }

    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
        if !loading {
            self.cache_label = None;
        }
    }

    /// Re-read play/pause and danmaku state from the core
    pub fn refresh_icons(&mut self) {
        self.icon = if self.core.is_paused() {
            PlaybackIcon::Paused
        } else {
            PlaybackIcon::Playing
        };
        self.danmaku_on = self.core.danmaku_visible();
    }

    /// Restart danmaku from the current playback time
    pub fn reset_danmaku(&mut self) {
        self.scheduler.reset();
    }

    // ============ Fullscreen state transfer ============

    pub fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            title: self.title.clone(),
            online_count: self.online_count,
            duration: self.duration,
            duration_label: self.duration_label.clone(),
            elapsed_label: self.elapsed_label.clone(),
            progress: self.progress,
            osd: self.osd,
            icon: self.icon,
            loading: self.loading,
            cache_label: self.cache_label.clone(),
        }
    }

    pub fn apply_snapshot(&mut self, snapshot: ViewSnapshot) {
        self.title = snapshot.title;
        self.online_count = snapshot.online_count;
        self.duration = snapshot.duration;
        self.duration_label = snapshot.duration_label;
        self.elapsed_label = snapshot.elapsed_label;
        self.progress = snapshot.progress;
        self.osd = snapshot.osd;
        self.icon = snapshot.icon;
        self.loading = snapshot.loading;
        self.cache_label = snapshot.cache_label;
    }

    // ============ Rendering and layout ============

    /// Advance the danmaku schedule for one frame
    pub fn render_frame(&mut self, viewport: Viewport) {
        if !self.danmaku_on {
            return;
        }
        let now = self.clock.now_micros();
        self.scheduler.frame(self.core.as_ref(), viewport, now);
    }

    /// Report the surface size to the core when it changes
    pub fn on_layout(&mut self, width: u32, height: u32) {
        if self.frame_size == Some((width, height)) {
            return;
        }
        info!("{} frame size {}x{}", self.id, width, height);
        self.frame_size = Some((width, height));
        self.core.set_frame_size(width, height);
    }

    /// Re-send the last known surface size
    pub fn send_frame_size(&self) {
        if let Some((width, height)) = self.frame_size {
            self.core.set_frame_size(width, height);
        }
    }

    // ============ Actions ============

    pub fn toggle_playback(&mut self) {
        self.core.toggle_pause();
        self.show_osd(true);
    }

    pub fn seek_forward(&mut self) {
        self.core.seek(SeekTarget::Relative(self.options.seek_step));
        self.show_osd(true);
    }

    pub fn seek_backward(&mut self) {
        self.core.seek(SeekTarget::Relative(-self.options.seek_step));
        self.show_osd(true);
    }

    pub fn toggle_danmaku(&mut self) {
        let visible = !self.core.danmaku_visible();
        self.core.set_danmaku_visible(visible);
        if !visible {
            self.scheduler.reset();
        }
        self.refresh_icons();
        debug!("{} danmaku {}", self.id, if visible { "on" } else { "off" });
    }

    /// Confirm: enter fullscreen from the window, toggle play inside it
    pub fn primary(&mut self) -> Option<ViewEffect> {
        if !self.fullscreen && self.options.allow_fullscreen {
            return Some(ViewEffect::EnterFullscreen);
        }
        self.toggle_playback();
        None
    }

    /// Back: leave fullscreen, or stop and close the windowed view
    pub fn cancel(&mut self) -> Option<ViewEffect> {
        if self.fullscreen {
            Some(ViewEffect::ExitFullscreen)
        } else {
            self.core.stop();
            Some(ViewEffect::Close)
        }
    }

    /// Slider drag: pin the OSD and preview the target time
    pub fn preview_seek(&mut self, fraction: f32) {
        let fraction = fraction.clamp(0.0, 1.0);
        self.preview = Some(fraction);
        self.show_osd(false);
        self.set_progress(fraction);
        self.set_playback_time(self.duration * fraction as f64);
    }

    /// Slider release: seek to the previewed fraction
    pub fn commit_seek(&mut self) {
        if let Some(fraction) = self.preview.take() {
            self.show_osd(true);
            self.core
                .seek(SeekTarget::AbsolutePercent(fraction as f64 * 100.0));
        }
    }

    pub fn is_previewing(&self) -> bool {
        self.preview.is_some()
    }

    pub fn speed_press(&mut self) {
        self.apply_gesture(GestureInput::Press);
    }

    pub fn speed_release(&mut self) {
        self.apply_gesture(GestureInput::Release);
    }

    fn apply_gesture(&mut self, input: GestureInput) {
        let (next, change) = self.gesture.transition(input, self.clock.now_micros());
        self.gesture = next;
        match change {
            Some(SpeedChange::Boost) => self.core.set_speed(self.options.speed_boost),
            Some(SpeedChange::Normal) => self.core.set_speed(1.0),
            None => {}
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::danmaku::{Comment, CommentKind, Rgb};
    use crate::player::PlayerCommand;
    use crate::player::testing::FakeCore;
    use crate::utils::ManualClock;

    pub(crate) fn view_with(core: &Arc<FakeCore>, clock: &Arc<ManualClock>) -> VideoView {
        VideoView::new(
            core.clone(),
            clock.clone(),
            ViewOptions::default(),
            DanmakuScheduler::default(),
        )
    }

    fn setup() -> (Arc<FakeCore>, Arc<ManualClock>, VideoView) {
        let core = Arc::new(FakeCore::new());
        let clock = Arc::new(ManualClock::at_secs(100.0));
        let view = view_with(&core, &clock);
        (core, clock, view)
    }

    #[test]
    fn test_progress_round_trip() {
        let (_, _, mut view) = setup();
        view.set_progress(0.37);
        assert_eq!(view.progress(), 0.37);
        view.set_progress(0.0);
        assert_eq!(view.progress(), 0.0);
    }

    #[test]
    fn test_resume_and_pause() {
        let (_, clock, mut view) = setup();
        view.handle_event(PlayerEvent::LoadingStarted);
        view.handle_event(PlayerEvent::CacheSpeedChanged {
            bytes_per_sec: 2048,
        });
        assert_eq!(view.cache_label(), Some("2KB/s"));

        view.handle_event(PlayerEvent::Resumed);
        assert!(!view.is_loading());
        assert_eq!(view.cache_label(), None);
        assert_eq!(view.icon(), PlaybackIcon::Playing);
        assert!(view.osd_visible());
        clock.advance_secs(5.0);
        assert!(!view.osd_visible());

        view.handle_event(PlayerEvent::Paused);
        assert_eq!(view.icon(), PlaybackIcon::Paused);
        clock.advance_secs(3600.0);
        assert!(view.osd_visible());
    }

    #[test]
    fn test_cache_speed_ignored_when_not_loading() {
        let (_, _, mut view) = setup();
        view.handle_event(PlayerEvent::CacheSpeedChanged { bytes_per_sec: 10 });
        assert_eq!(view.cache_label(), None);
    }

    #[test]
    fn test_start_file_resets_labels() {
        let (_, _, mut view) = setup();
        view.set_duration(120.0);
        view.handle_event(PlayerEvent::ProgressChanged {
            playback_time: 30.0,
            duration: 120.0,
        });
        assert_eq!(view.elapsed_label(), "00:30");
        assert_eq!(view.progress(), 0.25);

        view.handle_event(PlayerEvent::StartFile);
        assert_eq!(view.elapsed_label(), "00:00");
        assert_eq!(view.duration_label(), "00:00");
        assert_eq!(view.progress(), 0.0);
        assert!(view.osd.is_pinned());
    }

    #[test]
    fn test_loading_end_resets_danmaku() {
        let (core, _, mut view) = setup();
        core.set_comments(vec![Comment::new("a", CommentKind::Scroll, 0.0, Rgb::WHITE)]);
        core.set_time(0.5);
        view.handle_event(PlayerEvent::DanmakuLoaded { count: 1 });
        assert_eq!(view.scheduler().comments().len(), 1);

        view.render_frame(Viewport::new(1000.0, 1000.0));
        assert_eq!(view.scheduler().placements().len(), 1);

        view.handle_event(PlayerEvent::LoadingStarted);
        view.handle_event(PlayerEvent::LoadingEnded);
        assert!(view.scheduler().comments().is_empty());
        assert_eq!(view.scheduler().cursor(), 0);
    }

    #[test]
    fn test_eof_exits_only_fullscreen() {
        let (_, _, mut view) = setup();
        assert_eq!(view.handle_event(PlayerEvent::EndOfFile), None);
        assert!(view.osd.is_pinned());

        let mut full = view.spawn_fullscreen();
        assert_eq!(
            full.handle_event(PlayerEvent::EndOfFile),
            Some(ViewEffect::ExitFullscreen)
        );
    }

    #[test]
    fn test_double_subscribe_ignored() {
        let (core, _, mut view) = setup();
        assert!(view.subscribe().is_some());
        assert!(view.subscribe().is_none());
        assert_eq!(core.subscriber_count(), 1);

        view.unsubscribe();
        view.unsubscribe();
        assert_eq!(core.subscriber_count(), 0);
    }

    #[test]
    fn test_drop_releases_subscription() {
        let (core, _, mut view) = setup();
        let _stream = view.subscribe();
        drop(view);
        assert_eq!(core.subscriber_count(), 0);
    }

    #[test]
    fn test_slider_preview_and_commit() {
        let (core, _, mut view) = setup();
        view.set_duration(200.0);
        view.preview_seek(0.5);
        assert_eq!(view.elapsed_label(), "01:40");
        assert!(view.osd.is_pinned());

        // Progress updates do not fight the drag
        view.handle_event(PlayerEvent::ProgressChanged {
            playback_time: 10.0,
            duration: 200.0,
        });
        assert_eq!(view.elapsed_label(), "01:40");
        assert_eq!(view.progress(), 0.5);

        view.commit_seek();
        assert!(!view.is_previewing());
        assert!(!view.osd.is_pinned());
        assert_eq!(
            core.take_commands(),
            [PlayerCommand::Seek(SeekTarget::AbsolutePercent(50.0))]
        );

        view.commit_seek();
        assert!(core.take_commands().is_empty());
    }

    #[test]
    fn test_seek_steps() {
        let (core, _, mut view) = setup();
        view.seek_forward();
        view.seek_backward();
        assert_eq!(
            core.take_commands(),
            [
                PlayerCommand::Seek(SeekTarget::Relative(10.0)),
                PlayerCommand::Seek(SeekTarget::Relative(-10.0)),
            ]
        );
        assert!(view.osd_visible());
    }

    #[test]
    fn test_primary_and_cancel() {
        let (core, _, mut view) = setup();
        assert_eq!(view.primary(), Some(ViewEffect::EnterFullscreen));
        assert!(core.take_commands().is_empty());

        let mut full = view.spawn_fullscreen();
        assert_eq!(full.primary(), None);
        assert_eq!(core.take_commands(), [PlayerCommand::Pause]);
        assert!(full.osd_visible());
        assert_eq!(full.cancel(), Some(ViewEffect::ExitFullscreen));

        assert_eq!(view.cancel(), Some(ViewEffect::Close));
        assert_eq!(core.take_commands(), [PlayerCommand::Stop]);
    }

    #[test]
    fn test_primary_without_fullscreen_toggles_playback() {
        let core = Arc::new(FakeCore::new());
        let clock = Arc::new(ManualClock::at_secs(0.0));
        let options = ViewOptions {
            allow_fullscreen: false,
            ..Default::default()
        };
        let mut view = VideoView::new(core.clone(), clock, options, DanmakuScheduler::default());
        assert_eq!(view.primary(), None);
        assert_eq!(core.take_commands(), [PlayerCommand::Pause]);
    }

    #[test]
    fn test_toggle_danmaku() {
        let (core, _, mut view) = setup();
        assert!(view.danmaku_on());
        view.toggle_danmaku();
        assert!(!view.danmaku_on());
        assert!(!core.danmaku_visible());
        view.toggle_danmaku();
        assert!(view.danmaku_on());
    }

    #[test]
    fn test_hidden_danmaku_not_scheduled() {
        let (core, _, mut view) = setup();
        core.set_comments(vec![Comment::new("a", CommentKind::Top, 0.0, Rgb::WHITE)]);
        view.toggle_danmaku();
        view.render_frame(Viewport::new(1000.0, 1000.0));
        assert!(view.scheduler().comments().is_empty());
    }

    #[test]
    fn test_layout_sends_frame_size_once() {
        let (core, _, mut view) = setup();
        view.on_layout(1920, 1080);
        view.on_layout(1920, 1080);
        view.on_layout(1280, 720);
        assert_eq!(
            core.take_commands(),
            [
                PlayerCommand::SetFrameSize {
                    width: 1920,
                    height: 1080
                },
                PlayerCommand::SetFrameSize {
                    width: 1280,
                    height: 720
                },
            ]
        );
    }

    #[test]
    fn test_speed_gesture_drives_core() {
        let (core, clock, mut view) = setup();
        view.speed_press();
        assert!(view.speed_boosted());
        clock.advance_secs(1.0);
        view.speed_release();
        assert!(!view.speed_boosted());
        assert_eq!(
            core.take_commands(),
            [
                PlayerCommand::SetSpeed { speed: 2.0 },
                PlayerCommand::SetSpeed { speed: 1.0 },
            ]
        );

        // Double press locks the boost
        view.speed_press();
        clock.advance_secs(0.05);
        view.speed_release();
        clock.advance_secs(0.05);
        view.speed_press();
        clock.advance_secs(0.05);
        view.speed_release();
        assert!(view.speed_boosted());
        assert_eq!(
            core.take_commands().last(),
            Some(&PlayerCommand::SetSpeed { speed: 2.0 })
        );
    }

    #[test]
    fn test_snapshot_transfer() {
        let (_, _, mut view) = setup();
        view.set_title("Episode 1");
        view.set_online_count(Some(321));
        view.set_duration(90.0);
        view.set_playback_time(45.0);
        view.set_progress(0.5);
        view.handle_event(PlayerEvent::LoadingStarted);
        view.show_osd(false);

        let mut other = view.spawn_fullscreen();
        other.apply_snapshot(view.snapshot());
        assert_eq!(other.snapshot(), view.snapshot());
        assert_eq!(other.title(), "Episode 1");
        assert_eq!(other.elapsed_label(), "00:45");
        assert!(other.is_loading());
        assert!(other.osd.is_pinned());
    }
}
