//! Per-frame danmaku scheduling
//!
//! The scheduler owns a private copy of the loaded comments and walks them
//! from a cursor every frame:
//!
//! 1. Pending comments whose time has come are measured and given a lane
//! 2. Showing comments get a fresh position, or are hidden once off screen
//! 3. The cursor moves past the leading run of hidden/dropped comments
//!
//! Scrolling comments move by a motion clock rather than by playback time so
//! motion stays smooth between coarse playback-time updates. The motion clock
//! advances by wall-clock frame time scaled by the playback rate, and only
//! between two frames that were both playing. A paused comment keeps its x
//! and continues from the same spot on resume.

use std::sync::Arc;

use super::lanes::LaneTable;
use super::measure::{EstimatedMeasure, TextMeasure};
use super::types::{Comment, CommentState};
use super::{DanmakuConfig, MAX_LINES};
use crate::player::PlayerCore;
use crate::utils::MICROS_PER_SEC;

/// Late admissions further behind than this start partway across the screen
const CATCH_UP_THRESHOLD: f64 = 0.2;

/// Size of the area comments are drawn into
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Where a showing comment is drawn this frame, relative to the viewport origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Index into the scheduler's comment buffer
    pub index: usize,
    pub x: f32,
    pub y: f32,
}

pub struct DanmakuScheduler {
    config: DanmakuConfig,
    measure: Arc<dyn TextMeasure>,
    comments: Vec<Comment>,
    lanes: LaneTable,
    /// First comment not known to be resolved
    cursor: usize,
    placements: Vec<Placement>,
    /// Rate-scaled playing time in µs, the time base of `Comment::start_time`
    motion_clock: i64,
    /// Wall-clock time of the previous frame
    last_frame: Option<i64>,
    /// Core was paused or idle on the previous frame
    was_idle: bool,
}

impl std::fmt::Debug for DanmakuScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DanmakuScheduler")
            .field("config", &self.config)
            .field("comments", &self.comments.len())
            .field("cursor", &self.cursor)
            .field("showing", &self.placements.len())
            .finish_non_exhaustive()
    }
}

impl Default for DanmakuScheduler {
    fn default() -> Self {
        Self::new(DanmakuConfig::default(), Arc::new(EstimatedMeasure))
    }
}

impl DanmakuScheduler {
    pub fn new(config: DanmakuConfig, measure: Arc<dyn TextMeasure>) -> Self {
        Self {
            lanes: LaneTable::new(MAX_LINES, config.scroll_seconds, config.fixed_seconds),
            config,
            measure,
            comments: Vec::new(),
            cursor: 0,
            placements: Vec::new(),
            motion_clock: 0,
            last_frame: None,
            was_idle: false,
        }
    }

    pub fn config(&self) -> &DanmakuConfig {
        &self.config
    }

    /// Replace geometry/timing; the schedule restarts from the current time
    pub fn set_config(&mut self, config: DanmakuConfig) {
        if self.config != config {
            self.config = config;
            self.lanes = LaneTable::new(MAX_LINES, config.scroll_seconds, config.fixed_seconds);
            self.reset();
        }
    }

    /// Empty scheduler with the same configuration and measurement
    pub fn fork(&self) -> Self {
        Self::new(self.config, self.measure.clone())
    }

    /// Switch text measurement, e.g. once the font system is loaded
    pub fn set_measure(&mut self, measure: Arc<dyn TextMeasure>) {
        self.measure = measure;
    }

    /// Drop the buffer and all lane claims
    ///
    /// The next frame takes a fresh snapshot from the core and re-admits
    /// whatever is due at the current playback time.
    pub fn reset(&mut self) {
        self.comments.clear();
        self.placements.clear();
        self.lanes.clear();
        self.cursor = 0;
    }

    /// Install a comment buffer directly (payload order must be ascending by time)
    pub fn set_comments(&mut self, mut comments: Vec<Comment>) {
        self.reset();
        comments.iter_mut().for_each(Comment::reset);
        self.comments = comments;
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Showing comments with their positions for this frame
    pub fn visible(&self) -> impl Iterator<Item = (&Comment, Placement)> + '_ {
        self.placements
            .iter()
            .filter_map(|p| self.comments.get(p.index).map(|c| (c, *p)))
    }

    /// Advance the schedule for one rendered frame
    ///
    /// Refills the buffer from the core if it is empty, then ticks against
    /// the core's playback time and pause state.
    pub fn frame(&mut self, core: &dyn PlayerCore, viewport: Viewport, now: i64) {
        if !core.danmaku_loaded() {
            self.placements.clear();
            return;
        }
        if self.comments.is_empty() {
            let snapshot = core.danmaku_snapshot();
            if snapshot.is_empty() {
                self.placements.clear();
                return;
            }
            tracing::debug!("Danmaku buffer refilled with {} comments", snapshot.len());
            self.set_comments(snapshot);
        }

        let idle = core.is_paused() || core.is_idle();
        self.tick(core.playback_time(), core.playback_rate(), idle, viewport, now);
    }

    /// Advance the schedule to `playback` seconds at wall-clock `now` (µs)
    ///
    /// `rate` is the playback rate over the interval since the previous frame.
    pub fn tick(&mut self, playback: f64, rate: f64, idle: bool, viewport: Viewport, now: i64) {
        self.advance_motion(rate, idle, now);

        self.lanes.set_lines(self.config.lines_for(viewport.height));
        self.placements.clear();

        let line_height = self.config.line_height();
        let mut index = self.cursor;
        while index < self.comments.len() {
            if self.comments[index].state == CommentState::Pending {
                if self.comments[index].time > playback {
                    break;
                }
                self.admit(index, playback, viewport.width);
            }

            let comment = &mut self.comments[index];
            if comment.state == CommentState::Showing {
                let placement = if comment.kind.is_fixed() {
                    Self::place_fixed(comment, &self.config, playback, viewport.width)
                } else {
                    Self::place_scroll(
                        comment,
                        &self.config,
                        playback,
                        viewport.width,
                        self.motion_clock,
                    )
                };
                if let Some(x) = placement {
                    self.placements.push(Placement {
                        index,
                        x,
                        y: comment.line as f32 * line_height,
                    });
                }
            }

            if index == self.cursor && self.comments[index].state.is_resolved() {
                self.cursor += 1;
            }
            index += 1;
        }
    }

    fn advance_motion(&mut self, rate: f64, idle: bool, now: i64) {
        let playing = !idle && !self.was_idle && rate.is_finite() && rate > 0.0;
        if let Some(last) = self.last_frame.filter(|_| playing) {
            let elapsed = (now - last).max(0) as f64;
            self.motion_clock += (elapsed * rate) as i64;
        }
        self.last_frame = Some(now);
        self.was_idle = idle;
    }

    /// Measure a due comment and claim a lane for it
    fn admit(&mut self, index: usize, playback: f64, viewport_width: f32) {
        let comment = &mut self.comments[index];
        let window = self.config.window_for(comment.kind);
        if comment.time + window <= playback {
            comment.state = CommentState::Dropped;
            return;
        }

        comment.length = self.measure.measure(&comment.text, self.config.font_size);

        if comment.kind.is_fixed() {
            match self.lanes.allocate_fixed(comment.kind, comment.time) {
                Some(line) => {
                    comment.line = line;
                    comment.state = CommentState::Showing;
                }
                None => comment.state = CommentState::Dropped,
            }
        } else {
            match self
                .lanes
                .allocate_scroll(comment.time, comment.length, viewport_width)
            {
                Some(slot) => {
                    comment.line = slot.line;
                    comment.speed = slot.speed;
                    comment.start_time = self.motion_clock;
                    let behind = playback - comment.time;
                    if behind > CATCH_UP_THRESHOLD {
                        comment.start_time -= (behind * MICROS_PER_SEC) as i64;
                    }
                    comment.state = CommentState::Showing;
                }
                None => comment.state = CommentState::Dropped,
            }
        }

        if comment.state == CommentState::Dropped {
            tracing::trace!(
                "No free lane for danmaku at {:.2}s, dropped: {}",
                comment.time,
                comment.text
            );
        }
    }

    /// X of a scrolling comment, or `None` once it has left
    fn place_scroll(
        comment: &mut Comment,
        config: &DanmakuConfig,
        playback: f64,
        viewport_width: f32,
        motion_clock: i64,
    ) -> Option<f32> {
        let position =
            comment.speed * ((motion_clock - comment.start_time) as f64 / MICROS_PER_SEC) as f32;

        if position >= viewport_width + comment.length
            || comment.time + config.scroll_seconds <= playback
        {
            comment.state = CommentState::Hidden;
            return None;
        }
        Some(viewport_width - position)
    }

    /// X of a centered comment, or `None` outside its display window
    fn place_fixed(
        comment: &mut Comment,
        config: &DanmakuConfig,
        playback: f64,
        viewport_width: f32,
    ) -> Option<f32> {
        if comment.time > playback || comment.time + config.fixed_seconds <= playback {
            comment.state = CommentState::Hidden;
            return None;
        }
        Some(viewport_width / 2.0 - comment.length / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::danmaku::types::{CommentKind, Rgb};
    use crate::player::testing::FakeCore;

    /// Every character is 25 px wide at any size
    struct FixedWidth;

    impl TextMeasure for FixedWidth {
        fn measure(&self, text: &str, _font_size: f32) -> f32 {
            text.chars().count() as f32 * 25.0
        }
    }

    const VIEWPORT: Viewport = Viewport {
        width: 1000.0,
        height: 1000.0,
    };

    fn secs(s: f64) -> i64 {
        (s * MICROS_PER_SEC) as i64
    }

    /// Four characters, 100 px with `FixedWidth`
    fn scroll(time: f64) -> Comment {
        Comment::new("abcd", CommentKind::Scroll, time, Rgb::WHITE)
    }

    fn scheduler(comments: Vec<Comment>) -> DanmakuScheduler {
        let mut scheduler = DanmakuScheduler::new(DanmakuConfig::default(), Arc::new(FixedWidth));
        scheduler.set_comments(comments);
        scheduler
    }

    fn showing_lines(scheduler: &DanmakuScheduler) -> Vec<usize> {
        scheduler.visible().map(|(c, _)| c.line).collect()
    }

    #[test]
    fn test_single_comment_lifecycle() {
        let mut s = scheduler(vec![scroll(5.0)]);

        s.tick(4.9, 1.0, false, VIEWPORT, secs(100.0));
        assert_eq!(s.comments()[0].state, CommentState::Pending);
        assert!(s.placements().is_empty());

        s.tick(5.0, 1.0, false, VIEWPORT, secs(100.1));
        let comment = &s.comments()[0];
        assert_eq!(comment.state, CommentState::Showing);
        assert_eq!(comment.line, 0);
        assert_eq!(comment.length, 100.0);
        assert_eq!(comment.speed, 1100.0 / 8.0);
        assert_eq!(s.placements()[0].x, 1000.0);
        assert_eq!(s.placements()[0].y, 0.0);

        s.tick(9.0, 1.0, false, VIEWPORT, secs(104.1));
        let x = s.placements()[0].x;
        assert!((x - (1000.0 - 4.0 * 137.5)).abs() < 1e-3);
        assert_eq!(s.cursor(), 0);

        s.tick(13.0, 1.0, false, VIEWPORT, secs(107.9));
        assert_eq!(s.comments()[0].state, CommentState::Hidden);
        assert!(s.placements().is_empty());
        assert_eq!(s.cursor(), 1);
    }

    #[test]
    fn test_simultaneous_comments_use_separate_lanes() {
        let mut s = scheduler(vec![scroll(5.0), scroll(5.0)]);
        s.tick(5.0, 1.0, false, VIEWPORT, secs(1.0));
        assert_eq!(showing_lines(&s), [0, 1]);
        assert_eq!(s.placements()[1].y, 40.0);
    }

    #[test]
    fn test_pause_freezes_position() {
        let mut s = scheduler(vec![scroll(5.0)]);
        s.tick(5.0, 1.0, false, VIEWPORT, secs(10.0));
        s.tick(6.0, 1.0, false, VIEWPORT, secs(11.0));
        let before = s.placements()[0].x;

        // Paused at 6.0 for two seconds of wall-clock time
        s.tick(6.0, 1.0, true, VIEWPORT, secs(11.5));
        assert_eq!(s.placements()[0].x, before);
        s.tick(6.0, 1.0, true, VIEWPORT, secs(13.0));
        assert_eq!(s.placements()[0].x, before);

        // First frame after resume, still at 6.0
        s.tick(6.0, 1.0, false, VIEWPORT, secs(13.0));
        assert_eq!(s.placements()[0].x, before);

        // Then frame time drives motion again
        s.tick(6.5, 1.0, false, VIEWPORT, secs(13.5));
        assert!((s.placements()[0].x - (before - 0.5 * 137.5)).abs() < 1e-3);
    }

    #[test]
    fn test_resume_without_paused_frames() {
        let mut s = scheduler(vec![scroll(5.0)]);
        s.tick(6.0, 1.0, false, VIEWPORT, secs(11.0));
        let before = s.placements()[0].x;
        s.tick(6.0, 1.0, true, VIEWPORT, secs(11.0));

        // No frames rendered during a long pause
        s.tick(6.0, 1.0, false, VIEWPORT, secs(60.0));
        assert_eq!(s.placements()[0].x, before);
    }

    #[test]
    fn test_pause_after_small_late_admission_keeps_position() {
        let mut s = scheduler(vec![scroll(5.0)]);
        // 0.15 s late: starts at the edge instead of catching up
        s.tick(5.15, 1.0, false, VIEWPORT, secs(10.0));
        assert_eq!(s.placements()[0].x, 1000.0);
        s.tick(6.0, 1.0, false, VIEWPORT, secs(10.85));
        let before = s.placements()[0].x;
        assert!((before - (1000.0 - 0.85 * 137.5)).abs() < 1e-3);

        s.tick(6.0, 1.0, true, VIEWPORT, secs(10.85));
        assert_eq!(s.placements()[0].x, before);
        s.tick(6.0, 1.0, true, VIEWPORT, secs(12.0));
        assert_eq!(s.placements()[0].x, before);
        s.tick(6.0, 1.0, false, VIEWPORT, secs(12.5));
        assert_eq!(s.placements()[0].x, before);
    }

    #[test]
    fn test_boosted_rate_scrolls_at_playback_speed() {
        let mut s = scheduler(vec![scroll(5.0)]);
        s.tick(5.0, 2.0, false, VIEWPORT, secs(0.0));

        // 3.95 s of wall time at 2x is 7.9 s of playback
        s.tick(12.9, 2.0, false, VIEWPORT, secs(3.95));
        let x = s.placements()[0].x;
        assert!((x - (1000.0 - 7.9 * 137.5)).abs() < 1e-2);
        assert!(x + s.comments()[0].length < 20.0);

        s.tick(13.0, 2.0, false, VIEWPORT, secs(4.0));
        assert_eq!(s.comments()[0].state, CommentState::Hidden);
    }

    #[test]
    fn test_boosted_rate_keeps_lanes_apart() {
        // One lane, two 500 px comments three seconds apart
        let wide = |time| Comment::new("a".repeat(20), CommentKind::Scroll, time, Rgb::WHITE);
        let mut s = scheduler(vec![wide(5.0), wide(8.0)]);
        let viewport = Viewport::new(1000.0, 40.0);

        for frame in 0..600 {
            let wall = frame as f64 / 60.0;
            let t = 4.0 + wall * 2.0;
            s.tick(t, 2.0, false, viewport, secs(wall));
            let spans: Vec<(f32, f32)> = s.visible().map(|(c, p)| (p.x, p.x + c.length)).collect();
            if let [a, b] = spans.as_slice() {
                let (left, right) = if a.0 <= b.0 { (a, b) } else { (b, a) };
                assert!(left.1 <= right.0 + 1e-2, "overlap at {t}: {spans:?}");
            }
        }
    }

    #[test]
    fn test_frame_follows_core_rate() {
        let core = FakeCore::new();
        core.set_comments(vec![scroll(1.0)]);
        core.set_time(1.0);
        core.set_speed(2.0);

        let mut s = DanmakuScheduler::new(DanmakuConfig::default(), Arc::new(FixedWidth));
        s.frame(&core, VIEWPORT, secs(10.0));
        core.set_time(2.0);
        s.frame(&core, VIEWPORT, secs(10.5));
        assert!((s.placements()[0].x - (1000.0 - 137.5)).abs() < 1e-3);
    }

    #[test]
    fn test_late_admission_catches_up() {
        let mut s = scheduler(vec![scroll(5.0)]);
        s.tick(7.0, 1.0, false, VIEWPORT, secs(50.0));
        let x = s.placements()[0].x;
        assert!((x - (1000.0 - 2.0 * 137.5)).abs() < 1e-2);
    }

    #[test]
    fn test_small_lateness_starts_at_edge() {
        let mut s = scheduler(vec![scroll(5.0)]);
        s.tick(5.1, 1.0, false, VIEWPORT, secs(50.0));
        assert_eq!(s.placements()[0].x, 1000.0);
    }

    #[test]
    fn test_expired_pending_is_dropped() {
        let mut s = scheduler(vec![scroll(1.0), scroll(20.0)]);
        s.tick(10.0, 1.0, false, VIEWPORT, secs(1.0));
        assert_eq!(s.comments()[0].state, CommentState::Dropped);
        assert_eq!(s.comments()[1].state, CommentState::Pending);
        assert_eq!(s.cursor(), 1);
    }

    #[test]
    fn test_no_free_lane_drops_comment() {
        let mut s = scheduler(vec![scroll(5.0), scroll(5.0), scroll(5.0)]);
        // Two lanes fit
        let viewport = Viewport::new(1000.0, 80.0);
        s.tick(5.0, 1.0, false, viewport, secs(1.0));
        let states: Vec<_> = s.comments().iter().map(|c| c.state).collect();
        assert_eq!(
            states,
            [CommentState::Showing, CommentState::Showing, CommentState::Dropped]
        );
        // Dropped comments never come back
        s.tick(5.5, 1.0, false, viewport, secs(1.5));
        assert_eq!(s.comments()[2].state, CommentState::Dropped);
        assert_eq!(s.placements().len(), 2);
    }

    #[test]
    fn test_fixed_comments_center_and_expire() {
        let top = Comment::new("ab", CommentKind::Top, 2.0, Rgb::WHITE);
        let bottom = Comment::new("abcd", CommentKind::Bottom, 2.0, Rgb::WHITE);
        let mut s = scheduler(vec![top, bottom]);

        s.tick(2.0, 1.0, false, VIEWPORT, secs(1.0));
        let placements = s.placements();
        assert_eq!(placements[0].x, 500.0 - 25.0);
        assert_eq!(placements[0].y, 0.0);
        assert_eq!(placements[1].x, 500.0 - 50.0);
        assert_eq!(placements[1].y, 19.0 * 40.0);

        // Fixed comments ignore pause and only follow playback time
        s.tick(9.9, 1.0, true, VIEWPORT, secs(2.0));
        assert_eq!(s.placements().len(), 2);

        s.tick(10.0, 1.0, false, VIEWPORT, secs(3.0));
        assert!(s.placements().is_empty());
        assert_eq!(s.cursor(), 2);
    }

    #[test]
    fn test_cursor_waits_for_earlier_showing_comment() {
        let fixed = Comment::new("top", CommentKind::Top, 1.0, Rgb::WHITE);
        let mut s = scheduler(vec![fixed, scroll(2.0)]);
        s.tick(2.0, 1.0, false, VIEWPORT, secs(1.0));
        // The top comment hides at 9.0, the scroll one at 10.0
        s.tick(9.5, 1.0, false, VIEWPORT, secs(8.5));
        assert_eq!(s.comments()[0].state, CommentState::Hidden);
        assert_eq!(s.cursor(), 1);
        s.tick(10.0, 1.0, false, VIEWPORT, secs(9.0));
        assert_eq!(s.cursor(), 2);
    }

    #[test]
    fn test_cursor_is_monotonic_and_lanes_never_overlap() {
        let comments: Vec<_> = (0..200).map(|i| scroll(i as f64 * 0.1)).collect();
        let mut s = scheduler(comments);
        let mut last_cursor = 0;

        for frame in 0..1800 {
            let t = frame as f64 / 60.0;
            s.tick(t, 1.0, false, VIEWPORT, secs(t));
            assert!(s.cursor() >= last_cursor);
            last_cursor = s.cursor();

            // Showing scroll comments sharing a lane must not intersect
            let mut spans: Vec<(usize, f32, f32)> = s
                .visible()
                .map(|(c, p)| (c.line, p.x, p.x + c.length))
                .collect();
            spans.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.total_cmp(&b.1)));
            for pair in spans.windows(2) {
                if pair[0].0 == pair[1].0 {
                    assert!(pair[0].2 <= pair[1].1 + 1e-2, "overlap at {t}: {pair:?}");
                }
            }
        }
        assert_eq!(s.cursor(), 200);
    }

    #[test]
    fn test_frame_refills_from_core() {
        let core = FakeCore::new();
        core.set_comments(vec![scroll(1.0), scroll(2.0)]);
        core.set_time(1.0);

        let mut s = DanmakuScheduler::new(DanmakuConfig::default(), Arc::new(FixedWidth));
        s.frame(&core, VIEWPORT, secs(1.0));
        assert_eq!(s.comments().len(), 2);
        assert_eq!(s.placements().len(), 1);

        s.reset();
        assert!(s.comments().is_empty());
        assert_eq!(s.cursor(), 0);

        core.set_time(2.0);
        s.frame(&core, VIEWPORT, secs(2.0));
        assert_eq!(s.comments().len(), 2);
        assert_eq!(s.placements().len(), 2);
    }

    #[test]
    fn test_frame_without_danmaku_is_empty() {
        let core = FakeCore::new();
        let mut s = DanmakuScheduler::default();
        s.frame(&core, VIEWPORT, 0);
        assert!(s.comments().is_empty());
        assert!(s.placements().is_empty());
    }

    #[test]
    fn test_set_config_restarts_schedule() {
        let mut s = scheduler(vec![scroll(1.0)]);
        s.tick(1.0, 1.0, false, VIEWPORT, 0);
        s.set_config(DanmakuConfig {
            font_size: 20.0,
            ..Default::default()
        });
        assert!(s.comments().is_empty());
        assert_eq!(s.config().line_height(), 30.0);
    }
}
