//! Lane occupancy and allocation
//!
//! Scroll lanes track two times per lane:
//! - `next_free`: when the previous comment's tail has fully entered the
//!   screen, so a new comment starting at the right edge can't overlap it
//! - `vacate`: when the previous comment leaves the screen; a new comment
//!   must not catch up with it before then
//!
//! Fixed lanes (top and bottom share one array) only track an expiry time.

use super::types::CommentKind;

/// Occupancy of one scrolling lane
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct ScrollLane {
    next_free: f64,
    vacate: f64,
}

/// Result of a successful scroll allocation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollSlot {
    pub line: usize,
    /// Pixels per second
    pub speed: f32,
}

/// Per-scheduler lane table
#[derive(Debug, Clone)]
pub struct LaneTable {
    scroll: Vec<ScrollLane>,
    fixed: Vec<f64>,
    /// Lanes currently usable (viewport dependent)
    lines: usize,
    scroll_seconds: f64,
    fixed_seconds: f64,
}

impl LaneTable {
    pub fn new(capacity: usize, scroll_seconds: f64, fixed_seconds: f64) -> Self {
        Self {
            scroll: vec![ScrollLane::default(); capacity],
            fixed: vec![0.0; capacity],
            lines: capacity,
            scroll_seconds,
            fixed_seconds,
        }
    }

    /// Number of lanes in use
    pub fn lines(&self) -> usize {
        self.lines
    }

    /// Limit allocation to the first `lines` lanes
    ///
    /// Shrinking keeps the occupancy of the remaining lanes.
    pub fn set_lines(&mut self, lines: usize) {
        self.lines = lines.min(self.scroll.len());
    }

    /// Free every lane
    pub fn clear(&mut self) {
        self.scroll.fill(ScrollLane::default());
        self.fixed.fill(0.0);
    }

    /// Place a scrolling comment of `length` pixels appearing at `time`
    ///
    /// A lane is skipped when it hasn't cleared the previous tail yet, or when
    /// this comment, moving at its own speed, would reach the left edge before
    /// the previous one left it.
    pub fn allocate_scroll(
        &mut self,
        time: f64,
        length: f32,
        viewport_width: f32,
    ) -> Option<ScrollSlot> {
        let speed = (viewport_width + length) as f64 / self.scroll_seconds;
        if speed <= 0.0 {
            return None;
        }

        let lines = self.lines;
        let (line, lane) = self.scroll[..lines].iter_mut().enumerate().find(|(_, lane)| {
            !(time < lane.next_free || time + viewport_width as f64 / speed < lane.vacate)
        })?;

        lane.next_free = time + length as f64 / speed;
        lane.vacate = time + self.scroll_seconds;

        Some(ScrollSlot {
            line,
            speed: speed as f32,
        })
    }

    /// Place a top or bottom comment appearing at `time`
    ///
    /// Bottom comments fill from the last lane upward, top comments from lane 0
    /// downward.
    pub fn allocate_fixed(&mut self, kind: CommentKind, time: f64) -> Option<usize> {
        let lines = self.lines;
        let line = match kind {
            CommentKind::Bottom => (0..lines).rev().find(|&i| self.fixed[i] <= time),
            CommentKind::Top => (0..lines).find(|&i| self.fixed[i] <= time),
            CommentKind::Scroll => None,
        }?;

        self.fixed[line] = time + self.fixed_seconds;
        Some(line)
    }
}
