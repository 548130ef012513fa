//! Danmaku (on-screen comment) engine
//!
//! Schedules time-synced text comments over the video surface:
//! - `types`: comment payload and per-comment scheduling state
//! - `parser`: XML danmaku payload parsing
//! - `lanes`: lane occupancy table and lane allocation
//! - `scheduler`: per-frame show/hide lifecycle and positioning
//! - `measure`: text width measurement (cosmic-text or estimate)
//!
//! ## Frame flow
//! ```text
//! PlaybackClock --(time, paused)--> DanmakuScheduler --(first show)--> LaneTable
//!                                          |
//!                                          v
//!                                   placements() --> overlay canvas
//! ```

pub mod lanes;
pub mod measure;
pub mod parser;
pub mod scheduler;
pub mod types;

pub use lanes::LaneTable;
pub use measure::{CosmicMeasure, EstimatedMeasure, SharedFontSystem, TextMeasure};
pub use parser::{DanmakuParseError, parse_danmaku_xml};
pub use scheduler::{DanmakuScheduler, Placement, Viewport};
pub use types::{Comment, CommentKind, CommentState, Rgb};

/// Hard cap on display lanes regardless of viewport height
pub const MAX_LINES: usize = 20;

/// Time a scrolling comment takes to cross the viewport (seconds)
pub const SCROLL_SECONDS: f64 = 8.0;

/// Time a top/bottom fixed comment stays on screen (seconds)
pub const FIXED_SECONDS: f64 = 8.0;

/// Geometry and timing used by the scheduler
///
/// All timing values are in seconds, distances in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DanmakuConfig {
    /// Font size of comment text
    pub font_size: f32,
    /// Extra vertical space between lanes
    pub line_spacing: f32,
    /// Upper bound on lanes, never more than `MAX_LINES`
    pub max_lines: usize,
    /// Traversal duration of scrolling comments
    pub scroll_seconds: f64,
    /// Visible duration of fixed comments
    pub fixed_seconds: f64,
}

impl Default for DanmakuConfig {
    fn default() -> Self {
        Self {
            font_size: 30.0,
            line_spacing: 10.0,
            max_lines: MAX_LINES,
            scroll_seconds: SCROLL_SECONDS,
            fixed_seconds: FIXED_SECONDS,
        }
    }
}

impl DanmakuConfig {
    /// Height of one lane
    pub fn line_height(&self) -> f32 {
        self.font_size + self.line_spacing
    }

    /// Number of usable lanes for a viewport height
    pub fn lines_for(&self, viewport_height: f32) -> usize {
        let line_height = self.line_height();
        if line_height <= 0.0 || viewport_height <= 0.0 {
            return 0;
        }
        let lines = (viewport_height / line_height).floor() as usize;
        lines.min(self.max_lines.min(MAX_LINES))
    }

    /// How long a comment of `kind` may be on screen
    pub fn window_for(&self, kind: CommentKind) -> f64 {
        if kind.is_fixed() {
            self.fixed_seconds
        } else {
            self.scroll_seconds
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_line_height() {
        let config = DanmakuConfig::default();
        assert_eq!(config.line_height(), 40.0);
    }

    #[test]
    fn test_lines_for_is_floored() {
        let config = DanmakuConfig::default();
        assert_eq!(config.lines_for(400.0), 10);
        assert_eq!(config.lines_for(439.0), 10);
        assert_eq!(config.lines_for(39.0), 0);
    }

    #[test]
    fn test_lines_for_is_capped() {
        let config = DanmakuConfig::default();
        assert_eq!(config.lines_for(2160.0), MAX_LINES);

        let config = DanmakuConfig {
            max_lines: 64,
            ..Default::default()
        };
        assert_eq!(config.lines_for(4000.0), MAX_LINES);
    }

    #[test]
    fn test_window_for_kind() {
        let config = DanmakuConfig {
            scroll_seconds: 6.0,
            fixed_seconds: 4.0,
            ..Default::default()
        };
        assert_eq!(config.window_for(CommentKind::Scroll), 6.0);
        assert_eq!(config.window_for(CommentKind::Top), 4.0);
        assert_eq!(config.window_for(CommentKind::Bottom), 4.0);
    }
}
