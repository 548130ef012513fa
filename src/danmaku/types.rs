//! Core data types for the danmaku engine

use iced::Color;

/// How a comment is laid out on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommentKind {
    /// Moves right to left across the viewport
    Scroll,
    /// Centered, anchored to the bottom lanes
    Bottom,
    /// Centered, anchored to the top lanes
    Top,
}

impl CommentKind {
    /// Map a payload mode number to a kind
    ///
    /// Modes 1-3 are the normal scrolling variants and 6 is reverse scrolling,
    /// which is drawn as a normal scroll. Advanced (7) and scripted (8+) modes
    /// are not supported and return `None`.
    pub fn from_mode(mode: u32) -> Option<Self> {
        match mode {
            1..=3 | 6 => Some(Self::Scroll),
            4 => Some(Self::Bottom),
            5 => Some(Self::Top),
            _ => None,
        }
    }

    /// Top and bottom comments don't move
    pub fn is_fixed(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }
}

/// 8-bit RGB color of a comment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(0xff, 0xff, 0xff);
    pub const BLACK: Rgb = Rgb(0x00, 0x00, 0x00);

    /// Decode a `0xRRGGBB` packed color
    pub fn from_packed(value: u32) -> Self {
        Self(
            ((value >> 16) & 0xff) as u8,
            ((value >> 8) & 0xff) as u8,
            (value & 0xff) as u8,
        )
    }

    /// Perceived brightness (0.0 = black, 1.0 = white)
    pub fn luminance(self) -> f32 {
        (self.0 as f32 * 0.299 + self.1 as f32 * 0.587 + self.2 as f32 * 0.114) / 255.0
    }

    /// Outline that keeps text readable: black around light text, white around dark text
    pub fn outline(self) -> Self {
        if self.luminance() < 0.25 {
            Self::WHITE
        } else {
            Self::BLACK
        }
    }

    pub fn to_color(self, alpha: f32) -> Color {
        Color::from_rgba8(self.0, self.1, self.2, alpha)
    }
}

/// Scheduling lifecycle of one comment
///
/// `Pending -> Showing -> Hidden`, or `Pending -> Dropped` when the comment's
/// window closes (or no lane is free) before it was ever shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommentState {
    #[default]
    Pending,
    Showing,
    Hidden,
    Dropped,
}

impl CommentState {
    /// Terminal states the cursor may move past
    pub fn is_resolved(self) -> bool {
        matches!(self, Self::Hidden | Self::Dropped)
    }
}

/// A single danmaku item
///
/// The payload (text, colors, kind, time) is fixed at parse time; the
/// remaining fields are rewritten by the scheduler while the comment is live.
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub text: String,
    pub color: Rgb,
    pub border_color: Rgb,
    pub kind: CommentKind,
    /// Appearance time in seconds into playback
    pub time: f64,

    /// Lane index, valid once shown
    pub line: usize,
    /// Measured text width in pixels
    pub length: f32,
    /// Horizontal speed in pixels per second
    pub speed: f32,
    /// Scheduler motion-clock microseconds at which the comment entered the right edge
    pub start_time: i64,
    pub state: CommentState,
}

impl Comment {
    pub fn new(text: impl Into<String>, kind: CommentKind, time: f64, color: Rgb) -> Self {
        Self {
            text: text.into(),
            color,
            border_color: color.outline(),
            kind,
            time,
            line: 0,
            length: 0.0,
            speed: 0.0,
            start_time: 0,
            state: CommentState::Pending,
        }
    }

    /// Forget everything the scheduler wrote
    pub fn reset(&mut self) {
        self.line = 0;
        self.length = 0.0;
        self.speed = 0.0;
        self.start_time = 0;
        self.state = CommentState::Pending;
    }

    /// Still eligible to be drawn (not yet hidden or dropped)
    pub fn can_show(&self) -> bool {
        !self.state.is_resolved()
    }

    pub fn is_showing(&self) -> bool {
        self.state == CommentState::Showing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_mode() {
        assert_eq!(CommentKind::from_mode(1), Some(CommentKind::Scroll));
        assert_eq!(CommentKind::from_mode(6), Some(CommentKind::Scroll));
        assert_eq!(CommentKind::from_mode(4), Some(CommentKind::Bottom));
        assert_eq!(CommentKind::from_mode(5), Some(CommentKind::Top));
        assert_eq!(CommentKind::from_mode(7), None);
        assert_eq!(CommentKind::from_mode(0), None);
    }

    #[test]
    fn test_rgb_from_packed() {
        assert_eq!(Rgb::from_packed(16777215), Rgb::WHITE);
        assert_eq!(Rgb::from_packed(0xfe0302), Rgb(0xfe, 0x03, 0x02));
    }

    #[test]
    fn test_outline_contrasts_text() {
        assert_eq!(Rgb::WHITE.outline(), Rgb::BLACK);
        assert_eq!(Rgb::BLACK.outline(), Rgb::WHITE);
        assert_eq!(Rgb(0x00, 0x00, 0x80).outline(), Rgb::WHITE);
    }

    #[test]
    fn test_reset_clears_schedule() {
        let mut comment = Comment::new("hi", CommentKind::Scroll, 1.0, Rgb::WHITE);
        comment.line = 3;
        comment.speed = 100.0;
        comment.state = CommentState::Hidden;
        assert!(!comment.can_show());

        comment.reset();
        assert_eq!(comment.line, 0);
        assert_eq!(comment.speed, 0.0);
        assert_eq!(comment.state, CommentState::Pending);
        assert!(comment.can_show());
        assert!(!comment.is_showing());
    }
}
