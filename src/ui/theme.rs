//! Theme system for the player
//! Dark and light palettes for the page chrome; the video surface and OSD
//! stay dark in both modes.

use iced::color;
use iced::widget::{button, container};
use iced::{Background, Border, Color, Theme};

// ============================================================================
// Color Palette - Dynamic based on theme
// ============================================================================

/// Page chrome follows the palette's own brightness
fn is_dark(theme: &Theme) -> bool {
    theme.extended_palette().is_dark
}

// Dark mode colors
mod dark {
    use super::*;
    pub const BACKGROUND: Color = color!(0x000000);
    pub const TEXT_PRIMARY: Color = color!(0xffffff);
}

// Light mode colors
mod light {
    use super::*;
    pub const BACKGROUND: Color = color!(0xffffff);
    pub const TEXT_PRIMARY: Color = color!(0x1a1a1a);
}

/// Get background color based on theme
pub fn background(theme: &Theme) -> Color {
    if is_dark(theme) {
        dark::BACKGROUND
    } else {
        light::BACKGROUND
    }
}

/// Get primary text color based on theme
pub fn text_primary(theme: &Theme) -> Color {
    if is_dark(theme) {
        dark::TEXT_PRIMARY
    } else {
        light::TEXT_PRIMARY
    }
}

/// Neon pink accent color (same for both modes)
pub const ACCENT_PINK: Color = color!(0xff1493);

/// OSD text over video, independent of the page theme
pub const OSD_TEXT: Color = Color::WHITE;
pub const OSD_TEXT_DIM: Color = color!(0xb3b3b3);

/// Divider/separator color
pub fn divider(theme: &Theme) -> Color {
    if is_dark(theme) {
        Color::from_rgba(1.0, 1.0, 1.0, 0.1)
    } else {
        Color::from_rgba(0.0, 0.0, 0.0, 0.1)
    }
}

// ============================================================================
// Container styles
// ============================================================================

/// Page background around the windowed video
pub fn page(theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(background(theme))),
        text_color: Some(text_primary(theme)),
        ..Default::default()
    }
}

/// Letterbox behind the video frame
pub fn video_surface(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color::BLACK)),
        ..Default::default()
    }
}

/// Semi-transparent band behind the OSD title and control rows
pub fn osd_band(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color::from_rgba(0.0, 0.0, 0.0, 0.55))),
        text_color: Some(OSD_TEXT),
        ..Default::default()
    }
}

/// Loading chip in the middle of the video
pub fn loading_chip(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color::from_rgba(0.0, 0.0, 0.0, 0.6))),
        text_color: Some(OSD_TEXT),
        border: Border {
            radius: 8.0.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

// ============================================================================
// Button styles
// ============================================================================

/// Glass icon button for the OSD (circular, semi-transparent dark)
pub fn glass_icon_button(_theme: &Theme, status: button::Status) -> button::Style {
    let base = button::Style {
        background: Some(Background::Color(Color::from_rgba(0.0, 0.0, 0.0, 0.3))),
        text_color: Color::WHITE,
        border: Border {
            radius: 50.0.into(),
            ..Default::default()
        },
        ..Default::default()
    };

    match status {
        button::Status::Hovered => button::Style {
            background: Some(Background::Color(Color::from_rgba(0.0, 0.0, 0.0, 0.5))),
            ..base
        },
        button::Status::Pressed => button::Style {
            background: Some(Background::Color(Color::from_rgba(0.0, 0.0, 0.0, 0.6))),
            ..base
        },
        _ => base,
    }
}

/// Invisible button covering the video, used for tap-to-toggle-OSD
pub fn transparent_btn(_theme: &Theme, _status: button::Status) -> button::Style {
    button::Style {
        background: Some(Background::Color(Color::TRANSPARENT)),
        ..Default::default()
    }
}
