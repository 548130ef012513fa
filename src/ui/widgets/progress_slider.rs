//! Seek slider for the OSD
//!
//! Dragging reports the previewed fraction; the seek itself is sent on
//! release.

use iced::widget::slider;
use iced::{Color, Element, Length};

use crate::ui::theme;

/// Build the progress slider
///
/// # Arguments
/// * `position` - Current playback position (0.0 to 1.0)
/// * `on_change` - Called with the dragged fraction
/// * `on_release` - Emitted when the drag ends
pub fn view<'a, Message: Clone + 'a>(
    position: f32,
    on_change: impl Fn(f32) -> Message + 'a,
    on_release: Message,
) -> Element<'a, Message> {
    slider(0.0..=1.0, position.clamp(0.0, 1.0), on_change)
        .on_release(on_release)
        .width(Length::Fill)
        .height(16)
        .step(0.001)
        .style(|iced_theme, status| {
            let handle_radius = match status {
                slider::Status::Hovered | slider::Status::Dragged => 7.0,
                _ => 4.0,
            };
            slider::Style {
                rail: slider::Rail {
                    backgrounds: (
                        iced::Background::Color(theme::ACCENT_PINK),
                        iced::Background::Color(theme::divider(iced_theme)),
                    ),
                    width: 4.0,
                    border: iced::Border {
                        radius: 2.0.into(),
                        width: 0.0,
                        color: Color::TRANSPARENT,
                    },
                },
                handle: slider::Handle {
                    shape: slider::HandleShape::Circle {
                        radius: handle_radius,
                    },
                    background: iced::Background::Color(theme::ACCENT_PINK),
                    border_width: 0.0,
                    border_color: Color::TRANSPARENT,
                },
            }
        })
        .into()
}
