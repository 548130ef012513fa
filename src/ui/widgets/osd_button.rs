//! Round icon button used on the OSD

use iced::widget::{button, svg};
use iced::{Element, Padding};

use crate::ui::theme;

/// Icon button with the glass style
///
/// `on_press` of `None` renders the button disabled.
pub fn view<'a, Message: Clone + 'a>(
    icon: &'static str,
    size: f32,
    on_press: Option<Message>,
) -> Element<'a, Message> {
    let icon = svg(svg::Handle::from_memory(icon.as_bytes()))
        .width(size)
        .height(size)
        .style(|_theme, _status| svg::Style {
            color: Some(theme::OSD_TEXT),
        });

    button(icon)
        .padding(Padding::new(size * 0.4))
        .style(theme::glass_icon_button)
        .on_press_maybe(on_press)
        .into()
}
