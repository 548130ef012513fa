//! Player page
//!
//! Stacks the video surface, the danmaku canvas, the loading chip, the tap
//! layer and the OSD bands. Windowed mode letterboxes a 16:9 surface inside
//! the window; fullscreen uses the whole window.

use iced::widget::{Space, button, column, container, row, stack, text};
use iced::{Alignment, Element, Fill, Length, Size};

use crate::app::Message;
use crate::danmaku::Viewport;
use crate::features::KeyBindings;
use crate::i18n::{Key, Locale};
use crate::ui::components::player_osd;
use crate::ui::primitives::{DanmakuOverlay, LoadingRing, danmaku_overlay, loading_ring};
use crate::ui::theme;
use crate::ui::video_view::VideoView;

/// Margin around the windowed surface
pub const PAGE_PADDING: f32 = 32.0;

const ASPECT: f32 = 16.0 / 9.0;

const RING_SIZE: f32 = 28.0;

/// Size of the video surface for a window
pub fn video_rect(window: Size, fullscreen: bool) -> Viewport {
    if fullscreen {
        return Viewport::new(window.width.max(0.0), window.height.max(0.0));
    }

    let available_w = (window.width - PAGE_PADDING * 2.0).max(0.0);
    let available_h = (window.height - PAGE_PADDING * 2.0).max(0.0);
    if available_w / ASPECT <= available_h {
        Viewport::new(available_w, available_w / ASPECT)
    } else {
        Viewport::new(available_h * ASPECT, available_h)
    }
}

/// Surface drawn for `view`, the same rectangle danmaku lanes are laid out in
pub fn surface_rect(view: &VideoView, window: Size) -> Viewport {
    video_rect(window, view.is_fullscreen())
}

/// Build the player page
///
/// `now` is the wall clock in seconds, used to turn the spinner.
pub fn view<'a>(
    view: &'a VideoView,
    window: Size,
    locale: Locale,
    bindings: &KeyBindings,
    danmaku_opacity: f32,
    now: f64,
) -> Element<'a, Message> {
    let rect = surface_rect(view, window);

    let mut layers: Vec<Element<'a, Message>> = vec![
        container(Space::new().width(Fill).height(Fill))
            .width(Fill)
            .height(Fill)
            .style(theme::video_surface)
            .into(),
    ];

    if view.danmaku_on() {
        layers.push(danmaku_overlay::view(
            DanmakuOverlay::new(view.scheduler()).opacity(danmaku_opacity),
        ));
    }

    // Tap anywhere on the video to toggle the OSD
    layers.push(
        button(Space::new().width(Fill).height(Fill))
            .width(Fill)
            .height(Fill)
            .padding(0)
            .style(theme::transparent_btn)
            .on_press(Message::ToggleOsd)
            .into(),
    );

    if view.is_loading() {
        layers.push(loading_chip(view, locale, now));
    }

    if view.osd_visible() {
        layers.push(
            column![
                player_osd::top_band(view, locale),
                Space::new().height(Fill),
                player_osd::bottom_band(view, locale, bindings),
            ]
            .width(Fill)
            .height(Fill)
            .into(),
        );
    }

    let surface = stack(layers)
        .width(Length::Fixed(rect.width))
        .height(Length::Fixed(rect.height));

    container(surface)
        .width(Fill)
        .height(Fill)
        .center_x(Fill)
        .center_y(Fill)
        .style(if view.is_fullscreen() {
            theme::video_surface
        } else {
            theme::page
        })
        .into()
}

fn loading_chip<'a>(view: &'a VideoView, locale: Locale, now: f64) -> Element<'a, Message> {
    let label = match view.cache_label() {
        Some(speed) => format!("{} {}", locale.get(Key::Loading), speed),
        None => locale.get(Key::Loading).to_string(),
    };

    let chip = container(
        row![
            loading_ring::view(LoadingRing::at(now).stroke_width(3.0), RING_SIZE),
            text(label).size(14).color(theme::OSD_TEXT),
        ]
        .spacing(12)
        .align_y(Alignment::Center),
    )
    .padding([10, 16])
    .style(theme::loading_chip);

    container(chip)
        .width(Fill)
        .height(Fill)
        .center_x(Fill)
        .center_y(Fill)
        .into()
}
