//! On-screen display over the video
//!
//! Top band: title and online count. Bottom band: elapsed/duration labels,
//! the seek slider and the control row.

use iced::widget::{Space, column, container, mouse_area, row, text, tooltip};
use iced::{Alignment, Element, Fill, Padding};

use crate::app::Message;
use crate::features::{Action, KeyBindings};
use crate::i18n::{Key, Locale};
use crate::ui::video_view::{PlaybackIcon, VideoView};
use crate::ui::widgets::{osd_button, progress_slider};
use crate::ui::{icons, theme};

/// Icon size for the control row
const ICON_SIZE: f32 = 22.0;

/// Horizontal padding of both bands
const BAND_PADDING: f32 = 24.0;

/// Title band at the top of the video
pub fn top_band<'a>(view: &'a VideoView, locale: Locale) -> Element<'a, Message> {
    let title = text(view.title())
        .size(20)
        .color(theme::OSD_TEXT)
        .wrapping(text::Wrapping::None);

    let online: Element<'a, Message> = match view.online_count() {
        Some(count) => text(locale.format(Key::OnlineCount, count))
            .size(14)
            .color(theme::OSD_TEXT_DIM)
            .into(),
        None => Space::new().width(0).height(0).into(),
    };

    container(
        row![title, Space::new().width(Fill), online]
            .spacing(16)
            .align_y(Alignment::Center),
    )
    .width(Fill)
    .padding(Padding::from([12.0, BAND_PADDING]))
    .style(theme::osd_band)
    .into()
}

/// Seek slider and control row at the bottom of the video
///
/// Tooltips carry the first key bound to each action.
pub fn bottom_band<'a>(
    view: &'a VideoView,
    locale: Locale,
    bindings: &KeyBindings,
) -> Element<'a, Message> {
    let hint = |key: Key, action: Action| {
        format!("{} ({})", locale.get(key), bindings.display_for_action(&action))
    };

    let elapsed = text(view.elapsed_label()).size(13).color(theme::OSD_TEXT);
    let total = text(view.duration_label())
        .size(13)
        .color(theme::OSD_TEXT_DIM);

    let slider = progress_slider::view(view.progress(), Message::SeekPreview, Message::SeekRelease);

    let timeline = row![elapsed, slider, total]
        .spacing(12)
        .align_y(Alignment::Center);

    let (play_icon, play_label) = match view.icon() {
        PlaybackIcon::Playing => (icons::PAUSE, Key::Pause),
        PlaybackIcon::Paused => (icons::PLAY, Key::Play),
    };
    let (danmaku_icon, danmaku_label) = if view.danmaku_on() {
        (icons::DANMAKU_ON, Key::DanmakuOff)
    } else {
        (icons::DANMAKU_OFF, Key::DanmakuOn)
    };

    let fullscreen: Element<'a, Message> = if view.is_fullscreen() {
        labelled(
            osd_button::view(icons::FULLSCREEN_EXIT, ICON_SIZE, Some(Message::ToggleFullscreen)),
            hint(Key::ExitFullscreen, Action::ToggleFullscreen),
        )
    } else if view.allows_fullscreen() {
        labelled(
            osd_button::view(icons::FULLSCREEN, ICON_SIZE, Some(Message::ToggleFullscreen)),
            hint(Key::EnterFullscreen, Action::ToggleFullscreen),
        )
    } else {
        Space::new().width(0).height(0).into()
    };

    // Press and release are both needed for the hold gesture
    let speed_label = locale.format(Key::SpeedBoost, view.speed_boost());
    let speed_hint = format!(
        "{} ({})",
        speed_label,
        bindings.display_for_action(&Action::SpeedHold)
    );
    let speed = mouse_area(osd_button::view(icons::SPEED, ICON_SIZE, None))
        .on_press(Message::SpeedPress)
        .on_release(Message::SpeedRelease);
    let speed: Element<'a, Message> = if view.speed_boosted() {
        row![speed, text(speed_label).size(13).color(theme::ACCENT_PINK)]
            .spacing(6)
            .align_y(Alignment::Center)
            .into()
    } else {
        labelled(speed.into(), speed_hint)
    };

    let controls = row![
        labelled(
            osd_button::view(icons::SEEK_BACKWARD, ICON_SIZE, Some(Message::SeekBackward)),
            hint(Key::SeekBackward, Action::SeekBackward),
        ),
        labelled(
            osd_button::view(play_icon, ICON_SIZE, Some(Message::TogglePlayback)),
            hint(play_label, Action::PlayPause),
        ),
        labelled(
            osd_button::view(icons::SEEK_FORWARD, ICON_SIZE, Some(Message::SeekForward)),
            hint(Key::SeekForward, Action::SeekForward),
        ),
        speed,
        Space::new().width(Fill),
        labelled(
            osd_button::view(danmaku_icon, ICON_SIZE, Some(Message::ToggleDanmaku)),
            hint(danmaku_label, Action::ToggleDanmaku),
        ),
        fullscreen,
    ]
    .spacing(12)
    .align_y(Alignment::Center);

    container(column![timeline, controls].spacing(8))
        .width(Fill)
        .padding(Padding::from([12.0, BAND_PADDING]))
        .style(theme::osd_band)
        .into()
}

fn labelled<'a>(
    content: Element<'a, Message>,
    label: impl Into<String>,
) -> Element<'a, Message> {
    tooltip(
        content,
        container(text(label.into()).size(12).color(theme::OSD_TEXT))
            .padding(6)
            .style(theme::loading_chip),
        tooltip::Position::Top,
    )
    .into()
}
