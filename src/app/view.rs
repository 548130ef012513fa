// src/app/view.rs
//! Application view rendering

use iced::widget::{container, text};
use iced::{Element, Fill};

use super::App;
use super::message::Message;
use crate::i18n::Key;
use crate::ui::{pages, theme};

impl App {
    /// Build the view for a specific window
    pub fn view(&self, _window_id: iced::window::Id) -> Element<'_, Message> {
        match self.ui.views.active() {
            Some(view) => pages::player::view(
                view,
                self.ui.window_size,
                self.core.locale,
                &self.core.settings.keybindings,
                self.core.settings.danmaku.opacity,
                self.core.clock.now_secs(),
            ),
            // Only visible for the frame between closing the last view and exit
            None => container(text(self.core.locale.get(Key::AppName)).size(24))
                .width(Fill)
                .height(Fill)
                .center_x(Fill)
                .center_y(Fill)
                .style(theme::page)
                .into(),
        }
    }
}
