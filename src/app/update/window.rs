// src/app/update/window.rs
//! Window, frame tick and exit handlers

use iced::Task;

use crate::app::message::Message;
use crate::app::state::App;
use crate::ui::pages::player::surface_rect;

impl App {
    /// Handle window-related messages
    pub fn handle_window(&mut self, message: &Message) -> Option<Task<Message>> {
        match message {
            Message::Frame => {
                let window = self.ui.window_size;
                if let Some(view) = self.ui.views.active_mut() {
                    let viewport = surface_rect(view, window);
                    view.on_layout(viewport.width as u32, viewport.height as u32);
                    view.render_frame(viewport);
                }
                Some(Task::none())
            }

            Message::WindowResized(size) => {
                self.ui.window_size = *size;
                Some(Task::none())
            }

            Message::RequestClose => Some(self.shutdown()),

            Message::Noop => Some(Task::none()),

            _ => None,
        }
    }

    /// Stop playback, persist settings and leave the event loop
    pub(crate) fn shutdown(&mut self) -> Task<Message> {
        tracing::info!("Shutting down");
        self.core.player.stop();

        // Release every subscription before the views go away
        let ids: Vec<_> = self
            .ui
            .views
            .views_mut()
            .map(|view| view.id())
            .collect();
        for id in ids {
            self.ui.views.remove(id);
        }

        if let Err(e) = self.core.settings.save() {
            tracing::warn!("Failed to save settings: {}", e);
        }
        iced::exit()
    }
}
