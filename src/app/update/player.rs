// src/app/update/player.rs
//! Player event and font system handlers

use std::sync::Arc;

use iced::Task;

use crate::app::message::Message;
use crate::app::state::App;
use crate::danmaku::{CosmicMeasure, TextMeasure};

impl App {
    /// Handle messages coming from the player core
    pub fn handle_player(&mut self, message: &Message) -> Option<Task<Message>> {
        match message {
            Message::PlayerEvent(id, event) => {
                let effect = self.ui.views.dispatch(*id, event.clone());
                Some(match effect {
                    Some(effect) => self.apply_effect(effect),
                    None => Task::none(),
                })
            }

            Message::PlayerEventsEnded(id) => {
                tracing::debug!("Event stream for subscription {} ended", id);
                Some(Task::none())
            }

            Message::FontSystemReady(font_system) => {
                tracing::info!("Switching danmaku measurement to cosmic-text");
                let measure: Arc<dyn TextMeasure> =
                    Arc::new(CosmicMeasure::new(font_system.clone()));
                for view in self.ui.views.views_mut() {
                    view.scheduler_mut().set_measure(measure.clone());
                }
                Some(Task::none())
            }

            _ => None,
        }
    }
}
