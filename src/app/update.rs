//! Message update handlers - thin dispatcher delegating to submodules

mod controls;
mod keyboard;
mod player;
mod window;

use iced::Task;

use super::{App, Message};

impl App {
    /// Handle messages by delegating to appropriate submodule handlers
    pub fn update(&mut self, message: Message) -> Task<Message> {
        // Try each handler in order until one handles the message
        if let Some(task) = self.handle_player(&message) {
            return task;
        }
        if let Some(task) = self.handle_controls(&message) {
            return task;
        }
        if let Some(task) = self.handle_window(&message) {
            return task;
        }
        if let Some(task) = self.handle_keyboard(&message) {
            return task;
        }

        // Default: no task
        Task::none()
    }
}
