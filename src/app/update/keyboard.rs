// src/app/update/keyboard.rs
//! Keyboard and remote-key handlers

use iced::Task;

use crate::app::message::Message;
use crate::app::state::App;
use crate::features::Action;

impl App {
    /// Handle keyboard-related messages
    pub fn handle_keyboard(&mut self, message: &Message) -> Option<Task<Message>> {
        match message {
            Message::KeyPressed(key, modifiers) => {
                let Some(action) = self.core.settings.keybindings.find_action(key, modifiers)
                else {
                    return Some(Task::none());
                };

                if action.is_hold() {
                    // Auto-repeat would read as a double press
                    if self.ui.speed_key_held {
                        return Some(Task::none());
                    }
                    self.ui.speed_key_held = true;
                }
                Some(self.update(action_message(action)))
            }

            Message::KeyReleased(key, modifiers) => {
                let action = self.core.settings.keybindings.find_action(key, modifiers);
                if action.is_some_and(|action| action.is_hold()) && self.ui.speed_key_held {
                    self.ui.speed_key_held = false;
                    return Some(self.update(Message::SpeedRelease));
                }
                Some(Task::none())
            }

            _ => None,
        }
    }
}

/// Message a key action stands for
fn action_message(action: Action) -> Message {
    match action {
        Action::PlayPause => Message::TogglePlayback,
        Action::SeekForward => Message::SeekForward,
        Action::SeekBackward => Message::SeekBackward,
        Action::ToggleOsd => Message::ToggleOsd,
        Action::ToggleDanmaku => Message::ToggleDanmaku,
        Action::ToggleFullscreen => Message::ToggleFullscreen,
        Action::Primary => Message::Primary,
        Action::Cancel => Message::Cancel,
        Action::SpeedHold => Message::SpeedPress,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_action_maps_to_a_message() {
        for action in Action::all() {
            let message = action_message(*action);
            assert!(!matches!(message, Message::Noop), "{:?}", action);
        }
        assert!(matches!(
            action_message(Action::SpeedHold),
            Message::SpeedPress
        ));
    }
}
