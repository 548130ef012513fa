// src/app/update/controls.rs
//! Video view actions and the fullscreen transitions they trigger

use iced::Task;
use iced::window::Mode;

use crate::app::forward_events;
use crate::app::message::Message;
use crate::app::state::App;
use crate::ui::fullscreen::FullscreenError;
use crate::ui::video_view::{VideoView, ViewEffect};

impl App {
    /// Handle OSD buttons, slider and remote actions
    pub fn handle_controls(&mut self, message: &Message) -> Option<Task<Message>> {
        match message {
            Message::TogglePlayback => {
                self.with_active(VideoView::toggle_playback);
                Some(Task::none())
            }

            Message::SeekForward => {
                self.with_active(VideoView::seek_forward);
                Some(Task::none())
            }

            Message::SeekBackward => {
                self.with_active(VideoView::seek_backward);
                Some(Task::none())
            }

            Message::ToggleOsd => {
                self.with_active(VideoView::toggle_osd);
                Some(Task::none())
            }

            Message::ToggleDanmaku => {
                let Some(view) = self.ui.views.active_mut() else {
                    return Some(Task::none());
                };
                view.toggle_danmaku();
                let enabled = view.danmaku_on();

                self.core.settings.danmaku.enabled = enabled;
                if let Err(e) = self.core.settings.save() {
                    tracing::warn!("Failed to save danmaku preference: {}", e);
                }
                Some(Task::none())
            }

            Message::ToggleFullscreen => {
                let effect = if self.ui.views.is_fullscreen() {
                    ViewEffect::ExitFullscreen
                } else {
                    ViewEffect::EnterFullscreen
                };
                Some(self.apply_effect(effect))
            }

            Message::Primary => {
                let effect = self.ui.views.active_mut().and_then(VideoView::primary);
                Some(self.apply_optional(effect))
            }

            Message::Cancel => {
                let effect = self.ui.views.active_mut().and_then(VideoView::cancel);
                Some(self.apply_optional(effect))
            }

            Message::SeekPreview(fraction) => {
                let fraction = *fraction;
                self.with_active(|view| view.preview_seek(fraction));
                Some(Task::none())
            }

            Message::SeekRelease => {
                self.with_active(VideoView::commit_seek);
                Some(Task::none())
            }

            Message::SpeedPress => {
                self.with_active(VideoView::speed_press);
                Some(Task::none())
            }

            Message::SpeedRelease => {
                self.with_active(VideoView::speed_release);
                Some(Task::none())
            }

            _ => None,
        }
    }

    fn with_active(&mut self, action: impl FnOnce(&mut VideoView)) {
        match self.ui.views.active_mut() {
            Some(view) => action(view),
            None => tracing::debug!("No active video view"),
        }
    }

    fn apply_optional(&mut self, effect: Option<ViewEffect>) -> Task<Message> {
        match effect {
            Some(effect) => self.apply_effect(effect),
            None => Task::none(),
        }
    }

    /// Carry out something a view asked for
    pub(crate) fn apply_effect(&mut self, effect: ViewEffect) -> Task<Message> {
        match effect {
            ViewEffect::EnterFullscreen => match self.ui.views.enter_fullscreen() {
                Ok(stream) => {
                    let forward = stream.map(forward_events).unwrap_or_else(Task::none);
                    Task::batch([self.set_window_mode(Mode::Fullscreen), forward])
                }
                Err(e) => {
                    tracing::debug!("Fullscreen not entered: {}", e);
                    Task::none()
                }
            },

            ViewEffect::ExitFullscreen => match self.ui.views.exit_fullscreen() {
                Ok(stream) => {
                    let forward = stream.map(forward_events).unwrap_or_else(Task::none);
                    Task::batch([self.set_window_mode(Mode::Windowed), forward])
                }
                Err(FullscreenError::MissingOrigin) => {
                    if self.ui.views.is_empty() {
                        self.shutdown()
                    } else {
                        self.set_window_mode(Mode::Windowed)
                    }
                }
                Err(e) => {
                    tracing::debug!("Fullscreen not exited: {}", e);
                    Task::none()
                }
            },

            ViewEffect::Close => {
                if let Some(id) = self.ui.views.active().map(VideoView::id) {
                    self.ui.views.remove(id);
                }
                if self.ui.views.is_empty() {
                    self.shutdown()
                } else {
                    Task::none()
                }
            }
        }
    }

    fn set_window_mode(&mut self, mode: Mode) -> Task<Message> {
        match self.ui.window_id {
            Some(id) => iced::window::set_mode(id, mode),
            None => iced::window::latest().and_then(move |id| iced::window::set_mode(id, mode)),
        }
    }
}
