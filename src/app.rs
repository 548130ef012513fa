//! Main application module

pub mod helpers;
mod message;
mod state;
mod update;
mod view;

use std::sync::Arc;

use iced::{Task, Theme};

use crate::danmaku::{DanmakuScheduler, EstimatedMeasure};
use crate::i18n::{Key, Language, Locale};
use crate::ui::video_view::{EventStream, SharedCore, VideoView, ViewOptions};
use crate::utils::MonotonicClock;
pub use message::Message;
pub use state::{App, CoreState, Launch, UiState};

/// Initial window size
const WINDOW_SIZE: iced::Size = iced::Size::new(1280.0, 720.0);

impl App {
    /// Create new application instance
    pub fn new(player: SharedCore, launch: Launch) -> (Self, Task<Message>) {
        // 1. Load settings first to initialize locale correctly
        let settings = crate::features::Settings::load();
        let locale = Locale::new(Language::from_code(&settings.display.language));

        player.set_danmaku_visible(settings.danmaku.enabled);

        // A referrer given on the command line wins over the configured one
        let media = launch.media.map(|request| {
            match (&request.referrer, &settings.player.referrer) {
                (None, Some(referrer)) => request.with_referrer(referrer.clone()),
                _ => request,
            }
        });

        // 2. Initialize sub-states
        let clock = Arc::new(MonotonicClock::new());
        let scheduler =
            DanmakuScheduler::new(settings.danmaku.to_config(), Arc::new(EstimatedMeasure));
        let mut view = VideoView::new(
            player.clone(),
            clock.clone(),
            ViewOptions::from(&settings.player),
            scheduler,
        );
        view.set_title(
            launch
                .title
                .clone()
                .unwrap_or_else(|| locale.get(Key::Untitled).to_string()),
        );
        view.set_online_count(launch.online_count);

        let core = CoreState::new(player.clone(), clock, settings, locale);
        let mut ui = UiState::new(WINDOW_SIZE);
        let stream = ui.views.push(view);

        // 3. Open main window
        let (window_id, open_window) = iced::window::open(iced::window::Settings {
            size: WINDOW_SIZE,
            exit_on_close_request: false,
            #[cfg(target_os = "linux")]
            platform_specific: iced::window::settings::PlatformSpecific {
                application_id: "danmu-tv".to_string(),
                ..Default::default()
            },
            ..Default::default()
        });
        tracing::info!("Opening main window with id: {:?}", window_id);
        ui.window_id = Some(window_id);

        let app = Self { core, ui };

        // 4. Initialize async tasks
        let mut tasks = vec![
            open_window.discard(),
            Task::perform(helpers::init_font_system(), |font_system| {
                match font_system {
                    Some(font_system) => Message::FontSystemReady(font_system),
                    None => Message::Noop,
                }
            }),
        ];
        if let Some(stream) = stream {
            tasks.push(forward_events(stream));
        }

        // The core clears its comment buffer on load, so danmaku goes second
        if let Some(request) = media {
            player.load_media(request);
            if let Some(path) = launch.danmaku {
                player.load_danmaku(path);
            }
        }
        if launch.fullscreen {
            tasks.push(Task::done(Message::ToggleFullscreen));
        }

        (app, Task::batch(tasks))
    }

    /// Application theme for a specific window
    pub fn theme(&self, _window_id: iced::window::Id) -> Theme {
        if self.core.settings.display.dark_mode {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    /// Window title from the active video
    pub fn title(&self, _window_id: iced::window::Id) -> String {
        let app_name = self.core.locale.get(Key::AppName);
        match self.ui.views.active() {
            Some(view) if !view.title().is_empty() => format!("{} - {}", app_name, view.title()),
            _ => app_name.to_string(),
        }
    }

    /// Subscriptions for frame ticks, keyboard events, and window events
    pub fn subscription(&self) -> iced::Subscription<Message> {
        use iced::keyboard;
        use iced::time::Duration;

        let power_saving = self.core.settings.display.power_saving_mode;

        // 1. Keyboard events, releases drive the hold gesture
        let keyboard_sub = keyboard::listen().filter_map(|event| match event {
            keyboard::Event::KeyPressed { key, modifiers, .. } => {
                Some(Message::KeyPressed(key, modifiers))
            }
            keyboard::Event::KeyReleased { key, modifiers, .. } => {
                Some(Message::KeyReleased(key, modifiers))
            }
            _ => None,
        });

        // 2. Window events
        let close_request_sub = iced::window::close_requests().map(|_id| Message::RequestClose);
        let resize_sub =
            iced::window::resize_events().map(|(_id, size)| Message::WindowResized(size));

        // 3. Frame ticks while a video surface is on screen (vsync, or 10Hz when saving power)
        let frame_sub = if self.ui.views.is_empty() {
            iced::Subscription::none()
        } else if power_saving {
            iced::time::every(Duration::from_millis(100)).map(|_| Message::Frame)
        } else {
            iced::window::frames().map(|_| Message::Frame)
        };

        iced::Subscription::batch([keyboard_sub, close_request_sub, resize_sub, frame_sub])
    }
}

/// Marshal a view's player events onto the UI thread as messages
pub(crate) fn forward_events(stream: EventStream) -> Task<Message> {
    let EventStream { id, mut receiver } = stream;
    tracing::debug!("Forwarding player events for subscription {}", id);
    Task::stream(async_stream::stream! {
        while let Some(event) = receiver.recv().await {
            yield Message::PlayerEvent(id, event);
        }
        yield Message::PlayerEventsEnded(id);
    })
}
