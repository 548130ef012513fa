//! danmu-tv - A TV-style video client with a danmaku overlay
//! Built with iced for a remote-friendly, dark mode UI

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod danmaku;
mod features;
mod i18n;
mod player;
mod ui;
mod utils;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;

use crate::player::{EdlSegment, LoadRequest};
use crate::ui::video_view::SharedCore;

/// How long to wait for the player thread on exit
const PLAYER_JOIN_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, Parser)]
#[command(name = "danmu-tv", version, about)]
struct Args {
    /// Media URL or path; several join into one segmented source
    urls: Vec<String>,

    /// Danmaku XML file for the media
    #[arg(long)]
    danmaku: Option<PathBuf>,

    /// Start offset in seconds
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    start: i64,

    /// Known total duration in seconds
    #[arg(long)]
    duration: Option<f64>,

    /// Length in seconds of each segment, in order
    #[arg(long = "segment-length")]
    segment_lengths: Vec<f64>,

    /// Title shown on the OSD
    #[arg(long)]
    title: Option<String>,

    /// Viewer count shown next to the title
    #[arg(long)]
    online: Option<u64>,

    /// Separate audio track URL
    #[arg(long)]
    audio: Option<String>,

    /// Referrer sent with media requests
    #[arg(long)]
    referrer: Option<String>,

    /// Start in fullscreen
    #[arg(long)]
    fullscreen: bool,
}

impl Args {
    fn load_request(&self) -> Option<LoadRequest> {
        let mut request = match self.urls.as_slice() {
            [] => return None,
            [url] => LoadRequest::new(url.clone()),
            urls => {
                let segments: Vec<EdlSegment> = urls
                    .iter()
                    .enumerate()
                    .map(|(i, url)| EdlSegment::new(url.clone(), self.segment_lengths.get(i).copied()))
                    .collect();
                LoadRequest::edl(&segments)
            }
        };

        request = request.with_start(self.start);
        if let Some(audio) = &self.audio {
            request = request.with_audio(audio.clone());
        }
        if let Some(referrer) = &self.referrer {
            request = request.with_referrer(referrer.clone());
        }
        if let Some(duration) = self.duration {
            request = request.with_duration_hint(duration);
        }
        Some(request)
    }

    fn launch(&self) -> app::Launch {
        app::Launch {
            media: self.load_request(),
            danmaku: self.danmaku.clone(),
            title: self.title.clone(),
            online_count: self.online,
            fullscreen: self.fullscreen,
        }
    }
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let launch = args.launch();
    if launch.media.is_none() {
        tracing::warn!("No media given, starting with an empty player");
    }

    let player_thread = player::spawn_player_thread()?;
    let core: SharedCore = Arc::new(player_thread.handle.clone());

    // Run the application as a daemon so closing is routed through RequestClose
    let result = iced::daemon(
        move || app::App::new(core.clone(), launch.clone()),
        app::App::update,
        app::App::view,
    )
    .title(app::App::title)
    .theme(app::App::theme)
    .subscription(app::App::subscription)
    .antialiasing(true)
    .run();

    if let Err(e) = player_thread.join(PLAYER_JOIN_TIMEOUT) {
        tracing::warn!("{}", e);
    }
    result?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_url_request() {
        let args = Args::parse_from([
            "danmu-tv",
            "https://example.com/v.mp4",
            "--start",
            "-5",
            "--audio",
            "https://example.com/a.m4a",
            "--referrer",
            "https://example.com",
        ]);
        let request = args.load_request().unwrap();
        assert_eq!(request.url, "https://example.com/v.mp4");
        assert_eq!(request.start, 0);
        assert_eq!(request.audio.as_deref(), Some("https://example.com/a.m4a"));
        assert_eq!(request.referrer.as_deref(), Some("https://example.com"));
    }

    #[test]
    fn test_segments_become_edl() {
        let args = Args::parse_from([
            "danmu-tv",
            "a",
            "b",
            "--segment-length",
            "10",
            "--segment-length",
            "20.5",
        ]);
        let request = args.load_request().unwrap();
        assert!(request.url.starts_with("edl://"));
        assert_eq!(request.duration_hint, Some(30.5));
    }

    #[test]
    fn test_no_media() {
        let args = Args::parse_from(["danmu-tv", "--fullscreen", "--title", "Live"]);
        let launch = args.launch();
        assert!(launch.media.is_none());
        assert!(launch.fullscreen);
        assert_eq!(launch.title.as_deref(), Some("Live"));
    }
}
