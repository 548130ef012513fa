//! Media load requests
//!
//! Builds the URL and per-file option string handed to the player core's
//! `loadfile` command. Multi-segment sources are joined into an `edl://`
//! playlist.

/// One segment of a multi-part source
#[derive(Debug, Clone, PartialEq)]
pub struct EdlSegment {
    pub url: String,
    /// Segment length in seconds, `None` when unknown
    pub length: Option<f64>,
}

impl EdlSegment {
    pub fn new(url: impl Into<String>, length: Option<f64>) -> Self {
        Self {
            url: url.into(),
            length,
        }
    }
}

/// Everything needed to open one media item
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LoadRequest {
    pub url: String,
    pub referrer: Option<String>,
    /// Start offset in whole seconds
    pub start: u64,
    /// Separate audio track
    pub audio: Option<String>,
    /// Total duration when known up front (EDL lengths or caller supplied)
    pub duration_hint: Option<f64>,
}

impl LoadRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Join segments into an `edl://` playlist
    ///
    /// When every segment length is known each one is opened lazily with a
    /// `length=` hint and the lengths add up to the duration hint. A single
    /// unknown length disables both.
    pub fn edl(segments: &[EdlSegment]) -> Self {
        let lengths: Option<Vec<f64>> = segments.iter().map(|s| s.length).collect();

        let parts: Vec<String> = segments
            .iter()
            .map(|segment| {
                let escaped = format!("%{}%{}", segment.url.len(), segment.url);
                match (&lengths, segment.length) {
                    (Some(_), Some(length)) => format!(
                        "!delay_open,media_type=video;!delay_open,media_type=audio;{},length={}",
                        escaped, length
                    ),
                    _ => escaped,
                }
            })
            .collect();

        Self {
            url: format!("edl://{}", parts.join(";")),
            duration_hint: lengths.map(|l| l.iter().sum::<f64>()),
            ..Default::default()
        }
    }

    pub fn with_referrer(mut self, referrer: impl Into<String>) -> Self {
        self.referrer = Some(referrer.into());
        self
    }

    /// Start offset; negative values start from the beginning
    pub fn with_start(mut self, seconds: i64) -> Self {
        self.start = seconds.max(0) as u64;
        self
    }

    pub fn with_audio(mut self, audio: impl Into<String>) -> Self {
        let audio = audio.into();
        self.audio = (!audio.is_empty()).then_some(audio);
        self
    }

    pub fn with_duration_hint(mut self, duration: f64) -> Self {
        if duration.is_finite() && duration > 0.0 {
            self.duration_hint = Some(duration);
        }
        self
    }

    /// Comma-separated per-file options
    pub fn options(&self) -> String {
        let mut options = Vec::new();
        if let Some(referrer) = &self.referrer {
            options.push(format!("referrer={}", referrer));
        }
        if self.start > 0 {
            options.push(format!("start={}", self.start));
        }
        if let Some(audio) = &self.audio {
            options.push(format!("audio-file=\"{}\"", audio));
        }
        options.join(",")
    }
}
