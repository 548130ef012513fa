//! Comment text width measurement
//!
//! Lane allocation needs the pixel length of a comment before it is drawn.
//! `CosmicMeasure` shapes the text with cosmic-text once the font system is
//! loaded; until then `EstimatedMeasure` approximates from character classes.

use std::collections::HashMap;
use std::sync::Arc;

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping};
use parking_lot::Mutex;

/// Shared font system, created once off the UI thread
pub type SharedFontSystem = Arc<Mutex<FontSystem>>;

/// Measures single-line text width in pixels
pub trait TextMeasure: Send + Sync {
    fn measure(&self, text: &str, font_size: f32) -> f32;
}

/// Width estimate without shaping
///
/// Wide (CJK, fullwidth) characters count as one em, everything else as 0.55 em.
#[derive(Debug, Clone, Copy, Default)]
pub struct EstimatedMeasure;

impl EstimatedMeasure {
    fn is_wide(c: char) -> bool {
        matches!(c as u32,
            0x1100..=0x115F
            | 0x2E80..=0x303E
            | 0x3041..=0x33FF
            | 0x3400..=0x4DBF
            | 0x4E00..=0x9FFF
            | 0xA000..=0xA4CF
            | 0xAC00..=0xD7A3
            | 0xF900..=0xFAFF
            | 0xFE30..=0xFE4F
            | 0xFF00..=0xFF60
            | 0xFFE0..=0xFFE6
            | 0x1F300..=0x1F64F
            | 0x1F900..=0x1F9FF
            | 0x20000..=0x2FFFD)
    }
}

impl TextMeasure for EstimatedMeasure {
    fn measure(&self, text: &str, font_size: f32) -> f32 {
        text.chars()
            .map(|c| if Self::is_wide(c) { 1.0 } else { 0.55 })
            .sum::<f32>()
            * font_size
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct MeasureKey {
    text: String,
    /// Font size * 100, rounded
    font_size_x100: u32,
}

/// Width from cosmic-text shaping, cached per text and size
pub struct CosmicMeasure {
    font_system: SharedFontSystem,
    cache: Mutex<HashMap<MeasureKey, f32>>,
}

impl std::fmt::Debug for CosmicMeasure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CosmicMeasure")
            .field("cached", &self.cache.lock().len())
            .finish_non_exhaustive()
    }
}

impl CosmicMeasure {
    const CACHE_LIMIT: usize = 4096;

    pub fn new(font_system: SharedFontSystem) -> Self {
        Self {
            font_system,
            cache: Mutex::new(HashMap::new()),
        }
    }

    fn measure_uncached(&self, text: &str, font_size: f32) -> f32 {
        let mut font_system = self.font_system.lock();

        let metrics = Metrics::new(font_size, font_size * 1.4);
        let mut buffer = Buffer::new(&mut font_system, metrics);
        // Unbounded width keeps the comment on one line
        buffer.set_size(&mut font_system, None, None);

        let attrs = Attrs::new().family(Family::SansSerif);
        buffer.set_text(&mut font_system, text, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(&mut font_system, false);

        buffer
            .layout_runs()
            .map(|run| run.line_w)
            .fold(0.0f32, f32::max)
    }
}

impl TextMeasure for CosmicMeasure {
    fn measure(&self, text: &str, font_size: f32) -> f32 {
        if text.is_empty() {
            return 0.0;
        }

        let key = MeasureKey {
            text: text.to_string(),
            font_size_x100: (font_size * 100.0).round() as u32,
        };
        if let Some(width) = self.cache.lock().get(&key) {
            return *width;
        }

        let width = self.measure_uncached(text, font_size);

        let mut cache = self.cache.lock();
        if cache.len() > Self::CACHE_LIMIT {
            cache.clear();
        }
        cache.insert(key, width);
        width
    }
}

impl<T: TextMeasure + ?Sized> TextMeasure for Arc<T> {
    fn measure(&self, text: &str, font_size: f32) -> f32 {
        (**self).measure(text, font_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_ascii() {
        let width = EstimatedMeasure.measure("abcd", 20.0);
        assert!((width - 44.0).abs() < 1e-3);
    }

    #[test]
    fn test_estimate_cjk_is_one_em() {
        assert_eq!(EstimatedMeasure.measure("弹幕", 30.0), 60.0);
        assert_eq!(EstimatedMeasure.measure("ｗ", 30.0), 30.0);
    }

    #[test]
    fn test_estimate_empty() {
        assert_eq!(EstimatedMeasure.measure("", 30.0), 0.0);
    }

    #[test]
    fn test_estimate_scales_with_font() {
        let small = EstimatedMeasure.measure("mixed 文字", 10.0);
        let large = EstimatedMeasure.measure("mixed 文字", 20.0);
        assert!((large - small * 2.0).abs() < 1e-3);
    }

    #[test]
    fn test_arc_forwarding() {
        let measure: Arc<dyn TextMeasure> = Arc::new(EstimatedMeasure);
        assert_eq!(measure.measure("字", 30.0), 30.0);
    }
}
