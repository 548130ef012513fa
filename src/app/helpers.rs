//! Async helpers run at startup

use std::sync::Arc;

use crate::danmaku::SharedFontSystem;

/// Initialize font system for danmaku text shaping
/// We do it in a background thread
pub async fn init_font_system() -> Option<SharedFontSystem> {
    let result = tokio::task::spawn_blocking(|| {
        tracing::info!("Initializing FontSystem for danmaku...");
        let start = std::time::Instant::now();
        let font_system = cosmic_text::FontSystem::new();
        tracing::info!("FontSystem initialized in {:?}", start.elapsed());

        let font_system = Arc::new(parking_lot::Mutex::new(font_system));
        warm_up_font_cache(&font_system);

        font_system
    })
    .await;

    match result {
        Ok(font_system) => Some(font_system),
        Err(e) => {
            tracing::error!("FontSystem initialization failed: {}", e);
            None
        }
    }
}

/// Warm up font cache with the scripts danmaku usually mixes
/// so the first busy second of comments doesn't stall on fallback lookup
fn warm_up_font_cache(font_system: &SharedFontSystem) {
    use cosmic_text::{Attrs, Buffer, Family, Metrics, Shaping};

    let start = std::time::Instant::now();

    let warmup_texts = [
        "The quick brown fox jumps over the lazy dog",
        "前方高能，弹幕护体！哈哈哈哈",
        "こんにちは、ここ好き",
        "0123456789 !?~()（）【】",
    ];

    let mut fs = font_system.lock();
    let metrics = Metrics::new(30.0, 30.0 * 1.2);
    let mut buffer = Buffer::new(&mut fs, metrics);
    buffer.set_size(&mut fs, None, None);

    let attrs = Attrs::new().family(Family::SansSerif);

    for text in warmup_texts {
        buffer.set_text(&mut fs, text, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(&mut fs, false);
    }

    tracing::info!("Font cache warmed up in {:?}", start.elapsed());
}
