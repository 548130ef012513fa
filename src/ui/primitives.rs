//! Primitive UI elements - atomic building blocks
//!
//! Canvas programs with no dependency on `crate::app`:
//!
//! - [`DanmakuOverlay`] - Paints scheduled danmaku comments
//! - [`LoadingRing`] - Spinning buffering indicator

pub mod danmaku_overlay;
pub mod loading_ring;

pub use danmaku_overlay::DanmakuOverlay;
pub use loading_ring::LoadingRing;
