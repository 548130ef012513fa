//! Reusable UI widgets - composable components without business logic
//!
//! Widgets take generic Message types and callbacks; they must not import
//! `crate::app::Message`.

pub mod osd_button;
pub mod progress_slider;
