//! UI module for the danmaku video player
//!
//! # Architecture
//!
//! The UI is organized into layers:
//!
//! - **State** (`video_view`, `fullscreen`, `osd`, `gesture`): toolkit-free view logic
//! - **Primitives** (`primitives`): Canvas programs
//! - **Widgets** (`widgets`): Composable UI patterns without business logic
//! - **Components** (`components`): Business-specific UI with Message handling
//! - **Pages** (`pages`): Full-window layouts

pub mod components;
pub mod fullscreen;
pub mod gesture;
pub mod icons;
pub mod osd;
pub mod pages;
pub mod primitives;
pub mod theme;
pub mod video_view;
pub mod widgets;
