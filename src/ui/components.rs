//! Business-specific UI components with Message handling

pub mod player_osd;
