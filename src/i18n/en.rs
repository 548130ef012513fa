//! English translations

use super::Key;
use once_cell::sync::Lazy;
use std::collections::HashMap;

static TRANSLATIONS: Lazy<HashMap<Key, &'static str>> = Lazy::new(|| {
    let mut m = HashMap::new();

    m.insert(Key::AppName, "Danmu TV");

    // OSD
    m.insert(Key::Untitled, "Untitled");
    m.insert(Key::OnlineCount, "{} watching");
    m.insert(Key::Loading, "Loading");
    m.insert(Key::Play, "Play");
    m.insert(Key::Pause, "Pause");
    m.insert(Key::DanmakuOn, "Danmaku on");
    m.insert(Key::DanmakuOff, "Danmaku off");
    m.insert(Key::EnterFullscreen, "Fullscreen");
    m.insert(Key::ExitFullscreen, "Exit fullscreen");
    m.insert(Key::SpeedBoost, "{}x");
    m.insert(Key::SeekForward, "Forward");
    m.insert(Key::SeekBackward, "Back");

    m
});

pub fn translations() -> &'static HashMap<Key, &'static str> {
    &TRANSLATIONS
}
