//! Chinese translations

use super::Key;
use once_cell::sync::Lazy;
use std::collections::HashMap;

static TRANSLATIONS: Lazy<HashMap<Key, &'static str>> = Lazy::new(|| {
    let mut m = HashMap::new();

    m.insert(Key::AppName, "弹幕TV");

    // OSD
    m.insert(Key::Untitled, "未命名");
    m.insert(Key::OnlineCount, "{}人在看");
    m.insert(Key::Loading, "加载中");
    m.insert(Key::Play, "播放");
    m.insert(Key::Pause, "暂停");
    m.insert(Key::DanmakuOn, "弹幕开");
    m.insert(Key::DanmakuOff, "弹幕关");
    m.insert(Key::EnterFullscreen, "全屏");
    m.insert(Key::ExitFullscreen, "退出全屏");
    m.insert(Key::SpeedBoost, "{}倍速");
    m.insert(Key::SeekForward, "快进");
    m.insert(Key::SeekBackward, "快退");

    m
});

pub fn translations() -> &'static HashMap<Key, &'static str> {
    &TRANSLATIONS
}
