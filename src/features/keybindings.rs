//! Remote-control style key bindings
//!
//! Maps keyboard and media keys onto video view actions. Bindings are
//! stored in the settings file and fall back to a remote-friendly layout
//! (arrows, Enter, Escape).

use std::collections::HashMap;

use iced::keyboard::{Key, Modifiers};
use serde::{Deserialize, Serialize};

/// All bindable actions in the video view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    PlayPause,
    SeekForward,
    SeekBackward,
    ToggleOsd,
    ToggleDanmaku,
    ToggleFullscreen,
    /// Confirm: enter fullscreen, or toggle play inside it
    Primary,
    /// Back: leave fullscreen, or close the player
    Cancel,
    /// Held for boosted playback speed
    SpeedHold,
}

impl Action {
    /// Get all available actions
    pub fn all() -> &'static [Action] {
        &[
            Action::PlayPause,
            Action::SeekForward,
            Action::SeekBackward,
            Action::ToggleOsd,
            Action::ToggleDanmaku,
            Action::ToggleFullscreen,
            Action::Primary,
            Action::Cancel,
            Action::SpeedHold,
        ]
    }

    /// Actions that also react to key release
    pub fn is_hold(&self) -> bool {
        matches!(self, Action::SpeedHold)
    }
}

/// A keyboard shortcut consisting of modifiers and a key
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyBinding {
    /// Modifier keys (Ctrl, Alt, Shift)
    #[serde(default)]
    pub modifiers: ModifierSet,
    /// The main key
    pub key: KeyCode,
}

impl KeyBinding {
    pub fn new(key: KeyCode) -> Self {
        Self {
            modifiers: ModifierSet::default(),
            key,
        }
    }

    pub fn ctrl(mut self) -> Self {
        self.modifiers.ctrl = true;
        self
    }

    pub fn shift(mut self) -> Self {
        self.modifiers.shift = true;
        self
    }

    /// Check if this keybinding matches the given key event
    pub fn matches(&self, key: &Key, modifiers: &Modifiers) -> bool {
        self.key.matches(key) && self.modifiers.matches(modifiers)
    }

    /// Human-readable form, e.g. `Ctrl+Shift+S`
    pub fn display(&self) -> String {
        let ModifierSet { ctrl, alt, shift } = self.modifiers;
        [(ctrl, "Ctrl"), (alt, "Alt"), (shift, "Shift")]
            .into_iter()
            .filter_map(|(held, name)| held.then_some(name))
            .chain(std::iter::once(self.key.display()))
            .collect::<Vec<_>>()
            .join("+")
    }
}

/// Set of modifier keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ModifierSet {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

impl ModifierSet {
    pub fn matches(&self, modifiers: &Modifiers) -> bool {
        self.ctrl == modifiers.control()
            && self.alt == modifiers.alt()
            && self.shift == modifiers.shift()
    }
}

/// Supported key codes for binding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyCode {
    D,
    F,
    O,
    S,
    Up,
    Down,
    Left,
    Right,
    Space,
    Enter,
    Escape,
    Backspace,
    F11,
    MediaPlayPause,
    MediaFastForward,
    MediaRewind,
    BrowserBack,
}

impl KeyCode {
    /// Check if this key code matches an iced Key
    pub fn matches(&self, key: &Key) -> bool {
        match key {
            Key::Character(c) => {
                let c = c.to_lowercase();
                matches!(
                    (self, c.as_str()),
                    (KeyCode::D, "d") | (KeyCode::F, "f") | (KeyCode::O, "o") | (KeyCode::S, "s")
                )
            }
            Key::Named(named) => {
                use iced::keyboard::key::Named;
                matches!(
                    (self, named),
                    (KeyCode::Space, Named::Space)
                        | (KeyCode::Enter, Named::Enter)
                        | (KeyCode::Escape, Named::Escape)
                        | (KeyCode::Backspace, Named::Backspace)
                        | (KeyCode::Up, Named::ArrowUp)
                        | (KeyCode::Down, Named::ArrowDown)
                        | (KeyCode::Left, Named::ArrowLeft)
                        | (KeyCode::Right, Named::ArrowRight)
                        | (KeyCode::F11, Named::F11)
                        | (KeyCode::MediaPlayPause, Named::MediaPlayPause)
                        | (KeyCode::MediaFastForward, Named::MediaFastForward)
                        | (KeyCode::MediaRewind, Named::MediaRewind)
                        | (KeyCode::BrowserBack, Named::BrowserBack)
                )
            }
            Key::Unidentified => false,
        }
    }

    pub fn display(&self) -> &'static str {
        match self {
            KeyCode::D => "D",
            KeyCode::F => "F",
            KeyCode::O => "O",
            KeyCode::S => "S",
            KeyCode::Up => "↑",
            KeyCode::Down => "↓",
            KeyCode::Left => "←",
            KeyCode::Right => "→",
            KeyCode::Space => "Space",
            KeyCode::Enter => "Enter",
            KeyCode::Escape => "Esc",
            KeyCode::Backspace => "Backspace",
            KeyCode::F11 => "F11",
            KeyCode::MediaPlayPause => "Media Play",
            KeyCode::MediaFastForward => "Media FF",
            KeyCode::MediaRewind => "Media Rew",
            KeyCode::BrowserBack => "Back",
        }
    }
}

/// The keybindings configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyBindings {
    /// Map from action to keybinding
    bindings: HashMap<Action, Vec<KeyBinding>>,
}

impl Default for KeyBindings {
    /// Remote-friendly layout: arrows, OK/Back, media keys
    fn default() -> Self {
        use KeyCode::*;

        let layout: [(Action, &[KeyCode]); 9] = [
            (Action::PlayPause, &[Space, MediaPlayPause]),
            (Action::SeekForward, &[Right, MediaFastForward]),
            (Action::SeekBackward, &[Left, MediaRewind]),
            (Action::ToggleOsd, &[Down, O]),
            (Action::ToggleDanmaku, &[D]),
            (Action::ToggleFullscreen, &[F11, F]),
            (Action::Primary, &[Enter]),
            (Action::Cancel, &[Escape, Backspace, BrowserBack]),
            (Action::SpeedHold, &[Up, S]),
        ];

        let bindings = layout
            .into_iter()
            .map(|(action, keys)| {
                (action, keys.iter().copied().map(KeyBinding::new).collect())
            })
            .collect();

        Self { bindings }
    }
}

impl KeyBindings {
    pub fn get(&self, action: &Action) -> Option<&Vec<KeyBinding>> {
        self.bindings.get(action)
    }

    /// Action bound to a key event, if any
    pub fn find_action(&self, key: &Key, modifiers: &Modifiers) -> Option<Action> {
        self.bindings
            .iter()
            .find(|(_, bindings)| bindings.iter().any(|b| b.matches(key, modifiers)))
            .map(|(action, _)| *action)
    }

    /// First binding of an action, for OSD hints
    pub fn display_for_action(&self, action: &Action) -> String {
        match self.bindings.get(action).and_then(|b| b.first()) {
            Some(binding) => binding.display(),
            None => "-".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use iced::keyboard::key::Named;

    use super::*;

    #[test]
    fn test_every_action_has_a_default() {
        let bindings = KeyBindings::default();
        for action in Action::all() {
            assert!(bindings.get(action).is_some(), "{:?} unbound", action);
        }
    }

    #[test]
    fn test_remote_keys() {
        let bindings = KeyBindings::default();
        let none = Modifiers::empty();
        assert_eq!(
            bindings.find_action(&Key::Named(Named::Enter), &none),
            Some(Action::Primary)
        );
        assert_eq!(
            bindings.find_action(&Key::Named(Named::Escape), &none),
            Some(Action::Cancel)
        );
        assert_eq!(
            bindings.find_action(&Key::Character("D".into()), &none),
            Some(Action::ToggleDanmaku)
        );
        assert_eq!(
            bindings.find_action(&Key::Named(Named::ArrowRight), &Modifiers::CTRL),
            None
        );
    }

    #[test]
    fn test_keybinding_display() {
        let binding = KeyBinding::new(KeyCode::S).ctrl().shift();
        assert_eq!(binding.display(), "Ctrl+Shift+S");
        let bindings = KeyBindings::default();
        assert_eq!(bindings.display_for_action(&Action::Primary), "Enter");
    }

    #[test]
    fn test_override_from_settings_file() {
        let json = r#"{"bindings":{"speed_hold":[{"modifiers":{"ctrl":true},"key":"f"}]}}"#;
        let bindings: KeyBindings = serde_json::from_str(json).unwrap();
        assert!(Action::SpeedHold.is_hold());
        assert!(bindings.get(&Action::Primary).is_none());
        assert_eq!(
            bindings.find_action(&Key::Character("f".into()), &Modifiers::CTRL),
            Some(Action::SpeedHold)
        );
    }
}
