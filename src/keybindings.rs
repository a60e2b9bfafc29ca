use std::collections::HashMap;
use std::fmt;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::actions::Action;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCombo {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

impl KeyCombo {
    pub fn new(code: KeyCode, mods: KeyModifiers) -> Self {
        Self { code, mods }
    }

    pub fn matches(&self, key: &KeyEvent) -> bool {
        key.code == self.code && key.modifiers == self.mods
    }

    pub fn display(&self) -> String {
        let mut parts = Vec::new();
        if self.mods.contains(KeyModifiers::CONTROL) {
            parts.push("Ctrl".to_string());
        }
        if self.mods.contains(KeyModifiers::SHIFT) {
            parts.push("Shift".to_string());
        }
        if self.mods.contains(KeyModifiers::ALT) {
            parts.push("Alt".to_string());
        }
        let code = match self.code {
            KeyCode::Char(c) => c.to_ascii_uppercase().to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::F(n) => format!("F{}", n),
            _ => format!("{:?}", self.code),
        };
        parts.push(code);
        parts.join("+")
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[derive(Debug, Clone)]
pub struct KeyBindings {
    map: HashMap<Action, Vec<KeyCombo>>,
}

impl KeyBindings {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    pub fn defaults() -> Self {
        use Action::*;
        let mut kb = Self::new();
        kb.add(
            Quit,
            KeyCombo::new(KeyCode::Char('q'), KeyModifiers::CONTROL),
        );
        kb.add(
            StartVideoCall,
            KeyCombo::new(KeyCode::Char('v'), KeyModifiers::NONE),
        );
        kb.add(
            StartVoiceCall,
            KeyCombo::new(KeyCode::Char('a'), KeyModifiers::NONE),
        );
        kb.add(
            ToggleMute,
            KeyCombo::new(KeyCode::Char('m'), KeyModifiers::NONE),
        );
        kb.add(
            ToggleCamera,
            KeyCombo::new(KeyCode::Char('c'), KeyModifiers::NONE),
        );
        kb.add(
            ToggleMinimize,
            KeyCombo::new(KeyCode::Char('z'), KeyModifiers::NONE),
        );
        kb.add(EndCall, KeyCombo::new(KeyCode::Char('e'), KeyModifiers::NONE));
        for n in 1..=9u8 {
            let digit = char::from(b'0' + n);
            kb.add(
                HangupPeer(n),
                KeyCombo::new(KeyCode::Char(digit), KeyModifiers::NONE),
            );
        }
        kb
    }

    pub fn add(&mut self, action: Action, combo: KeyCombo) {
        self.map.entry(action).or_default().push(combo);
    }

    pub fn matches(&self, action: Action, key: &KeyEvent) -> bool {
        if let Some(list) = self.map.get(&action) {
            list.iter().any(|c| c.matches(key))
        } else {
            false
        }
    }

    pub fn action_for_key(&self, key: &KeyEvent) -> Option<Action> {
        for (act, list) in &self.map {
            if list.iter().any(|c| c.matches(key)) {
                return Some(*act);
            }
        }
        None
    }

    /// One `keys label` pair per action, in a stable order for the status bar.
    pub fn hints(&self, actions: &[Action]) -> Vec<String> {
        actions
            .iter()
            .filter_map(|action| {
                self.first_combo(*action)
                    .map(|combo| format!("{} {}", combo.display().to_lowercase(), action))
            })
            .collect()
    }

    /// Return the first `KeyCombo` mapped to `action`, if any.
    pub fn first_combo(&self, action: Action) -> Option<KeyCombo> {
        self.map.get(&action).and_then(|list| list.first().cloned())
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    #[test]
    fn defaults_match_quit() {
        let kb = KeyBindings::default();
        let ev = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert!(kb.matches(Action::Quit, &ev));
        let plain_q = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert_eq!(kb.action_for_key(&plain_q), None);
    }

    #[test]
    fn call_controls_have_single_letter_keys() {
        let kb = KeyBindings::default();
        let key = |c| KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE);
        assert_eq!(kb.action_for_key(&key('v')), Some(Action::StartVideoCall));
        assert_eq!(kb.action_for_key(&key('a')), Some(Action::StartVoiceCall));
        assert_eq!(kb.action_for_key(&key('m')), Some(Action::ToggleMute));
        assert_eq!(kb.action_for_key(&key('c')), Some(Action::ToggleCamera));
        assert_eq!(kb.action_for_key(&key('z')), Some(Action::ToggleMinimize));
        assert_eq!(kb.action_for_key(&key('e')), Some(Action::EndCall));
    }

    #[test]
    fn digits_map_to_peer_hangup() {
        let kb = KeyBindings::default();
        let ev = KeyEvent::new(KeyCode::Char('3'), KeyModifiers::NONE);
        assert_eq!(kb.action_for_key(&ev), Some(Action::HangupPeer(3)));
        let zero = KeyEvent::new(KeyCode::Char('0'), KeyModifiers::NONE);
        assert_eq!(kb.action_for_key(&zero), None);
    }

    #[test]
    fn hints_follow_requested_order() {
        let kb = KeyBindings::default();
        let hints = kb.hints(&[Action::ToggleMute, Action::Quit]);
        assert_eq!(hints, vec!["m Mute / unmute", "ctrl+q Quit"]);
    }
}
