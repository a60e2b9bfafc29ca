use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};

/// Cleans up raw key events before they reach the keybinding table.
///
/// Single-letter call controls are toggles, so an auto-repeat or a release
/// event would flip them back. Only presses survive. Shifted letters are
/// folded to lowercase so `M` mutes just like `m`.
#[derive(Debug, Default)]
pub struct KeyboardNormalizer;

impl KeyboardNormalizer {
    pub fn new() -> Self {
        Self
    }

    pub fn normalize(&mut self, evt: Event) -> Option<Event> {
        match evt {
            Event::Key(mut key) => {
                if key.kind != KeyEventKind::Press {
                    return None;
                }
                if let KeyCode::Char(c) = key.code
                    && c.is_ascii_uppercase()
                    && !key.modifiers.contains(KeyModifiers::CONTROL)
                {
                    key.code = KeyCode::Char(c.to_ascii_lowercase());
                    key.modifiers.remove(KeyModifiers::SHIFT);
                }
                Some(Event::Key(key))
            }
            other => Some(other),
        }
    }
}
