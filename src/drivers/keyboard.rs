// `KeyboardNormalizer` folds platform key quirks into one shape before the
// window manager sees them: Shift+Tab becomes BackTab and release/repeat
// events are dropped. Queueing lives in `console.rs`.
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, Default)]
pub struct KeyboardNormalizer {
    esc_down: bool,
}

impl KeyboardNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn normalize(&mut self, mut key: KeyEvent) -> Option<KeyEvent> {
        if key.code == KeyCode::Tab && key.modifiers.contains(KeyModifiers::SHIFT) {
            key.code = KeyCode::BackTab;
            key.modifiers.remove(KeyModifiers::SHIFT);
        }
        match key.kind {
            KeyEventKind::Release => {
                if key.code == KeyCode::Esc {
                    self.esc_down = false;
                }
                return None;
            }
            KeyEventKind::Repeat => return None,
            KeyEventKind::Press => {}
        }
        // Windows consoles report a held Esc as a stream of presses.
        if cfg!(windows) && key.code == KeyCode::Esc {
            if self.esc_down {
                return None;
            }
            self.esc_down = true;
        } else {
            self.esc_down = false;
        }
        // Uppercase letters arrive with SHIFT set; the character already
        // carries the case, so drop the modifier to keep bindings simple.
        if let KeyCode::Char(c) = key.code
            && !c.is_ascii_lowercase()
        {
            key.modifiers.remove(KeyModifiers::SHIFT);
        }
        Some(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

    #[test]
    fn tab_with_shift_becomes_backtab() {
        let mut norm = KeyboardNormalizer::new();
        let key = KeyEvent::new(KeyCode::Tab, KeyModifiers::SHIFT);
        let out = norm.normalize(key).expect("should return event");
        assert!(matches!(out.code, KeyCode::BackTab));
        assert!(!out.modifiers.contains(KeyModifiers::SHIFT));
    }

    #[test]
    fn release_and_repeat_are_ignored() {
        let mut norm = KeyboardNormalizer::new();
        let mut key = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        assert!(norm.normalize(key).is_none());
        key.kind = KeyEventKind::Repeat;
        assert!(norm.normalize(key).is_none());
    }

    #[test]
    fn shifted_letters_lose_the_shift_modifier() {
        let mut norm = KeyboardNormalizer::new();
        let key = KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT);
        let out = norm.normalize(key).expect("press passes through");
        assert_eq!(out.code, KeyCode::Char('A'));
        assert_eq!(out.modifiers, KeyModifiers::NONE);
    }
}
