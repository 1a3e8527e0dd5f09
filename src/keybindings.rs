use std::collections::HashMap;
use std::fmt;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub use crate::actions::Action;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCombo {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

impl KeyCombo {
    pub fn new(code: KeyCode, mods: KeyModifiers) -> Self {
        Self { code, mods }
    }

    pub fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    pub fn matches(&self, key: &KeyEvent) -> bool {
        let same_code = match (key.code, self.code) {
            (KeyCode::Char(a), KeyCode::Char(b)) if self.mods.contains(KeyModifiers::CONTROL) => {
                a.eq_ignore_ascii_case(&b)
            }
            (a, b) => a == b,
        };
        if !same_code {
            return false;
        }
        // Terminals disagree on whether Ctrl+letter reports SHIFT; only the
        // control/alt bits are significant.
        let significant = KeyModifiers::CONTROL | KeyModifiers::ALT;
        (key.modifiers & significant) == (self.mods & significant)
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
            KeyCode::Tab => "Tab".to_string(),
            KeyCode::BackTab => "Shift+Tab".to_string(),
            KeyCode::Backspace => "Backspace".to_string(),
            KeyCode::Left => "Left".to_string(),
            KeyCode::Right => "Right".to_string(),
            KeyCode::Up => "Up".to_string(),
            KeyCode::Down => "Down".to_string(),
            KeyCode::Home => "Home".to_string(),
            KeyCode::End => "End".to_string(),
            KeyCode::PageUp => "PageUp".to_string(),
            KeyCode::PageDown => "PageDown".to_string(),
            KeyCode::Delete => "Delete".to_string(),
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

impl Default for KeyBindings {
    fn default() -> Self {
        use Action::*;
        let mut kb = Self::new();
        kb.add(Exit, KeyCombo::ctrl('q'));
        kb.add(CycleWindow, KeyCombo::plain(KeyCode::Tab));
        kb.add(ToggleMenu, KeyCombo::plain(KeyCode::F(10)));
        kb.add(CloseMenu, KeyCombo::plain(KeyCode::Esc));
        // Menu navigation
        kb.add(MenuUp, KeyCombo::plain(KeyCode::Up));
        kb.add(MenuDown, KeyCombo::plain(KeyCode::Down));
        kb.add(MenuLeft, KeyCombo::plain(KeyCode::Left));
        kb.add(MenuRight, KeyCombo::plain(KeyCode::Right));
        kb.add(MenuSelect, KeyCombo::plain(KeyCode::Enter));
        // Dialog buttons
        kb.add(ConfirmLeft, KeyCombo::plain(KeyCode::Left));
        kb.add(ConfirmLeft, KeyCombo::plain(KeyCode::BackTab));
        kb.add(ConfirmRight, KeyCombo::plain(KeyCode::Right));
        kb.add(ConfirmRight, KeyCombo::plain(KeyCode::Tab));
        kb.add(ConfirmAccept, KeyCombo::plain(KeyCode::Enter));
        kb.add(ConfirmCancel, KeyCombo::plain(KeyCode::Esc));
        // Notepad
        kb.add(Save, KeyCombo::ctrl('s'));
        kb.add(ToggleWrap, KeyCombo::ctrl('w'));
        // File manager
        kb.add(OpenSelected, KeyCombo::plain(KeyCode::Enter));
        kb.add(ParentDirectory, KeyCombo::plain(KeyCode::Backspace));
        kb.add(ToggleHidden, KeyCombo::plain(KeyCode::Char('.')));
        kb.add(Refresh, KeyCombo::plain(KeyCode::F(5)));
        kb
    }
}

impl KeyBindings {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
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

    /// First action among `candidates` bound to `key`. Callers pass only the
    /// actions valid in their context so shared keys (Enter, arrows) resolve
    /// deterministically.
    pub fn action_among(&self, key: &KeyEvent, candidates: &[Action]) -> Option<Action> {
        candidates.iter().copied().find(|a| self.matches(*a, key))
    }

    /// Return the display strings for all combos mapped to `action`.
    pub fn combos_for(&self, action: Action) -> Vec<String> {
        self.map
            .get(&action)
            .map(|list| list.iter().map(|c| c.display()).collect())
            .unwrap_or_default()
    }

    /// Return the first `KeyCombo` mapped to `action`, if any.
    pub fn first_combo(&self, action: Action) -> Option<KeyCombo> {
        self.map.get(&action).and_then(|list| list.first().cloned())
    }
}
