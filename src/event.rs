//! Normalised input events.
//!
//! The drivers translate raw terminal events into these so the window
//! manager never sees backend specifics like button masks or key release
//! events, and tests can script input without a terminal.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseKind {
    Press,
    Release,
    DoubleClick,
    Drag,
    Move,
    ScrollUp,
    ScrollDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseInput {
    pub column: u16,
    pub row: u16,
    pub kind: MouseKind,
}

impl MouseInput {
    pub const fn new(column: u16, row: u16, kind: MouseKind) -> Self {
        Self { column, row, kind }
    }

    /// Presses and double clicks both start an interaction at the cell.
    pub fn is_press(&self) -> bool {
        matches!(self.kind, MouseKind::Press | MouseKind::DoubleClick)
    }

    pub fn is_scroll(&self) -> bool {
        matches!(self.kind, MouseKind::ScrollUp | MouseKind::ScrollDown)
    }

    /// Same event translated so `(origin_x, origin_y)` becomes `(0, 0)`.
    pub fn localized(&self, origin_x: u16, origin_y: u16) -> Self {
        Self {
            column: self.column.saturating_sub(origin_x),
            row: self.row.saturating_sub(origin_y),
            kind: self.kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyEvent),
    Mouse(MouseInput),
    Resize(u16, u16),
}

impl InputEvent {
    pub fn key(code: KeyCode) -> Self {
        InputEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    pub fn ctrl(c: char) -> Self {
        InputEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    pub fn mouse(column: u16, row: u16, kind: MouseKind) -> Self {
        InputEvent::Mouse(MouseInput::new(column, row, kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn localized_saturates_at_origin() {
        let m = MouseInput::new(3, 2, MouseKind::Press);
        let local = m.localized(5, 1);
        assert_eq!((local.column, local.row), (0, 1));
        assert_eq!(local.kind, MouseKind::Press);
    }

    #[test]
    fn double_click_counts_as_press() {
        assert!(MouseInput::new(0, 0, MouseKind::DoubleClick).is_press());
        assert!(!MouseInput::new(0, 0, MouseKind::Drag).is_press());
        assert!(MouseInput::new(0, 0, MouseKind::ScrollDown).is_scroll());
    }
}
