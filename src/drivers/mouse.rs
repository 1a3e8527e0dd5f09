use std::time::{Duration, Instant};

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::constants::DOUBLE_CLICK_WINDOW;
use crate::event::{MouseInput, MouseKind};

/// Turns raw mouse reports into [`MouseInput`]s. Only the left button
/// drives the desktop; a second left press on the same cell within the
/// double-click window is reported as [`MouseKind::DoubleClick`].
#[derive(Debug)]
pub struct MouseNormalizer {
    last_press: Option<(u16, u16, Instant)>,
    double_click: Duration,
}

impl Default for MouseNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl MouseNormalizer {
    pub fn new() -> Self {
        Self {
            last_press: None,
            double_click: DOUBLE_CLICK_WINDOW,
        }
    }

    pub fn normalize(&mut self, event: MouseEvent) -> Option<MouseInput> {
        self.normalize_at(event, Instant::now())
    }

    pub fn normalize_at(&mut self, event: MouseEvent, now: Instant) -> Option<MouseInput> {
        let (column, row) = (event.column, event.row);
        let kind = match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some((x, y, at)) = self.last_press
                    && x == column
                    && y == row
                    && now.duration_since(at) <= self.double_click
                {
                    self.last_press = None;
                    MouseKind::DoubleClick
                } else {
                    self.last_press = Some((column, row, now));
                    MouseKind::Press
                }
            }
            MouseEventKind::Down(_) => return None,
            MouseEventKind::Up(_) => MouseKind::Release,
            MouseEventKind::Drag(MouseButton::Left) => MouseKind::Drag,
            MouseEventKind::Drag(_) => return None,
            MouseEventKind::Moved => MouseKind::Move,
            MouseEventKind::ScrollUp => MouseKind::ScrollUp,
            MouseEventKind::ScrollDown => MouseKind::ScrollDown,
            MouseEventKind::ScrollLeft | MouseEventKind::ScrollRight => return None,
        };
        Some(MouseInput { column, row, kind })
    }
}
