use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;

use crate::components::{
    BodyEvent, Component, ComponentContext, ScrollState, WindowBody, render_scrollbar,
};
use crate::constants::{PAGE_OVERLAP, WHEEL_STEP};
use crate::event::{MouseInput, MouseKind};
use crate::keybindings::{Action, KeyBindings};
use crate::ui::{UiFrame, truncate_to_width};

/// Read-only lines with vertical scrolling. Used by the welcome, terminal,
/// settings and blank windows.
#[derive(Debug, Clone, Default)]
pub struct TextView {
    lines: Vec<String>,
    scroll: ScrollState,
    area: Rect,
}

impl TextView {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn offset(&self) -> usize {
        self.scroll.offset
    }

    pub fn scroll_by(&mut self, delta: isize) {
        self.scroll.bump(delta);
        self.scroll.apply(self.lines.len(), self.area.height as usize);
    }
}

impl Component for TextView {
    fn resize(&mut self, area: Rect, _ctx: &ComponentContext) {
        self.area = area;
    }

    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
        self.area = area;
        frame.fill(area, " ", crate::theme::body_style());
        let view = area.height as usize;
        self.scroll.apply(self.lines.len(), view);
        let overflow = self.lines.len() > view;
        let width = if overflow {
            area.width.saturating_sub(1)
        } else {
            area.width
        } as usize;
        for (i, line) in self.lines.iter().skip(self.scroll.offset).take(view).enumerate() {
            frame.print(
                area.x,
                area.y + i as u16,
                &truncate_to_width(line, width),
                crate::theme::body_style(),
            );
        }
        if overflow && area.width > 0 {
            let bar = Rect {
                x: area.x + area.width - 1,
                width: 1,
                ..area
            };
            render_scrollbar(frame, bar, self.lines.len(), view, self.scroll.offset, ctx.glyphs());
        }
    }
}

impl WindowBody for TextView {
    fn handle_key(&mut self, key: &KeyEvent, _keys: &KeyBindings) -> BodyEvent {
        let page = (self.area.height as usize).saturating_sub(PAGE_OVERLAP).max(1) as isize;
        match key.code {
            KeyCode::Up => self.scroll_by(-1),
            KeyCode::Down => self.scroll_by(1),
            KeyCode::PageUp => self.scroll_by(-page),
            KeyCode::PageDown => self.scroll_by(page),
            KeyCode::Home => self.scroll_by(isize::MIN),
            KeyCode::End => self.scroll_by(isize::MAX),
            _ => return BodyEvent::Ignored,
        }
        BodyEvent::Handled
    }

    fn handle_mouse(&mut self, mouse: MouseInput) -> BodyEvent {
        match mouse.kind {
            MouseKind::ScrollUp => self.scroll_by(-WHEEL_STEP),
            MouseKind::ScrollDown => self.scroll_by(WHEEL_STEP),
            _ => return BodyEvent::Ignored,
        }
        BodyEvent::Handled
    }

    fn apply_action(&mut self, action: Action) -> BodyEvent {
        match action {
            Action::CloseWindow => BodyEvent::Close,
            _ => BodyEvent::Ignored,
        }
    }
}
