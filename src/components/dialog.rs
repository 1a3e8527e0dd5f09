use crossterm::event::KeyEvent;
use ratatui::layout::Rect;
use ratatui::widgets::Clear;

use crate::components::{Component, ComponentContext};
use crate::keybindings::{Action, KeyBindings};
use crate::layout::rect_contains;
use crate::ui::{UiFrame, fit_to_width, text_width, truncate_to_width};

/// Horizontal cells between the dialog border and the wrapped message.
const TEXT_INSET: u16 = 3;
/// Rows taken by chrome: title, blank, blank, buttons, blank, border x2.
const CHROME_ROWS: u16 = 7;
const BUTTON_GAP: u16 = 2;

/// What the window manager should do with the pressed button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogPurpose {
    Info,
    ConfirmExit,
}

#[derive(Debug, Clone)]
pub struct Dialog {
    title: String,
    lines: Vec<String>,
    buttons: Vec<String>,
    selected: usize,
    width: u16,
    height: u16,
    purpose: DialogPurpose,
    area: Rect,
}

impl Dialog {
    pub fn new(title: impl Into<String>, message: &str, buttons: &[&str], width: u16) -> Self {
        let title = title.into();
        let buttons: Vec<String> = if buttons.is_empty() {
            vec!["OK".to_string()]
        } else {
            buttons.iter().map(|b| b.to_string()).collect()
        };
        let buttons_width = buttons
            .iter()
            .map(|b| text_width(b) + 4)
            .sum::<u16>()
            .saturating_add(BUTTON_GAP * (buttons.len() as u16 - 1))
            .saturating_add(4);
        let width = width
            .max(text_width(&title).saturating_add(8))
            .max(buttons_width);
        let lines = wrap_message(message, width.saturating_sub(TEXT_INSET * 2) as usize);
        let height = (lines.len() as u16).saturating_add(CHROME_ROWS);
        Self {
            title,
            lines,
            buttons,
            selected: 0,
            width,
            height,
            purpose: DialogPurpose::Info,
            area: Rect::default(),
        }
    }

    pub fn info(title: impl Into<String>, message: &str, width: u16) -> Self {
        Self::new(title, message, &["OK"], width)
    }

    pub fn with_purpose(mut self, purpose: DialogPurpose) -> Self {
        self.purpose = purpose;
        self
    }

    pub fn purpose(&self) -> DialogPurpose {
        self.purpose
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn buttons(&self) -> &[String] {
        &self.buttons
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Dialog box centered in the last screen area passed to `resize`.
    pub fn rect(&self) -> Rect {
        let width = self.width.min(self.area.width);
        let height = self.height.min(self.area.height);
        Rect {
            x: self.area.x + self.area.width.saturating_sub(width) / 2,
            y: self.area.y + self.area.height.saturating_sub(height) / 2,
            width,
            height,
        }
    }

    /// Clickable rectangle of each button, left to right.
    pub fn button_rects(&self) -> Vec<Rect> {
        let rect = self.rect();
        let y = rect.y + self.height.saturating_sub(3).min(rect.height.saturating_sub(1));
        let labels: Vec<u16> = self.buttons.iter().map(|b| text_width(b) + 4).collect();
        let total = labels.iter().sum::<u16>() + BUTTON_GAP * (labels.len() as u16 - 1);
        let mut x = rect.x + rect.width.saturating_sub(total) / 2;
        labels
            .into_iter()
            .map(|w| {
                let r = Rect {
                    x,
                    y,
                    width: w,
                    height: 1,
                };
                x = x.saturating_add(w + BUTTON_GAP);
                r
            })
            .collect()
    }

    /// Index of the button under the pointer.
    pub fn click(&self, column: u16, row: u16) -> Option<usize> {
        self.button_rects()
            .iter()
            .position(|r| rect_contains(*r, column, row))
    }

    /// Left/Right cycle the selection, Enter presses it, Escape presses the
    /// last button (the conventional cancel position).
    pub fn key(&mut self, key: &KeyEvent, keys: &KeyBindings) -> Option<usize> {
        let count = self.buttons.len();
        match keys.action_among(
            key,
            &[
                Action::ConfirmAccept,
                Action::ConfirmCancel,
                Action::ConfirmLeft,
                Action::ConfirmRight,
            ],
        )? {
            Action::ConfirmAccept => Some(self.selected),
            Action::ConfirmCancel => Some(count - 1),
            Action::ConfirmLeft => {
                self.selected = (self.selected + count - 1) % count;
                None
            }
            Action::ConfirmRight => {
                self.selected = (self.selected + 1) % count;
                None
            }
            _ => None,
        }
    }
}

impl Component for Dialog {
    fn resize(&mut self, area: Rect, _ctx: &ComponentContext) {
        self.area = area;
    }

    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
        self.area = area;
        let rect = self.rect();
        if rect.width < 4 || rect.height < 3 {
            return;
        }
        let glyphs = ctx.glyphs();
        let shadow = Rect {
            x: rect.x + 2,
            y: rect.y + 1,
            width: rect.width,
            height: rect.height,
        };
        frame.fill(shadow, " ", crate::theme::shadow_style());
        frame.render_widget(Clear, rect);
        frame.fill(rect, " ", crate::theme::dialog_style());
        frame.draw_box(rect, &glyphs.dialog_box, crate::theme::dialog_style());

        let inner_w = rect.width.saturating_sub(2) as usize;
        let title_row = rect.y + 1;
        let title = truncate_to_width(&self.title, inner_w);
        let pad = inner_w.saturating_sub(title.chars().count()) / 2;
        let centered = fit_to_width(&format!("{}{}", " ".repeat(pad), title), inner_w);
        frame.print(rect.x + 1, title_row, &centered, crate::theme::dialog_title_style());

        let text_w = rect.width.saturating_sub(TEXT_INSET * 2) as usize;
        for (i, line) in self.lines.iter().enumerate() {
            let y = rect.y + 3 + i as u16;
            if y >= rect.y + rect.height.saturating_sub(3) {
                break;
            }
            frame.print(
                rect.x + TEXT_INSET,
                y,
                &truncate_to_width(line, text_w),
                crate::theme::dialog_style(),
            );
        }

        for (i, (button, r)) in self.buttons.iter().zip(self.button_rects()).enumerate() {
            let selected = i == self.selected;
            let label = if selected {
                format!("{} {} {}", glyphs.button_left, button, glyphs.button_right)
            } else {
                format!("[ {} ]", button)
            };
            frame.print(r.x, r.y, &label, crate::theme::dialog_button_style(selected));
        }
    }
}

/// Greedy word wrap that keeps explicit paragraph breaks. Words longer
/// than the width are split across lines.
pub fn wrap_message(message: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    for paragraph in message.split('\n') {
        if paragraph.trim().is_empty() {
            lines.push(String::new());
            continue;
        }
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let mut word: String = word.to_string();
            loop {
                let cur_len = current.chars().count();
                let word_len = word.chars().count();
                let needed = if cur_len == 0 { word_len } else { cur_len + 1 + word_len };
                if needed <= width {
                    if cur_len > 0 {
                        current.push(' ');
                    }
                    current.push_str(&word);
                    break;
                }
                if cur_len > 0 {
                    lines.push(std::mem::take(&mut current));
                    continue;
                }
                let head: String = word.chars().take(width).collect();
                word = word.chars().skip(width).collect();
                lines.push(head);
                if word.is_empty() {
                    break;
                }
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }
    lines
}
