//! Menu bar row, taskbar and status bar.
//!
//! The panel draws the chrome around the desktop. Taskbar buttons are laid
//! out from the current list of minimized windows so hit-testing and
//! drawing always agree, even before the first frame.

use ratatui::layout::Rect;
use ratatui::style::Modifier;

use crate::components::MenuModel;
use crate::layout::rect_contains;
use crate::ui::{Glyphs, UiFrame, fit_to_width, text_width, truncate_to_width};
use crate::window::WindowId;

/// Longest title shown on a taskbar button.
const TASKBAR_TITLE_MAX: usize = 16;
const TASKBAR_GAP: u16 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskbarButton {
    pub id: WindowId,
    pub rect: Rect,
    pub label: String,
}

/// Buttons for minimized windows, left to right, dropping those that do
/// not fit on the row.
pub fn taskbar_buttons(bar: Rect, minimized: &[(WindowId, String)]) -> Vec<TaskbarButton> {
    let mut x = bar.x + 1;
    let right = bar.x + bar.width;
    let mut out = Vec::new();
    for (id, title) in minimized {
        let label = format!("[ {} ]", truncate_to_width(title, TASKBAR_TITLE_MAX).trim_end());
        let width = text_width(&label);
        if x + width > right {
            break;
        }
        out.push(TaskbarButton {
            id: *id,
            rect: Rect {
                x,
                y: bar.y,
                width,
                height: 1,
            },
            label,
        });
        x += width + TASKBAR_GAP;
    }
    out
}

pub fn taskbar_hit(buttons: &[TaskbarButton], column: u16, row: u16) -> Option<WindowId> {
    buttons
        .iter()
        .find(|b| rect_contains(b.rect, column, row))
        .map(|b| b.id)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusInfo {
    pub windows: usize,
    pub mouse_enabled: bool,
}

#[derive(Debug)]
pub struct Panel {
    app_label: String,
    show_clock: bool,
}

impl Default for Panel {
    fn default() -> Self {
        Self::new()
    }
}

impl Panel {
    pub fn new() -> Self {
        const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");
        Self {
            app_label: format!("RetroTUI v{PKG_VERSION}"),
            show_clock: true,
        }
    }

    /// Hide the clock; snapshot tests need stable output.
    pub fn set_show_clock(&mut self, show: bool) {
        self.show_clock = show;
    }

    pub fn render_menu_bar(
        &self,
        frame: &mut UiFrame<'_>,
        bar: Rect,
        menu: &MenuModel,
        glyphs: &Glyphs,
    ) {
        if bar.width == 0 || bar.height == 0 {
            return;
        }
        let style = crate::theme::menu_style();
        frame.fill(bar, " ", style);
        frame.print(
            bar.x,
            bar.y,
            &format!(" {}", glyphs.menu_glyph),
            style.add_modifier(Modifier::BOLD),
        );
        menu.render_bar(frame, bar);
        if self.show_clock {
            let clock = chrono::Local::now().format(" %H:%M:%S ").to_string();
            let x = (bar.x + bar.width).saturating_sub(text_width(&clock) + 1);
            frame.print(x, bar.y, &clock, style);
        }
    }

    pub fn render_taskbar(&self, frame: &mut UiFrame<'_>, bar: Rect, buttons: &[TaskbarButton]) {
        if bar.width == 0 || bar.height == 0 {
            return;
        }
        frame.fill(bar, " ", crate::theme::taskbar_style());
        for button in buttons {
            frame.print(
                button.rect.x,
                button.rect.y,
                &button.label,
                crate::theme::taskbar_button_style(),
            );
        }
    }

    pub fn status_text(&self, info: StatusInfo, glyphs: &Glyphs) -> String {
        let mouse = if info.mouse_enabled {
            "Enabled"
        } else {
            "Disabled"
        };
        let sep = glyphs.status_sep;
        format!(
            " {} {sep} Windows: {} {sep} Mouse: {} {sep} Ctrl+Q: Exit ",
            self.app_label, info.windows, mouse
        )
    }

    pub fn render_status(&self, frame: &mut UiFrame<'_>, bar: Rect, info: StatusInfo, glyphs: &Glyphs) {
        if bar.width == 0 || bar.height == 0 {
            return;
        }
        let text = fit_to_width(&self.status_text(info, glyphs), bar.width as usize);
        frame.print(bar.x, bar.y, &text, crate::theme::status_style());
    }
}
