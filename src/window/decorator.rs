use ratatui::prelude::Rect;

use crate::ui::{Glyphs, UiFrame, fit_to_width, text_width, truncate_to_width};

/// Title bar regions that react to a press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderAction {
    Close,
    Maximize,
    Minimize,
    Drag,
}

/// Per-frame inputs for drawing one window frame.
#[derive(Debug, Clone, Copy)]
pub struct Chrome<'a> {
    pub rect: Rect,
    pub title: &'a str,
    pub active: bool,
    pub maximized: bool,
    pub glyphs: &'static Glyphs,
}

pub trait WindowDecorator: std::fmt::Debug {
    fn render_window(&self, frame: &mut UiFrame<'_>, chrome: Chrome<'_>);

    fn hit_test(&self, rect: Rect, column: u16, row: u16) -> Option<HeaderAction>;
}

/// Windows 3.1 look: double border, the top row is the title bar with
/// minimize, maximize and close buttons on the right.
#[derive(Debug, Default)]
pub struct RetroDecorator;

/// Width of one title bar button, e.g. `[×]`.
const BUTTON_WIDTH: u16 = 3;

impl RetroDecorator {
    fn close_x(rect: Rect) -> u16 {
        rect.x + rect.width.saturating_sub(BUTTON_WIDTH + 1)
    }

    fn maximize_x(rect: Rect) -> u16 {
        Self::close_x(rect).saturating_sub(BUTTON_WIDTH)
    }

    fn minimize_x(rect: Rect) -> u16 {
        Self::maximize_x(rect).saturating_sub(BUTTON_WIDTH)
    }
}

impl WindowDecorator for RetroDecorator {
    fn render_window(&self, frame: &mut UiFrame<'_>, chrome: Chrome<'_>) {
        let rect = chrome.rect;
        if rect.width < 2 || rect.height < 2 {
            return;
        }
        let glyphs = chrome.glyphs;
        frame.fill(rect, " ", crate::theme::body_style());
        frame.draw_box(rect, &glyphs.window_box, crate::theme::border_style(chrome.active));

        let title_style = crate::theme::title_style(chrome.active);
        let bar_width = rect.width.saturating_sub(2) as usize;
        frame.print(rect.x + 1, rect.y, &" ".repeat(bar_width), title_style);
        let room = Self::minimize_x(rect).saturating_sub(rect.x + 1) as usize;
        let label = format!(" {} ", chrome.title);
        let label = if text_width(&label) as usize > room && room > 3 {
            format!("{}...", truncate_to_width(&label, room - 3))
        } else {
            fit_to_width(&label, room.min(label.chars().count()))
        };
        frame.print(rect.x + 1, rect.y, &label, title_style);

        let button_style = crate::theme::menu_style();
        let max_glyph = if chrome.maximized {
            glyphs.restore
        } else {
            glyphs.maximize
        };
        frame.print(Self::minimize_x(rect), rect.y, glyphs.minimize, button_style);
        frame.print(Self::maximize_x(rect), rect.y, max_glyph, button_style);
        frame.print(Self::close_x(rect), rect.y, glyphs.close, button_style);
    }

    fn hit_test(&self, rect: Rect, column: u16, row: u16) -> Option<HeaderAction> {
        if row != rect.y || column < rect.x || column >= rect.x + rect.width {
            return None;
        }
        let within = |start: u16| column >= start && column < start + BUTTON_WIDTH;
        if within(Self::close_x(rect)) {
            Some(HeaderAction::Close)
        } else if within(Self::maximize_x(rect)) {
            Some(HeaderAction::Maximize)
        } else if within(Self::minimize_x(rect)) {
            Some(HeaderAction::Minimize)
        } else if column > rect.x && column < Self::minimize_x(rect) {
            Some(HeaderAction::Drag)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::{ASCII_GLYPHS, UNICODE_GLYPHS};
    use ratatui::buffer::Buffer;

    fn row(buf: &Buffer, y: u16) -> String {
        (buf.area.x..buf.area.x + buf.area.width)
            .map(|x| buf.cell((x, y)).unwrap().symbol().to_string())
            .collect()
    }

    #[test]
    fn buttons_sit_at_the_right_of_the_title_bar() {
        let d = RetroDecorator;
        let rect = Rect::new(10, 5, 30, 10);
        assert_eq!(d.hit_test(rect, 36, 5), Some(HeaderAction::Close));
        assert_eq!(d.hit_test(rect, 38, 5), Some(HeaderAction::Close));
        assert_eq!(d.hit_test(rect, 33, 5), Some(HeaderAction::Maximize));
        assert_eq!(d.hit_test(rect, 30, 5), Some(HeaderAction::Minimize));
        assert_eq!(d.hit_test(rect, 11, 5), Some(HeaderAction::Drag));
        assert_eq!(d.hit_test(rect, 29, 5), Some(HeaderAction::Drag));
        assert_eq!(d.hit_test(rect, 10, 5), None);
        assert_eq!(d.hit_test(rect, 39, 5), None);
        assert_eq!(d.hit_test(rect, 20, 6), None);
    }

    #[test]
    fn render_draws_title_and_buttons() {
        let area = Rect::new(0, 0, 30, 8);
        let mut buf = Buffer::empty(area);
        let mut frame = UiFrame::from_parts(area, &mut buf);
        RetroDecorator.render_window(
            &mut frame,
            Chrome {
                rect: area,
                title: "Notes",
                active: true,
                maximized: false,
                glyphs: &ASCII_GLYPHS,
            },
        );
        let top = row(&buf, 0);
        assert!(top.starts_with("+ Notes "));
        assert!(top.ends_with("[_][^][x]+"));
        assert_eq!(buf.cell((0, 7)).unwrap().symbol(), "+");
        assert_eq!(buf.cell((0, 3)).unwrap().symbol(), "|");
    }

    #[test]
    fn long_titles_are_ellipsized_before_the_buttons() {
        let area = Rect::new(0, 0, 20, 6);
        let mut buf = Buffer::empty(area);
        let mut frame = UiFrame::from_parts(area, &mut buf);
        RetroDecorator.render_window(
            &mut frame,
            Chrome {
                rect: area,
                title: "A very long window title",
                active: false,
                maximized: true,
                glyphs: &UNICODE_GLYPHS,
            },
        );
        let top = row(&buf, 0);
        assert!(top.contains("..."));
        assert!(top.contains("[▫]"));
        assert!(top.contains("[×]"));
    }
}
