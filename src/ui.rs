//! UiFrame: a thin wrapper around `ratatui::Frame` that clamps drawing to the
//! visible area and centralizes clipping logic.
//!
//! Windows, dialogs and menus compute their rectangles from model state and
//! can drift partially outside the terminal after a resize. Every draw goes
//! through `UiFrame` or `safe_set_string` so those rectangles are clipped to
//! the buffer instead of panicking.
use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{StatefulWidget, Widget};

pub struct UiFrame<'a> {
    area: Rect,
    buffer: &'a mut Buffer,
}

impl<'a> UiFrame<'a> {
    pub fn new(frame: &'a mut Frame<'_>) -> Self {
        let area = frame.area();
        let buffer = frame.buffer_mut();
        Self { area, buffer }
    }

    /// Construct a `UiFrame` directly from an area and buffer. Tests render
    /// into a bare `Buffer` this way.
    pub fn from_parts(area: Rect, buffer: &'a mut Buffer) -> Self {
        Self { area, buffer }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn buffer_mut(&mut self) -> &mut Buffer {
        self.buffer
    }

    fn clip_rect(&self, rect: Rect) -> Option<Rect> {
        let clipped = rect.intersection(self.area);
        if clipped.width == 0 || clipped.height == 0 {
            None
        } else {
            Some(clipped)
        }
    }

    pub fn render_widget<W>(&mut self, widget: W, area: Rect)
    where
        W: Widget,
    {
        if let Some(clipped) = self.clip_rect(area) {
            widget.render(clipped, self.buffer);
        }
    }

    pub fn render_stateful_widget<W>(&mut self, widget: W, area: Rect, state: &mut W::State)
    where
        W: StatefulWidget,
    {
        if let Some(clipped) = self.clip_rect(area) {
            widget.render(clipped, self.buffer, state);
        }
    }

    /// Paint `symbol` with `style` over every visible cell of `rect`.
    pub fn fill(&mut self, rect: Rect, symbol: &str, style: Style) {
        let Some(clipped) = self.clip_rect(rect) else {
            return;
        };
        fill_rect(self.buffer, clipped, symbol, style);
    }

    /// Write `text` at `(x, y)`, truncated to the frame.
    pub fn print(&mut self, x: u16, y: u16, text: &str, style: Style) {
        let bounds = self.area;
        safe_set_string(self.buffer, bounds, x, y, text, style);
    }

    /// Draw a one-cell border around `rect` using `glyphs`.
    pub fn draw_box(&mut self, rect: Rect, glyphs: &BoxGlyphs, style: Style) {
        if rect.width < 2 || rect.height < 2 {
            return;
        }
        let bounds = self.area;
        let right = rect.x + rect.width - 1;
        let bottom = rect.y + rect.height - 1;
        let inner = (rect.width - 2) as usize;
        let top = format!("{}{}{}", glyphs.top_left, glyphs.horizontal.repeat(inner), glyphs.top_right);
        let base = format!(
            "{}{}{}",
            glyphs.bottom_left,
            glyphs.horizontal.repeat(inner),
            glyphs.bottom_right
        );
        safe_set_string(self.buffer, bounds, rect.x, rect.y, &top, style);
        safe_set_string(self.buffer, bounds, rect.x, bottom, &base, style);
        for y in rect.y + 1..bottom {
            safe_set_string(self.buffer, bounds, rect.x, y, glyphs.vertical, style);
            safe_set_string(self.buffer, bounds, right, y, glyphs.vertical, style);
        }
    }
}

pub(crate) fn fill_rect(buffer: &mut Buffer, rect: Rect, symbol: &str, style: Style) {
    let area = rect.intersection(buffer.area);
    for y in area.y..area.y.saturating_add(area.height) {
        for x in area.x..area.x.saturating_add(area.width) {
            if let Some(cell) = buffer.cell_mut((x, y)) {
                cell.set_symbol(symbol);
                cell.set_style(style);
            }
        }
    }
}

pub(crate) fn safe_set_string(
    buffer: &mut Buffer,
    bounds: Rect,
    x: u16,
    y: u16,
    text: &str,
    style: Style,
) {
    let bounds = bounds.intersection(buffer.area);
    if bounds.width == 0 || bounds.height == 0 {
        return;
    }
    let max_x = bounds.x.saturating_add(bounds.width);
    let max_y = bounds.y.saturating_add(bounds.height);
    if x < bounds.x || x >= max_x || y < bounds.y || y >= max_y {
        return;
    }
    let available = max_x.saturating_sub(x);
    if available == 0 {
        return;
    }
    let text = truncate_to_width(text, available as usize);
    buffer.set_string(x, y, text, style);
}

pub(crate) fn truncate_to_width(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    value.chars().take(width).collect()
}

/// Pad or truncate `value` to exactly `width` characters.
pub(crate) fn fit_to_width(value: &str, width: usize) -> String {
    let mut out = truncate_to_width(value, width);
    let len = out.chars().count();
    if len < width {
        out.extend(std::iter::repeat_n(' ', width - len));
    }
    out
}

pub(crate) fn text_width(value: &str) -> u16 {
    value.chars().count().min(u16::MAX as usize) as u16
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxGlyphs {
    pub top_left: &'static str,
    pub top_right: &'static str,
    pub bottom_left: &'static str,
    pub bottom_right: &'static str,
    pub horizontal: &'static str,
    pub vertical: &'static str,
}

pub const SINGLE_BOX: BoxGlyphs = BoxGlyphs {
    top_left: "┌",
    top_right: "┐",
    bottom_left: "└",
    bottom_right: "┘",
    horizontal: "─",
    vertical: "│",
};

pub const DOUBLE_BOX: BoxGlyphs = BoxGlyphs {
    top_left: "╔",
    top_right: "╗",
    bottom_left: "╚",
    bottom_right: "╝",
    horizontal: "═",
    vertical: "║",
};

pub const ASCII_BOX: BoxGlyphs = BoxGlyphs {
    top_left: "+",
    top_right: "+",
    bottom_left: "+",
    bottom_right: "+",
    horizontal: "-",
    vertical: "|",
};

/// Every glyph the desktop draws, in a Unicode and an ASCII flavour. The
/// ASCII set is chosen when the locale does not advertise UTF-8.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyphs {
    pub window_box: BoxGlyphs,
    pub dialog_box: BoxGlyphs,
    pub menu_box: BoxGlyphs,
    pub desktop_fill: &'static str,
    pub separator: &'static str,
    pub menu_glyph: &'static str,
    pub close: &'static str,
    pub maximize: &'static str,
    pub restore: &'static str,
    pub minimize: &'static str,
    pub folder: &'static str,
    pub file: &'static str,
    pub status_sep: &'static str,
    pub scroll_thumb: &'static str,
    pub scroll_track: &'static str,
    pub button_left: &'static str,
    pub button_right: &'static str,
    pub check_on: &'static str,
}

pub const UNICODE_GLYPHS: Glyphs = Glyphs {
    window_box: DOUBLE_BOX,
    dialog_box: DOUBLE_BOX,
    menu_box: SINGLE_BOX,
    desktop_fill: "░",
    separator: "─",
    menu_glyph: "≡",
    close: "[×]",
    maximize: "[□]",
    restore: "[▫]",
    minimize: "[_]",
    folder: "▸",
    file: "·",
    status_sep: "│",
    scroll_thumb: "█",
    scroll_track: "░",
    button_left: "▸",
    button_right: "◂",
    check_on: "✓",
};

pub const ASCII_GLYPHS: Glyphs = Glyphs {
    window_box: ASCII_BOX,
    dialog_box: ASCII_BOX,
    menu_box: ASCII_BOX,
    desktop_fill: ".",
    separator: "-",
    menu_glyph: "=",
    close: "[x]",
    maximize: "[^]",
    restore: "[v]",
    minimize: "[_]",
    folder: "[D]",
    file: "[F]",
    status_sep: "|",
    scroll_thumb: "#",
    scroll_track: ":",
    button_left: ">",
    button_right: "<",
    check_on: "x",
};

impl Glyphs {
    pub const fn for_mode(unicode: bool) -> &'static Glyphs {
        if unicode {
            &UNICODE_GLYPHS
        } else {
            &ASCII_GLYPHS
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::buffer::Buffer;
    use ratatui::layout::Rect;
    use ratatui::style::Style;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (buf.area.x..buf.area.x + buf.area.width)
            .map(|x| buf.cell((x, y)).map(|c| c.symbol()).unwrap_or(" "))
            .collect()
    }

    #[test]
    fn truncate_to_width_short_and_long() {
        assert_eq!(truncate_to_width("abc", 5), "abc");
        assert_eq!(truncate_to_width("abcdef", 3), "abc");
    }

    #[test]
    fn fit_to_width_pads_and_truncates() {
        assert_eq!(fit_to_width("ab", 4), "ab  ");
        assert_eq!(fit_to_width("abcdef", 4), "abcd");
    }

    #[test]
    fn safe_set_string_writes_within_bounds() {
        let bounds = Rect {
            x: 0,
            y: 0,
            width: 10,
            height: 2,
        };
        let mut buf = Buffer::empty(bounds);
        safe_set_string(&mut buf, bounds, 1, 0, "hello", Style::default());
        assert_eq!(buf.cell((1, 0)).unwrap().symbol(), "h");

        // outside bounds should be ignored (no panic)
        safe_set_string(&mut buf, bounds, 100, 0, "x", Style::default());
        safe_set_string(&mut buf, bounds, 0, 7, "x", Style::default());
    }

    #[test]
    fn print_truncates_at_right_edge() {
        let area = Rect::new(0, 0, 5, 1);
        let mut buf = Buffer::empty(area);
        let mut ui = UiFrame::from_parts(area, &mut buf);
        ui.print(3, 0, "hello", Style::default());
        assert_eq!(row_text(&buf, 0), "   he");
    }

    #[test]
    fn draw_box_uses_glyph_set() {
        let area = Rect::new(0, 0, 4, 3);
        let mut buf = Buffer::empty(area);
        let mut ui = UiFrame::from_parts(area, &mut buf);
        ui.draw_box(area, &ASCII_BOX, Style::default());
        assert_eq!(row_text(&buf, 0), "+--+");
        assert_eq!(row_text(&buf, 1), "|  |");
        assert_eq!(row_text(&buf, 2), "+--+");
    }

    #[test]
    fn fill_clips_to_frame_area() {
        let area = Rect::new(0, 0, 5, 3);
        let mut buf = Buffer::empty(area);
        let mut ui = UiFrame::from_parts(area, &mut buf);
        ui.fill(Rect::new(3, 1, 5, 5), "A", Style::default());
        assert_eq!(row_text(&buf, 0), "     ");
        assert_eq!(row_text(&buf, 1), "   AA");
        assert_eq!(row_text(&buf, 2), "   AA");
    }

    #[test]
    fn render_widget_clips_to_frame_area() {
        let area = Rect::new(0, 0, 5, 3);
        let mut buf = Buffer::empty(area);
        let mut ui = UiFrame::from_parts(area, &mut buf);

        struct FillWidget;
        impl Widget for FillWidget {
            fn render(self, area: Rect, buf: &mut Buffer) {
                fill_rect(buf, area, "A", Style::default());
            }
        }

        ui.render_widget(FillWidget, Rect::new(3, 1, 5, 2));
        assert!(buf.cell((3, 1)).unwrap().symbol().starts_with('A'));
        assert!(!buf.cell((2, 1)).unwrap().symbol().starts_with('A'));
    }

    #[test]
    fn glyph_mode_selects_ascii_fallback() {
        assert_eq!(Glyphs::for_mode(false).close, "[x]");
        assert_eq!(Glyphs::for_mode(true).desktop_fill, "░");
    }
}
