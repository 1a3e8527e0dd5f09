//! Desktop icon column.

use ratatui::layout::Rect;

use crate::actions::Action;
use crate::constants::{ICON_HIT_X, ICON_ORIGIN, ICON_SPACING};
use crate::ui::{UiFrame, fit_to_width};

/// Width of the centered label under each icon.
const LABEL_WIDTH: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DesktopIcon {
    pub label: &'static str,
    pub glyph: &'static str,
    pub ascii_glyph: &'static str,
    pub action: Action,
}

impl DesktopIcon {
    pub fn glyph_for(&self, unicode: bool) -> &'static str {
        if unicode { self.glyph } else { self.ascii_glyph }
    }
}

pub const DESKTOP_ICONS: &[DesktopIcon] = &[
    DesktopIcon {
        label: "Files",
        glyph: "[▤]",
        ascii_glyph: "[D]",
        action: Action::OpenFileManager,
    },
    DesktopIcon {
        label: "Notepad",
        glyph: "[✎]",
        ascii_glyph: "[N]",
        action: Action::OpenNotepad,
    },
    DesktopIcon {
        label: "Terminal",
        glyph: "[▶]",
        ascii_glyph: "[>]",
        action: Action::OpenTerminal,
    },
    DesktopIcon {
        label: "Settings",
        glyph: "[☼]",
        ascii_glyph: "[S]",
        action: Action::OpenSettings,
    },
    DesktopIcon {
        label: "About",
        glyph: "[i]",
        ascii_glyph: "[?]",
        action: Action::About,
    },
];

/// Top row of icon `index`.
pub fn icon_row(index: usize) -> u16 {
    ICON_ORIGIN.1 + index as u16 * ICON_SPACING
}

/// Icons whose glyph and label rows both fit inside `desktop`.
pub fn visible_count(desktop: Rect) -> usize {
    let bottom = desktop.y + desktop.height;
    (0..DESKTOP_ICONS.len())
        .take_while(|&i| icon_row(i) + 1 < bottom)
        .count()
}

/// Icon under the pointer. The glyph row and the label row both count.
pub fn icon_at(desktop: Rect, column: u16, row: u16) -> Option<usize> {
    if column < ICON_HIT_X.0 || column > ICON_HIT_X.1 {
        return None;
    }
    (0..visible_count(desktop)).find(|&i| {
        let top = icon_row(i);
        row == top || row == top + 1
    })
}

pub fn render_icons(frame: &mut UiFrame<'_>, desktop: Rect, selected: Option<usize>, unicode: bool) {
    for (index, icon) in DESKTOP_ICONS.iter().enumerate().take(visible_count(desktop)) {
        let style = crate::theme::icon_style(selected == Some(index));
        let y = icon_row(index);
        frame.print(
            ICON_ORIGIN.0,
            y,
            &format!(" {} ", icon.glyph_for(unicode)),
            style,
        );
        let pad = LABEL_WIDTH.saturating_sub(icon.label.chars().count()) / 2;
        let label = fit_to_width(&format!("{}{}", " ".repeat(pad), icon.label), LABEL_WIDTH);
        frame.print(ICON_ORIGIN.0 - 1, y + 1, &label, style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::buffer::Buffer;

    fn desktop(height: u16) -> Rect {
        Rect::new(0, 1, 80, height)
    }

    #[test]
    fn hit_covers_glyph_and_label_rows() {
        let d = desktop(30);
        assert_eq!(icon_at(d, 4, 3), Some(0));
        assert_eq!(icon_at(d, 10, 4), Some(0));
        assert_eq!(icon_at(d, 2, 6), Some(1));
        assert_eq!(icon_at(d, 5, 5), None);
        assert_eq!(icon_at(d, 11, 3), None);
        assert_eq!(icon_at(d, 1, 3), None);
        assert_eq!(icon_at(d, 5, 15), Some(4));
    }

    #[test]
    fn icons_below_the_desktop_are_hidden() {
        // desktop rows 1..=9: icon 2 (rows 9-10) does not fit
        let d = desktop(9);
        assert_eq!(visible_count(d), 2);
        assert_eq!(icon_at(d, 4, 9), None);
    }

    #[test]
    fn render_draws_selected_label() {
        let area = Rect::new(0, 0, 20, 10);
        let mut buf = Buffer::empty(area);
        let mut frame = UiFrame::from_parts(area, &mut buf);
        render_icons(&mut frame, Rect::new(0, 1, 20, 9), Some(0), false);
        let row: String = (0..20).map(|x| buf.cell((x, 3)).unwrap().symbol().to_string()).collect();
        assert!(row.starts_with("    [D] "));
        let label: String = (2..12).map(|x| buf.cell((x, 4)).unwrap().symbol().to_string()).collect();
        assert_eq!(label, "  Files   ");
        assert_ne!(buf.cell((3, 3)).unwrap().style(), buf.cell((3, 6)).unwrap().style());
    }
}
