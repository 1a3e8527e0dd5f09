use std::sync::OnceLock;

use ratatui::style::{Color, Modifier, Style};

use crate::term_color::{Palette, map_rgb_for};

// Centralized theme colors, modelled on the Windows 3.1 default scheme.
// Each helper names an RGB value and the 16-colour fallback used when the
// terminal has no 256-colour palette.

pub const TEAL_RGB: (u8, u8, u8) = (0, 128, 128);
pub const NAVY_RGB: (u8, u8, u8) = (0, 0, 128);
pub const SILVER_RGB: (u8, u8, u8) = (192, 192, 192);
pub const GRAY_RGB: (u8, u8, u8) = (128, 128, 128);
pub const WHITE_RGB: (u8, u8, u8) = (255, 255, 255);
pub const BLACK_RGB: (u8, u8, u8) = (0, 0, 0);
pub const DARK_TEAL_RGB: (u8, u8, u8) = (0, 96, 96);

static PALETTE: OnceLock<Palette> = OnceLock::new();

/// Pin the palette before the first frame. Later calls are ignored.
pub fn init_palette(palette: Palette) {
    let _ = PALETTE.set(palette);
}

pub fn palette() -> Palette {
    *PALETTE.get_or_init(Palette::detect)
}

fn pick(rgb: (u8, u8, u8), fallback: Color) -> Color {
    map_rgb_for(palette(), rgb, fallback)
}

// Desktop
pub fn desktop_bg() -> Color {
    pick(TEAL_RGB, Color::Cyan)
}
pub fn desktop_fg() -> Color {
    pick(DARK_TEAL_RGB, Color::Blue)
}
pub fn desktop_style() -> Style {
    Style::default().fg(desktop_fg()).bg(desktop_bg())
}
pub fn icon_style(selected: bool) -> Style {
    if selected {
        Style::default()
            .fg(pick(WHITE_RGB, Color::White))
            .bg(pick(NAVY_RGB, Color::Blue))
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(pick(WHITE_RGB, Color::White))
            .bg(desktop_bg())
    }
}

// Menu bar / dropdowns
pub fn menu_bg() -> Color {
    pick(SILVER_RGB, Color::Gray)
}
pub fn menu_fg() -> Color {
    pick(BLACK_RGB, Color::Black)
}
pub fn menu_style() -> Style {
    Style::default().fg(menu_fg()).bg(menu_bg())
}
pub fn menu_selected_style() -> Style {
    Style::default()
        .fg(pick(WHITE_RGB, Color::White))
        .bg(pick(NAVY_RGB, Color::Blue))
}
pub fn menu_disabled_style() -> Style {
    Style::default().fg(pick(GRAY_RGB, Color::DarkGray)).bg(menu_bg())
}

// Window chrome
pub fn title_style(active: bool) -> Style {
    if active {
        Style::default()
            .fg(pick(WHITE_RGB, Color::White))
            .bg(pick(NAVY_RGB, Color::Blue))
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(pick(SILVER_RGB, Color::Gray))
            .bg(pick(GRAY_RGB, Color::DarkGray))
    }
}
pub fn border_style(active: bool) -> Style {
    let fg = if active {
        pick(WHITE_RGB, Color::White)
    } else {
        pick(SILVER_RGB, Color::Gray)
    };
    Style::default().fg(fg).bg(body_bg())
}
pub fn body_bg() -> Color {
    pick(WHITE_RGB, Color::White)
}
pub fn body_fg() -> Color {
    pick(BLACK_RGB, Color::Black)
}
pub fn body_style() -> Style {
    Style::default().fg(body_fg()).bg(body_bg())
}
pub fn selection_style() -> Style {
    Style::default()
        .fg(pick(WHITE_RGB, Color::White))
        .bg(pick(NAVY_RGB, Color::Blue))
}
pub fn cursor_style() -> Style {
    body_style().add_modifier(Modifier::REVERSED)
}
pub fn muted_style() -> Style {
    Style::default().fg(pick(GRAY_RGB, Color::DarkGray)).bg(body_bg())
}

// Dialog
pub fn dialog_style() -> Style {
    Style::default().fg(menu_fg()).bg(menu_bg())
}
pub fn dialog_title_style() -> Style {
    title_style(true)
}
pub fn dialog_button_style(selected: bool) -> Style {
    if selected {
        menu_selected_style().add_modifier(Modifier::BOLD)
    } else {
        dialog_style()
    }
}
pub fn shadow_style() -> Style {
    Style::default()
        .fg(pick(GRAY_RGB, Color::DarkGray))
        .bg(pick(BLACK_RGB, Color::Black))
        .add_modifier(Modifier::DIM)
}

// Taskbar / status bar
pub fn status_style() -> Style {
    menu_style()
}
pub fn taskbar_style() -> Style {
    Style::default().fg(menu_fg()).bg(pick(GRAY_RGB, Color::DarkGray))
}
pub fn taskbar_button_style() -> Style {
    menu_style().add_modifier(Modifier::BOLD)
}
