pub mod floating;

use ratatui::prelude::Rect;

pub fn rect_contains(rect: Rect, column: u16, row: u16) -> bool {
    let within_x = column >= rect.x && column < rect.x.saturating_add(rect.width);
    let within_y = row >= rect.y && row < rect.y.saturating_add(rect.height);
    within_x && within_y
}

/// Screen rows reserved around the desktop: the menu bar on top, the
/// taskbar and the status bar at the bottom.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScreenLayout {
    pub menu_bar: Rect,
    pub desktop: Rect,
    pub taskbar: Rect,
    pub status_bar: Rect,
}

impl ScreenLayout {
    pub fn split(area: Rect) -> Self {
        let menu_h = 1u16.min(area.height);
        let status_h = 1u16.min(area.height.saturating_sub(menu_h));
        let taskbar_h = 1u16.min(area.height.saturating_sub(menu_h + status_h));
        let bottom = area.y.saturating_add(area.height);
        let status_bar = Rect {
            x: area.x,
            y: bottom.saturating_sub(status_h),
            width: area.width,
            height: status_h,
        };
        let taskbar = Rect {
            x: area.x,
            y: status_bar.y.saturating_sub(taskbar_h),
            width: area.width,
            height: taskbar_h,
        };
        Self {
            menu_bar: Rect {
                x: area.x,
                y: area.y,
                width: area.width,
                height: menu_h,
            },
            desktop: Rect {
                x: area.x,
                y: area.y.saturating_add(menu_h),
                width: area.width,
                height: area
                    .height
                    .saturating_sub(menu_h)
                    .saturating_sub(status_h)
                    .saturating_sub(taskbar_h),
            },
            taskbar,
            status_bar,
        }
    }
}
