use ratatui::prelude::Rect;

use super::rect_contains;

/// Border zone grabbed to resize a window. The top border doubles as the
/// title bar, so only the bottom and the two sides resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeEdge {
    Left,
    Right,
    Bottom,
    BottomLeft,
    BottomRight,
}

impl ResizeEdge {
    fn moves_left(self) -> bool {
        matches!(self, ResizeEdge::Left | ResizeEdge::BottomLeft)
    }

    fn moves_right(self) -> bool {
        matches!(self, ResizeEdge::Right | ResizeEdge::BottomRight)
    }

    fn moves_bottom(self) -> bool {
        matches!(
            self,
            ResizeEdge::Bottom | ResizeEdge::BottomLeft | ResizeEdge::BottomRight
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeDrag {
    pub edge: ResizeEdge,
    pub start_rect: Rect,
    pub start_col: u16,
    pub start_row: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderDrag {
    pub offset_x: u16,
    pub offset_y: u16,
}

/// Resolve which resize zone, if any, sits under the pointer. Corners are
/// checked before straight edges.
pub fn resize_edge_at(rect: Rect, column: u16, row: u16) -> Option<ResizeEdge> {
    if rect.width < 2 || rect.height < 2 || !rect_contains(rect, column, row) {
        return None;
    }
    let right = rect.x.saturating_add(rect.width - 1);
    let bottom = rect.y.saturating_add(rect.height - 1);
    if row == bottom && column == right {
        return Some(ResizeEdge::BottomRight);
    }
    if row == bottom && column == rect.x {
        return Some(ResizeEdge::BottomLeft);
    }
    if row == bottom {
        return Some(ResizeEdge::Bottom);
    }
    if row == rect.y {
        return None;
    }
    if column == right {
        return Some(ResizeEdge::Right);
    }
    if column == rect.x {
        return Some(ResizeEdge::Left);
    }
    None
}

/// Apply a resize drag. Right and bottom edges grow from the fixed
/// top-left corner; left edges move `x` while the right edge stays put.
/// The result never drops below the minimum size and never leaves `bounds`.
pub fn apply_resize_drag(
    drag: ResizeDrag,
    column: u16,
    row: u16,
    bounds: Rect,
    min_width: u16,
    min_height: u16,
) -> Rect {
    let start = drag.start_rect;
    let dx = column as i32 - drag.start_col as i32;
    let dy = row as i32 - drag.start_row as i32;
    let bounds_left = bounds.x as i32;
    let bounds_right = bounds.x as i32 + bounds.width as i32;
    let bounds_bottom = bounds.y as i32 + bounds.height as i32;
    let min_w = min_width as i32;
    let min_h = min_height as i32;

    let mut x = start.x as i32;
    let mut width = start.width as i32;
    let mut height = start.height as i32;

    if drag.edge.moves_right() {
        width = (width + dx).min(bounds_right - x).max(min_w);
    }
    if drag.edge.moves_left() {
        let right = x + width;
        x = (x + dx).max(bounds_left).min(right - min_w);
        width = right - x;
    }
    if drag.edge.moves_bottom() {
        height = (height + dy).min(bounds_bottom - start.y as i32).max(min_h);
    }

    Rect {
        x: x.max(0) as u16,
        y: start.y,
        width: width.max(1) as u16,
        height: height.max(1) as u16,
    }
}

/// Move a window so the grabbed cell follows the pointer, keeping the
/// whole window inside `bounds`.
pub fn apply_header_drag(rect: Rect, drag: HeaderDrag, column: u16, row: u16, bounds: Rect) -> Rect {
    let max_x = (bounds.x as i32 + bounds.width as i32 - rect.width as i32).max(bounds.x as i32);
    let max_y = (bounds.y as i32 + bounds.height as i32 - rect.height as i32).max(bounds.y as i32);
    let x = (column as i32 - drag.offset_x as i32).clamp(bounds.x as i32, max_x);
    let y = (row as i32 - drag.offset_y as i32).clamp(bounds.y as i32, max_y);
    Rect {
        x: x as u16,
        y: y as u16,
        width: rect.width,
        height: rect.height,
    }
}

/// Grow `rect` to the minimum size and pull it back inside `bounds` when it
/// hangs off the right or bottom edge.
pub fn clamp_rect(rect: Rect, bounds: Rect, min_width: u16, min_height: u16) -> Rect {
    let width = rect.width.max(min_width);
    let height = rect.height.max(min_height);
    let max_x = bounds
        .x
        .saturating_add(bounds.width)
        .saturating_sub(width)
        .max(bounds.x);
    let max_y = bounds
        .y
        .saturating_add(bounds.height)
        .saturating_sub(height)
        .max(bounds.y);
    Rect {
        x: rect.x.clamp(bounds.x, max_x),
        y: rect.y.clamp(bounds.y, max_y),
        width,
        height,
    }
}
