use ratatui::layout::Rect;
use ratatui::widgets::{Scrollbar, ScrollbarOrientation, ScrollbarState};

use crate::ui::{Glyphs, UiFrame};

/// Vertical scroll offset with deltas accumulated between frames.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollState {
    pub offset: usize,
    pending: isize,
}

impl ScrollState {
    pub fn reset(&mut self) {
        self.offset = 0;
        self.pending = 0;
    }

    pub fn bump(&mut self, delta: isize) {
        self.pending = self.pending.saturating_add(delta);
    }

    pub fn apply(&mut self, total: usize, view: usize) {
        let max_offset = total.saturating_sub(view);
        if self.pending != 0 {
            let delta = self.pending;
            self.pending = 0;
            let next = if delta.is_negative() {
                self.offset.saturating_sub(delta.unsigned_abs())
            } else {
                self.offset.saturating_add(delta as usize)
            };
            self.offset = next.min(max_offset);
        } else if self.offset > max_offset {
            self.offset = max_offset;
        }
    }

    /// Scroll by the minimum amount that puts `index` inside the view.
    pub fn reveal(&mut self, index: usize, view: usize) {
        if view == 0 {
            return;
        }
        if index < self.offset {
            self.offset = index;
        } else if index >= self.offset + view {
            self.offset = index + 1 - view;
        }
    }
}

pub fn render_scrollbar(
    frame: &mut UiFrame<'_>,
    area: Rect,
    total: usize,
    view: usize,
    offset: usize,
    glyphs: &Glyphs,
) {
    if total <= view || view == 0 || area.height == 0 {
        return;
    }
    let content_len = total.saturating_sub(view).saturating_add(1).max(1);
    let mut state = ScrollbarState::new(content_len)
        .position(offset.min(content_len.saturating_sub(1)))
        .viewport_content_length(view.max(1));
    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .begin_symbol(None)
        .end_symbol(None)
        .track_symbol(Some(glyphs.scroll_track))
        .thumb_symbol(glyphs.scroll_thumb)
        .style(crate::theme::muted_style());
    frame.render_stateful_widget(scrollbar, area, &mut state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::ASCII_GLYPHS;
    use ratatui::buffer::Buffer;

    #[test]
    fn apply_clamps_pending_delta() {
        let mut s = ScrollState::default();
        s.bump(50);
        s.apply(20, 5);
        assert_eq!(s.offset, 15);
        s.bump(-100);
        s.apply(20, 5);
        assert_eq!(s.offset, 0);
    }

    #[test]
    fn apply_shrinks_offset_when_content_shrinks() {
        let mut s = ScrollState {
            offset: 10,
            ..Default::default()
        };
        s.apply(8, 5);
        assert_eq!(s.offset, 3);
    }

    #[test]
    fn reveal_moves_minimally() {
        let mut s = ScrollState::default();
        s.reveal(7, 5);
        assert_eq!(s.offset, 3);
        s.reveal(4, 5);
        assert_eq!(s.offset, 3);
        s.reveal(1, 5);
        assert_eq!(s.offset, 1);
    }

    #[test]
    fn scrollbar_only_drawn_when_overflowing() {
        let area = Rect::new(0, 0, 1, 4);
        let mut buf = Buffer::empty(area);
        let mut frame = UiFrame::from_parts(area, &mut buf);
        render_scrollbar(&mut frame, area, 3, 4, 0, &ASCII_GLYPHS);
        assert_eq!(buf.cell((0, 0)).unwrap().symbol(), " ");

        let mut frame = UiFrame::from_parts(area, &mut buf);
        render_scrollbar(&mut frame, area, 40, 4, 0, &ASCII_GLYPHS);
        assert_eq!(buf.cell((0, 0)).unwrap().symbol(), "#");
    }
}
