//! Notepad buffer.
//!
//! Lines are stored without terminators; the cursor column counts
//! characters, not bytes. In wrap mode the view is driven by a wrap table
//! (visual row -> logical line slice) that is rebuilt lazily whenever the
//! content or the wrap width changed since it was last read.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use line_ending::LineEnding;
use ratatui::layout::Rect;
use thiserror::Error;

use crate::components::{BodyEvent, Component, ComponentContext, WindowBody};
use crate::constants::{BINARY_SNIFF_LEN, PAGE_OVERLAP, WHEEL_STEP};
use crate::event::{MouseInput, MouseKind};
use crate::fs::{FileSystem, FsError};
use crate::keybindings::{Action, KeyBindings};
use crate::layout::rect_contains;
use crate::ui::{UiFrame, fit_to_width};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OpenError {
    #[error("binary file")]
    Binary,
    #[error(transparent)]
    Fs(#[from] FsError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SaveError {
    #[error("document has no file name")]
    NoPath,
    #[error(transparent)]
    Fs(#[from] FsError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMove {
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
}

/// One visual row of the wrap table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrapRow {
    pub line: usize,
    pub start_col: usize,
    pub text: String,
}

/// A row ready to paint. `cursor` is the column of the cursor cell within
/// this row, if the cursor sits on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewRow {
    pub text: String,
    pub cursor: Option<usize>,
}

/// True when the first bytes contain a NUL.
pub fn is_binary(bytes: &[u8]) -> bool {
    bytes[..bytes.len().min(BINARY_SNIFF_LEN)].contains(&0)
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn byte_index(s: &str, col: usize) -> usize {
    s.char_indices().nth(col).map(|(i, _)| i).unwrap_or(s.len())
}

pub struct TextDocument {
    lines: Vec<String>,
    cursor_line: usize,
    cursor_col: usize,
    path: Option<PathBuf>,
    line_ending: LineEnding,
    modified: bool,
    wrap: bool,
    top_line: usize,
    left_col: usize,
    wrap_top_row: usize,
    wrap_cache: Vec<WrapRow>,
    wrap_width: usize,
    wrap_dirty: bool,
    fs: Arc<dyn FileSystem>,
    area: Rect,
}

impl TextDocument {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self::from_lines(fs, vec![String::new()], None, LineEnding::LF)
    }

    pub fn from_text(fs: Arc<dyn FileSystem>, text: &str) -> Self {
        let normalized = LineEnding::normalize(text);
        let lines = normalized.split('\n').map(str::to_string).collect();
        Self::from_lines(fs, lines, None, LineEnding::LF)
    }

    fn from_lines(
        fs: Arc<dyn FileSystem>,
        mut lines: Vec<String>,
        path: Option<PathBuf>,
        line_ending: LineEnding,
    ) -> Self {
        if lines.is_empty() {
            lines.push(String::new());
        }
        Self {
            lines,
            cursor_line: 0,
            cursor_col: 0,
            path,
            line_ending,
            modified: false,
            wrap: false,
            top_line: 0,
            left_col: 0,
            wrap_top_row: 0,
            wrap_cache: Vec::new(),
            wrap_width: 0,
            wrap_dirty: true,
            fs,
            area: Rect::default(),
        }
    }

    /// Load `path`. Binary files are refused before any document exists.
    pub fn open(path: &Path, fs: Arc<dyn FileSystem>) -> Result<Self, OpenError> {
        let bytes = fs.read(path)?;
        if is_binary(&bytes) {
            return Err(OpenError::Binary);
        }
        let text = String::from_utf8_lossy(&bytes);
        let line_ending = LineEnding::from(text.as_ref());
        let normalized = LineEnding::normalize(&text);
        let lines = normalized.split('\n').map(str::to_string).collect();
        tracing::debug!(path = %path.display(), "opened document");
        Ok(Self::from_lines(fs, lines, Some(path.to_path_buf()), line_ending))
    }

    /// Write the buffer back with the line ending it was loaded with.
    pub fn save(&mut self) -> Result<&Path, SaveError> {
        let Some(path) = self.path.as_deref() else {
            return Err(SaveError::NoPath);
        };
        let text = self.line_ending.denormalize(&self.lines.join("\n"));
        self.fs.write(path, text.as_bytes())?;
        self.modified = false;
        tracing::info!(path = %path.display(), "saved document");
        Ok(path)
    }

    /// Discard everything and start an untitled buffer.
    pub fn reset(&mut self) {
        let fs = Arc::clone(&self.fs);
        let area = self.area;
        let wrap = self.wrap;
        *self = Self::new(fs);
        self.area = area;
        self.wrap = wrap;
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn cursor(&self) -> (usize, usize) {
        (self.cursor_line, self.cursor_col)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn wrap_enabled(&self) -> bool {
        self.wrap
    }

    pub fn display_name(&self) -> String {
        self.path
            .as_deref()
            .and_then(Path::file_name)
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Untitled".to_string())
    }

    pub fn title(&self) -> String {
        let marker = if self.modified { "*" } else { "" };
        format!("{}{} - Notepad", self.display_name(), marker)
    }

    fn line_len(&self, line: usize) -> usize {
        self.lines.get(line).map_or(0, |l| char_len(l))
    }

    fn touched(&mut self) {
        self.modified = true;
        self.wrap_dirty = true;
    }

    pub fn insert_char(&mut self, ch: char) {
        let line = &mut self.lines[self.cursor_line];
        let at = byte_index(line, self.cursor_col);
        line.insert(at, ch);
        self.cursor_col += 1;
        self.touched();
    }

    pub fn split_line(&mut self) {
        let line = &mut self.lines[self.cursor_line];
        let at = byte_index(line, self.cursor_col);
        let rest = line.split_off(at);
        self.lines.insert(self.cursor_line + 1, rest);
        self.cursor_line += 1;
        self.cursor_col = 0;
        self.touched();
    }

    /// Returns false when there was nothing to delete.
    pub fn backspace(&mut self) -> bool {
        if self.cursor_col > 0 {
            let line = &mut self.lines[self.cursor_line];
            let at = byte_index(line, self.cursor_col - 1);
            line.remove(at);
            self.cursor_col -= 1;
        } else if self.cursor_line > 0 {
            let current = self.lines.remove(self.cursor_line);
            self.cursor_line -= 1;
            self.cursor_col = self.line_len(self.cursor_line);
            self.lines[self.cursor_line].push_str(&current);
        } else {
            return false;
        }
        self.touched();
        true
    }

    pub fn delete_forward(&mut self) -> bool {
        if self.cursor_col < self.line_len(self.cursor_line) {
            let line = &mut self.lines[self.cursor_line];
            let at = byte_index(line, self.cursor_col);
            line.remove(at);
        } else if self.cursor_line + 1 < self.lines.len() {
            let next = self.lines.remove(self.cursor_line + 1);
            self.lines[self.cursor_line].push_str(&next);
        } else {
            return false;
        }
        self.touched();
        true
    }

    /// Text rows available for content; the last body row is the status line.
    fn text_height(&self) -> usize {
        self.area.height.saturating_sub(1) as usize
    }

    fn text_width(&self) -> usize {
        self.area.width as usize
    }

    pub fn move_cursor(&mut self, movement: CursorMove) {
        let page = self.text_height().saturating_sub(PAGE_OVERLAP).max(1);
        let last = self.lines.len() - 1;
        match movement {
            CursorMove::Left => {
                if self.cursor_col > 0 {
                    self.cursor_col -= 1;
                } else if self.cursor_line > 0 {
                    self.cursor_line -= 1;
                    self.cursor_col = self.line_len(self.cursor_line);
                }
            }
            CursorMove::Right => {
                if self.cursor_col < self.line_len(self.cursor_line) {
                    self.cursor_col += 1;
                } else if self.cursor_line < last {
                    self.cursor_line += 1;
                    self.cursor_col = 0;
                }
            }
            CursorMove::Up => self.cursor_line = self.cursor_line.saturating_sub(1),
            CursorMove::Down => self.cursor_line = (self.cursor_line + 1).min(last),
            CursorMove::Home => self.cursor_col = 0,
            CursorMove::End => self.cursor_col = self.line_len(self.cursor_line),
            CursorMove::PageUp => self.cursor_line = self.cursor_line.saturating_sub(page),
            CursorMove::PageDown => self.cursor_line = (self.cursor_line + page).min(last),
        }
        self.cursor_col = self.cursor_col.min(self.line_len(self.cursor_line));
    }

    pub fn set_wrap(&mut self, wrap: bool) {
        if self.wrap == wrap {
            return;
        }
        self.wrap = wrap;
        self.left_col = 0;
        self.wrap_top_row = 0;
        self.wrap_dirty = true;
    }

    /// Wrap table for `width`, rebuilt first if stale.
    pub fn wrap_rows(&mut self, width: usize) -> &[WrapRow] {
        let width = width.max(1);
        if self.wrap_dirty || self.wrap_width != width {
            self.wrap_cache.clear();
            for (index, line) in self.lines.iter().enumerate() {
                let chars: Vec<char> = line.chars().collect();
                if chars.is_empty() {
                    self.wrap_cache.push(WrapRow {
                        line: index,
                        start_col: 0,
                        text: String::new(),
                    });
                    continue;
                }
                for (chunk_index, chunk) in chars.chunks(width).enumerate() {
                    self.wrap_cache.push(WrapRow {
                        line: index,
                        start_col: chunk_index * width,
                        text: chunk.iter().collect(),
                    });
                }
            }
            self.wrap_width = width;
            self.wrap_dirty = false;
        }
        &self.wrap_cache
    }

    /// Visual row holding the cursor in the wrap table.
    fn cursor_wrap_row(&mut self, width: usize) -> usize {
        let (line, col) = (self.cursor_line, self.cursor_col);
        let rows = self.wrap_rows(width);
        rows.iter()
            .rposition(|r| r.line == line && r.start_col <= col)
            .unwrap_or(0)
    }

    /// Scroll the minimum amount that brings the cursor into a
    /// `width` x `height` viewport.
    pub fn ensure_cursor_visible(&mut self, width: usize, height: usize) {
        if width == 0 || height == 0 {
            return;
        }
        if self.wrap {
            let row = self.cursor_wrap_row(width);
            if row < self.wrap_top_row {
                self.wrap_top_row = row;
            } else if row >= self.wrap_top_row + height {
                self.wrap_top_row = row + 1 - height;
            }
        } else {
            if self.cursor_line < self.top_line {
                self.top_line = self.cursor_line;
            } else if self.cursor_line >= self.top_line + height {
                self.top_line = self.cursor_line + 1 - height;
            }
            if self.cursor_col < self.left_col {
                self.left_col = self.cursor_col;
            } else if self.cursor_col >= self.left_col + width {
                self.left_col = self.cursor_col + 1 - width;
            }
        }
    }

    /// Place the cursor under a viewport-relative cell.
    pub fn click_to_cursor(&mut self, column: usize, row: usize, width: usize) {
        if self.wrap {
            let top = self.wrap_top_row;
            let rows = self.wrap_rows(width);
            let Some(target) = rows.get(top + row).or_else(|| rows.last()) else {
                return;
            };
            let (line, col) = (target.line, target.start_col + column);
            self.cursor_line = line;
            self.cursor_col = col.min(self.line_len(line));
        } else {
            self.cursor_line = (self.top_line + row).min(self.lines.len() - 1);
            self.cursor_col = (self.left_col + column).min(self.line_len(self.cursor_line));
        }
    }

    fn scroll_view(&mut self, delta: isize, width: usize, height: usize) {
        let total = if self.wrap {
            self.wrap_rows(width).len()
        } else {
            self.lines.len()
        };
        let max_top = total.saturating_sub(height);
        let top = if self.wrap {
            &mut self.wrap_top_row
        } else {
            &mut self.top_line
        };
        *top = top.saturating_add_signed(delta).min(max_top);
    }

    /// Rows visible in a `width` x `height` viewport.
    pub fn render_view(&mut self, width: usize, height: usize) -> Vec<ViewRow> {
        let (cursor_line, cursor_col) = (self.cursor_line, self.cursor_col);
        if self.wrap {
            let cursor_row = self.cursor_wrap_row(width);
            let top = self.wrap_top_row;
            let width = width.max(1);
            self.wrap_rows(width)
                .iter()
                .enumerate()
                .skip(top)
                .take(height)
                .map(|(index, row)| ViewRow {
                    text: row.text.clone(),
                    cursor: (index == cursor_row)
                        .then(|| (cursor_col - row.start_col).min(width - 1)),
                })
                .collect()
        } else {
            let left = self.left_col;
            self.lines
                .iter()
                .enumerate()
                .skip(self.top_line)
                .take(height)
                .map(|(index, line)| ViewRow {
                    text: line.chars().skip(left).take(width).collect(),
                    cursor: (index == cursor_line && cursor_col >= left && cursor_col - left < width)
                        .then(|| cursor_col - left),
                })
                .collect()
        }
    }

    fn text_area(&self) -> Rect {
        Rect {
            height: self.area.height.saturating_sub(1),
            ..self.area
        }
    }

    fn status_line(&self) -> String {
        let mut status = format!(" Ln {}, Col {}", self.cursor_line + 1, self.cursor_col + 1);
        if self.wrap {
            status.push_str("  WRAP");
        }
        if self.modified {
            status.push_str("  Modified");
        }
        status
    }

    /// Adopt a new body rectangle. A geometry change can leave the top row
    /// past the end of the rebuilt wrap table or the cursor off screen, so
    /// the viewport is pulled back onto the cursor.
    fn set_area(&mut self, area: Rect) {
        if self.area == area {
            return;
        }
        self.area = area;
        self.clamp_top();
        let (w, h) = (self.text_width(), self.text_height());
        self.ensure_cursor_visible(w, h);
    }

    fn clamp_top(&mut self) {
        let (w, h) = (self.text_width(), self.text_height());
        if self.wrap {
            let total = self.wrap_rows(w).len();
            self.wrap_top_row = self.wrap_top_row.min(total.saturating_sub(h));
        } else {
            self.top_line = self.top_line.min(self.lines.len().saturating_sub(h));
        }
    }

    fn after_edit(&mut self) -> BodyEvent {
        let (w, h) = (self.text_width(), self.text_height());
        self.ensure_cursor_visible(w, h);
        BodyEvent::Handled
    }
}

impl Component for TextDocument {
    fn resize(&mut self, area: Rect, _ctx: &ComponentContext) {
        self.set_area(area);
    }

    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
        self.set_area(area);
        if area.width == 0 || area.height == 0 {
            return;
        }
        self.clamp_top();
        frame.fill(area, " ", crate::theme::body_style());
        let text_area = self.text_area();
        let width = text_area.width as usize;
        let rows = self.render_view(width, text_area.height as usize);
        for (i, row) in rows.iter().enumerate() {
            let y = text_area.y + i as u16;
            frame.print(text_area.x, y, &row.text, crate::theme::body_style());
            if ctx.focused()
                && let Some(col) = row.cursor
            {
                let under = row.text.chars().nth(col).unwrap_or(' ');
                frame.print(
                    text_area.x + col as u16,
                    y,
                    &under.to_string(),
                    crate::theme::cursor_style(),
                );
            }
        }
        let status_y = area.y + area.height - 1;
        frame.print(
            area.x,
            status_y,
            &fit_to_width(&self.status_line(), area.width as usize),
            crate::theme::status_style(),
        );
    }
}

impl WindowBody for TextDocument {
    fn handle_key(&mut self, key: &KeyEvent, keys: &KeyBindings) -> BodyEvent {
        if let Some(action) = keys.action_among(key, &[Action::Save, Action::ToggleWrap]) {
            return self.apply_action(action);
        }
        let plain = !key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
        match key.code {
            KeyCode::Char(ch) if plain => self.insert_char(ch),
            KeyCode::Enter => self.split_line(),
            KeyCode::Backspace => {
                self.backspace();
            }
            KeyCode::Delete => {
                self.delete_forward();
            }
            KeyCode::Left => self.move_cursor(CursorMove::Left),
            KeyCode::Right => self.move_cursor(CursorMove::Right),
            KeyCode::Up => self.move_cursor(CursorMove::Up),
            KeyCode::Down => self.move_cursor(CursorMove::Down),
            KeyCode::Home => self.move_cursor(CursorMove::Home),
            KeyCode::End => self.move_cursor(CursorMove::End),
            KeyCode::PageUp => self.move_cursor(CursorMove::PageUp),
            KeyCode::PageDown => self.move_cursor(CursorMove::PageDown),
            _ => return BodyEvent::Ignored,
        }
        self.after_edit()
    }

    fn handle_mouse(&mut self, mouse: MouseInput) -> BodyEvent {
        let text_area = self.text_area();
        let (width, height) = (text_area.width as usize, text_area.height as usize);
        match mouse.kind {
            MouseKind::ScrollUp => self.scroll_view(-WHEEL_STEP, width, height),
            MouseKind::ScrollDown => self.scroll_view(WHEEL_STEP, width, height),
            MouseKind::Press | MouseKind::DoubleClick
                if rect_contains(text_area, mouse.column, mouse.row) =>
            {
                let local = mouse.localized(text_area.x, text_area.y);
                self.click_to_cursor(local.column as usize, local.row as usize, width);
            }
            _ => return BodyEvent::Ignored,
        }
        BodyEvent::Handled
    }

    fn apply_action(&mut self, action: Action) -> BodyEvent {
        match action {
            Action::NewDocument => {
                self.reset();
                BodyEvent::Handled
            }
            Action::Save => match self.save() {
                Ok(_) => BodyEvent::Handled,
                Err(SaveError::NoPath) => BodyEvent::Notice {
                    title: "Notepad".to_string(),
                    message: "This document has no file name yet. Open a file from the \
                              File Manager to save changes."
                        .to_string(),
                },
                Err(err) => {
                    tracing::warn!(%err, "save failed");
                    BodyEvent::Notice {
                        title: "Save failed".to_string(),
                        message: err.to_string(),
                    }
                }
            },
            Action::ToggleWrap => {
                self.set_wrap(!self.wrap);
                self.after_edit()
            }
            Action::CloseWindow => BodyEvent::Close,
            _ => BodyEvent::Ignored,
        }
    }
}
