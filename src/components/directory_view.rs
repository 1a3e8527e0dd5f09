//! File manager listing.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;

use crate::components::{
    BodyEvent, Component, ComponentContext, ScrollState, WindowBody, render_scrollbar,
};
use crate::constants::{PAGE_OVERLAP, WHEEL_STEP};
use crate::event::{MouseInput, MouseKind};
use crate::fs::FileSystem;
use crate::keybindings::{Action, KeyBindings};
use crate::layout::rect_contains;
use crate::ui::{UiFrame, fit_to_width, truncate_to_width};

/// Rows above the listing: path header and a rule.
const HEADER_ROWS: u16 = 2;
const SIZE_COLUMN: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub is_dir: bool,
    pub size: u64,
    pub full_path: PathBuf,
}

impl DirEntry {
    pub fn is_parent_link(&self) -> bool {
        self.name == ".."
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    Directory(PathBuf),
    File(PathBuf),
}

/// Human-readable size: bytes up to 1 KiB, then K and M with one decimal.
pub fn format_size(size: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = 1024 * 1024;
    if size <= KIB {
        format!("{}B", size)
    } else if size <= MIB {
        format!("{:.1}K", size as f64 / KIB as f64)
    } else {
        format!("{:.1}M", size as f64 / MIB as f64)
    }
}

pub struct DirectoryView {
    fs: Arc<dyn FileSystem>,
    current_path: PathBuf,
    entries: Vec<DirEntry>,
    selected: usize,
    scroll: ScrollState,
    show_hidden: bool,
    error: Option<String>,
    area: Rect,
}

impl DirectoryView {
    pub fn new(fs: Arc<dyn FileSystem>, start: &Path) -> Self {
        let current_path = fs.realpath(start).unwrap_or_else(|_| start.to_path_buf());
        let mut view = Self {
            fs,
            current_path,
            entries: Vec::new(),
            selected: 0,
            scroll: ScrollState::default(),
            show_hidden: false,
            error: None,
            area: Rect::default(),
        };
        view.rebuild();
        view
    }

    pub fn current_path(&self) -> &Path {
        &self.current_path
    }

    pub fn entries(&self) -> &[DirEntry] {
        &self.entries
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_entry(&self) -> Option<&DirEntry> {
        self.entries.get(self.selected)
    }

    pub fn show_hidden(&self) -> bool {
        self.show_hidden
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// True when the directory has nothing but the parent link.
    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(DirEntry::is_parent_link)
    }

    /// Re-list the current directory. Selection and scroll start over.
    pub fn rebuild(&mut self) {
        self.entries.clear();
        self.selected = 0;
        self.scroll.reset();
        self.error = None;

        if let Some(parent) = self.current_path.parent() {
            self.entries.push(DirEntry {
                name: "..".to_string(),
                is_dir: true,
                size: 0,
                full_path: parent.to_path_buf(),
            });
        }

        let raw = match self.fs.list_dir(&self.current_path) {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!(path = %self.current_path.display(), %err, "directory listing failed");
                self.error = Some(err.to_string());
                return;
            }
        };
        let (mut dirs, mut files): (Vec<DirEntry>, Vec<DirEntry>) = raw
            .into_iter()
            .filter(|e| self.show_hidden || !e.name.starts_with('.'))
            .map(|e| DirEntry {
                full_path: self.current_path.join(&e.name),
                name: e.name,
                is_dir: e.is_dir,
                size: e.size,
            })
            .partition(|e| e.is_dir);
        dirs.sort_by_cached_key(|e| e.name.to_lowercase());
        files.sort_by_cached_key(|e| e.name.to_lowercase());
        self.entries.extend(dirs);
        self.entries.extend(files);
    }

    pub fn navigate_into(&mut self, path: &Path) {
        let resolved = self
            .fs
            .realpath(path)
            .unwrap_or_else(|_| path.to_path_buf());
        tracing::debug!(path = %resolved.display(), "entering directory");
        self.current_path = resolved;
        self.rebuild();
    }

    /// Go up one level and select the directory that was just left.
    pub fn navigate_parent(&mut self) {
        let Some(parent) = self.current_path.parent().map(Path::to_path_buf) else {
            return;
        };
        let child = self
            .current_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned());
        self.navigate_into(&parent);
        if let Some(child) = child
            && let Some(index) = self.entries.iter().position(|e| e.name == child)
        {
            self.selected = index;
            self.scroll.reveal(index, self.list_height());
        }
    }

    pub fn move_selection(&mut self, delta: isize) {
        if self.entries.is_empty() {
            return;
        }
        let last = self.entries.len() - 1;
        self.selected = self.selected.saturating_add_signed(delta).min(last);
        self.scroll.reveal(self.selected, self.list_height());
    }

    pub fn activate_selected(&self) -> Option<Activation> {
        let entry = self.selected_entry()?;
        Some(if entry.is_dir {
            Activation::Directory(entry.full_path.clone())
        } else {
            Activation::File(entry.full_path.clone())
        })
    }

    pub fn toggle_hidden(&mut self) {
        self.show_hidden = !self.show_hidden;
        self.rebuild();
    }

    fn list_area(&self) -> Rect {
        Rect {
            x: self.area.x,
            y: self.area.y + HEADER_ROWS.min(self.area.height),
            width: self.area.width,
            height: self.area.height.saturating_sub(HEADER_ROWS),
        }
    }

    fn list_height(&self) -> usize {
        self.list_area().height as usize
    }

    /// Navigate into a directory in place; files bubble up to the owner.
    fn open_selected(&mut self) -> BodyEvent {
        match self.activate_selected() {
            Some(Activation::Directory(path)) => {
                self.navigate_into(&path);
                BodyEvent::Handled
            }
            Some(Activation::File(path)) => BodyEvent::OpenFile(path),
            None => BodyEvent::Handled,
        }
    }

    fn entry_label(&self, entry: &DirEntry, width: usize, ctx: &ComponentContext) -> String {
        let glyphs = ctx.glyphs();
        if entry.is_dir {
            let suffix = if entry.is_parent_link() { "" } else { "/" };
            return format!(" {} {}{}", glyphs.folder, entry.name, suffix);
        }
        let prefix = format!(" {} ", glyphs.file);
        let size = format_size(entry.size);
        let name_width = width.saturating_sub(prefix.chars().count() + SIZE_COLUMN + 2);
        format!(
            "{}{} {:>w$}",
            prefix,
            fit_to_width(&entry.name, name_width),
            size,
            w = SIZE_COLUMN
        )
    }
}

impl Component for DirectoryView {
    fn resize(&mut self, area: Rect, _ctx: &ComponentContext) {
        self.area = area;
    }

    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
        self.area = area;
        if area.width == 0 || area.height == 0 {
            return;
        }
        let glyphs = ctx.glyphs();
        frame.fill(area, " ", crate::theme::body_style());
        let header = format!(" {} {}", glyphs.folder, self.current_path.display());
        frame.print(
            area.x,
            area.y,
            &truncate_to_width(&header, area.width as usize),
            crate::theme::body_style(),
        );
        if area.height > 1 {
            frame.print(
                area.x,
                area.y + 1,
                &glyphs.separator.repeat(area.width as usize),
                crate::theme::muted_style(),
            );
        }

        let list = self.list_area();
        let view = list.height as usize;
        self.scroll.apply(self.entries.len(), view);
        let overflow = self.entries.len() > view;
        let text_width = if overflow {
            list.width.saturating_sub(1)
        } else {
            list.width
        } as usize;

        let mut y = list.y;
        for (index, entry) in self
            .entries
            .iter()
            .enumerate()
            .skip(self.scroll.offset)
            .take(view)
        {
            let style = if index == self.selected {
                crate::theme::selection_style()
            } else {
                crate::theme::body_style()
            };
            let label = fit_to_width(&self.entry_label(entry, text_width, ctx), text_width);
            frame.print(list.x, y, &label, style);
            y += 1;
        }

        let notice = match &self.error {
            Some(err) => Some(format!("  {}", err)),
            None if self.is_empty() => Some("  (empty directory)".to_string()),
            None => None,
        };
        if let Some(notice) = notice
            && y < list.y + list.height
        {
            frame.print(list.x, y, &notice, crate::theme::muted_style());
        }

        if overflow {
            let bar = Rect {
                x: list.x + list.width - 1,
                width: 1,
                ..list
            };
            render_scrollbar(frame, bar, self.entries.len(), view, self.scroll.offset, glyphs);
        }
    }
}

impl WindowBody for DirectoryView {
    fn handle_key(&mut self, key: &KeyEvent, keys: &KeyBindings) -> BodyEvent {
        if let Some(action) = keys.action_among(
            key,
            &[
                Action::OpenSelected,
                Action::ParentDirectory,
                Action::ToggleHidden,
                Action::Refresh,
            ],
        ) {
            return self.apply_action(action);
        }
        let page = self.list_height().saturating_sub(PAGE_OVERLAP).max(1) as isize;
        match key.code {
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::PageUp => self.move_selection(-page),
            KeyCode::PageDown => self.move_selection(page),
            KeyCode::Home => self.move_selection(isize::MIN),
            KeyCode::End => self.move_selection(isize::MAX),
            _ => return BodyEvent::Ignored,
        }
        BodyEvent::Handled
    }

    fn handle_mouse(&mut self, mouse: MouseInput) -> BodyEvent {
        let list = self.list_area();
        match mouse.kind {
            MouseKind::ScrollUp => self.scroll.bump(-WHEEL_STEP),
            MouseKind::ScrollDown => self.scroll.bump(WHEEL_STEP),
            MouseKind::Press | MouseKind::DoubleClick
                if rect_contains(list, mouse.column, mouse.row) =>
            {
                let index = self.scroll.offset + (mouse.row - list.y) as usize;
                if index >= self.entries.len() {
                    return BodyEvent::Handled;
                }
                self.selected = index;
                if mouse.kind == MouseKind::DoubleClick {
                    return self.open_selected();
                }
            }
            _ => return BodyEvent::Ignored,
        }
        BodyEvent::Handled
    }

    fn apply_action(&mut self, action: Action) -> BodyEvent {
        match action {
            Action::OpenSelected => self.open_selected(),
            Action::ParentDirectory => {
                self.navigate_parent();
                BodyEvent::Handled
            }
            Action::ToggleHidden => {
                self.toggle_hidden();
                BodyEvent::Handled
            }
            Action::Refresh => {
                self.rebuild();
                BodyEvent::Handled
            }
            Action::CloseWindow => BodyEvent::Close,
            _ => BodyEvent::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::{FsError, Metadata, OsFileSystem, RawEntry};
    use crossterm::event::KeyModifiers;
    use std::collections::HashMap;

    /// In-memory tree; any directory not in `dirs` is unreadable.
    #[derive(Default)]
    struct FakeFs {
        dirs: HashMap<PathBuf, Vec<RawEntry>>,
    }

    impl FakeFs {
        fn with(mut self, dir: &str, entries: &[(&str, bool, u64)]) -> Self {
            self.dirs.insert(
                PathBuf::from(dir),
                entries
                    .iter()
                    .map(|(name, is_dir, size)| RawEntry {
                        name: name.to_string(),
                        is_dir: *is_dir,
                        size: *size,
                    })
                    .collect(),
            );
            self
        }
    }

    impl FileSystem for FakeFs {
        fn list_dir(&self, path: &Path) -> Result<Vec<RawEntry>, FsError> {
            self.dirs.get(path).cloned().ok_or(FsError::PermissionDenied)
        }
        fn stat(&self, path: &Path) -> Result<Metadata, FsError> {
            Ok(Metadata {
                is_dir: self.dirs.contains_key(path),
                size: 0,
            })
        }
        fn realpath(&self, path: &Path) -> Result<PathBuf, FsError> {
            Ok(path.to_path_buf())
        }
        fn read(&self, _path: &Path) -> Result<Vec<u8>, FsError> {
            Err(FsError::NotFound)
        }
        fn write(&self, _path: &Path, _data: &[u8]) -> Result<(), FsError> {
            Err(FsError::PermissionDenied)
        }
    }

    fn names(view: &DirectoryView) -> Vec<&str> {
        view.entries().iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn format_size_thresholds() {
        assert_eq!(format_size(0), "0B");
        assert_eq!(format_size(1024), "1024B");
        assert_eq!(format_size(1536), "1.5K");
        assert_eq!(format_size(1024 * 1024), "1024.0K");
        assert_eq!(format_size(3 * 1024 * 1024 + 1024 * 512), "3.5M");
    }

    #[test]
    fn orders_parent_dirs_then_files_case_insensitively() {
        let fs = FakeFs::default().with(
            "/home/u",
            &[
                ("zeta.txt", false, 10),
                ("Beta", true, 0),
                ("alpha", true, 0),
                ("Apple.md", false, 2000),
                (".hidden", false, 1),
            ],
        );
        let view = DirectoryView::new(Arc::new(fs), Path::new("/home/u"));
        assert_eq!(names(&view), vec!["..", "alpha", "Beta", "Apple.md", "zeta.txt"]);
        assert_eq!(view.selected(), 0);
    }

    #[test]
    fn hidden_files_toggle() {
        let fs = FakeFs::default().with("/d", &[(".rc", false, 1), ("a", false, 1)]);
        let mut view = DirectoryView::new(Arc::new(fs), Path::new("/d"));
        assert_eq!(names(&view), vec!["..", "a"]);
        view.toggle_hidden();
        assert_eq!(names(&view), vec!["..", ".rc", "a"]);
    }

    #[test]
    fn empty_directory_and_root() {
        let fs = FakeFs::default().with("/empty", &[]).with("/", &[]);
        let fs = Arc::new(fs);
        let view = DirectoryView::new(fs.clone(), Path::new("/empty"));
        assert_eq!(names(&view), vec![".."]);
        assert!(view.is_empty());
        let root = DirectoryView::new(fs, Path::new("/"));
        assert!(root.entries().is_empty());
        assert!(root.is_empty());
    }

    #[test]
    fn unreadable_directory_sets_error() {
        let view = DirectoryView::new(Arc::new(FakeFs::default()), Path::new("/secret"));
        assert_eq!(view.error(), Some("Permission denied"));
        assert_eq!(names(&view), vec![".."]);
    }

    #[test]
    fn navigate_into_then_parent_reselects_child() {
        let fs = FakeFs::default()
            .with("/p", &[("a", true, 0), ("b", true, 0), ("c", true, 0)])
            .with("/p/b", &[("inner.txt", false, 3)]);
        let mut view = DirectoryView::new(Arc::new(fs), Path::new("/p"));
        view.move_selection(2);
        assert_eq!(
            view.activate_selected(),
            Some(Activation::Directory(PathBuf::from("/p/b")))
        );
        view.navigate_into(Path::new("/p/b"));
        assert_eq!(view.current_path(), Path::new("/p/b"));
        view.navigate_parent();
        assert_eq!(view.current_path(), Path::new("/p"));
        assert_eq!(view.selected_entry().map(|e| e.name.as_str()), Some("b"));
    }

    #[test]
    fn enter_on_file_bubbles_open_request() {
        let fs = FakeFs::default().with("/p", &[("notes.txt", false, 3)]);
        let mut view = DirectoryView::new(Arc::new(fs), Path::new("/p"));
        let kb = KeyBindings::default();
        view.handle_key(&KeyEvent::new(KeyCode::Down, KeyModifiers::NONE), &kb);
        let ev = view.handle_key(&KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE), &kb);
        assert_eq!(ev, BodyEvent::OpenFile(PathBuf::from("/p/notes.txt")));
    }

    #[test]
    fn selection_clamps_and_scrolls() {
        let entries: Vec<(String, bool, u64)> =
            (0..30).map(|i| (format!("f{:02}", i), false, 1)).collect();
        let borrowed: Vec<(&str, bool, u64)> =
            entries.iter().map(|(n, d, s)| (n.as_str(), *d, *s)).collect();
        let fs = FakeFs::default().with("/many", &borrowed);
        let mut view = DirectoryView::new(Arc::new(fs), Path::new("/many"));
        view.resize(Rect::new(0, 0, 30, 12), &ComponentContext::default());
        view.move_selection(100);
        assert_eq!(view.selected(), 30);
        assert_eq!(view.scroll.offset, 21);
        view.move_selection(isize::MIN);
        assert_eq!(view.selected(), 0);
        assert_eq!(view.scroll.offset, 0);
    }

    #[test]
    fn click_selects_and_double_click_enters() {
        let fs = FakeFs::default()
            .with("/p", &[("sub", true, 0)])
            .with("/p/sub", &[]);
        let mut view = DirectoryView::new(Arc::new(fs), Path::new("/p"));
        view.resize(Rect::new(10, 5, 30, 10), &ComponentContext::default());
        // list starts two rows below the body origin; row 8 is entry 1
        let ev = view.handle_mouse(MouseInput::new(12, 8, MouseKind::Press));
        assert_eq!(ev, BodyEvent::Handled);
        assert_eq!(view.selected(), 1);
        view.handle_mouse(MouseInput::new(12, 8, MouseKind::DoubleClick));
        assert_eq!(view.current_path(), Path::new("/p/sub"));
    }

    #[test]
    fn real_directory_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("child")).unwrap();
        std::fs::write(dir.path().join("file.txt"), b"abc").unwrap();
        let mut view = DirectoryView::new(Arc::new(OsFileSystem), dir.path());
        let start = view.current_path().to_path_buf();
        assert_eq!(names(&view), vec!["..", "child", "file.txt"]);
        view.navigate_into(&start.join("child"));
        assert!(view.is_empty());
        view.navigate_parent();
        assert_eq!(view.current_path(), start);
        assert_eq!(view.selected_entry().map(|e| e.name.as_str()), Some("child"));
    }

    #[test]
    fn render_shows_header_and_empty_marker() {
        use ratatui::buffer::Buffer;
        let fs = FakeFs::default().with("/e", &[]);
        let mut view = DirectoryView::new(Arc::new(fs), Path::new("/e"));
        let area = Rect::new(0, 0, 30, 6);
        let mut buf = Buffer::empty(area);
        let mut frame = UiFrame::from_parts(area, &mut buf);
        let ctx = ComponentContext::default().with_unicode(false);
        view.render(&mut frame, area, &ctx);
        let row = |y: u16| -> String {
            (0..30).map(|x| buf.cell((x, y)).unwrap().symbol().to_string()).collect()
        };
        assert!(row(0).starts_with(" [D] /e"));
        assert!(row(2).starts_with(" [D] .."));
        assert!(row(3).contains("(empty directory)"));
    }
}
