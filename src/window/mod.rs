pub mod decorator;

mod window_manager;

use std::fmt;

use ratatui::prelude::Rect;

use crate::components::{
    ComponentContext, DirectoryView, MenuModel, TextDocument, TextView, WindowBody,
};
use crate::components::menu::{file_manager_menu, notepad_menu};
use crate::constants::{MIN_WINDOW_HEIGHT, MIN_WINDOW_HEIGHT_WITH_MENU, MIN_WINDOW_WIDTH};
use crate::layout::floating::{HeaderDrag, ResizeDrag};
use crate::layout::rect_contains;

pub use decorator::{Chrome, HeaderAction, RetroDecorator, WindowDecorator};
pub use window_manager::{Services, SpawnKind, WindowManager};

/// Issued by the window manager from a counter; never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(pub u64);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Pointer interaction in progress on a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interaction {
    #[default]
    Idle,
    Dragging(HeaderDrag),
    Resizing(ResizeDrag),
}

pub enum WindowContent {
    Plain(TextView),
    Document(TextDocument),
    Directory(DirectoryView),
}

impl WindowContent {
    pub fn body_mut(&mut self) -> &mut dyn WindowBody {
        match self {
            WindowContent::Plain(view) => view,
            WindowContent::Document(doc) => doc,
            WindowContent::Directory(dir) => dir,
        }
    }

    fn default_menu(&self) -> Option<MenuModel> {
        match self {
            WindowContent::Plain(_) => None,
            WindowContent::Document(_) => Some(notepad_menu()),
            WindowContent::Directory(_) => Some(file_manager_menu()),
        }
    }
}

pub struct Window {
    id: WindowId,
    title: String,
    rect: Rect,
    visible: bool,
    active: bool,
    minimized: bool,
    maximized: bool,
    prev_rect: Option<Rect>,
    interaction: Interaction,
    content: WindowContent,
    menu: Option<MenuModel>,
}

impl Window {
    pub fn new(id: WindowId, title: impl Into<String>, rect: Rect, content: WindowContent) -> Self {
        let menu = content.default_menu();
        let mut window = Self {
            id,
            title: title.into(),
            rect,
            visible: true,
            active: false,
            minimized: false,
            maximized: false,
            prev_rect: None,
            interaction: Interaction::Idle,
            content,
            menu,
        };
        let (min_w, min_h) = window.min_size();
        window.rect.width = window.rect.width.max(min_w);
        window.rect.height = window.rect.height.max(min_h);
        window.sync_geometry();
        window
    }

    pub fn id(&self) -> WindowId {
        self.id
    }

    /// Notepad titles follow the document name and modified flag.
    pub fn title(&self) -> String {
        match &self.content {
            WindowContent::Document(doc) => doc.title(),
            _ => self.title.clone(),
        }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_minimized(&self) -> bool {
        self.minimized
    }

    pub fn is_maximized(&self) -> bool {
        self.maximized
    }

    pub fn prev_rect(&self) -> Option<Rect> {
        self.prev_rect
    }

    pub fn interaction(&self) -> Interaction {
        self.interaction
    }

    pub fn content(&self) -> &WindowContent {
        &self.content
    }

    pub fn content_mut(&mut self) -> &mut WindowContent {
        &mut self.content
    }

    pub fn menu(&self) -> Option<&MenuModel> {
        self.menu.as_ref()
    }

    pub fn has_menu(&self) -> bool {
        self.menu.is_some()
    }

    pub fn menu_open(&self) -> bool {
        self.menu.as_ref().is_some_and(MenuModel::is_open)
    }

    pub fn document(&self) -> Option<&TextDocument> {
        match &self.content {
            WindowContent::Document(doc) => Some(doc),
            _ => None,
        }
    }

    pub fn directory(&self) -> Option<&DirectoryView> {
        match &self.content {
            WindowContent::Directory(dir) => Some(dir),
            _ => None,
        }
    }

    pub fn min_size(&self) -> (u16, u16) {
        let height = if self.has_menu() {
            MIN_WINDOW_HEIGHT_WITH_MENU
        } else {
            MIN_WINDOW_HEIGHT
        };
        (MIN_WINDOW_WIDTH, height)
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        rect_contains(self.rect, column, row)
    }

    /// Row of the per-window menu bar, right under the title.
    pub fn menu_bar_row(&self) -> Option<u16> {
        self.menu.as_ref().map(|_| self.rect.y + 1)
    }

    /// Inner area handed to the body: inside the border, below the title
    /// bar and the menu bar if any.
    pub fn body_rect(&self) -> Rect {
        let top = 1 + u16::from(self.has_menu());
        Rect {
            x: self.rect.x + 1,
            y: self.rect.y + top,
            width: self.rect.width.saturating_sub(2),
            height: self.rect.height.saturating_sub(top + 1),
        }
    }

    pub(crate) fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
        self.sync_geometry();
    }

    /// Push the current geometry into the body and the menu anchor.
    pub(crate) fn sync_geometry(&mut self) {
        let body = self.body_rect();
        let right = self.rect.x + self.rect.width;
        let bar_y = self.rect.y + 1;
        let bar_x = self.rect.x + 1;
        if let Some(menu) = self.menu.as_mut() {
            menu.set_anchor(bar_x, bar_y, Some(right));
        }
        self.content
            .body_mut()
            .resize(body, &ComponentContext::default());
    }

    pub(crate) fn set_active(&mut self, active: bool) {
        self.active = active;
        if !active {
            self.close_menu();
        }
    }

    pub(crate) fn close_menu(&mut self) {
        if let Some(menu) = self.menu.as_mut() {
            menu.close();
        }
    }

    pub(crate) fn menu_mut(&mut self) -> Option<&mut MenuModel> {
        self.menu.as_mut()
    }

    pub(crate) fn set_interaction(&mut self, interaction: Interaction) {
        self.interaction = interaction;
    }

    pub(crate) fn set_minimized(&mut self, minimized: bool) {
        self.minimized = minimized;
        self.visible = !minimized;
        self.interaction = Interaction::Idle;
        if minimized {
            self.active = false;
            self.close_menu();
        }
    }

    /// Fill `desktop`, remembering the current rect; a second call puts the
    /// window back exactly where it was.
    /// The desktop, grown to the minimum size when the screen is smaller.
    pub(crate) fn maximized_rect(&self, desktop: Rect) -> Rect {
        let (min_w, min_h) = self.min_size();
        Rect {
            width: desktop.width.max(min_w),
            height: desktop.height.max(min_h),
            ..desktop
        }
    }

    pub(crate) fn toggle_maximize(&mut self, desktop: Rect) {
        self.interaction = Interaction::Idle;
        if self.maximized {
            self.maximized = false;
            if let Some(prev) = self.prev_rect.take() {
                self.set_rect(prev);
            }
        } else {
            self.prev_rect = Some(self.rect);
            self.maximized = true;
            self.set_rect(self.maximized_rect(desktop));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(rect: Rect) -> Window {
        Window::new(WindowId(1), "Plain", rect, WindowContent::Plain(TextView::new(["hi"])))
    }

    #[test]
    fn new_enforces_minimum_size() {
        let w = plain(Rect::new(0, 1, 5, 2));
        assert_eq!((w.rect().width, w.rect().height), (20, 6));
    }

    #[test]
    fn body_rect_excludes_border_and_title() {
        let w = plain(Rect::new(4, 2, 30, 10));
        assert_eq!(w.body_rect(), Rect::new(5, 3, 28, 8));
        assert_eq!(w.menu_bar_row(), None);
    }

    #[test]
    fn maximize_round_trip_restores_rect() {
        let mut w = plain(Rect::new(4, 2, 30, 10));
        let desktop = Rect::new(0, 1, 80, 21);
        w.toggle_maximize(desktop);
        assert!(w.is_maximized());
        assert_eq!(w.rect(), desktop);
        w.toggle_maximize(desktop);
        assert!(!w.is_maximized());
        assert_eq!(w.rect(), Rect::new(4, 2, 30, 10));
        assert_eq!(w.prev_rect(), None);
    }

    #[test]
    fn minimize_hides_and_deactivates() {
        let mut w = plain(Rect::new(4, 2, 30, 10));
        w.set_active(true);
        w.set_minimized(true);
        assert!(!w.is_visible());
        assert!(!w.is_active());
        w.set_minimized(false);
        assert!(w.is_visible());
    }

    #[test]
    fn window_id_display() {
        assert_eq!(WindowId(7).to_string(), "#7");
    }
}
