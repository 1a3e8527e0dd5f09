use std::path::PathBuf;

use crossterm::event::KeyEvent;
use ratatui::layout::Rect;

use crate::actions::Action;
use crate::event::MouseInput;
use crate::keybindings::KeyBindings;
use crate::ui::UiFrame;

pub mod dialog;
pub mod directory_view;
pub mod menu;
pub mod scroll_view;
pub mod text_document;
pub mod text_view;

pub use dialog::{Dialog, DialogPurpose};
pub use directory_view::{Activation, DirEntry, DirectoryView, format_size};
pub use menu::{MenuDirection, MenuEntry, MenuGroup, MenuHit, MenuModel};
pub use scroll_view::{ScrollState, render_scrollbar};
pub use text_document::{CursorMove, OpenError, TextDocument, ViewRow, WrapRow};
pub use text_view::TextView;

pub use crate::component_context::ComponentContext;

pub trait Component {
    fn resize(&mut self, _area: Rect, _ctx: &ComponentContext) {}

    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext);
}

/// What a window body asks its owner to do after handling input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyEvent {
    Ignored,
    Handled,
    /// A file was activated; the window manager decides how to open it.
    OpenFile(PathBuf),
    Close,
    Notice { title: String, message: String },
}

impl BodyEvent {
    pub fn consumed(&self) -> bool {
        !matches!(self, BodyEvent::Ignored)
    }
}

/// Contract between a window and its content. The window manager calls
/// `resize` with the body rectangle (screen coordinates) whenever the
/// window geometry changes and before every render; input arrives in
/// screen coordinates as well.
pub trait WindowBody: Component {
    fn handle_key(&mut self, key: &KeyEvent, keys: &KeyBindings) -> BodyEvent;

    fn handle_mouse(&mut self, mouse: MouseInput) -> BodyEvent;

    fn apply_action(&mut self, _action: Action) -> BodyEvent {
        BodyEvent::Ignored
    }
}
