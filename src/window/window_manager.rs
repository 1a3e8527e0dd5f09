use std::path::{Path, PathBuf};
use std::sync::Arc;

use crossterm::event::KeyEvent;
use indoc::indoc;
use ratatui::prelude::Rect;

use super::decorator::{Chrome, HeaderAction, RetroDecorator, WindowDecorator};
use super::{Interaction, Window, WindowContent, WindowId};
use crate::actions::Action;
use crate::components::{
    BodyEvent, Component, ComponentContext, Dialog, DialogPurpose, DirectoryView, MenuHit,
    MenuModel, OpenError, TextDocument, TextView,
};
use crate::components::menu::global_menu;
use crate::constants::{CASCADE_STEP, NEW_WINDOW_SIZE};
use crate::event::{InputEvent, MouseInput, MouseKind};
use crate::fs::{FileSystem, OsFileSystem};
use crate::icons::{DESKTOP_ICONS, icon_at, render_icons};
use crate::keybindings::KeyBindings;
use crate::layout::floating::{
    HeaderDrag, ResizeDrag, apply_header_drag, apply_resize_drag, clamp_rect, resize_edge_at,
};
use crate::layout::{ScreenLayout, rect_contains};
use crate::panel::{Panel, StatusInfo, TaskbarButton, taskbar_buttons, taskbar_hit};
use crate::process::{self, LaunchError};
use crate::state::AppState;
use crate::sysinfo::{HostSystemInfo, SystemInfoProvider};
use crate::term_color::Palette;
use crate::ui::{Glyphs, UiFrame};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Column where the first global menu label starts; the `≡` glyph sits
/// in front of it.
const GLOBAL_MENU_X: u16 = 2;

const NOTICE_WIDTH: u16 = 44;
const ABOUT_WIDTH: u16 = 52;
const HELP_WIDTH: u16 = 46;

/// Cascade origins and sizes per window kind.
const BLANK_ORIGIN: (u16, u16) = (20, 3);
const NOTEPAD_ORIGIN: (u16, u16) = (20, 4);
const NOTEPAD_SIZE: (u16, u16) = (50, 18);
const FILE_MANAGER_ORIGIN: (u16, u16) = (15, 3);
const FILE_MANAGER_SIZE: (u16, u16) = (55, 20);
const TERMINAL_ORIGIN: (u16, u16) = (18, 5);
const TERMINAL_SIZE: (u16, u16) = (60, 15);
const SETTINGS_ORIGIN: (u16, u16) = (22, 4);
const SETTINGS_SIZE: (u16, u16) = (48, 15);
const WELCOME_SIZE: (u16, u16) = (50, 20);

const WELCOME_TEXT: &str = indoc! {"

    Welcome to RetroTUI

    A Windows 3.1 style desktop
    environment for the terminal.

    Features:
      - Mouse support
      - Draggable, resizable windows
      - Dropdown menus
      - Desktop icons
      - Notepad and File Manager

    Use the mouse or the keyboard.
    Press Ctrl+Q to exit.
"};

const HELP_TEXT: &str = indoc! {"
    Keyboard Controls:

    Tab - Cycle windows
    Escape - Close menu or dialog
    Enter - Activate selection
    Ctrl+Q - Exit
    F10 - Open menu
    Arrow keys - Navigate
    PgUp/PgDn - Scroll content
    Ctrl+S - Save (Notepad)
    Ctrl+W - Word wrap (Notepad)

    Mouse Controls:

    Click - Select or activate
    Double click - Open icon or file
    Drag title - Move window
    Drag border - Resize window
    Scroll - Scroll content"};

/// Host services shared by every window.
#[derive(Clone)]
pub struct Services {
    pub fs: Arc<dyn FileSystem>,
    pub sysinfo: Arc<dyn SystemInfoProvider>,
}

impl Services {
    pub fn host() -> Self {
        Self {
            fs: Arc::new(OsFileSystem),
            sysinfo: Arc::new(HostSystemInfo),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnKind {
    Blank,
    Welcome,
    Notepad,
    FileManager,
    Terminal,
    Settings,
}

enum Placement {
    Cascade { origin: (u16, u16), size: (u16, u16) },
    Centered { size: (u16, u16) },
}

/// Owns the desktop: windows in z-order (last is topmost), the global
/// menu, the modal dialog and the icon selection. Every input event enters
/// through [`WindowManager::dispatch`].
pub struct WindowManager {
    windows: Vec<Window>,
    next_id: u64,
    menu: MenuModel,
    dialog: Option<Dialog>,
    selected_icon: Option<usize>,
    keys: KeyBindings,
    state: AppState,
    area: Rect,
    layout: ScreenLayout,
    services: Services,
    start_dir: PathBuf,
    pending_launch: Option<PathBuf>,
    decorator: Arc<dyn WindowDecorator>,
    panel: Panel,
}

impl WindowManager {
    pub fn new(area: Rect, start_dir: impl Into<PathBuf>, services: Services) -> Self {
        let layout = ScreenLayout::split(area);
        let mut menu = global_menu();
        menu.set_anchor(
            area.x + GLOBAL_MENU_X,
            layout.menu_bar.y,
            Some(area.x + area.width),
        );
        Self {
            windows: Vec::new(),
            next_id: 1,
            menu,
            dialog: None,
            selected_icon: None,
            keys: KeyBindings::default(),
            state: AppState::new(),
            area,
            layout,
            services,
            start_dir: start_dir.into(),
            pending_launch: None,
            decorator: Arc::new(RetroDecorator),
            panel: Panel::new(),
        }
    }

    pub fn windows(&self) -> &[Window] {
        &self.windows
    }

    pub fn window(&self, id: WindowId) -> Option<&Window> {
        self.windows.iter().find(|w| w.id() == id)
    }

    fn window_mut(&mut self, id: WindowId) -> Option<&mut Window> {
        self.windows.iter_mut().find(|w| w.id() == id)
    }

    fn index_of(&self, id: WindowId) -> Option<usize> {
        self.windows.iter().position(|w| w.id() == id)
    }

    pub fn active_window(&self) -> Option<&Window> {
        self.windows.iter().rev().find(|w| w.is_active())
    }

    fn active_id(&self) -> Option<WindowId> {
        self.active_window().map(Window::id)
    }

    pub fn dialog(&self) -> Option<&Dialog> {
        self.dialog.as_ref()
    }

    pub fn menu(&self) -> &MenuModel {
        &self.menu
    }

    pub fn selected_icon(&self) -> Option<usize> {
        self.selected_icon
    }

    pub fn keys(&self) -> &KeyBindings {
        &self.keys
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.running()
    }

    pub fn layout(&self) -> ScreenLayout {
        self.layout
    }

    pub fn desktop(&self) -> Rect {
        self.layout.desktop
    }

    pub fn start_dir(&self) -> &Path {
        &self.start_dir
    }

    pub fn set_unicode(&mut self, unicode: bool) {
        self.state.set_unicode(unicode);
    }

    /// Turn the menu bar clock off; useful for deterministic renders.
    pub fn set_show_clock(&mut self, show: bool) {
        self.panel.set_show_clock(show);
    }

    fn ctx(&self) -> ComponentContext {
        ComponentContext::default().with_unicode(self.state.unicode())
    }

    fn glyphs(&self) -> &'static Glyphs {
        Glyphs::for_mode(self.state.unicode())
    }

    /// Media file waiting for the external player, taken by the runner.
    pub fn take_pending_launch(&mut self) -> Option<PathBuf> {
        self.pending_launch.take()
    }

    pub fn report_launch_failure(&mut self, path: &Path, err: &LaunchError) {
        tracing::warn!(path = %path.display(), %err, "media hand-off failed");
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        self.show_dialog(Dialog::info(
            "Media Player",
            &format!("Could not play {name}.\n\n{err}"),
            NOTICE_WIDTH,
        ));
    }

    pub fn taskbar_buttons(&self) -> Vec<TaskbarButton> {
        let minimized: Vec<(WindowId, String)> = self
            .windows
            .iter()
            .filter(|w| w.is_minimized())
            .map(|w| (w.id(), w.title()))
            .collect();
        taskbar_buttons(self.layout.taskbar, &minimized)
    }

    pub fn dispatch(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::Key(key) => self.handle_key(key),
            InputEvent::Mouse(mouse) => self.handle_mouse(*mouse),
            InputEvent::Resize(width, height) => {
                self.resize(Rect::new(0, 0, *width, *height));
                true
            }
        }
    }

    pub fn resize(&mut self, area: Rect) {
        self.area = area;
        self.layout = ScreenLayout::split(area);
        self.menu.set_anchor(
            area.x + GLOBAL_MENU_X,
            self.layout.menu_bar.y,
            Some(area.x + area.width),
        );
        let desktop = self.layout.desktop;
        for window in &mut self.windows {
            let rect = if window.is_maximized() {
                window.maximized_rect(desktop)
            } else {
                let (min_w, min_h) = window.min_size();
                clamp_rect(window.rect(), desktop, min_w, min_h)
            };
            window.set_rect(rect);
        }
        let ctx = self.ctx();
        if let Some(dialog) = self.dialog.as_mut() {
            dialog.resize(area, &ctx);
        }
    }

    // ----- keyboard -----

    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if let Some(dialog) = self.dialog.as_mut() {
            if let Some(button) = dialog.key(key, &self.keys) {
                self.resolve_dialog(button);
            }
            return true;
        }
        if self.keys.matches(Action::Exit, key) {
            self.execute_action(Action::Exit);
            return true;
        }
        if self.keys.matches(Action::ToggleMenu, key) {
            self.execute_action(Action::ToggleMenu);
            return true;
        }
        let window_menu_open = self.active_window().is_some_and(Window::menu_open);
        if self.keys.matches(Action::CloseMenu, key) && (self.menu.is_open() || window_menu_open) {
            self.execute_action(Action::CloseMenu);
            return true;
        }
        if self.menu.is_open() {
            let (_, action) = self.menu.handle_key(key, &self.keys);
            if let Some(action) = action {
                self.execute_action(action);
            }
            return true;
        }
        if window_menu_open && let Some(id) = self.active_id() {
            let keys = &self.keys;
            let result = self
                .windows
                .iter_mut()
                .find(|w| w.id() == id)
                .and_then(|w| w.menu_mut())
                .map(|menu| menu.handle_key(key, keys));
            if let Some((consumed, action)) = result {
                if let Some(action) = action {
                    self.route_window_action(id, action);
                }
                if consumed {
                    return true;
                }
            }
        }
        if self.keys.matches(Action::CycleWindow, key) {
            self.cycle_windows();
            return true;
        }
        let Some(id) = self.active_id() else {
            return false;
        };
        let keys = &self.keys;
        let Some(window) = self.windows.iter_mut().find(|w| w.id() == id) else {
            return false;
        };
        let event = window.content_mut().body_mut().handle_key(key, keys);
        let consumed = event.consumed();
        self.handle_body_event(id, event);
        consumed
    }

    // ----- mouse -----

    pub fn handle_mouse(&mut self, mouse: MouseInput) -> bool {
        let (column, row) = (mouse.column, mouse.row);

        if let Some(dialog) = self.dialog.as_ref() {
            if mouse.is_press()
                && let Some(button) = dialog.click(column, row)
            {
                self.resolve_dialog(button);
            }
            return true;
        }

        let bar = self.layout.menu_bar;
        if bar.height > 0 && row == bar.y && mouse.is_press() {
            self.close_window_menus();
            if column < bar.x + GLOBAL_MENU_X {
                if self.menu.is_open() {
                    self.menu.close();
                } else {
                    self.menu.open(0);
                }
            } else if let Some(action) = self.menu.click(column, row) {
                self.execute_action(action);
            }
            return true;
        }

        if self.menu.is_open() {
            let inside = self.menu.hit_test(column, row) != MenuHit::Outside;
            match mouse.kind {
                MouseKind::Move | MouseKind::Drag => {
                    self.menu.hover(column, row);
                    return true;
                }
                MouseKind::Press | MouseKind::DoubleClick if inside => {
                    if let Some(action) = self.menu.click(column, row) {
                        self.execute_action(action);
                    }
                    return true;
                }
                MouseKind::Press | MouseKind::DoubleClick => self.menu.close(),
                _ => return true,
            }
        }

        if mouse.is_press()
            && let Some(id) = taskbar_hit(&self.taskbar_buttons(), column, row)
        {
            self.restore(id);
            return true;
        }

        if let Some(index) = self
            .windows
            .iter()
            .position(|w| w.interaction() != Interaction::Idle)
        {
            match mouse.kind {
                MouseKind::Drag | MouseKind::Move => {
                    self.continue_interaction(index, column, row);
                    return true;
                }
                MouseKind::Release => {
                    self.windows[index].set_interaction(Interaction::Idle);
                    return true;
                }
                _ => self.windows[index].set_interaction(Interaction::Idle),
            }
        }

        for index in (0..self.windows.len()).rev() {
            let window = &self.windows[index];
            if !window.is_visible() {
                continue;
            }
            let id = window.id();
            if window.menu_open() {
                let hit = window
                    .menu()
                    .map_or(MenuHit::Outside, |m| m.hit_test(column, row));
                if hit != MenuHit::Outside {
                    self.mouse_on_window_menu(id, mouse);
                    return true;
                }
                if mouse.is_press() {
                    self.windows[index].close_menu();
                }
            }
            if self.windows[index].contains(column, row) {
                return self.mouse_on_window(id, mouse);
            }
        }

        if mouse.is_press()
            && let Some(index) = icon_at(self.layout.desktop, column, row)
        {
            self.selected_icon = Some(index);
            if mouse.kind == MouseKind::DoubleClick
                && let Some(icon) = DESKTOP_ICONS.get(index)
            {
                self.execute_action(icon.action);
            }
            return true;
        }

        if mouse.is_press() {
            self.selected_icon = None;
            self.menu.close();
        }
        false
    }

    fn continue_interaction(&mut self, index: usize, column: u16, row: u16) {
        let desktop = self.layout.desktop;
        let Some(window) = self.windows.get_mut(index) else {
            return;
        };
        let (min_w, min_h) = window.min_size();
        let rect = match window.interaction() {
            Interaction::Dragging(drag) => {
                apply_header_drag(window.rect(), drag, column, row, desktop)
            }
            Interaction::Resizing(drag) => {
                apply_resize_drag(drag, column, row, desktop, min_w, min_h)
            }
            Interaction::Idle => return,
        };
        if rect != window.rect() {
            window.set_rect(rect);
        }
    }

    fn mouse_on_window_menu(&mut self, id: WindowId, mouse: MouseInput) {
        let Some(menu) = self.window_mut(id).and_then(Window::menu_mut) else {
            return;
        };
        let action = match mouse.kind {
            MouseKind::Move | MouseKind::Drag => {
                menu.hover(mouse.column, mouse.row);
                None
            }
            MouseKind::Press | MouseKind::DoubleClick => menu.click(mouse.column, mouse.row),
            _ => None,
        };
        if let Some(action) = action {
            self.route_window_action(id, action);
        }
    }

    fn mouse_on_window(&mut self, id: WindowId, mouse: MouseInput) -> bool {
        let Some(window) = self.window(id) else {
            return false;
        };
        let rect = window.rect();
        let maximized = window.is_maximized();
        let menu_row = window.menu_bar_row();
        let body = window.body_rect();
        let (column, row) = (mouse.column, mouse.row);

        if mouse.is_scroll() {
            self.forward_mouse(id, mouse);
            return true;
        }
        if !mouse.is_press() {
            return true;
        }

        if let Some(action) = self.decorator.hit_test(rect, column, row) {
            match action {
                HeaderAction::Close => self.close(id),
                HeaderAction::Minimize => self.minimize(id),
                HeaderAction::Maximize => {
                    self.activate(id);
                    self.toggle_maximize(id);
                }
                HeaderAction::Drag => {
                    self.activate(id);
                    if mouse.kind == MouseKind::DoubleClick {
                        self.toggle_maximize(id);
                    } else if !maximized && let Some(window) = self.window_mut(id) {
                        window.set_interaction(Interaction::Dragging(HeaderDrag {
                            offset_x: column - rect.x,
                            offset_y: row - rect.y,
                        }));
                    }
                }
            }
            return true;
        }

        if !maximized && let Some(edge) = resize_edge_at(rect, column, row) {
            self.activate(id);
            if let Some(window) = self.window_mut(id) {
                window.set_interaction(Interaction::Resizing(ResizeDrag {
                    edge,
                    start_rect: rect,
                    start_col: column,
                    start_row: row,
                }));
            }
            return true;
        }

        self.activate(id);
        if menu_row == Some(row) {
            let action = self
                .window_mut(id)
                .and_then(Window::menu_mut)
                .and_then(|menu| menu.click(column, row));
            if let Some(action) = action {
                self.route_window_action(id, action);
            }
            return true;
        }
        if rect_contains(body, column, row) {
            self.forward_mouse(id, mouse);
        }
        true
    }

    fn forward_mouse(&mut self, id: WindowId, mouse: MouseInput) {
        let Some(window) = self.window_mut(id) else {
            return;
        };
        let event = window.content_mut().body_mut().handle_mouse(mouse);
        self.handle_body_event(id, event);
    }

    // ----- actions -----

    pub fn execute_action(&mut self, action: Action) {
        tracing::debug!(%action, "executing action");
        match action {
            Action::NewWindow => {
                self.spawn(SpawnKind::Blank);
            }
            Action::OpenNotepad => {
                self.spawn(SpawnKind::Notepad);
            }
            Action::OpenFileManager => {
                self.spawn(SpawnKind::FileManager);
            }
            Action::OpenTerminal => {
                self.spawn(SpawnKind::Terminal);
            }
            Action::OpenSettings => {
                self.spawn(SpawnKind::Settings);
            }
            Action::ToggleMouseCapture => self.state.toggle_mouse_capture(),
            Action::About => self.show_about(),
            Action::Help => self.show_dialog(Dialog::info(
                "Keyboard & Mouse Help",
                HELP_TEXT,
                HELP_WIDTH,
            )),
            Action::Exit => self.show_dialog(
                Dialog::new(
                    "Exit RetroTUI",
                    "Are you sure you want to exit?\n\nAll windows will be closed.",
                    &["Yes", "No"],
                    NOTICE_WIDTH,
                )
                .with_purpose(DialogPurpose::ConfirmExit),
            ),
            Action::CycleWindow => self.cycle_windows(),
            Action::ToggleMenu => {
                if self.menu.is_open() {
                    self.menu.close();
                } else {
                    self.close_window_menus();
                    self.menu.open(0);
                }
            }
            Action::CloseMenu => {
                self.menu.close();
                self.close_window_menus();
            }
            scoped if scoped.is_window_scoped() => {
                if let Some(id) = self.active_id() {
                    self.route_window_action(id, scoped);
                }
            }
            _ => {}
        }
    }

    /// Apply a window-scoped action to `id`'s content.
    fn route_window_action(&mut self, id: WindowId, action: Action) {
        let Some(window) = self.window_mut(id) else {
            return;
        };
        let event = window.content_mut().body_mut().apply_action(action);
        self.handle_body_event(id, event);
    }

    fn handle_body_event(&mut self, id: WindowId, event: BodyEvent) {
        match event {
            BodyEvent::Ignored | BodyEvent::Handled => {}
            BodyEvent::OpenFile(path) => self.open_file(&path),
            BodyEvent::Close => self.close(id),
            BodyEvent::Notice { title, message } => {
                self.show_dialog(Dialog::info(title, &message, NOTICE_WIDTH));
            }
        }
    }

    fn show_about(&mut self) {
        let info = self.services.sysinfo.system_info();
        let message = format!(
            "RetroTUI v{VERSION}\nA retro desktop environment for the terminal.\n\nSystem Information:\n{}",
            info.lines().join("\n")
        );
        self.show_dialog(Dialog::info("About RetroTUI", &message, ABOUT_WIDTH));
    }

    fn show_dialog(&mut self, mut dialog: Dialog) {
        self.menu.close();
        self.close_window_menus();
        dialog.resize(self.area, &self.ctx());
        self.dialog = Some(dialog);
    }

    fn resolve_dialog(&mut self, button: usize) {
        let Some(dialog) = self.dialog.take() else {
            return;
        };
        tracing::debug!(title = dialog.title(), button, "dialog closed");
        if dialog.purpose() == DialogPurpose::ConfirmExit && button == 0 {
            self.state.request_exit();
        }
    }

    fn close_window_menus(&mut self) {
        for window in &mut self.windows {
            window.close_menu();
        }
    }

    /// Media goes to the player hand-off; anything else opens in Notepad
    /// unless it looks binary or cannot be read.
    pub fn open_file(&mut self, path: &Path) {
        if process::is_media(path) {
            tracing::info!(path = %path.display(), "queueing media hand-off");
            self.pending_launch = Some(path.to_path_buf());
            return;
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        match TextDocument::open(path, Arc::clone(&self.services.fs)) {
            Ok(doc) => {
                let rect = self.place(Placement::Cascade {
                    origin: NOTEPAD_ORIGIN,
                    size: NOTEPAD_SIZE,
                });
                self.insert_window("Notepad", rect, WindowContent::Document(doc));
            }
            Err(OpenError::Binary) => {
                tracing::debug!(path = %path.display(), "refusing binary file");
                self.show_dialog(Dialog::info(
                    "Binary File",
                    &format!("{name} looks like a binary file and cannot be opened in Notepad."),
                    NOTICE_WIDTH,
                ));
            }
            Err(OpenError::Fs(err)) => {
                tracing::warn!(path = %path.display(), %err, "open failed");
                self.show_dialog(Dialog::info(
                    "Error",
                    &format!("Cannot open {name}:\n{err}"),
                    NOTICE_WIDTH,
                ));
            }
        }
    }

    // ----- window lifecycle -----

    pub fn spawn(&mut self, kind: SpawnKind) -> WindowId {
        let fs = Arc::clone(&self.services.fs);
        let (title, placement, content) = match kind {
            SpawnKind::Blank => (
                format!("Window {}", self.next_id),
                Placement::Cascade {
                    origin: BLANK_ORIGIN,
                    size: NEW_WINDOW_SIZE,
                },
                WindowContent::Plain(TextView::new(["", " New empty window", ""])),
            ),
            SpawnKind::Welcome => (
                "Welcome to RetroTUI".to_string(),
                Placement::Centered { size: WELCOME_SIZE },
                WindowContent::Plain(TextView::new(WELCOME_TEXT.lines())),
            ),
            SpawnKind::Notepad => (
                "Notepad".to_string(),
                Placement::Cascade {
                    origin: NOTEPAD_ORIGIN,
                    size: NOTEPAD_SIZE,
                },
                WindowContent::Document(TextDocument::new(fs)),
            ),
            SpawnKind::FileManager => (
                "File Manager".to_string(),
                Placement::Cascade {
                    origin: FILE_MANAGER_ORIGIN,
                    size: FILE_MANAGER_SIZE,
                },
                WindowContent::Directory(DirectoryView::new(fs, &self.start_dir)),
            ),
            SpawnKind::Terminal => (
                "Terminal".to_string(),
                Placement::Cascade {
                    origin: TERMINAL_ORIGIN,
                    size: TERMINAL_SIZE,
                },
                WindowContent::Plain(TextView::new(terminal_placeholder())),
            ),
            SpawnKind::Settings => (
                "Settings".to_string(),
                Placement::Cascade {
                    origin: SETTINGS_ORIGIN,
                    size: SETTINGS_SIZE,
                },
                WindowContent::Plain(TextView::new(self.settings_lines())),
            ),
        };
        let rect = self.place(placement);
        self.insert_window(title, rect, content)
    }

    fn place(&self, placement: Placement) -> Rect {
        let count = self.windows.len() as u16;
        let desktop = self.layout.desktop;
        match placement {
            Placement::Cascade { origin, size } => Rect {
                x: self.area.x + origin.0 + count.saturating_mul(CASCADE_STEP.0),
                y: self.area.y + origin.1 + count.saturating_mul(CASCADE_STEP.1),
                width: size.0,
                height: size.1,
            },
            Placement::Centered { size } => Rect {
                x: desktop.x + desktop.width.saturating_sub(size.0) / 2,
                y: desktop.y + desktop.height.saturating_sub(size.1) / 2,
                width: size.0,
                height: size.1,
            },
        }
    }

    fn insert_window(
        &mut self,
        title: impl Into<String>,
        rect: Rect,
        content: WindowContent,
    ) -> WindowId {
        let id = WindowId(self.next_id);
        self.next_id += 1;
        let mut window = Window::new(id, title, rect, content);
        let (min_w, min_h) = window.min_size();
        window.set_rect(clamp_rect(window.rect(), self.layout.desktop, min_w, min_h));
        tracing::debug!(window_id = %id, title = %window.title(), "opened window");
        self.windows.push(window);
        self.activate(id);
        id
    }

    fn settings_lines(&self) -> Vec<String> {
        let glyphs = if self.state.unicode() {
            "Unicode"
        } else {
            "ASCII"
        };
        let palette = match crate::theme::palette() {
            Palette::TrueColor => "truecolor",
            Palette::Indexed256 => "256 colors",
            Palette::Basic16 => "16 colors",
        };
        let mouse = if self.state.mouse_capture_enabled() {
            "Enabled"
        } else {
            "Disabled"
        };
        vec![
            String::new(),
            " Display Settings".to_string(),
            String::new(),
            "  Theme:   Windows 3.1".to_string(),
            format!("  Glyphs:  {glyphs}"),
            format!("  Colors:  {palette}"),
            format!("  Pattern: {}", self.glyphs().desktop_fill.repeat(3)),
            format!("  Mouse:   {mouse}"),
            String::new(),
            " Toggle the mouse from Edit > Toggle Mouse.".to_string(),
        ]
    }

    /// Bring `id` to the front and make it the only active window.
    pub fn activate(&mut self, id: WindowId) {
        let Some(index) = self.index_of(id) else {
            return;
        };
        for window in &mut self.windows {
            if window.id() != id {
                window.set_active(false);
            }
        }
        let mut window = self.windows.remove(index);
        window.set_active(true);
        self.windows.push(window);
    }

    pub fn close(&mut self, id: WindowId) {
        let Some(index) = self.index_of(id) else {
            return;
        };
        tracing::debug!(window_id = %id, "closing window");
        self.windows.remove(index);
        self.promote_topmost();
    }

    pub fn minimize(&mut self, id: WindowId) {
        let Some(window) = self.window_mut(id) else {
            return;
        };
        if window.is_minimized() {
            return;
        }
        window.set_minimized(true);
        self.promote_topmost();
    }

    pub fn restore(&mut self, id: WindowId) {
        let Some(window) = self.window_mut(id) else {
            return;
        };
        window.set_minimized(false);
        self.activate(id);
    }

    pub fn toggle_maximize(&mut self, id: WindowId) {
        let desktop = self.layout.desktop;
        if let Some(window) = self.window_mut(id) {
            window.toggle_maximize(desktop);
        }
    }

    /// With no active visible window left, the topmost visible one takes
    /// over.
    fn promote_topmost(&mut self) {
        if self.windows.iter().any(|w| w.is_visible() && w.is_active()) {
            return;
        }
        if let Some(window) = self.windows.iter_mut().rev().find(|w| w.is_visible()) {
            window.set_active(true);
        }
    }

    /// Raise the bottom-most visible window, so repeated calls walk the
    /// whole stack.
    fn cycle_windows(&mut self) {
        if let Some(id) = self.windows.iter().find(|w| w.is_visible()).map(Window::id) {
            self.activate(id);
        }
    }

    // ----- rendering -----

    pub fn render(&mut self, frame: &mut UiFrame<'_>) {
        let area = frame.area();
        if area != self.area {
            self.resize(area);
        }
        let glyphs = self.glyphs();
        let ctx = self.ctx();
        let layout = self.layout;

        frame.fill(layout.desktop, glyphs.desktop_fill, crate::theme::desktop_style());
        render_icons(frame, layout.desktop, self.selected_icon, self.state.unicode());

        for window in &mut self.windows {
            if !window.is_visible() {
                continue;
            }
            let rect = window.rect();
            let title = window.title();
            self.decorator.render_window(
                frame,
                Chrome {
                    rect,
                    title: &title,
                    active: window.is_active(),
                    maximized: window.is_maximized(),
                    glyphs,
                },
            );
            if let Some(row) = window.menu_bar_row()
                && let Some(menu) = window.menu()
            {
                let bar = Rect {
                    x: rect.x + 1,
                    y: row,
                    width: rect.width.saturating_sub(2),
                    height: 1,
                };
                frame.fill(bar, " ", crate::theme::menu_style());
                menu.render_bar(frame, bar);
            }
            let body = window.body_rect();
            let focused = ctx.with_focus(window.is_active());
            window.content_mut().body_mut().render(frame, body, &focused);
            if let Some(menu) = window.menu() {
                menu.render_dropdown(frame, &ctx);
            }
        }

        self.panel
            .render_menu_bar(frame, layout.menu_bar, &self.menu, glyphs);
        self.panel
            .render_taskbar(frame, layout.taskbar, &self.taskbar_buttons());
        self.panel.render_status(
            frame,
            layout.status_bar,
            StatusInfo {
                windows: self.windows.len(),
                mouse_enabled: self.state.mouse_capture_enabled(),
            },
            glyphs,
        );
        self.menu.render_dropdown(frame, &ctx);
        if let Some(dialog) = self.dialog.as_mut() {
            dialog.render(frame, area, &ctx.with_overlay(true));
        }
    }
}

fn terminal_placeholder() -> Vec<String> {
    let user = std::env::var("USER")
        .ok()
        .filter(|u| !u.is_empty())
        .unwrap_or_else(|| "user".to_string());
    let host = crate::sysinfo::host_name().unwrap_or_else(|| "localhost".to_string());
    vec![
        format!(" {user}@{host}:~$ _"),
        String::new(),
        " (Terminal emulation placeholder)".to_string(),
    ]
}
