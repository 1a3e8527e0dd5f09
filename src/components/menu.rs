//! Menu bar with dropdowns.
//!
//! One `MenuModel` drives both the desktop's global bar and the bar each
//! window may own beneath its title. The model knows where its bar is
//! anchored, so hit-testing and drawing need no outside layout state.

use crossterm::event::KeyEvent;
use ratatui::layout::Rect;
use ratatui::widgets::Clear;

use crate::components::{Component, ComponentContext};
use crate::keybindings::{Action, KeyBindings};
use crate::layout::rect_contains;
use crate::ui::{UiFrame, fit_to_width, text_width};

/// Extra columns between a bar label and the next one.
const LABEL_STRIDE_PAD: u16 = 3;
/// Extra columns around the widest dropdown label.
const DROPDOWN_PAD: u16 = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEntry {
    Item { label: String, action: Action },
    Separator,
}

impl MenuEntry {
    pub fn item(label: impl Into<String>, action: Action) -> Self {
        MenuEntry::Item {
            label: label.into(),
            action,
        }
    }

    pub fn selectable(&self) -> bool {
        matches!(self, MenuEntry::Item { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuGroup {
    pub name: String,
    pub entries: Vec<MenuEntry>,
}

impl MenuGroup {
    pub fn new(name: impl Into<String>, entries: Vec<MenuEntry>) -> Self {
        Self {
            name: name.into(),
            entries,
        }
    }

    fn first_selectable(&self) -> usize {
        self.entries
            .iter()
            .position(MenuEntry::selectable)
            .unwrap_or(0)
    }

    fn dropdown_width(&self) -> u16 {
        self.entries
            .iter()
            .map(|e| match e {
                MenuEntry::Item { label, .. } => text_width(label),
                MenuEntry::Separator => 0,
            })
            .max()
            .unwrap_or(0)
            + DROPDOWN_PAD
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuHit {
    Bar(usize),
    Item(usize),
    Dropdown,
    Outside,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuDirection {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuModel {
    groups: Vec<MenuGroup>,
    active: bool,
    selected_menu: usize,
    selected_item: usize,
    /// First label column and bar row.
    anchor_x: u16,
    anchor_y: u16,
    /// Exclusive right edge the dropdown must stay inside.
    right_limit: Option<u16>,
}

impl MenuModel {
    pub fn new(groups: Vec<MenuGroup>) -> Self {
        Self {
            groups,
            active: false,
            selected_menu: 0,
            selected_item: 0,
            anchor_x: 0,
            anchor_y: 0,
            right_limit: None,
        }
    }

    /// Place the bar: labels start at `x` on row `y`; dropdowns never
    /// cross `right_limit`.
    pub fn set_anchor(&mut self, x: u16, y: u16, right_limit: Option<u16>) {
        self.anchor_x = x;
        self.anchor_y = y;
        self.right_limit = right_limit;
    }

    pub fn groups(&self) -> &[MenuGroup] {
        &self.groups
    }

    pub fn is_open(&self) -> bool {
        self.active
    }

    pub fn selected_menu(&self) -> usize {
        self.selected_menu
    }

    pub fn selected_item(&self) -> usize {
        self.selected_item
    }

    pub fn open(&mut self, index: usize) {
        if self.groups.is_empty() {
            return;
        }
        self.active = true;
        self.selected_menu = index.min(self.groups.len() - 1);
        self.selected_item = self.groups[self.selected_menu].first_selectable();
    }

    pub fn close(&mut self) {
        self.active = false;
    }

    /// Bar label spans as `(x, width)`; each label is drawn as `" name "`.
    pub fn label_spans(&self) -> Vec<(u16, u16)> {
        let mut x = self.anchor_x;
        self.groups
            .iter()
            .map(|g| {
                let len = text_width(&g.name);
                let span = (x, len + 2);
                x = x.saturating_add(len + LABEL_STRIDE_PAD);
                span
            })
            .collect()
    }

    /// Outer rectangle of the open dropdown, border included.
    pub fn dropdown_rect(&self) -> Option<Rect> {
        if !self.active {
            return None;
        }
        let group = self.groups.get(self.selected_menu)?;
        let (label_x, _) = *self.label_spans().get(self.selected_menu)?;
        let width = group.dropdown_width() + 2;
        let height = group.entries.len() as u16 + 2;
        let mut x = label_x.saturating_sub(1);
        if let Some(limit) = self.right_limit
            && x.saturating_add(width) > limit
        {
            x = limit.saturating_sub(width);
        }
        Some(Rect {
            x,
            y: self.anchor_y + 1,
            width,
            height,
        })
    }

    pub fn hit_test(&self, column: u16, row: u16) -> MenuHit {
        if row == self.anchor_y
            && let Some(index) = self
                .label_spans()
                .iter()
                .position(|(x, w)| column >= *x && column < x + w)
        {
            return MenuHit::Bar(index);
        }
        if let Some(rect) = self.dropdown_rect()
            && rect_contains(rect, column, row)
        {
            let inner_top = rect.y + 1;
            let inside_x = column > rect.x && column < rect.x + rect.width - 1;
            if inside_x && row >= inner_top && row < rect.y + rect.height - 1 {
                return MenuHit::Item((row - inner_top) as usize);
            }
            return MenuHit::Dropdown;
        }
        MenuHit::Outside
    }

    /// Mouse press on the bar or dropdown. Returns the action of a clicked
    /// item; bar clicks toggle, outside clicks close.
    pub fn click(&mut self, column: u16, row: u16) -> Option<Action> {
        match self.hit_test(column, row) {
            MenuHit::Bar(index) => {
                if self.active && self.selected_menu == index {
                    self.close();
                } else {
                    self.open(index);
                }
                None
            }
            MenuHit::Item(index) => {
                let entry = self.groups.get(self.selected_menu)?.entries.get(index)?;
                match entry {
                    MenuEntry::Item { action, .. } => {
                        let action = *action;
                        self.close();
                        Some(action)
                    }
                    MenuEntry::Separator => None,
                }
            }
            MenuHit::Dropdown => None,
            MenuHit::Outside => {
                self.close();
                None
            }
        }
    }

    /// Pointer motion while open: highlight the item under the pointer and
    /// follow the pointer across bar labels.
    pub fn hover(&mut self, column: u16, row: u16) {
        if !self.active {
            return;
        }
        match self.hit_test(column, row) {
            MenuHit::Bar(index) if index != self.selected_menu => self.open(index),
            MenuHit::Item(index) => {
                if self
                    .groups
                    .get(self.selected_menu)
                    .and_then(|g| g.entries.get(index))
                    .is_some_and(MenuEntry::selectable)
                {
                    self.selected_item = index;
                }
            }
            _ => {}
        }
    }

    pub fn move_selection(&mut self, direction: MenuDirection) {
        if !self.active || self.groups.is_empty() {
            return;
        }
        let count = self.groups.len();
        match direction {
            MenuDirection::Left => self.open((self.selected_menu + count - 1) % count),
            MenuDirection::Right => self.open((self.selected_menu + 1) % count),
            MenuDirection::Up | MenuDirection::Down => {
                let entries = &self.groups[self.selected_menu].entries;
                let len = entries.len();
                if len == 0 {
                    return;
                }
                let step = if direction == MenuDirection::Down { 1 } else { len - 1 };
                let mut index = self.selected_item;
                for _ in 0..len {
                    index = (index + step) % len;
                    if entries[index].selectable() {
                        self.selected_item = index;
                        return;
                    }
                }
            }
        }
    }

    pub fn activate_selected(&mut self) -> Option<Action> {
        if !self.active {
            return None;
        }
        let entry = self
            .groups
            .get(self.selected_menu)?
            .entries
            .get(self.selected_item)?;
        let MenuEntry::Item { action, .. } = entry else {
            return None;
        };
        let action = *action;
        self.close();
        Some(action)
    }

    /// Keyboard navigation while open. Returns `(consumed, action)`.
    pub fn handle_key(&mut self, key: &KeyEvent, keys: &KeyBindings) -> (bool, Option<Action>) {
        if !self.active {
            return (false, None);
        }
        let nav = keys.action_among(
            key,
            &[
                Action::MenuUp,
                Action::MenuDown,
                Action::MenuLeft,
                Action::MenuRight,
                Action::MenuSelect,
                Action::CloseMenu,
            ],
        );
        match nav {
            Some(Action::MenuUp) => self.move_selection(MenuDirection::Up),
            Some(Action::MenuDown) => self.move_selection(MenuDirection::Down),
            Some(Action::MenuLeft) => self.move_selection(MenuDirection::Left),
            Some(Action::MenuRight) => self.move_selection(MenuDirection::Right),
            Some(Action::MenuSelect) => return (true, self.activate_selected()),
            Some(Action::CloseMenu) => self.close(),
            _ => {}
        }
        (true, None)
    }

    /// Draw the label row across `bar` (the caller fills the row first).
    pub fn render_bar(&self, frame: &mut UiFrame<'_>, bar: Rect) {
        for (i, (group, (x, w))) in self.groups.iter().zip(self.label_spans()).enumerate() {
            if x + w > bar.x + bar.width {
                break;
            }
            let style = if self.active && i == self.selected_menu {
                crate::theme::menu_selected_style()
            } else {
                crate::theme::menu_style()
            };
            frame.print(x, self.anchor_y, &format!(" {} ", group.name), style);
        }
    }

    pub fn render_dropdown(&self, frame: &mut UiFrame<'_>, ctx: &ComponentContext) {
        let Some(rect) = self.dropdown_rect() else {
            return;
        };
        let Some(group) = self.groups.get(self.selected_menu) else {
            return;
        };
        let glyphs = ctx.glyphs();
        frame.render_widget(Clear, rect);
        frame.fill(rect, " ", crate::theme::menu_style());
        frame.draw_box(rect, &glyphs.menu_box, crate::theme::menu_style());
        let inner = rect.width.saturating_sub(2) as usize;
        for (i, entry) in group.entries.iter().enumerate() {
            let y = rect.y + 1 + i as u16;
            match entry {
                MenuEntry::Item { label, .. } => {
                    let style = if i == self.selected_item {
                        crate::theme::menu_selected_style()
                    } else {
                        crate::theme::menu_style()
                    };
                    frame.print(rect.x + 1, y, &fit_to_width(&format!(" {}", label), inner), style);
                }
                MenuEntry::Separator => {
                    frame.print(
                        rect.x + 1,
                        y,
                        &glyphs.separator.repeat(inner),
                        crate::theme::menu_disabled_style(),
                    );
                }
            }
        }
    }
}

impl Component for MenuModel {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
        self.render_bar(frame, area);
        self.render_dropdown(frame, ctx);
    }
}

/// Menu shown on row 0 of the desktop.
pub fn global_menu() -> MenuModel {
    MenuModel::new(vec![
        MenuGroup::new(
            "File",
            vec![
                MenuEntry::item("New Window", Action::NewWindow),
                MenuEntry::item("Notepad", Action::OpenNotepad),
                MenuEntry::item("File Manager", Action::OpenFileManager),
                MenuEntry::item("Terminal", Action::OpenTerminal),
                MenuEntry::Separator,
                MenuEntry::item("Exit  Ctrl+Q", Action::Exit),
            ],
        ),
        MenuGroup::new(
            "Edit",
            vec![
                MenuEntry::item("Preferences", Action::OpenSettings),
                MenuEntry::item("Toggle Mouse", Action::ToggleMouseCapture),
            ],
        ),
        MenuGroup::new(
            "Help",
            vec![
                MenuEntry::item("About RetroTUI", Action::About),
                MenuEntry::item("Keyboard Help", Action::Help),
            ],
        ),
    ])
}

pub fn notepad_menu() -> MenuModel {
    MenuModel::new(vec![
        MenuGroup::new(
            "File",
            vec![
                MenuEntry::item("New", Action::NewDocument),
                MenuEntry::item("Save  Ctrl+S", Action::Save),
                MenuEntry::Separator,
                MenuEntry::item("Close", Action::CloseWindow),
            ],
        ),
        MenuGroup::new(
            "View",
            vec![MenuEntry::item("Word Wrap  Ctrl+W", Action::ToggleWrap)],
        ),
    ])
}

pub fn file_manager_menu() -> MenuModel {
    MenuModel::new(vec![
        MenuGroup::new(
            "File",
            vec![
                MenuEntry::item("Open", Action::OpenSelected),
                MenuEntry::item("Parent Directory", Action::ParentDirectory),
                MenuEntry::Separator,
                MenuEntry::item("Close", Action::CloseWindow),
            ],
        ),
        MenuGroup::new(
            "View",
            vec![
                MenuEntry::item("Hidden Files", Action::ToggleHidden),
                MenuEntry::item("Refresh  F5", Action::Refresh),
            ],
        ),
    ])
}
