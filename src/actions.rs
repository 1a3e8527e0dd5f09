use std::fmt;

/// Tokens emitted by menus, icons and key bindings. The window manager is
/// the only place that interprets them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Desktop
    NewWindow,
    OpenNotepad,
    OpenFileManager,
    OpenTerminal,
    OpenSettings,
    ToggleMouseCapture,
    About,
    Help,
    Exit,
    // Window-scoped, routed to the window whose menu emitted them
    NewDocument,
    Save,
    ToggleWrap,
    CloseWindow,
    OpenSelected,
    ParentDirectory,
    ToggleHidden,
    Refresh,
    // Navigation
    CycleWindow,
    ToggleMenu,
    CloseMenu,
    MenuUp,
    MenuDown,
    MenuLeft,
    MenuRight,
    MenuSelect,
    // Dialog navigation
    ConfirmLeft,
    ConfirmRight,
    ConfirmAccept,
    ConfirmCancel,
}

impl Action {
    /// Actions that only make sense against one window's content.
    pub fn is_window_scoped(self) -> bool {
        matches!(
            self,
            Action::NewDocument
                | Action::Save
                | Action::ToggleWrap
                | Action::CloseWindow
                | Action::OpenSelected
                | Action::ParentDirectory
                | Action::ToggleHidden
                | Action::Refresh
        )
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Action::NewWindow => "New window",
            Action::OpenNotepad => "Open Notepad",
            Action::OpenFileManager => "Open File Manager",
            Action::OpenTerminal => "Open Terminal",
            Action::OpenSettings => "Open Settings",
            Action::ToggleMouseCapture => "Toggle mouse capture",
            Action::About => "About",
            Action::Help => "Keyboard help",
            Action::Exit => "Exit",
            Action::NewDocument => "New document",
            Action::Save => "Save document",
            Action::ToggleWrap => "Toggle word wrap",
            Action::CloseWindow => "Close window",
            Action::OpenSelected => "Open selected entry",
            Action::ParentDirectory => "Parent directory",
            Action::ToggleHidden => "Show hidden files",
            Action::Refresh => "Refresh listing",
            Action::CycleWindow => "Cycle windows",
            Action::ToggleMenu => "Open/close menu",
            Action::CloseMenu => "Close menu",
            Action::MenuUp => "Menu up",
            Action::MenuDown => "Menu down",
            Action::MenuLeft => "Previous menu",
            Action::MenuRight => "Next menu",
            Action::MenuSelect => "Menu select",
            Action::ConfirmLeft => "Previous button",
            Action::ConfirmRight => "Next button",
            Action::ConfirmAccept => "Press button",
            Action::ConfirmCancel => "Dismiss dialog",
        };
        write!(f, "{}", s)
    }
}
