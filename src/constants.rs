//! Shared crate-wide constants.

use std::time::Duration;

/// Smallest width any window may shrink to.
pub const MIN_WINDOW_WIDTH: u16 = 20;

/// Smallest height for a window without a menu bar.
pub const MIN_WINDOW_HEIGHT: u16 = 6;

/// Smallest height for a window that owns a menu bar; the extra rows keep
/// the bar and at least one body row visible below the title.
pub const MIN_WINDOW_HEIGHT_WITH_MENU: u16 = 8;

/// Two presses on the same cell closer together than this count as a
/// double click.
pub const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(400);

/// Default idle redraw interval so the clock keeps ticking.
pub const DEFAULT_TICK_MS: u64 = 500;

/// Rows kept from the previous page when paging through a document or a
/// listing. Page step is `view height - PAGE_OVERLAP`.
pub const PAGE_OVERLAP: usize = 2;

/// Lines scrolled per mouse wheel notch.
pub const WHEEL_STEP: isize = 3;

/// Width of the plain text window used for "New Window".
pub const NEW_WINDOW_SIZE: (u16, u16) = (40, 12);

/// Offset applied per existing window when cascading new windows.
pub const CASCADE_STEP: (u16, u16) = (2, 1);

/// Bytes inspected when deciding whether a file is binary.
pub const BINARY_SNIFF_LEN: usize = 1024;

/// First desktop icon position and the vertical spacing between icons.
pub const ICON_ORIGIN: (u16, u16) = (3, 3);
pub const ICON_SPACING: u16 = 3;

/// Clickable span of each icon, measured from the left screen edge.
pub const ICON_HIT_X: (u16, u16) = (2, 10);

/// Default media player command lines, tried in order.
pub const DEFAULT_MEDIA_PLAYERS: &[&str] = &["mpv {}", "mplayer {}", "ffplay -autoexit -nodisp {}"];

/// File extensions handed to the external media player instead of Notepad.
pub const MEDIA_EXTENSIONS: &[&str] = &[
    "mp3", "wav", "ogg", "flac", "m4a", "aac", "opus", "mp4", "mkv", "avi", "webm", "mov",
];
