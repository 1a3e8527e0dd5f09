use std::path::Path;
use std::sync::Arc;

use crossterm::event::KeyCode;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use retrotui::event::{InputEvent, MouseKind};
use retrotui::fs::OsFileSystem;
use retrotui::sysinfo::{SystemInfo, SystemInfoProvider};
use retrotui::ui::UiFrame;
use retrotui::window::{Services, SpawnKind, WindowManager};

struct StaticInfo;

impl SystemInfoProvider for StaticInfo {
    fn system_info(&self) -> SystemInfo {
        SystemInfo {
            os: Some("Linux 6.1".into()),
            ..Default::default()
        }
    }
}

fn desktop(start: &Path) -> WindowManager {
    let services = Services {
        fs: Arc::new(OsFileSystem),
        sysinfo: Arc::new(StaticInfo),
    };
    let mut wm = WindowManager::new(Rect::new(0, 0, 80, 24), start, services);
    wm.set_unicode(false);
    wm.set_show_clock(false);
    wm
}

fn draw(wm: &mut WindowManager, width: u16, height: u16) -> Buffer {
    let area = Rect::new(0, 0, width, height);
    let mut buf = Buffer::empty(area);
    wm.render(&mut UiFrame::from_parts(area, &mut buf));
    buf
}

fn row(buf: &Buffer, y: u16) -> String {
    (0..buf.area.width)
        .map(|x| buf.cell((x, y)).unwrap().symbol().to_string())
        .collect()
}

fn press(column: u16, row: u16) -> InputEvent {
    InputEvent::mouse(column, row, MouseKind::Press)
}

#[test]
fn status_bar_tracks_window_count_and_mouse_state() {
    let mut wm = desktop(&std::env::temp_dir());
    wm.spawn(SpawnKind::Blank);
    wm.spawn(SpawnKind::Blank);
    let buf = draw(&mut wm, 80, 24);
    let status = row(&buf, 23);
    assert!(status.contains("Windows: 2"), "{status}");
    assert!(status.contains("Mouse: Enabled"), "{status}");

    wm.state_mut().set_mouse_capture_enabled(false);
    let buf = draw(&mut wm, 80, 24);
    assert!(row(&buf, 23).contains("Mouse: Disabled"));
}

#[test]
fn minimize_to_taskbar_and_restore_by_click() {
    let mut wm = desktop(&std::env::temp_dir());
    let id = wm.spawn(SpawnKind::Blank);
    let rect = wm.window(id).unwrap().rect();
    // minimize button sits 10 cells in from the right edge
    wm.dispatch(&press(rect.x + rect.width - 9, rect.y));
    assert!(wm.window(id).unwrap().is_minimized());
    assert!(wm.active_window().is_none());

    let buf = draw(&mut wm, 80, 24);
    assert!(row(&buf, 22).starts_with(" [ Window 1 ]"));

    wm.dispatch(&press(4, 22));
    let window = wm.window(id).unwrap();
    assert!(!window.is_minimized());
    assert!(window.is_active());
    assert_eq!(window.rect(), rect);
    assert!(wm.taskbar_buttons().is_empty());
}

#[test]
fn global_menu_opens_windows_by_keyboard() {
    let mut wm = desktop(&std::env::temp_dir());
    wm.dispatch(&InputEvent::key(KeyCode::F(10)));
    let buf = draw(&mut wm, 80, 24);
    assert!(row(&buf, 0).starts_with(" = File"));
    // the dropdown is drawn over the desktop
    assert!(wm.menu().is_open());
    wm.dispatch(&InputEvent::key(KeyCode::Esc));
    assert!(!wm.menu().is_open());
    assert!(wm.windows().is_empty());
}

#[test]
fn terminal_resize_pulls_windows_back_to_the_desktop() {
    let mut wm = desktop(&std::env::temp_dir());
    let small = wm.spawn(SpawnKind::Blank);
    let big = wm.spawn(SpawnKind::Terminal);
    wm.dispatch(&InputEvent::Resize(40, 12));
    assert_eq!(wm.desktop(), Rect::new(0, 1, 40, 9));
    // 40x12 blank window keeps its size, pinned to the top-left
    assert_eq!(wm.window(small).unwrap().rect(), Rect::new(0, 1, 40, 12));
    // sizes are never shrunk below what the window had
    assert_eq!(wm.window(big).unwrap().rect(), Rect::new(0, 1, 60, 15));

    // a frame of a different size refits before drawing
    let buf = draw(&mut wm, 60, 20);
    assert_eq!(wm.layout().status_bar, Rect::new(0, 19, 60, 1));
    assert!(row(&buf, 19).starts_with(" RetroTUI v"));
}

#[test]
fn about_dialog_lists_system_information() {
    let mut wm = desktop(&std::env::temp_dir());
    // About icon is the fifth entry of the column
    wm.dispatch(&press(5, 15));
    wm.dispatch(&InputEvent::mouse(5, 15, MouseKind::DoubleClick));
    let dialog = wm.dialog().expect("about dialog");
    assert_eq!(dialog.title(), "About RetroTUI");
    assert!(dialog.lines().iter().any(|l| l.contains("Linux 6.1")));
    let buf = draw(&mut wm, 80, 24);
    let rendered: String = (0..24).map(|y| row(&buf, y)).collect();
    assert!(rendered.contains("About RetroTUI"));
    wm.dispatch(&InputEvent::key(KeyCode::Enter));
    assert!(wm.dialog().is_none());
}

#[test]
fn welcome_then_exit_flow() {
    let mut wm = desktop(&std::env::temp_dir());
    let id = wm.spawn(SpawnKind::Welcome);
    assert!(wm.window(id).unwrap().is_active());
    wm.dispatch(&InputEvent::ctrl('q'));
    assert!(wm.dialog().is_some());
    wm.dispatch(&InputEvent::key(KeyCode::Right));
    wm.dispatch(&InputEvent::key(KeyCode::Enter));
    assert!(wm.is_running(), "No keeps the desktop running");
    wm.dispatch(&InputEvent::ctrl('q'));
    wm.dispatch(&InputEvent::key(KeyCode::Enter));
    assert!(!wm.is_running());
}
