use std::fs;
use std::path::Path;
use std::sync::Arc;

use crossterm::event::KeyCode;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use retrotui::event::InputEvent;
use retrotui::fs::OsFileSystem;
use retrotui::sysinfo::{SystemInfo, SystemInfoProvider};
use retrotui::ui::UiFrame;
use retrotui::window::{Services, SpawnKind, WindowManager};

struct NoInfo;

impl SystemInfoProvider for NoInfo {
    fn system_info(&self) -> SystemInfo {
        SystemInfo::default()
    }
}

fn desktop(start: &Path) -> WindowManager {
    let services = Services {
        fs: Arc::new(OsFileSystem),
        sysinfo: Arc::new(NoInfo),
    };
    let mut wm = WindowManager::new(Rect::new(0, 0, 80, 24), start, services);
    wm.set_unicode(false);
    wm.set_show_clock(false);
    wm
}

fn type_text(wm: &mut WindowManager, text: &str) {
    for ch in text.chars() {
        wm.dispatch(&InputEvent::key(KeyCode::Char(ch)));
    }
}

#[test]
fn edits_are_saved_with_the_original_line_endings() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dos.txt");
    fs::write(&path, "one\r\ntwo\r\n").unwrap();
    let mut wm = desktop(dir.path());
    wm.open_file(&path);
    let id = wm.active_window().unwrap().id();

    type_text(&mut wm, "> ");
    assert_eq!(wm.window(id).unwrap().title(), "dos.txt* - Notepad");

    wm.dispatch(&InputEvent::ctrl('s'));
    assert!(wm.dialog().is_none());
    assert_eq!(wm.window(id).unwrap().title(), "dos.txt - Notepad");
    assert_eq!(fs::read_to_string(&path).unwrap(), "> one\r\ntwo\r\n");
}

#[test]
fn untitled_documents_explain_why_they_cannot_be_saved() {
    let dir = tempfile::tempdir().unwrap();
    let mut wm = desktop(dir.path());
    wm.spawn(SpawnKind::Notepad);
    type_text(&mut wm, "draft");
    wm.dispatch(&InputEvent::ctrl('s'));
    assert_eq!(wm.dialog().unwrap().title(), "Notepad");
    wm.dispatch(&InputEvent::key(KeyCode::Enter));
    let doc = wm.active_window().unwrap().document().unwrap();
    assert_eq!(doc.text(), "draft");
    assert!(doc.is_modified());
}

#[test]
fn wrap_toggle_changes_what_is_drawn() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("long.txt");
    let long = "word ".repeat(30);
    fs::write(&path, &long).unwrap();
    let mut wm = desktop(dir.path());
    wm.open_file(&path);
    let body = wm.active_window().unwrap().body_rect();

    let render = |wm: &mut WindowManager| {
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        wm.render(&mut UiFrame::from_parts(area, &mut buf));
        let second: String = (body.x..body.x + body.width)
            .map(|x| buf.cell((x, body.y + 1)).unwrap().symbol().to_string())
            .collect();
        second
    };

    assert!(!render(&mut wm).contains("word"));
    wm.dispatch(&InputEvent::ctrl('w'));
    assert!(wm.active_window().unwrap().document().unwrap().wrap_enabled());
    assert!(render(&mut wm).contains("word"));
}

#[test]
fn cursor_navigation_and_line_split() {
    let dir = tempfile::tempdir().unwrap();
    let mut wm = desktop(dir.path());
    wm.spawn(SpawnKind::Notepad);
    type_text(&mut wm, "abc");
    wm.dispatch(&InputEvent::key(KeyCode::Left));
    wm.dispatch(&InputEvent::key(KeyCode::Enter));
    wm.dispatch(&InputEvent::key(KeyCode::End));
    type_text(&mut wm, "!");
    let doc = wm.active_window().unwrap().document().unwrap();
    assert_eq!(doc.lines(), &["ab", "c!"]);
    assert_eq!(doc.cursor(), (1, 2));
}
