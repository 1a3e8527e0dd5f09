use std::fs;
use std::path::Path;
use std::sync::Arc;

use crossterm::event::KeyCode;
use ratatui::layout::Rect;
use retrotui::event::InputEvent;
use retrotui::fs::OsFileSystem;
use retrotui::sysinfo::{SystemInfo, SystemInfoProvider};
use retrotui::window::{Services, SpawnKind, WindowId, WindowManager};

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
    WindowManager::new(Rect::new(0, 0, 100, 40), start, services)
}

fn names(wm: &WindowManager, id: WindowId) -> Vec<String> {
    wm.window(id)
        .and_then(|w| w.directory())
        .map(|d| d.entries().iter().map(|e| e.name.clone()).collect())
        .unwrap_or_default()
}

fn fixture() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("Projects")).unwrap();
    fs::create_dir(dir.path().join("archive")).unwrap();
    fs::write(dir.path().join("notes.txt"), "hello\n").unwrap();
    fs::write(dir.path().join("Zeta.md"), "# z\n").unwrap();
    fs::write(dir.path().join(".secret"), "x").unwrap();
    fs::write(dir.path().join("archive").join("old.txt"), "old").unwrap();
    dir
}

fn key(code: KeyCode) -> InputEvent {
    InputEvent::key(code)
}

#[test]
fn listing_puts_directories_first_and_hides_dotfiles() {
    let dir = fixture();
    let mut wm = desktop(dir.path());
    let id = wm.spawn(SpawnKind::FileManager);
    assert_eq!(
        names(&wm, id),
        vec!["..", "archive", "Projects", "notes.txt", "Zeta.md"]
    );

    wm.dispatch(&InputEvent::key(KeyCode::Char('.')));
    assert!(names(&wm, id).contains(&".secret".to_string()));
    wm.dispatch(&InputEvent::key(KeyCode::Char('.')));
    assert!(!names(&wm, id).contains(&".secret".to_string()));
}

#[test]
fn enter_descends_and_backspace_returns_to_the_child() {
    let dir = fixture();
    let mut wm = desktop(dir.path());
    let id = wm.spawn(SpawnKind::FileManager);
    wm.dispatch(&key(KeyCode::Down));
    wm.dispatch(&key(KeyCode::Enter));
    let view = wm.window(id).unwrap().directory().unwrap();
    assert_eq!(view.current_path().file_name().unwrap(), "archive");
    assert_eq!(names(&wm, id), vec!["..", "old.txt"]);

    wm.dispatch(&key(KeyCode::Backspace));
    let view = wm.window(id).unwrap().directory().unwrap();
    assert_eq!(view.selected_entry().unwrap().name, "archive");
}

#[test]
fn activating_a_text_file_opens_notepad() {
    let dir = fixture();
    let mut wm = desktop(dir.path());
    let fm = wm.spawn(SpawnKind::FileManager);
    // .., archive, Projects, notes.txt
    for _ in 0..3 {
        wm.dispatch(&key(KeyCode::Down));
    }
    wm.dispatch(&key(KeyCode::Enter));
    assert_eq!(wm.windows().len(), 2);
    let notepad = wm.active_window().unwrap();
    assert_ne!(notepad.id(), fm);
    assert_eq!(notepad.title(), "notes.txt - Notepad");
    assert_eq!(notepad.document().unwrap().lines(), &["hello", ""]);
}

#[test]
fn binary_files_are_refused_with_a_dialog() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("blob.bin"), [0x7f, b'E', b'L', b'F', 0, 1, 2]).unwrap();
    let mut wm = desktop(dir.path());
    wm.spawn(SpawnKind::FileManager);
    wm.dispatch(&key(KeyCode::End));
    wm.dispatch(&key(KeyCode::Enter));
    assert_eq!(wm.windows().len(), 1);
    assert_eq!(wm.dialog().unwrap().title(), "Binary File");
}

#[test]
fn media_files_are_queued_for_the_player() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("track.flac"), b"fLaC").unwrap();
    let mut wm = desktop(dir.path());
    wm.spawn(SpawnKind::FileManager);
    wm.dispatch(&key(KeyCode::End));
    wm.dispatch(&key(KeyCode::Enter));
    let queued = wm.take_pending_launch().unwrap();
    assert_eq!(queued.file_name().unwrap(), "track.flac");
    assert_eq!(wm.windows().len(), 1);
}

#[test]
fn refresh_picks_up_new_entries() {
    let dir = fixture();
    let mut wm = desktop(dir.path());
    let id = wm.spawn(SpawnKind::FileManager);
    fs::write(dir.path().join("later.txt"), "").unwrap();
    assert!(!names(&wm, id).contains(&"later.txt".to_string()));
    wm.dispatch(&key(KeyCode::F(5)));
    assert!(names(&wm, id).contains(&"later.txt".to_string()));
}
