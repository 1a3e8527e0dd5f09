use std::collections::VecDeque;
use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use super::keyboard::KeyboardNormalizer;
use super::mouse::MouseNormalizer;
use super::{InputDriver, OutputDriver};
use crate::event::InputEvent;
use crate::ui::UiFrame;

pub struct ConsoleInputDriver {
    keyboard: KeyboardNormalizer,
    mouse: MouseNormalizer,
    event_queue: VecDeque<InputEvent>,
}

impl Default for ConsoleInputDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleInputDriver {
    pub fn new() -> Self {
        Self {
            keyboard: KeyboardNormalizer::new(),
            mouse: MouseNormalizer::new(),
            event_queue: VecDeque::new(),
        }
    }

    fn translate(&mut self, evt: Event) -> Option<InputEvent> {
        match evt {
            Event::Key(key) => self.keyboard.normalize(key).map(InputEvent::Key),
            Event::Mouse(mouse) => self.mouse.normalize(mouse).map(InputEvent::Mouse),
            Event::Resize(w, h) => Some(InputEvent::Resize(w, h)),
            _ => None,
        }
    }

    fn read_internal(&mut self) -> io::Result<InputEvent> {
        loop {
            let evt = crossterm::event::read()?;
            if let Some(normalized) = self.translate(evt) {
                return Ok(normalized);
            }
        }
    }
}

impl InputDriver for ConsoleInputDriver {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool> {
        if !self.event_queue.is_empty() {
            return Ok(true);
        }
        // Raw events the normalizers drop still wake the poll; translate
        // them here so a poll hit always yields an event.
        if !crossterm::event::poll(timeout)? {
            return Ok(false);
        }
        let evt = crossterm::event::read()?;
        if let Some(normalized) = self.translate(evt) {
            self.event_queue.push_back(normalized);
        }
        Ok(!self.event_queue.is_empty())
    }

    fn read(&mut self) -> io::Result<InputEvent> {
        if let Some(evt) = self.event_queue.pop_front() {
            return Ok(evt);
        }
        self.read_internal()
    }

    fn set_mouse_capture(&mut self, enabled: bool) -> io::Result<()> {
        if enabled {
            execute!(io::stdout(), EnableMouseCapture)
        } else {
            execute!(io::stdout(), DisableMouseCapture)
        }
    }
}

pub struct ConsoleOutputDriver {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    entered: bool,
}

impl ConsoleOutputDriver {
    pub fn new() -> io::Result<Self> {
        let stdout = io::stdout();
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(Self {
            terminal,
            entered: false,
        })
    }
}

impl OutputDriver for ConsoleOutputDriver {
    fn enter(&mut self) -> io::Result<()> {
        if self.entered {
            return Ok(());
        }
        execute!(self.terminal.backend_mut(), EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        self.terminal.hide_cursor()?;
        self.entered = true;
        Ok(())
    }

    fn exit(&mut self) -> io::Result<()> {
        if !self.entered {
            return Ok(());
        }
        terminal::disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            DisableMouseCapture,
            LeaveAlternateScreen
        )?;
        self.terminal.show_cursor()?;
        self.entered = false;
        Ok(())
    }

    fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }

    fn invalidate(&mut self) -> io::Result<()> {
        self.terminal.clear()
    }

    fn draw<F>(&mut self, f: F) -> io::Result<()>
    where
        F: FnOnce(UiFrame<'_>),
    {
        self.terminal
            .draw(move |frame| {
                let wrapper = UiFrame::new(frame);
                f(wrapper);
            })
            .map(|_| ())
            .map_err(|err| io::Error::other(err.to_string()))
    }
}

impl Drop for ConsoleOutputDriver {
    fn drop(&mut self) {
        let _ = self.exit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{MouseInput, MouseKind};
    use crossterm::event::{
        KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    };

    #[test]
    fn read_prefers_queued_events() {
        let mut d = ConsoleInputDriver::new();
        d.event_queue.push_back(InputEvent::key(KeyCode::Char('z')));
        assert!(d.poll(Duration::from_millis(0)).unwrap());
        assert_eq!(d.read().unwrap(), InputEvent::key(KeyCode::Char('z')));
    }

    #[test]
    fn translate_normalizes_each_event_family() {
        let mut d = ConsoleInputDriver::new();
        let mut release = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert_eq!(d.translate(Event::Key(release)), None);
        assert_eq!(d.translate(Event::Resize(80, 24)), Some(InputEvent::Resize(80, 24)));
        assert_eq!(d.translate(Event::FocusGained), None);
        let press = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 2,
            row: 3,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(
            d.translate(press),
            Some(InputEvent::Mouse(MouseInput::new(2, 3, MouseKind::Press)))
        );
    }
}
