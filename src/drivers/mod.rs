pub mod console;
pub mod keyboard;
pub mod mouse;

use std::io;
use std::time::Duration;

use crate::event::InputEvent;
use crate::ui::UiFrame;

pub trait InputDriver {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool>;
    fn read(&mut self) -> io::Result<InputEvent>;
    fn set_mouse_capture(&mut self, _enabled: bool) -> io::Result<()> {
        Ok(())
    }
}

impl<T: InputDriver + ?Sized> InputDriver for &mut T {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool> {
        (**self).poll(timeout)
    }

    fn read(&mut self) -> io::Result<InputEvent> {
        (**self).read()
    }

    fn set_mouse_capture(&mut self, enabled: bool) -> io::Result<()> {
        (**self).set_mouse_capture(enabled)
    }
}

pub trait OutputDriver {
    /// Take over the terminal: alternate screen, raw mode, hidden cursor.
    fn enter(&mut self) -> io::Result<()>;

    /// Give the terminal back in the state it was found.
    fn exit(&mut self) -> io::Result<()>;

    fn size(&self) -> io::Result<(u16, u16)>;

    /// Forget the previous frame so the next draw repaints every cell.
    fn invalidate(&mut self) -> io::Result<()>;

    fn draw<F>(&mut self, f: F) -> io::Result<()>
    where
        F: FnOnce(UiFrame<'_>);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyCode;
    use std::collections::VecDeque;

    struct Scripted(VecDeque<InputEvent>);

    impl InputDriver for Scripted {
        fn poll(&mut self, _timeout: Duration) -> io::Result<bool> {
            Ok(!self.0.is_empty())
        }

        fn read(&mut self) -> io::Result<InputEvent> {
            self.0
                .pop_front()
                .ok_or_else(|| io::Error::other("no scripted input"))
        }
    }

    #[test]
    fn blanket_impl_for_mut_ref_works() {
        let mut d = Scripted(VecDeque::from([InputEvent::key(KeyCode::Char('x'))]));
        let r = &mut d;
        assert!(r.poll(Duration::from_millis(0)).unwrap());
        assert_eq!(r.read().unwrap(), InputEvent::key(KeyCode::Char('x')));
        assert!(!r.poll(Duration::from_millis(0)).unwrap());
        assert!(r.set_mouse_capture(true).is_ok());
    }
}
