use std::io;
use std::time::Duration;

use crate::drivers::InputDriver;
use crate::event::InputEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlFlow {
    Continue,
    Quit,
}

/// The single place that polls the input driver.
///
/// The handler is called with `None` once per turn, which the runner uses
/// to redraw (the clock ticks on that call), then with every event that
/// arrived within the tick. Bursts are drained without waiting so a fast
/// drag does not fall behind the pointer.
pub struct EventLoop<D> {
    driver: D,
    tick: Duration,
}

impl<D: InputDriver> EventLoop<D> {
    pub fn new(driver: D, tick: Duration) -> Self {
        Self { driver, tick }
    }

    pub fn poll(&mut self) -> io::Result<Option<InputEvent>> {
        if self.driver.poll(self.tick)? {
            Ok(Some(self.driver.read()?))
        } else {
            Ok(None)
        }
    }

    pub fn driver(&mut self) -> &mut D {
        &mut self.driver
    }

    pub fn into_driver(self) -> D {
        self.driver
    }

    pub fn run<F>(&mut self, mut handler: F) -> io::Result<()>
    where
        F: FnMut(&mut D, Option<InputEvent>) -> io::Result<ControlFlow>,
    {
        loop {
            if handler(&mut self.driver, None)? == ControlFlow::Quit {
                return Ok(());
            }
            if !self.driver.poll(self.tick)? {
                continue;
            }
            loop {
                let event = self.driver.read()?;
                if handler(&mut self.driver, Some(event))? == ControlFlow::Quit {
                    return Ok(());
                }
                if !self.driver.poll(Duration::ZERO)? {
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyCode;
    use std::collections::VecDeque;

    /// Delivers events in scripted bursts; an empty burst is a timeout.
    struct Bursts {
        bursts: VecDeque<Vec<InputEvent>>,
        current: VecDeque<InputEvent>,
        polls: Vec<Duration>,
    }

    impl InputDriver for Bursts {
        fn poll(&mut self, timeout: Duration) -> io::Result<bool> {
            self.polls.push(timeout);
            if self.current.is_empty() && !timeout.is_zero() {
                self.current = self.bursts.pop_front().unwrap_or_default().into();
            }
            Ok(!self.current.is_empty())
        }

        fn read(&mut self) -> io::Result<InputEvent> {
            self.current
                .pop_front()
                .ok_or_else(|| io::Error::other("read without poll"))
        }
    }

    fn ch(c: char) -> InputEvent {
        InputEvent::key(KeyCode::Char(c))
    }

    #[test]
    fn bursts_are_drained_between_ticks() {
        let driver = Bursts {
            bursts: VecDeque::from([vec![ch('a'), ch('b')], vec![], vec![ch('q')]]),
            current: VecDeque::new(),
            polls: Vec::new(),
        };
        let mut lp = EventLoop::new(driver, Duration::from_millis(50));
        let mut seen = Vec::new();
        lp.run(|_, event| {
            seen.push(event.clone());
            Ok(match event {
                Some(InputEvent::Key(k)) if k.code == KeyCode::Char('q') => ControlFlow::Quit,
                _ => ControlFlow::Continue,
            })
        })
        .unwrap();
        assert_eq!(
            seen,
            vec![None, Some(ch('a')), Some(ch('b')), None, None, Some(ch('q'))]
        );
        let driver = lp.into_driver();
        assert!(driver.polls.contains(&Duration::ZERO));
        assert_eq!(driver.polls[0], Duration::from_millis(50));
    }

    #[test]
    fn quit_on_tick_stops_before_polling() {
        let driver = Bursts {
            bursts: VecDeque::new(),
            current: VecDeque::new(),
            polls: Vec::new(),
        };
        let mut lp = EventLoop::new(driver, Duration::from_millis(10));
        lp.run(|_, _| Ok(ControlFlow::Quit)).unwrap();
        assert!(lp.driver().polls.is_empty());
    }
}
