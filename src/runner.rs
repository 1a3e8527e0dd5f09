//! Drives a [`WindowManager`] with real (or scripted) drivers.
//!
//! The runner owns the terminal lifecycle: it enters the full screen mode,
//! redraws on every tick, forwards mouse capture changes to the input
//! driver and suspends the UI while an external media player runs.

use std::io;
use std::path::Path;
use std::time::Duration;

use ratatui::layout::Rect;

use crate::drivers::{InputDriver, OutputDriver};
use crate::event_loop::{ControlFlow, EventLoop};
use crate::process::{ProcessRunner, launch_media};
use crate::window::WindowManager;

/// Player candidates plus the process runner that starts them.
pub struct MediaLauncher<P> {
    runner: P,
    players: Vec<String>,
}

impl<P: ProcessRunner> MediaLauncher<P> {
    pub fn new(runner: P, players: Vec<String>) -> Self {
        Self { runner, players }
    }

    pub fn runner(&self) -> &P {
        &self.runner
    }
}

/// Run until the window manager stops. The terminal is restored before
/// returning, whether the loop ended cleanly or not.
pub fn run_desktop<I, O, P>(
    wm: &mut WindowManager,
    input: I,
    output: &mut O,
    media: &mut MediaLauncher<P>,
    tick: Duration,
) -> io::Result<()>
where
    I: InputDriver,
    O: OutputDriver,
    P: ProcessRunner,
{
    output.enter()?;
    let result = drive(wm, input, output, media, tick);
    let restored = output.exit();
    result.and(restored)
}

fn drive<I, O, P>(
    wm: &mut WindowManager,
    input: I,
    output: &mut O,
    media: &mut MediaLauncher<P>,
    tick: Duration,
) -> io::Result<()>
where
    I: InputDriver,
    O: OutputDriver,
    P: ProcessRunner,
{
    let (width, height) = output.size()?;
    wm.resize(Rect::new(0, 0, width, height));
    let mut event_loop = EventLoop::new(input, tick);
    event_loop
        .driver()
        .set_mouse_capture(wm.state().mouse_capture_enabled())?;
    // The initial state is already applied.
    let _ = wm.state_mut().take_mouse_capture_change();

    event_loop.run(|driver, event| {
        match event {
            Some(event) => {
                wm.dispatch(&event);
            }
            None => output.draw(|mut frame| wm.render(&mut frame))?,
        }
        if let Some(path) = wm.take_pending_launch() {
            hand_off(wm, driver, output, media, &path)?;
        }
        if let Some(enabled) = wm.state_mut().take_mouse_capture_change() {
            tracing::debug!(enabled, "mouse capture changed");
            driver.set_mouse_capture(enabled)?;
        }
        if wm.is_running() {
            Ok(ControlFlow::Continue)
        } else {
            tracing::info!("exit requested");
            Ok(ControlFlow::Quit)
        }
    })
}

/// Give the terminal to the media player and take it back afterwards.
fn hand_off<I, O, P>(
    wm: &mut WindowManager,
    input: &mut I,
    output: &mut O,
    media: &mut MediaLauncher<P>,
    path: &Path,
) -> io::Result<()>
where
    I: InputDriver,
    O: OutputDriver,
    P: ProcessRunner,
{
    tracing::info!(path = %path.display(), "handing terminal to media player");
    output.exit()?;
    let outcome = launch_media(&mut media.runner, &media.players, path);
    output.enter()?;
    output.invalidate()?;
    input.set_mouse_capture(wm.state().mouse_capture_enabled())?;
    if let Err(err) = outcome {
        wm.report_launch_failure(path, &err);
    }
    Ok(())
}
