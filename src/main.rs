use std::io;

use clap::Parser;
use ratatui::layout::Rect;

use retrotui::config::{Cli, Config};
use retrotui::drivers::OutputDriver;
use retrotui::drivers::console::{ConsoleInputDriver, ConsoleOutputDriver};
use retrotui::process::OsProcessRunner;
use retrotui::runner::{MediaLauncher, run_desktop};
use retrotui::term_color::Palette;
use retrotui::window::{Services, SpawnKind, WindowManager};
use retrotui::{theme, tracing_sub};

fn main() -> io::Result<()> {
    let args = Cli::parse();
    let config = Config::try_from(&args)
        .map_err(|msg| io::Error::new(io::ErrorKind::InvalidInput, msg))?;

    tracing_sub::init(config.log_file.as_deref(), config.log_level)?;
    tracing_sub::install_panic_hook();
    let palette = Palette::detect();
    theme::init_palette(palette);
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        unicode = config.unicode,
        ?palette,
        start_dir = %config.start_dir.display(),
        "starting"
    );

    let mut output = ConsoleOutputDriver::new()?;
    let (width, height) = output.size()?;
    let mut wm = WindowManager::new(
        Rect::new(0, 0, width, height),
        config.start_dir.clone(),
        Services::host(),
    );
    wm.set_unicode(config.unicode);
    wm.state_mut().set_mouse_capture_enabled(config.mouse);
    if config.welcome {
        wm.spawn(SpawnKind::Welcome);
    }

    let mut media = MediaLauncher::new(OsProcessRunner, config.players.clone());
    let result = run_desktop(
        &mut wm,
        ConsoleInputDriver::new(),
        &mut output,
        &mut media,
        config.tick,
    );
    if let Err(err) = &result {
        tracing::error!(%err, "desktop stopped with an error");
    }
    tracing::info!("bye");
    result
}
