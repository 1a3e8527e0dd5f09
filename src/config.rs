//! Command line and environment configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::constants::{DEFAULT_MEDIA_PLAYERS, DEFAULT_TICK_MS};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "retrotui",
    version = env!("CARGO_PKG_VERSION"),
    about = "A retro windowed desktop shell for the terminal"
)]
pub struct Cli {
    /// Directory the File Manager opens in. Defaults to the home directory.
    #[arg(long = "start-dir", value_name = "DIR")]
    pub start_dir: Option<PathBuf>,

    /// Draw with plain ASCII even when the locale supports UTF-8.
    #[arg(long)]
    pub ascii: bool,

    /// Start with mouse capture turned off.
    #[arg(long = "no-mouse")]
    pub no_mouse: bool,

    /// Skip the welcome window.
    #[arg(long = "no-welcome")]
    pub no_welcome: bool,

    /// Idle redraw interval in milliseconds; keeps the clock ticking.
    #[arg(long = "tick-ms", value_name = "MS", default_value_t = DEFAULT_TICK_MS)]
    pub tick_ms: u64,

    /// Media player command line, tried in the order given. `{}` is
    /// replaced by the file path, which is appended when absent.
    #[arg(long = "player", value_name = "CMD")]
    pub players: Vec<String>,

    /// Write logs to this file. Without it logging is discarded.
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Minimum log level: error, warn, info, debug or trace.
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    pub log_level: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub start_dir: PathBuf,
    pub unicode: bool,
    pub mouse: bool,
    pub welcome: bool,
    pub tick: Duration,
    pub players: Vec<String>,
    pub log_file: Option<PathBuf>,
    pub log_level: tracing::Level,
}

impl TryFrom<&Cli> for Config {
    type Error = String;

    fn try_from(cli: &Cli) -> Result<Self, Self::Error> {
        if !(10..=60_000).contains(&cli.tick_ms) {
            return Err("tick-ms must be between 10 and 60000".to_string());
        }
        let log_level = cli
            .log_level
            .parse::<tracing::Level>()
            .map_err(|_| format!("unknown log level '{}'", cli.log_level))?;
        let start_dir = cli
            .start_dir
            .clone()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("/"));
        let players = if cli.players.is_empty() {
            DEFAULT_MEDIA_PLAYERS.iter().map(|p| p.to_string()).collect()
        } else {
            cli.players.clone()
        };
        Ok(Self {
            start_dir,
            unicode: !cli.ascii && locale_is_utf8(),
            mouse: !cli.no_mouse,
            welcome: !cli.no_welcome,
            tick: Duration::from_millis(cli.tick_ms),
            players,
            log_file: cli.log_file.clone(),
            log_level,
        })
    }
}

/// Whether the locale advertises UTF-8, checked in `LC_ALL`, `LC_CTYPE`,
/// `LANG` precedence order.
pub fn locale_is_utf8() -> bool {
    utf8_from_vars(
        std::env::var("LC_ALL").ok().as_deref(),
        std::env::var("LC_CTYPE").ok().as_deref(),
        std::env::var("LANG").ok().as_deref(),
    )
}

fn utf8_from_vars(lc_all: Option<&str>, lc_ctype: Option<&str>, lang: Option<&str>) -> bool {
    [lc_all, lc_ctype, lang]
        .into_iter()
        .flatten()
        .find(|v| !v.is_empty())
        .is_some_and(|v| {
            let v = v.to_ascii_lowercase();
            v.contains("utf-8") || v.contains("utf8")
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("retrotui").chain(args.iter().copied()))
    }

    #[test]
    fn defaults() {
        let cli = parse(&[]);
        let cfg = Config::try_from(&cli).unwrap();
        assert_eq!(cfg.tick, Duration::from_millis(500));
        assert!(cfg.mouse);
        assert!(cfg.welcome);
        assert_eq!(cfg.players.len(), DEFAULT_MEDIA_PLAYERS.len());
        assert_eq!(cfg.log_level, tracing::Level::INFO);
    }

    #[test]
    fn flags_override_defaults() {
        let cli = parse(&[
            "--ascii",
            "--no-mouse",
            "--no-welcome",
            "--start-dir",
            "/tmp",
            "--tick-ms",
            "250",
            "--player",
            "vlc {}",
            "--player",
            "cvlc",
            "--log-level",
            "debug",
        ]);
        let cfg = Config::try_from(&cli).unwrap();
        assert!(!cfg.unicode);
        assert!(!cfg.mouse);
        assert!(!cfg.welcome);
        assert_eq!(cfg.start_dir, PathBuf::from("/tmp"));
        assert_eq!(cfg.tick, Duration::from_millis(250));
        assert_eq!(cfg.players, vec!["vlc {}".to_string(), "cvlc".to_string()]);
        assert_eq!(cfg.log_level, tracing::Level::DEBUG);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(Config::try_from(&parse(&["--tick-ms", "1"])).is_err());
        assert!(Config::try_from(&parse(&["--log-level", "loud"])).is_err());
    }

    #[test]
    fn locale_precedence() {
        assert!(utf8_from_vars(None, None, Some("en_US.UTF-8")));
        assert!(!utf8_from_vars(Some("C"), None, Some("en_US.UTF-8")));
        assert!(utf8_from_vars(Some(""), Some("de_DE.utf8"), None));
        assert!(!utf8_from_vars(None, None, None));
    }
}
