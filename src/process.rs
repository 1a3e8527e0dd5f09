//! External media player hand-off.
//!
//! Player command lines are templates: `{}` is replaced by the file path, or
//! the path is appended when the template has no placeholder. Candidates are
//! tried in order and the first one that exits with status 0 wins.

use std::io;
use std::path::Path;
use std::process::Command;

use thiserror::Error;

use crate::constants::MEDIA_EXTENSIONS;

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("no media player configured")]
    NoCandidates,
    #[error("could not parse player command: {0}")]
    Parse(#[from] shell_words::ParseError),
    #[error("no media player succeeded (tried: {})", .tried.join(", "))]
    AllFailed { tried: Vec<String> },
}

/// Runs a child to completion while it owns the terminal.
pub trait ProcessRunner {
    fn run_blocking(&mut self, argv: &[String]) -> io::Result<i32>;
}

#[derive(Debug, Default)]
pub struct OsProcessRunner;

impl ProcessRunner for OsProcessRunner {
    fn run_blocking(&mut self, argv: &[String]) -> io::Result<i32> {
        let Some((program, args)) = argv.split_first() else {
            return Err(io::Error::new(io::ErrorKind::InvalidInput, "empty command"));
        };
        let status = Command::new(program).args(args).status()?;
        // Killed by a signal: no code, treat as failure.
        Ok(status.code().unwrap_or(-1))
    }
}

pub fn is_media(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| MEDIA_EXTENSIONS.contains(&ext.as_str()))
}

/// Split `template` into argv with `path` substituted.
pub fn build_command(template: &str, path: &Path) -> Result<Vec<String>, shell_words::ParseError> {
    let path = path.to_string_lossy();
    let mut argv = shell_words::split(template)?;
    let mut substituted = false;
    for arg in argv.iter_mut().filter(|a| a.contains("{}")) {
        *arg = arg.replace("{}", &path);
        substituted = true;
    }
    if !substituted {
        argv.push(path.into_owned());
    }
    Ok(argv)
}

/// Try each candidate until one exits cleanly. Returns the program that
/// played the file.
pub fn launch_media(
    runner: &mut dyn ProcessRunner,
    candidates: &[String],
    path: &Path,
) -> Result<String, LaunchError> {
    if candidates.is_empty() {
        return Err(LaunchError::NoCandidates);
    }
    let mut tried = Vec::new();
    let mut parse_error = None;
    for template in candidates {
        let argv = match build_command(template, path) {
            Ok(argv) if !argv.is_empty() => argv,
            Ok(_) => continue,
            Err(err) => {
                tracing::warn!(%template, %err, "unparseable player command");
                parse_error = Some(err);
                continue;
            }
        };
        let program = argv[0].clone();
        match runner.run_blocking(&argv) {
            Ok(0) => {
                tracing::info!(%program, path = %path.display(), "media player finished");
                return Ok(program);
            }
            Ok(code) => tracing::debug!(%program, code, "media player exited with failure"),
            Err(err) => tracing::debug!(%program, %err, "media player failed to start"),
        }
        tried.push(program);
    }
    match parse_error {
        Some(err) if tried.is_empty() => Err(LaunchError::Parse(err)),
        _ => Err(LaunchError::AllFailed { tried }),
    }
}
