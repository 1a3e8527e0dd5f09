//! Filesystem boundary.
//!
//! Directory listing, file reads and writes go through `FileSystem` so the
//! file manager and Notepad can be driven by an in-memory fake in tests.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FsError {
    #[error("Permission denied")]
    PermissionDenied,
    #[error("No such file or directory")]
    NotFound,
    #[error("I/O error: {0}")]
    Other(String),
}

impl From<io::Error> for FsError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::PermissionDenied => FsError::PermissionDenied,
            io::ErrorKind::NotFound => FsError::NotFound,
            _ => FsError::Other(err.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Metadata {
    pub is_dir: bool,
    pub size: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    pub name: String,
    pub is_dir: bool,
    pub size: u64,
}

pub trait FileSystem {
    /// Entries of `path`, without `.` and `..`, in no particular order.
    fn list_dir(&self, path: &Path) -> Result<Vec<RawEntry>, FsError>;
    fn stat(&self, path: &Path) -> Result<Metadata, FsError>;
    /// Absolute path with symlinks resolved.
    fn realpath(&self, path: &Path) -> Result<PathBuf, FsError>;
    fn read(&self, path: &Path) -> Result<Vec<u8>, FsError>;
    fn write(&self, path: &Path, data: &[u8]) -> Result<(), FsError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn list_dir(&self, path: &Path) -> Result<Vec<RawEntry>, FsError> {
        let mut out = Vec::new();
        for entry in std::fs::read_dir(path)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            // Follow symlinks so a link to a directory lists as a directory;
            // dangling links fall back to the link itself.
            let meta = match std::fs::metadata(entry.path()) {
                Ok(meta) => meta,
                Err(_) => match entry.metadata() {
                    Ok(meta) => meta,
                    Err(err) => {
                        tracing::debug!(?name, %err, "skipping unreadable entry");
                        continue;
                    }
                },
            };
            out.push(RawEntry {
                name,
                is_dir: meta.is_dir(),
                size: if meta.is_dir() { 0 } else { meta.len() },
            });
        }
        Ok(out)
    }

    fn stat(&self, path: &Path) -> Result<Metadata, FsError> {
        let meta = std::fs::metadata(path)?;
        Ok(Metadata {
            is_dir: meta.is_dir(),
            size: meta.len(),
        })
    }

    fn realpath(&self, path: &Path) -> Result<PathBuf, FsError> {
        Ok(std::fs::canonicalize(path)?)
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>, FsError> {
        Ok(std::fs::read(path)?)
    }

    fn write(&self, path: &Path, data: &[u8]) -> Result<(), FsError> {
        Ok(std::fs::write(path, data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_kinds_map_to_fs_errors() {
        let denied = io::Error::from(io::ErrorKind::PermissionDenied);
        assert_eq!(FsError::from(denied), FsError::PermissionDenied);
        let missing = io::Error::from(io::ErrorKind::NotFound);
        assert_eq!(FsError::from(missing), FsError::NotFound);
        let other = FsError::from(io::Error::other("disk on fire"));
        assert_eq!(other.to_string(), "I/O error: disk on fire");
    }

    #[test]
    fn os_filesystem_lists_and_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let fs = OsFileSystem;
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        fs.write(&dir.path().join("a.txt"), b"hello").unwrap();

        let mut entries = fs.list_dir(dir.path()).unwrap();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "a.txt");
        assert_eq!(entries[0].size, 5);
        assert!(entries[1].is_dir);

        assert_eq!(fs.read(&dir.path().join("a.txt")).unwrap(), b"hello");
        assert!(fs.stat(&dir.path().join("sub")).unwrap().is_dir);
        assert_eq!(
            fs.read(&dir.path().join("missing")).unwrap_err(),
            FsError::NotFound
        );
    }
}
