//! The slice of filesystem access the rename engine needs.
//!
//! Conflict checks and batches go through [`Filesystem`] so a host can run them
//! against the real disk ([`StdFilesystem`]) while tests inject failures such as
//! a locked file (`FaultyFilesystem`, behind the `test-util` feature).

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub trait Filesystem: Send + Sync {
    /// Move `from` to `to`. Implementations must not be relied on to refuse an
    /// existing destination; callers check that themselves.
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// Whether anything (file, directory or dangling symlink) exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Names of the entries directly inside `dir`.
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<String>>;
}

/// The real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFilesystem;

impl Filesystem for StdFilesystem {
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::rename(from, to)
    }

    fn exists(&self, path: &Path) -> bool {
        fs::symlink_metadata(path).is_ok()
    }

    fn list_dir(&self, dir: &Path) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(dir)? {
            names.push(entry?.file_name().to_string_lossy().into_owned());
        }
        Ok(names)
    }
}

/// Wraps another filesystem and refuses to rename chosen paths, as if they
/// were held open by another program.
#[cfg(any(test, feature = "test-util"))]
#[derive(Debug, Clone, Default)]
pub struct FaultyFilesystem<F = StdFilesystem> {
    inner: F,
    locked: Vec<PathBuf>,
}

#[cfg(any(test, feature = "test-util"))]
impl<F: Filesystem> FaultyFilesystem<F> {
    pub fn new(inner: F) -> Self {
        Self {
            inner,
            locked: Vec::new(),
        }
    }

    /// Renames from or to `path` will fail with `PermissionDenied`.
    #[must_use]
    pub fn lock(mut self, path: impl Into<PathBuf>) -> Self {
        self.locked.push(path.into());
        self
    }

    fn is_locked(&self, path: &Path) -> bool {
        self.locked.iter().any(|p| p == path)
    }
}

#[cfg(any(test, feature = "test-util"))]
impl<F: Filesystem> Filesystem for FaultyFilesystem<F> {
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        if self.is_locked(from) || self.is_locked(to) {
            return Err(io::Error::from(io::ErrorKind::PermissionDenied));
        }
        self.inner.rename(from, to)
    }

    fn exists(&self, path: &Path) -> bool {
        self.inner.exists(path)
    }

    fn list_dir(&self, dir: &Path) -> io::Result<Vec<String>> {
        self.inner.list_dir(dir)
    }
}
