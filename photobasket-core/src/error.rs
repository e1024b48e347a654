use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failures surfaced by basket, template and undo operations.
///
/// None of these abort the host: every public operation reports them back as a
/// warning and leaves state untouched. Per-file rename failures inside a batch are
/// reported as [`BasketError::Io`] and collected into [`crate::RenameResult::errors`]
/// instead of being returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BasketError {
    /// Bad input: empty selection, empty template, empty basket, index out of bounds.
    #[error("{0}")]
    Validation(String),

    /// A rename of one file failed. Displayed with the file name only.
    #[error("{}: {message}", file_label(path))]
    Io { path: PathBuf, message: String },

    /// The session is not in a state that allows the request.
    #[error("{0}")]
    State(String),
}

impl BasketError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn state(message: impl Into<String>) -> Self {
        Self::State(message.into())
    }

    pub fn io(path: &Path, err: &io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            message: io_reason(err),
        }
    }

    /// A staged rename that could neither finish nor roll back, leaving the
    /// file at `staged`.
    pub fn stranded(path: &Path, err: &io::Error, staged: &Path) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            message: format!("{}; file left at {}", io_reason(err), staged.display()),
        }
    }

    pub fn source_missing(path: &Path) -> Self {
        Self::io(path, &io::Error::from(io::ErrorKind::NotFound))
    }

    pub fn destination_exists(path: &Path) -> Self {
        Self::io(path, &io::Error::from(io::ErrorKind::AlreadyExists))
    }

    /// Stable machine-readable name used at the request/response boundary.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Io { .. } => "io",
            Self::State(_) => "state",
        }
    }
}

fn io_reason(err: &io::Error) -> String {
    match err.kind() {
        io::ErrorKind::PermissionDenied => "permission denied".to_string(),
        io::ErrorKind::NotFound => "source file not found".to_string(),
        io::ErrorKind::AlreadyExists => "destination already exists".to_string(),
        _ => err.to_string().to_lowercase(),
    }
}

fn file_label(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}

pub type Result<T, E = BasketError> = std::result::Result<T, E>;
