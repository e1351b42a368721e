//! Error taxonomy for the codec, the pair store and the facade.
//!
//! Warnings (checksum mismatch, copy divergence) are not errors and live in
//! `pair::Warning`.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// File-system failures, always tagged with the offending path.
#[derive(Debug, Error)]
pub enum IoError {
    #[error("{} not found", .path.display())]
    NotFound { path: PathBuf },

    #[error("read {} failed: {source}", .path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("write {} failed: {source}", .path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl IoError {
    pub fn path(&self) -> &PathBuf {
        match self {
            IoError::NotFound { path }
            | IoError::ReadFailed { path, .. }
            | IoError::WriteFailed { path, .. } => path,
        }
    }
}

/// Structural problems with a record buffer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    /// `expected`/`actual` are whole-file lengths (payload + checksum).
    #[error("wrong length{}: expected {expected} B, got {actual} B", fmt_path(.path))]
    WrongLength {
        path: Option<PathBuf>,
        expected: usize,
        actual: usize,
    },
}

impl FormatError {
    /// Attach the file the buffer came from (codec errors are path-less).
    pub fn at(self, file: impl Into<PathBuf>) -> Self {
        match self {
            FormatError::WrongLength { expected, actual, .. } => FormatError::WrongLength {
                path: Some(file.into()),
                expected,
                actual,
            },
        }
    }
}

fn fmt_path(path: &Option<PathBuf>) -> String {
    match path {
        Some(p) => format!(" in {}", p.display()),
        None => String::new(),
    }
}

/// Caller supplied a value the field cannot hold.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field}: value {value} out of range {min}..={max}")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("unknown field '{0}'")]
    UnknownField(String),

    #[error("field '{0}' is opaque and cannot be written")]
    NotWritable(&'static str),
}

/// Outcome of a commit where at least one copy failed to write.
/// Copies listed in `written` are on disk already (no rollback).
#[derive(Debug)]
pub struct CommitError {
    pub written: Vec<PathBuf>,
    pub failed: Vec<IoError>,
}

impl fmt::Display for CommitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "commit incomplete: {} written, {} failed",
            self.written.len(),
            self.failed.len()
        )?;
        for p in &self.written {
            write!(f, "; ok {}", p.display())?;
        }
        for e in &self.failed {
            write!(f, "; {}", e)?;
        }
        Ok(())
    }
}

impl std::error::Error for CommitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.failed.first().map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Umbrella error returned by the facade.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error(transparent)]
    Io(#[from] IoError),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Commit(#[from] CommitError),

    /// A pair was asked to load from an empty path list.
    #[error("{record}: no copies to load")]
    NoCopies { record: &'static str },
}

pub type Result<T, E = SaveError> = std::result::Result<T, E>;
