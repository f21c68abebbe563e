//! JSON file reading with structured failure kinds.
//!
//! Callers decide what an absent manifest means (the collection filter treats
//! it as "not a schematics package"), so failures are classified here into a
//! [`ReadJsonErrorKind`] instead of being matched on message text.

use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

/// A parsed JSON document and the path it was read from.
#[derive(Debug, Clone)]
pub struct JsonFile {
    /// Resolved path of the file.
    pub path: PathBuf,
    /// Parsed content, object keys in file order.
    pub json: Value,
}

impl JsonFile {
    /// Directory containing the file, used to resolve paths the file declares.
    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new(""))
    }
}

/// Classification of a [`ReadJsonError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadJsonErrorKind {
    /// The file does not exist.
    NotFound,
    /// A path component expected to be a directory is not one.
    NotADirectory,
    /// The file exists but is not valid JSON.
    Parse,
    /// Any other I/O failure (permissions, reading a directory, ...).
    Other,
}

/// Failure reading or parsing a JSON file.
#[derive(Debug, Error)]
pub enum ReadJsonError {
    /// The file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file was read but is not valid JSON.
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ReadJsonError {
    /// Returns the structured failure kind.
    pub fn kind(&self) -> ReadJsonErrorKind {
        match self {
            Self::Io { source, .. } => match source.kind() {
                io::ErrorKind::NotFound => ReadJsonErrorKind::NotFound,
                io::ErrorKind::NotADirectory => ReadJsonErrorKind::NotADirectory,
                _ => ReadJsonErrorKind::Other,
            },
            Self::Parse { .. } => ReadJsonErrorKind::Parse,
        }
    }

    /// Returns `true` when the file is simply not there.
    pub fn is_absent(&self) -> bool {
        matches!(
            self.kind(),
            ReadJsonErrorKind::NotFound | ReadJsonErrorKind::NotADirectory
        )
    }

    /// Path the reader attempted.
    pub fn path(&self) -> &Path {
        match self {
            Self::Io { path, .. } | Self::Parse { path, .. } => path,
        }
    }
}

/// Reads `relative` (resolved against `base`) and parses it as JSON.
///
/// # Errors
///
/// Returns [`ReadJsonError::Io`] when the file cannot be read and
/// [`ReadJsonError::Parse`] when it is not valid JSON. Use
/// [`ReadJsonError::kind`] to tell an absent file from a broken one.
pub fn read_json_file(
    relative: impl AsRef<Path>,
    base: impl AsRef<Path>,
) -> Result<JsonFile, ReadJsonError> {
    let path = base.as_ref().join(relative);
    let raw = match std::fs::read(&path) {
        Ok(raw) => raw,
        Err(source) => return Err(ReadJsonError::Io { path, source }),
    };
    match serde_json::from_slice(&raw) {
        Ok(json) => Ok(JsonFile { path, json }),
        Err(source) => Err(ReadJsonError::Parse { path, source }),
    }
}

/// Returns `true` if `path` is an existing regular file.
pub fn file_exists(path: impl AsRef<Path>) -> bool {
    path.as_ref().is_file()
}
