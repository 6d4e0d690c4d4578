//! Error types for schema loading, path resolution and overlays.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised when a path expression cannot address an array element.
///
/// Missing structure is never an error; only a terminal segment that
/// cannot be used as an index into the array that holds it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("invalid array index \"{segment}\" in path {path}")]
    InvalidIndex { path: String, segment: String },

    #[error("array index {index} out of range in path {path} (length {len})")]
    IndexOutOfRange {
        path: String,
        index: usize,
        len: usize,
    },
}

/// Errors while reading, rendering or parsing schema documents.
#[derive(Debug, Error)]
pub enum LoadError {
    // IO errors (exit code 3)
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("cannot read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[cfg(feature = "remote")]
    #[error("failed to fetch {url}: {source}")]
    NetworkError {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    // Parse errors (exit code 2)
    #[error("invalid YAML: {source}")]
    InvalidYaml {
        #[source]
        source: serde_yaml::Error,
    },

    #[error("template rendering failed: {message}")]
    Render { message: String },
}

/// Errors from the `extend` helper.
#[derive(Debug, Error)]
pub enum ExtendError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Path(#[from] PathError),

    #[error("failed to serialize schema: {source}")]
    Serialize {
        #[source]
        source: serde_yaml::Error,
    },
}

impl PathError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        2
    }
}

impl LoadError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            LoadError::FileNotFound { .. } | LoadError::ReadError { .. } => 3,
            #[cfg(feature = "remote")]
            LoadError::NetworkError { .. } => 3,
            _ => 2,
        }
    }
}

impl ExtendError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            ExtendError::Load(e) => e.exit_code(),
            ExtendError::Path(e) => e.exit_code(),
            ExtendError::Serialize { .. } => 2,
        }
    }
}
