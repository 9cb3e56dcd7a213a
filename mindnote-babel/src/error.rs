//! Error types for generation runs

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a generation run.
///
/// Malformed rich-text fragments and missing optional node fields are never
/// reported here: the renderers degrade gracefully instead.
#[derive(Debug, Error)]
pub enum NoteError {
    /// Reading or writing a file failed
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The property list could not be parsed
    #[error("Property list error: {0}")]
    Plist(String),
    /// A required key is missing from the mind-map document
    #[error("Missing key '{0}' in mind-map document")]
    MissingKey(String),
    /// The mind-map tree is nested deeper than the configured ceiling
    #[error("Mind-map nesting exceeds the maximum depth of {limit}")]
    DepthExceeded { limit: usize },
    /// Dumping the property list as JSON failed
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl NoteError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        NoteError::Io {
            path: path.into(),
            source,
        }
    }
}
