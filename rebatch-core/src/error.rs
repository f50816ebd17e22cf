use std::path::PathBuf;
use thiserror::Error;

/// The main error type for rebatch operations.
///
/// Planning-phase errors (bad directory, bad mode arguments) abort a run
/// before any filesystem mutation. `NoFilesFound` and `NoChangesNeeded` are
/// informational: callers report them and exit cleanly.
#[derive(Error, Debug)]
pub enum Error {
    #[error("'{0}' is not a directory")]
    NotADirectory(PathBuf),

    #[error("no files found in '{0}'")]
    NoFilesFound(PathBuf),

    #[error("no files need renaming")]
    NoChangesNeeded,

    #[error("text to replace must not be empty")]
    EmptyOldText,

    #[error("invalid regex pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: Box<regex::Error>,
    },

    #[error("invalid template '{template}': {reason}")]
    InvalidTemplate { template: String, reason: String },

    #[error("invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("GitHub API request failed ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True for errors caused by bad user input rather than a runtime
    /// failure. The CLI maps these to exit code 2.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::NotADirectory(_)
                | Self::EmptyOldText
                | Self::InvalidPattern { .. }
                | Self::InvalidTemplate { .. }
                | Self::InvalidDate(_)
        )
    }

    /// True for the "nothing to do" conditions that still exit 0.
    pub fn is_informational(&self) -> bool {
        matches!(self, Self::NoFilesFound(_) | Self::NoChangesNeeded)
    }
}

/// A specialized Result type for rebatch operations.
pub type Result<T> = std::result::Result<T, Error>;
