//! Error types for bevents

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Exit code after printing command help
pub const USAGE_EXIT_CODE: u8 = 1;

/// Exit code for any other terminal error
pub const FATAL_EXIT_CODE: u8 = 1;

/// Boxed error returned by storage backends
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum Error {
    // Command line errors
    #[error("Invalid arguments: {0}")]
    Usage(String),

    // Target errors
    #[error("cannot parse the provided url `{location}`: {reason}")]
    Resolution { location: String, reason: String },

    #[error("the provided url `{0}` does not point to a S3 server")]
    UnsupportedTarget(String),

    // Backend errors
    #[error("cannot list notification configurations")]
    Request(#[source] BoxError),

    // Output errors
    #[error("unable to marshal into structured output")]
    Encoding(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn resolution(location: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Resolution {
            location: location.into(),
            reason: reason.into(),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Error::Usage(_) => "UsageError",
            Error::Resolution { .. } => "ResolutionError",
            Error::UnsupportedTarget(_) => "UnsupportedTargetError",
            Error::Request(_) => "RequestError",
            Error::Encoding(_) => "EncodingError",
            Error::Io(_) => "IoError",
        }
    }

    /// Process exit code for this error. Every error ends the command.
    pub fn exit_code(&self) -> u8 {
        if self.is_usage() {
            USAGE_EXIT_CODE
        } else {
            FATAL_EXIT_CODE
        }
    }

    pub fn is_usage(&self) -> bool {
        matches!(self, Error::Usage(_))
    }
}
