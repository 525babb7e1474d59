/// Errors from the filing layer.
use std::path::PathBuf;

use thiserror::Error;

use crate::cli::OutputFormat;

/// Errors that can occur while resolving, loading or rendering a filing.
#[derive(Debug, Error)]
pub enum FilingError {
    /// The reference is neither an XML path nor a well-formed object id.
    #[error("'{reference}' is not a valid object id (expected 18 digits) or .xml path")]
    InvalidIdentifier {
        /// The reference as typed by the user.
        reference: String,
    },

    /// No filing file exists at the resolved location.
    #[error("No filing found at '{}'", path.display())]
    FilingNotFound {
        /// Location that was checked.
        path: PathBuf,
    },

    /// The filing file exists but could not be interpreted as an e-file return.
    #[error("Filing {object_id} is malformed: {reason}")]
    MalformedFiling {
        /// Object id of the offending filing.
        object_id: String,
        /// What went wrong.
        reason: String,
    },

    /// A renderer could not serialize its output.
    #[error("Could not serialize output: {reason}")]
    Serialize {
        /// Underlying serializer message.
        reason: String,
    },

    /// A renderer was handed inputs that do not match its format's contract.
    #[error("{format:?} renderer received a mismatched request: {reason}")]
    RenderContract {
        /// Format the renderer was asked to write.
        format: OutputFormat,
        /// Which part of the request did not fit.
        reason: String,
    },

    /// Reading a filing or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FilingError {
    /// Return the CLI exit code for this error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidIdentifier { .. } => 2,
            Self::FilingNotFound { .. } => 4,
            Self::MalformedFiling { .. } => 5,
            Self::Serialize { .. } | Self::RenderContract { .. } | Self::Io(_) => 1,
        }
    }

    /// Machine-readable error code (snake_case) for the JSON error envelope.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidIdentifier { .. } => "invalid_identifier",
            Self::FilingNotFound { .. } => "filing_not_found",
            Self::MalformedFiling { .. } => "malformed_filing",
            Self::Serialize { .. } => "serialize_error",
            Self::RenderContract { .. } => "render_contract",
            Self::Io(_) => "io_error",
        }
    }
}

impl From<csv::Error> for FilingError {
    fn from(err: csv::Error) -> Self {
        if !err.is_io_error() {
            return Self::Serialize {
                reason: err.to_string(),
            };
        }
        match err.into_kind() {
            csv::ErrorKind::Io(io) => Self::Io(io),
            other => Self::Serialize {
                reason: format!("{other:?}"),
            },
        }
    }
}

impl From<serde_json::Error> for FilingError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialize {
            reason: err.to_string(),
        }
    }
}
