/// Shared serializable types passed between the runner, renderers and `main`.
///
/// The core never looks inside a `ParsedFiling`; only renderers do.
use serde::{Deserialize, Serialize};

use crate::filing::FilingError;

/// One leaf value of a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldValue {
    /// Full element path from the return root (e.g., "/Return/ReturnData/IRS990/TotalRevenueAmt").
    pub xpath: String,
    /// Text content, trimmed.
    pub value: String,
}

/// A single schedule of a filing with its flattened fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleResult {
    /// Schedule name (e.g., "IRS990ScheduleA", "ReturnHeader990x").
    pub schedule_name: String,
    /// Leaf fields in document order.
    pub fields: Vec<FieldValue>,
}

/// Result of running a filing (or a single schedule of it).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedFiling {
    /// Object id the filing was requested under.
    pub object_id: String,
    /// Parsed schedules.
    pub results: Vec<ScheduleResult>,
}

impl ParsedFiling {
    /// The data payload handed to the JSON renderer.
    #[must_use]
    pub fn get_result(&self) -> &[ScheduleResult] {
        &self.results
    }
}

/// Outcome of a successful batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchSummary {
    /// Identifiers fully processed.
    pub processed: usize,
    /// Whether the batch ended early in list-schedules mode.
    pub listed: bool,
}

/// A structured error envelope for JSON error output.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorOutput {
    /// Always `false`.
    pub ok: bool,
    /// Error details.
    pub error: ErrorDetail,
}

/// Error detail in the JSON error envelope.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorDetail {
    /// Machine-readable error code (snake_case).
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorOutput {
    /// Construct from a `FilingError`.
    #[must_use]
    pub fn from_filing_error(err: &FilingError) -> Self {
        Self {
            ok: false,
            error: ErrorDetail {
                code: err.code().to_owned(),
                message: err.to_string(),
            },
        }
    }
}
