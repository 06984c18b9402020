//! Error type for employee operations.

use thiserror::Error;

use crate::employees::ranking::SalaryFormatError;
use crate::employees::validation::ValidationError;
use crate::upstream::UpstreamError;

/// Errors surfaced to the presentation layer.
///
/// Absent records are not errors; they come back as `None`.
#[derive(Debug, Error)]
pub enum EmployeeError {
    /// Create input broke one or more rules.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// The request cannot be carried out as asked.
    #[error("{0}")]
    BadRequest(String),

    /// Upstream throttled us or failed.
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    /// Upstream data that should be numeric was not.
    #[error("Data integrity error: {0}")]
    DataIntegrity(#[from] SalaryFormatError),

    /// Upstream processed the delete but did not confirm it.
    #[error("Failed to delete employee {name}")]
    DeleteRejected { name: String },
}

/// Result type for employee operations.
pub type EmployeeResult<T> = Result<T, EmployeeError>;
