//! Secretary errors.

use thiserror::Error;

/// A summary provider could not produce text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SummarizeError {
    /// Provider is not configured (missing credentials, disabled)
    #[error("provider unavailable: {0}")]
    Unavailable(String),

    /// Provider answered with an error
    #[error("provider failed: {0}")]
    Failed(String),
}
