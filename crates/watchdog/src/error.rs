//! Dispatch Error Types

use thiserror::Error;

/// Failure reported by a dispatch boundary.
///
/// Any error leaves the alert's state untouched.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Provider could not be reached
    #[error("transport error: {0}")]
    Transport(String),

    /// Provider answered with a non-success status
    #[error("provider returned status {status}: {body}")]
    Remote { status: u16, body: String },

    /// Provider answered with something that could not be understood
    #[error("invalid provider response: {0}")]
    InvalidResponse(String),

    /// Settings handed to the dispatcher belong to another provider
    #[error("dispatcher does not support settings for {0}")]
    Unsupported(alerting::AlertType),
}
