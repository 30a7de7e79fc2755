//! Alert Error Types

use thiserror::Error;

/// Errors raised while validating an alert
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlertError {
    /// Description contains a character that breaks provider payload templates
    #[error("alert description must not contain '\"' or '\\': {0}")]
    InvalidDescription(String),

    /// Cron expression could not be parsed
    #[error("invalid cron schedule '{expression}': {reason}")]
    InvalidCronSchedule { expression: String, reason: String },
}
