//! Provider Error Types

use alerting::AlertType;
use thiserror::Error;

/// Errors raised while validating or resolving a provider configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// Two overrides share a group, or an override has no group
    #[error("duplicate group override")]
    DuplicateGroupOverride,

    /// Required field is empty after merging
    #[error("{0} is required")]
    MissingField(&'static str),

    /// Field is set but unusable
    #[error("{field} is invalid: {reason}")]
    InvalidField { field: &'static str, reason: String },

    /// Inline override could not be decoded into the provider's fields
    #[error("failed to decode provider override: {0}")]
    Decode(String),

    /// No valid configuration exists for the provider
    #[error("provider {0} is not configured")]
    NotConfigured(AlertType),
}
