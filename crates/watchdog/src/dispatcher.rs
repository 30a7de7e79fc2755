//! Dispatch boundary

use crate::error::DispatchError;
use alert_provider::ResolvedConfig;
use alerting::Alert;
use async_trait::async_trait;
use endpoint::{CheckResult, Endpoint};

/// Everything a dispatcher needs to send one notification
#[derive(Debug, Clone, Copy)]
pub struct DispatchRequest<'a> {
    pub endpoint: &'a Endpoint,
    pub alert: &'a Alert,
    pub result: &'a CheckResult,
    /// Whether this is the recovery notification
    pub resolved: bool,
    /// Effective provider settings for this endpoint and alert
    pub config: &'a ResolvedConfig,
    /// Correlation id to send along, if the alert has or needs one
    pub resolve_key: Option<&'a str>,
}

/// Confirmation of a delivered notification
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Delivery {
    /// Correlation id assigned by the provider, if it returned one
    pub resolve_key: Option<String>,
}

impl Delivery {
    /// Delivery without a provider-assigned key
    pub fn sent() -> Self {
        Self::default()
    }

    /// Delivery with a provider-assigned key
    pub fn with_resolve_key(key: impl Into<String>) -> Self {
        Self {
            resolve_key: Some(key.into()),
        }
    }
}

/// Sends notifications to external providers.
///
/// Receives the alert read-only: returning `Ok` is the only way a
/// dispatcher influences alert state.
#[async_trait]
pub trait Dispatcher: Send + Sync {
    /// Send one notification
    async fn send(&self, request: DispatchRequest<'_>) -> Result<Delivery, DispatchError>;
}
