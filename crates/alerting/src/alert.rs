//! Alert Declaration

use crate::error::AlertError;
use crate::schedule::parse_schedule;
use crate::state::AlertState;
use crate::AlertType;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Failures in a row needed to trigger when unset
pub const DEFAULT_FAILURE_THRESHOLD: i32 = 3;

/// Successes in a row needed to resolve when unset
pub const DEFAULT_SUCCESS_THRESHOLD: i32 = 2;

/// Characters that break provider payload templating
const FORBIDDEN_DESCRIPTION_CHARS: [char; 2] = ['"', '\\'];

/// Thresholds of zero or less fall back to the default
fn or_default(threshold: i32, default: i32) -> i32 {
    if threshold <= 0 {
        default
    } else {
        threshold
    }
}

/// An endpoint's alert for one provider.
///
/// Optional fields stay `None` when the document leaves them out so that a
/// provider's default alert can fill them in later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Alert {
    /// Provider that dispatches this alert
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    /// Whether the alert may fire (unset means enabled)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// Failures in a row needed before triggering (0 or less means unset)
    #[serde(default)]
    pub failure_threshold: i32,
    /// Successes in a row needed before resolving (0 or less means unset)
    #[serde(default)]
    pub success_threshold: i32,
    /// Free text included in notifications
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether a second notification goes out on resolve (unset means no)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub send_on_resolved: Option<bool>,
    /// Cron expression restricting when the alert may fire
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cron_schedule: Option<String>,
    /// Inline override of the provider's configuration fields
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub provider_override: HashMap<String, serde_json::Value>,
    /// Runtime trigger/resolve state, never read from configuration
    #[serde(skip)]
    pub state: AlertState,
}

impl Alert {
    /// Create an alert with every optional field unset
    pub fn new(alert_type: AlertType) -> Self {
        Self {
            alert_type,
            enabled: None,
            failure_threshold: 0,
            success_threshold: 0,
            description: None,
            send_on_resolved: None,
            cron_schedule: None,
            provider_override: HashMap::new(),
            state: AlertState::default(),
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set both thresholds
    pub fn with_thresholds(mut self, failure_threshold: i32, success_threshold: i32) -> Self {
        self.failure_threshold = failure_threshold;
        self.success_threshold = success_threshold;
        self
    }

    /// Set whether a resolved notification is sent
    pub fn with_send_on_resolved(mut self, send_on_resolved: bool) -> Self {
        self.send_on_resolved = Some(send_on_resolved);
        self
    }

    /// Set one inline provider override field
    pub fn with_override(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.provider_override.insert(key.into(), value);
        self
    }

    /// Description, empty when unset
    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }

    /// The explicit `enabled` flag, true when unset. Ignores the cron schedule.
    pub fn enabled_setting(&self) -> bool {
        self.enabled.unwrap_or(true)
    }

    /// Whether a resolved notification is sent, false when unset
    pub fn is_sending_on_resolved(&self) -> bool {
        self.send_on_resolved.unwrap_or(false)
    }

    /// Failure threshold, falling back to the default when unset
    pub fn effective_failure_threshold(&self) -> u32 {
        or_default(self.failure_threshold, DEFAULT_FAILURE_THRESHOLD).unsigned_abs()
    }

    /// Success threshold, falling back to the default when unset
    pub fn effective_success_threshold(&self) -> u32 {
        or_default(self.success_threshold, DEFAULT_SUCCESS_THRESHOLD).unsigned_abs()
    }

    /// Inline provider override as a JSON object, ready to decode into a provider patch
    pub fn provider_override_as_value(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.provider_override
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }

    /// Validate the alert and default its thresholds
    pub fn validate_and_set_defaults(&mut self) -> Result<(), AlertError> {
        self.failure_threshold = or_default(self.failure_threshold, DEFAULT_FAILURE_THRESHOLD);
        self.success_threshold = or_default(self.success_threshold, DEFAULT_SUCCESS_THRESHOLD);

        if let Some(description) = &self.description {
            if description.contains(FORBIDDEN_DESCRIPTION_CHARS) {
                return Err(AlertError::InvalidDescription(description.clone()));
            }
        }

        if let Some(expression) = self.cron_schedule.as_deref().filter(|e| !e.is_empty()) {
            // An unparsable schedule does not block the alert; it fails open when evaluated
            if let Err(e) = parse_schedule(expression) {
                warn!("Alert of type {} will ignore its cron schedule: {}", self.alert_type, e);
            }
        }

        Ok(())
    }

    /// Fill every unset field from a provider's default alert.
    ///
    /// The default alert's type is ignored.
    pub fn merge_default(&mut self, default: &Alert) {
        debug!("Merging provider default alert into alert of type {}", self.alert_type);
        if self.enabled.is_none() {
            self.enabled = default.enabled;
        }
        if self.send_on_resolved.is_none() {
            self.send_on_resolved = default.send_on_resolved;
        }
        if self.description.is_none() {
            self.description = default.description.clone();
        }
        if self.cron_schedule.is_none() {
            self.cron_schedule = default.cron_schedule.clone();
        }
        if self.failure_threshold <= 0 {
            self.failure_threshold = default.failure_threshold;
        }
        if self.success_threshold <= 0 {
            self.success_threshold = default.success_threshold;
        }
    }
}
