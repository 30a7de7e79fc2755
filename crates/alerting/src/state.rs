//! Alert State and resolve-key lifecycle

use crate::{Alert, ResolveKeyStrategy};
use chrono::{DateTime, Utc};
use endpoint::Endpoint;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::info;

/// Observable phase of an alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// No outstanding trigger notification
    Idle,
    /// A trigger notification was delivered and not yet resolved
    Active,
}

/// Mutable runtime state of one alert.
///
/// Only the evaluation loop owning the alert's endpoint may mutate it, and
/// only after the dispatch boundary confirmed a send.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertState {
    /// Whether a trigger notification is outstanding
    pub triggered: bool,
    /// Correlation id between the trigger and resolve notifications
    pub resolve_key: Option<String>,
    /// When the outstanding trigger notification was delivered
    pub last_triggered_at: Option<DateTime<Utc>>,
    /// Number of trigger notifications delivered over the alert's lifetime
    pub trigger_count: u64,
}

impl AlertState {
    /// Current phase
    pub fn phase(&self) -> Phase {
        if self.triggered {
            Phase::Active
        } else {
            Phase::Idle
        }
    }

    /// Record a trigger notification delivered at `now` (Idle -> Active)
    pub fn commit_trigger(&mut self, resolve_key: Option<String>, now: DateTime<Utc>) {
        self.triggered = true;
        if resolve_key.is_some() {
            self.resolve_key = resolve_key;
        }
        self.last_triggered_at = Some(now);
        self.trigger_count += 1;
        info!("Alert triggered (count: {})", self.trigger_count);
    }

    /// Record a resolve (Active -> Idle). The key is only dropped when `clear_key` is set.
    pub fn commit_resolve(&mut self, clear_key: bool) {
        self.triggered = false;
        self.last_triggered_at = None;
        if clear_key {
            self.resolve_key = None;
        }
        info!("Alert resolved");
    }
}

/// Derive a resolve key from the endpoint, the alert, and a freshness salt
pub fn generate_resolve_key(endpoint: &Endpoint, alert: &Alert, salt: DateTime<Utc>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(endpoint.key().as_bytes());
    hasher.update(b"|");
    hasher.update(alert.alert_type.as_str().as_bytes());
    hasher.update(b"|");
    hasher.update(alert.description().as_bytes());
    hasher.update(b"|");
    hasher.update(salt.timestamp_nanos_opt().unwrap_or_default().to_le_bytes());
    format!("{:x}", hasher.finalize())
}

impl Alert {
    /// Key to send along with a trigger notification.
    ///
    /// Reuses the stored key when there is one; otherwise generates a fresh one
    /// for providers whose key is derived locally. Does not store anything.
    pub fn trigger_resolve_key(&self, endpoint: &Endpoint, now: DateTime<Utc>) -> Option<String> {
        if let Some(key) = &self.state.resolve_key {
            return Some(key.clone());
        }
        match self.alert_type.resolve_key_strategy() {
            ResolveKeyStrategy::Generated => Some(generate_resolve_key(endpoint, self, now)),
            ResolveKeyStrategy::Remote | ResolveKeyStrategy::None => None,
        }
    }
}
