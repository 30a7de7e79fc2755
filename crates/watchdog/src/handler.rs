//! Alert handling for one check

use crate::dispatcher::{DispatchRequest, Dispatcher};
use crate::telemetry::{record_notification, record_resolution_error};
use alert_provider::{AlertingConfig, ResolvedConfig};
use alerting::{Alert, Transition};
use chrono::{DateTime, Utc};
use endpoint::{CheckResult, Endpoint, Streak};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// What happened to one alert during a check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertOutcome {
    /// Thresholds did not warrant any action
    Unchanged,
    /// Action warranted, but the alert is disabled or outside its schedule
    Suppressed,
    /// Provider settings could not be resolved; nothing was sent
    Skipped,
    /// Trigger notification delivered (Idle -> Active)
    Triggered,
    /// Trigger notification failed; the alert stays idle and retries next check
    TriggerFailed,
    /// Recovery notification delivered (Active -> Idle)
    Resolved,
    /// Resolved without a notification because the alert does not send on resolve
    ResolvedSilently,
    /// Recovery notification failed; the alert stays active
    ResolveFailed,
}

/// Evaluates alerts and hands approved actions to a dispatcher.
///
/// Shared between endpoints; holds nothing per endpoint.
pub struct AlertHandler<D> {
    providers: Arc<AlertingConfig>,
    dispatcher: D,
}

impl<D: Dispatcher> AlertHandler<D> {
    /// Create a handler over validated providers
    pub fn new(providers: Arc<AlertingConfig>, dispatcher: D) -> Self {
        Self {
            providers,
            dispatcher,
        }
    }

    /// Dispatcher used to send notifications
    pub fn dispatcher(&self) -> &D {
        &self.dispatcher
    }

    /// Handle every alert of an endpoint after a check
    pub async fn handle(
        &self,
        endpoint: &Endpoint,
        alerts: &mut [Alert],
        result: &CheckResult,
        streak: &Streak,
    ) -> Vec<AlertOutcome> {
        self.handle_at(endpoint, alerts, result, streak, Utc::now()).await
    }

    /// Handle every alert of an endpoint as of `now`
    pub async fn handle_at(
        &self,
        endpoint: &Endpoint,
        alerts: &mut [Alert],
        result: &CheckResult,
        streak: &Streak,
        now: DateTime<Utc>,
    ) -> Vec<AlertOutcome> {
        let mut outcomes = Vec::with_capacity(alerts.len());
        for alert in alerts.iter_mut() {
            outcomes.push(self.handle_alert(endpoint, alert, result, streak, now).await);
        }
        outcomes
    }

    async fn handle_alert(
        &self,
        endpoint: &Endpoint,
        alert: &mut Alert,
        result: &CheckResult,
        streak: &Streak,
        now: DateTime<Utc>,
    ) -> AlertOutcome {
        let transition = Transition::evaluate(alert, streak);
        if transition == Transition::None {
            return AlertOutcome::Unchanged;
        }
        if !alert.is_enabled_at(now) {
            debug!(
                "Alert of type {} for endpoint {} is disabled, skipping {:?}",
                alert.alert_type,
                endpoint.key(),
                transition
            );
            return AlertOutcome::Suppressed;
        }

        match transition {
            Transition::Trigger => self.trigger(endpoint, alert, result, now).await,
            Transition::Resolve => self.resolve(endpoint, alert, result).await,
            Transition::None => AlertOutcome::Unchanged,
        }
    }

    async fn trigger(
        &self,
        endpoint: &Endpoint,
        alert: &mut Alert,
        result: &CheckResult,
        now: DateTime<Utc>,
    ) -> AlertOutcome {
        let Some(config) = self.resolve_config(endpoint, alert) else {
            return AlertOutcome::Skipped;
        };
        let resolve_key = alert.trigger_resolve_key(endpoint, now);

        info!(
            "Sending {} alert because alert for endpoint {} with description='{}' has been triggered",
            alert.alert_type,
            endpoint.display_name(),
            alert.description()
        );
        let request = DispatchRequest {
            endpoint,
            alert,
            result,
            resolved: false,
            config: &config,
            resolve_key: resolve_key.as_deref(),
        };
        match self.dispatcher.send(request).await {
            Ok(delivery) => {
                record_notification(alert.alert_type, "trigger", "sent");
                alert.state.commit_trigger(delivery.resolve_key.or(resolve_key), now);
                AlertOutcome::Triggered
            }
            Err(e) => {
                record_notification(alert.alert_type, "trigger", "failed");
                warn!(
                    "Failed to send {} alert for endpoint {}: {}",
                    alert.alert_type,
                    endpoint.key(),
                    e
                );
                AlertOutcome::TriggerFailed
            }
        }
    }

    async fn resolve(
        &self,
        endpoint: &Endpoint,
        alert: &mut Alert,
        result: &CheckResult,
    ) -> AlertOutcome {
        if !alert.is_sending_on_resolved() {
            alert.state.commit_resolve(false);
            record_notification(alert.alert_type, "resolve", "silent");
            return AlertOutcome::ResolvedSilently;
        }
        let Some(config) = self.resolve_config(endpoint, alert) else {
            return AlertOutcome::Skipped;
        };
        let resolve_key = alert.state.resolve_key.clone();

        info!(
            "Sending {} alert because alert for endpoint {} with description='{}' has been resolved",
            alert.alert_type,
            endpoint.display_name(),
            alert.description()
        );
        let request = DispatchRequest {
            endpoint,
            alert,
            result,
            resolved: true,
            config: &config,
            resolve_key: resolve_key.as_deref(),
        };
        match self.dispatcher.send(request).await {
            Ok(_) => {
                record_notification(alert.alert_type, "resolve", "sent");
                alert.state.commit_resolve(true);
                AlertOutcome::Resolved
            }
            Err(e) => {
                record_notification(alert.alert_type, "resolve", "failed");
                warn!(
                    "Failed to send resolved {} alert for endpoint {}: {}",
                    alert.alert_type,
                    endpoint.key(),
                    e
                );
                AlertOutcome::ResolveFailed
            }
        }
    }

    fn resolve_config(&self, endpoint: &Endpoint, alert: &Alert) -> Option<ResolvedConfig> {
        match self.providers.resolve(alert.alert_type, &endpoint.group, alert) {
            Ok(config) => Some(config),
            Err(e) => {
                record_resolution_error(alert.alert_type);
                warn!(
                    "Not sending {} alert for endpoint {}: {}",
                    alert.alert_type,
                    endpoint.key(),
                    e
                );
                None
            }
        }
    }
}
