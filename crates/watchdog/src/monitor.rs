//! Per-endpoint evaluation owner

use crate::dispatcher::Dispatcher;
use crate::handler::{AlertHandler, AlertOutcome};
use alert_provider::AlertingConfig;
use alerting::Alert;
use endpoint::{CheckResult, Endpoint, Streak};
use tracing::debug;

/// An endpoint together with its alerts and consecutive counts.
///
/// Takes `&mut self` to evaluate, so each endpoint has at most one
/// evaluation in flight. Different endpoints can be evaluated concurrently
/// against the same handler.
#[derive(Debug, Clone)]
pub struct MonitoredEndpoint {
    pub endpoint: Endpoint,
    pub alerts: Vec<Alert>,
    pub streak: Streak,
}

impl MonitoredEndpoint {
    /// Create a monitored endpoint with fresh counters
    pub fn new(endpoint: Endpoint, alerts: Vec<Alert>) -> Self {
        Self {
            endpoint,
            alerts,
            streak: Streak::default(),
        }
    }

    /// Apply provider default alerts and validate every alert once, at load time.
    ///
    /// Returns how many alerts were disabled.
    pub fn prepare(&mut self, providers: &AlertingConfig) -> usize {
        providers.prepare_alerts(&self.endpoint.group, &mut self.alerts)
    }

    /// Record a check result and handle the endpoint's alerts
    pub async fn process<D: Dispatcher>(
        &mut self,
        handler: &AlertHandler<D>,
        result: &CheckResult,
    ) -> Vec<AlertOutcome> {
        self.streak.record_result(result);
        debug!(
            "Processing result for endpoint {} (success={})",
            self.endpoint.key(),
            result.success
        );
        handler
            .handle(&self.endpoint, &mut self.alerts, result, &self.streak)
            .await
    }
}
