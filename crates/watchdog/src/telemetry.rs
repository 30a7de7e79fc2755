//! Dispatch counters

use alerting::AlertType;
use metrics::{counter, describe_counter};

pub(crate) const NOTIFICATIONS_TOTAL: &str = "alerting_notifications_total";
pub(crate) const RESOLUTION_ERRORS_TOTAL: &str = "alerting_resolution_errors_total";

/// Register descriptions of every counter with the installed recorder
pub fn describe_metrics() {
    describe_counter!(
        NOTIFICATIONS_TOTAL,
        "Notifications attempted, by provider, action and outcome"
    );
    describe_counter!(
        RESOLUTION_ERRORS_TOTAL,
        "Provider settings that failed to resolve for an alert"
    );
}

/// Record one notification attempt
pub(crate) fn record_notification(
    alert_type: AlertType,
    action: &'static str,
    outcome: &'static str,
) {
    counter!(
        NOTIFICATIONS_TOTAL,
        "type" => alert_type.as_str(),
        "action" => action,
        "outcome" => outcome
    )
    .increment(1);
}

/// Record a failed resolution
pub(crate) fn record_resolution_error(alert_type: AlertType) {
    counter!(RESOLUTION_ERRORS_TOTAL, "type" => alert_type.as_str()).increment(1);
}
