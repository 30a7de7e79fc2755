//! Cron-based enablement gate

use crate::error::AlertError;
use crate::Alert;
use chrono::{DateTime, Duration, Timelike, Utc};
use cron::Schedule;
use std::str::FromStr;
use tracing::{debug, warn};

/// Parse a cron expression.
///
/// Accepts the classic five-field form (minute granularity) as well as the
/// six/seven-field form with a leading seconds field.
pub fn parse_schedule(expression: &str) -> Result<Schedule, AlertError> {
    let normalized = if expression.split_whitespace().count() == 5 {
        format!("0 {}", expression.trim())
    } else {
        expression.trim().to_string()
    };
    Schedule::from_str(&normalized).map_err(|e| AlertError::InvalidCronSchedule {
        expression: expression.to_string(),
        reason: e.to_string(),
    })
}

/// Whether the schedule has an occurrence within the minute containing `now`.
///
/// `None` when the schedule cannot be evaluated.
fn is_due(schedule: &Schedule, now: DateTime<Utc>) -> Option<bool> {
    let minute_start = now.with_second(0)?.with_nanosecond(0)?;
    let probe = minute_start - Duration::seconds(1);
    schedule
        .after(&probe)
        .next()
        .map(|next| next < minute_start + Duration::minutes(1))
}

impl Alert {
    /// Whether the alert may fire at `now`.
    ///
    /// A cron schedule that does not match `now` suppresses the alert
    /// regardless of `enabled`. A schedule that cannot be parsed or evaluated
    /// never suppresses anything.
    pub fn is_enabled_at(&self, now: DateTime<Utc>) -> bool {
        if let Some(expression) = self.cron_schedule.as_deref().filter(|e| !e.is_empty()) {
            match parse_schedule(expression).map(|schedule| is_due(&schedule, now)) {
                Ok(Some(false)) => {
                    debug!(
                        "Alert of type {} suppressed by cron schedule '{}'",
                        self.alert_type, expression
                    );
                    return false;
                }
                Ok(Some(true)) => {}
                Ok(None) => {
                    warn!("Cron schedule '{}' could not be evaluated, allowing alert", expression);
                }
                Err(e) => {
                    warn!("{}, allowing alert", e);
                }
            }
        }
        self.enabled_setting()
    }

    /// Whether the alert may fire right now
    pub fn is_enabled(&self) -> bool {
        self.is_enabled_at(Utc::now())
    }
}
