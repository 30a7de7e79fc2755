//! Health Check Result Snapshot

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Outcome of a single condition evaluated during a check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionResult {
    /// The condition as written in the endpoint configuration
    pub condition: String,
    /// Whether the condition held
    pub success: bool,
}

impl ConditionResult {
    /// Create a new condition result
    pub fn new(condition: impl Into<String>, success: bool) -> Self {
        Self {
            condition: condition.into(),
            success,
        }
    }
}

/// Immutable snapshot of one health check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    /// HTTP response status code, if the check was HTTP
    pub http_status: Option<u16>,
    /// Hostname extracted from the endpoint URL
    pub hostname: String,
    /// IP resolved from the endpoint URL
    pub ip: String,
    /// Whether a connection to the host was established
    pub connected: bool,
    /// Time the check took
    pub duration: Duration,
    /// Errors encountered during the check (deduplicated)
    pub errors: Vec<String>,
    /// Result of each condition, in declaration order
    pub condition_results: Vec<ConditionResult>,
    /// Whether the check as a whole passed
    pub success: bool,
    /// When the check was performed
    pub timestamp: DateTime<Utc>,
}

impl CheckResult {
    /// Create a passing result
    pub fn passed() -> Self {
        Self::with_success(true)
    }

    /// Create a failing result
    pub fn failed() -> Self {
        Self::with_success(false)
    }

    fn with_success(success: bool) -> Self {
        Self {
            http_status: None,
            hostname: String::new(),
            ip: String::new(),
            connected: success,
            duration: Duration::ZERO,
            errors: Vec::new(),
            condition_results: Vec::new(),
            success,
            timestamp: Utc::now(),
        }
    }

    /// Append a condition result
    pub fn with_condition(mut self, condition: impl Into<String>, success: bool) -> Self {
        self.condition_results.push(ConditionResult::new(condition, success));
        self
    }

    /// Add an error, ignoring duplicates
    pub fn add_error(&mut self, error: impl Into<String>) {
        let error = error.into();
        if !self.errors.contains(&error) {
            self.errors.push(error);
        }
    }

    /// Conditions that did not hold
    pub fn failed_conditions(&self) -> impl Iterator<Item = &ConditionResult> {
        self.condition_results.iter().filter(|c| !c.success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_error_deduplicates() {
        let mut result = CheckResult::failed();
        result.add_error("connection refused");
        result.add_error("connection refused");
        result.add_error("timeout");
        assert_eq!(result.errors, vec!["connection refused", "timeout"]);
    }

    #[test]
    fn test_failed_conditions() {
        let result = CheckResult::failed()
            .with_condition("[STATUS] == 200", false)
            .with_condition("[CONNECTED] == true", true);

        let failed: Vec<_> = result.failed_conditions().map(|c| c.condition.as_str()).collect();
        assert_eq!(failed, vec!["[STATUS] == 200"]);
    }

    #[test]
    fn test_condition_results_serialize_in_order() {
        let result = CheckResult::passed()
            .with_condition("[CONNECTED] == true", true)
            .with_condition("[STATUS] == 200", true);

        let json = serde_json::to_value(&result.condition_results).unwrap();
        assert_eq!(json[0]["condition"], "[CONNECTED] == true");
        assert_eq!(json[1]["success"], true);
    }
}
