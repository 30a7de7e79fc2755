//! Consecutive pass/fail counters

use crate::CheckResult;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Consecutive failure and success counts for one endpoint.
///
/// Owned by whoever evaluates the endpoint; the alerting core only reads it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streak {
    /// Failed checks in a row
    pub failures_in_a_row: u32,
    /// Passed checks in a row
    pub successes_in_a_row: u32,
}

impl Streak {
    /// Create a streak from explicit counts
    pub fn new(failures_in_a_row: u32, successes_in_a_row: u32) -> Self {
        Self {
            failures_in_a_row,
            successes_in_a_row,
        }
    }

    /// Record a check outcome. A success resets the failure count and vice versa.
    pub fn record(&mut self, success: bool) {
        if success {
            self.successes_in_a_row = self.successes_in_a_row.saturating_add(1);
            self.failures_in_a_row = 0;
        } else {
            self.failures_in_a_row = self.failures_in_a_row.saturating_add(1);
            self.successes_in_a_row = 0;
        }
        debug!(
            "Streak updated: failures={} successes={}",
            self.failures_in_a_row, self.successes_in_a_row
        );
    }

    /// Record the outcome of a check result
    pub fn record_result(&mut self, result: &CheckResult) {
        self.record(result.success);
    }

    /// Reset both counters
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_success_resets_failures() {
        let mut streak = Streak::default();
        streak.record(false);
        streak.record(false);
        assert_eq!(streak, Streak::new(2, 0));

        streak.record_result(&CheckResult::passed());
        assert_eq!(streak, Streak::new(0, 1));
    }

    #[test]
    fn test_reset() {
        let mut streak = Streak::new(4, 0);
        streak.reset();
        assert_eq!(streak, Streak::default());
    }

    proptest! {
        #[test]
        fn prop_only_one_counter_is_nonzero(
            outcomes in proptest::collection::vec(any::<bool>(), 1..64)
        ) {
            let mut streak = Streak::default();
            for outcome in &outcomes {
                streak.record(*outcome);
            }
            prop_assert!(streak.failures_in_a_row == 0 || streak.successes_in_a_row == 0);

            let last = outcomes[outcomes.len() - 1];
            let tail = outcomes.iter().rev().take_while(|o| **o == last).count() as u32;
            if last {
                prop_assert_eq!(streak.successes_in_a_row, tail);
            } else {
                prop_assert_eq!(streak.failures_in_a_row, tail);
            }
        }
    }
}
