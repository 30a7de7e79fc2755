//! Threshold hysteresis gate

use crate::Alert;
use endpoint::Streak;

/// Action warranted by the latest check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Send the problem notification (Idle -> Active)
    Trigger,
    /// Send the recovery notification (Active -> Idle)
    Resolve,
    /// Nothing to do
    None,
}

impl Transition {
    /// Decide what the alert should do given the endpoint's consecutive counts.
    ///
    /// An alert that is already triggered never re-triggers, and an idle alert
    /// never resolves.
    pub fn evaluate(alert: &Alert, streak: &Streak) -> Self {
        if alert.state.triggered {
            if streak.successes_in_a_row >= alert.effective_success_threshold() {
                return Transition::Resolve;
            }
        } else if streak.failures_in_a_row >= alert.effective_failure_threshold() {
            return Transition::Trigger;
        }
        Transition::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AlertType;
    use chrono::Utc;
    use proptest::prelude::*;

    #[test]
    fn test_trigger_at_failure_threshold() {
        let alert = Alert::new(AlertType::Slack).with_thresholds(3, 2);
        assert_eq!(Transition::evaluate(&alert, &Streak::new(2, 0)), Transition::None);
        assert_eq!(Transition::evaluate(&alert, &Streak::new(3, 0)), Transition::Trigger);
        assert_eq!(Transition::evaluate(&alert, &Streak::new(7, 0)), Transition::Trigger);
    }

    #[test]
    fn test_triggered_alert_does_not_retrigger() {
        let mut alert = Alert::new(AlertType::Slack).with_thresholds(3, 2);
        alert.state.commit_trigger(None, Utc::now());
        assert_eq!(Transition::evaluate(&alert, &Streak::new(10, 0)), Transition::None);
    }

    #[test]
    fn test_resolve_at_success_threshold() {
        let mut alert = Alert::new(AlertType::Slack).with_thresholds(3, 2);
        alert.state.commit_trigger(None, Utc::now());
        assert_eq!(Transition::evaluate(&alert, &Streak::new(0, 1)), Transition::None);
        assert_eq!(Transition::evaluate(&alert, &Streak::new(0, 2)), Transition::Resolve);
    }

    #[test]
    fn test_idle_alert_does_not_resolve() {
        let alert = Alert::new(AlertType::Slack).with_thresholds(3, 2);
        assert_eq!(Transition::evaluate(&alert, &Streak::new(0, 50)), Transition::None);
    }

    #[test]
    fn test_unset_thresholds_use_defaults() {
        let alert = Alert::new(AlertType::Slack);
        assert_eq!(Transition::evaluate(&alert, &Streak::new(0, 0)), Transition::None);
        assert_eq!(Transition::evaluate(&alert, &Streak::new(2, 0)), Transition::None);
        assert_eq!(Transition::evaluate(&alert, &Streak::new(3, 0)), Transition::Trigger);
    }

    #[test]
    fn test_negative_thresholds_use_defaults() {
        let mut alert = Alert::new(AlertType::Slack).with_thresholds(-1, -5);
        assert_eq!(Transition::evaluate(&alert, &Streak::new(2, 0)), Transition::None);
        assert_eq!(Transition::evaluate(&alert, &Streak::new(3, 0)), Transition::Trigger);
        alert.state.commit_trigger(None, Utc::now());
        assert_eq!(Transition::evaluate(&alert, &Streak::new(0, 1)), Transition::None);
        assert_eq!(Transition::evaluate(&alert, &Streak::new(0, 2)), Transition::Resolve);
    }

    proptest! {
        #[test]
        fn prop_triggers_only_after_failure_threshold(f in 1u32..20, s in 1u32..20) {
            let mut alert = Alert::new(AlertType::Custom).with_thresholds(f as i32, s as i32);
            let mut streak = Streak::default();
            for n in 1..=f {
                streak.record(false);
                let transition = Transition::evaluate(&alert, &streak);
                if n < f {
                    prop_assert_eq!(transition, Transition::None);
                } else {
                    prop_assert_eq!(transition, Transition::Trigger);
                }
            }
            alert.state.commit_trigger(None, Utc::now());

            for n in 1..=s {
                streak.record(true);
                let transition = Transition::evaluate(&alert, &streak);
                if n < s {
                    prop_assert_eq!(transition, Transition::None);
                } else {
                    prop_assert_eq!(transition, Transition::Resolve);
                }
            }
        }

        #[test]
        fn prop_interrupted_failures_never_trigger(
            f in 2u32..20,
            pattern in proptest::collection::vec(any::<bool>(), 0..64),
        ) {
            let alert = Alert::new(AlertType::Custom).with_thresholds(f as i32, 1);
            let mut streak = Streak::default();
            let mut run = 0u32;
            for success in pattern {
                streak.record(success);
                run = if success { 0 } else { run + 1 };
                let transition = Transition::evaluate(&alert, &streak);
                prop_assert_eq!(transition == Transition::Trigger, run >= f);
            }
        }
    }
}
