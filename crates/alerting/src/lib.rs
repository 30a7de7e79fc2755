//! Alerting Core
//!
//! Decides when a monitored endpoint's alert should fire or resolve:
//! threshold hysteresis, cron-based enablement, and the per-alert
//! trigger/resolve state with its resolve-key lifecycle.

mod alert;
mod alert_type;
mod error;
mod schedule;
mod state;
mod threshold;

pub use alert::{Alert, DEFAULT_FAILURE_THRESHOLD, DEFAULT_SUCCESS_THRESHOLD};
pub use alert_type::{AlertType, ResolveKeyStrategy};
pub use error::AlertError;
pub use schedule::parse_schedule;
pub use state::{generate_resolve_key, AlertState, Phase};
pub use threshold::Transition;
