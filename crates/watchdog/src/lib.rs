//! Alert Evaluation
//!
//! Runs one endpoint's alerts against its latest check: threshold and cron
//! gates first, then provider resolution, then the dispatch boundary. Alert
//! state only changes once a send has been confirmed, so a failed trigger is
//! retried on the next check and a failed resolve keeps the alert active.

mod dispatcher;
mod error;
mod handler;
mod monitor;
mod telemetry;

pub use dispatcher::{Delivery, DispatchRequest, Dispatcher};
pub use error::DispatchError;
pub use handler::{AlertHandler, AlertOutcome};
pub use monitor::MonitoredEndpoint;
pub use telemetry::describe_metrics;
