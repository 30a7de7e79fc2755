//! Monitored Endpoints
//!
//! Shared input types for the alerting pipeline: who is being checked, what a
//! single check produced, and how many checks in a row passed or failed.

mod identity;
mod result;
mod streak;

pub use identity::{convert_group_and_name_to_key, Endpoint};
pub use result::{CheckResult, ConditionResult};
pub use streak::Streak;
