//! Provider configuration shapes
//!
//! Only the settings each provider needs; building and sending payloads
//! happens behind the dispatch boundary.

pub mod custom;
pub mod email;
pub mod incident_io;
pub mod ntfy;
pub mod opsgenie;
pub mod pagerduty;
pub mod slack;
pub mod telegram;

pub use custom::{CustomConfig, CustomPatch};
pub use email::{EmailConfig, EmailPatch};
pub use incident_io::{IncidentIoConfig, IncidentIoPatch};
pub use ntfy::{NtfyConfig, NtfyPatch};
pub use opsgenie::{OpsgenieConfig, OpsgeniePatch};
pub use pagerduty::{PagerDutyConfig, PagerDutyPatch};
pub use slack::{SlackConfig, SlackPatch};
pub use telegram::{TelegramConfig, TelegramPatch};
