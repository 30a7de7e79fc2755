//! Provider Kinds

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a provider correlates a trigger notification with its resolve notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveKeyStrategy {
    /// Provider has no update/close semantics
    None,
    /// The core derives a key before the first trigger send
    Generated,
    /// The remote API hands back a key when the trigger is accepted
    Remote,
}

macro_rules! alert_types {
    ($($variant:ident => $name:literal),+ $(,)?) => {
        /// Provider that dispatches an alert. The set is fixed at build time.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum AlertType {
            $(
                #[serde(rename = $name)]
                $variant,
            )+
        }

        impl AlertType {
            /// Every supported provider kind
            pub const ALL: &'static [AlertType] = &[$(AlertType::$variant),+];

            /// Name used in configuration documents
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(AlertType::$variant => $name,)+
                }
            }
        }
    };
}

alert_types! {
    AwsSes => "aws-ses",
    ClickUp => "clickup",
    Custom => "custom",
    Datadog => "datadog",
    Discord => "discord",
    Email => "email",
    GitHub => "github",
    GitLab => "gitlab",
    Gitea => "gitea",
    GoogleChat => "googlechat",
    Gotify => "gotify",
    HomeAssistant => "homeassistant",
    Ifttt => "ifttt",
    Ilert => "ilert",
    IncidentIo => "incident-io",
    Line => "line",
    Matrix => "matrix",
    Mattermost => "mattermost",
    Messagebird => "messagebird",
    N8n => "n8n",
    NewRelic => "newrelic",
    Ntfy => "ntfy",
    Opsgenie => "opsgenie",
    PagerDuty => "pagerduty",
    Plivo => "plivo",
    Pushover => "pushover",
    RocketChat => "rocketchat",
    SendGrid => "sendgrid",
    Signal => "signal",
    Signl4 => "signl4",
    Slack => "slack",
    Splunk => "splunk",
    Squadcast => "squadcast",
    Teams => "teams",
    TeamsWorkflows => "teams-workflows",
    Telegram => "telegram",
    Twilio => "twilio",
    Vonage => "vonage",
    Webex => "webex",
    Zapier => "zapier",
    Zulip => "zulip",
}

impl AlertType {
    /// Resolve-key strategy of the provider
    pub fn resolve_key_strategy(&self) -> ResolveKeyStrategy {
        match self {
            AlertType::IncidentIo | AlertType::Opsgenie | AlertType::GitLab => {
                ResolveKeyStrategy::Generated
            }
            AlertType::PagerDuty | AlertType::GitHub | AlertType::Gitea => {
                ResolveKeyStrategy::Remote
            }
            _ => ResolveKeyStrategy::None,
        }
    }
}

impl fmt::Display for AlertType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlertType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AlertType::ALL
            .iter()
            .find(|t| t.as_str() == s)
            .copied()
            .ok_or_else(|| format!("unknown alert type: {}", s))
    }
}
