//! Slack incoming webhook settings

use crate::error::ProviderError;
use crate::merge;
use crate::resolver::ProviderConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SlackConfig {
    /// Incoming webhook URL
    pub webhook_url: String,
    /// Message title, the application name when empty
    pub title: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct SlackPatch {
    pub webhook_url: Option<String>,
    pub title: Option<String>,
}

impl ProviderConfig for SlackConfig {
    type Patch = SlackPatch;

    fn merge(&mut self, patch: &SlackPatch) {
        merge::string(&mut self.webhook_url, &patch.webhook_url);
        merge::string(&mut self.title, &patch.title);
    }

    fn validate(&self) -> Result<(), ProviderError> {
        if self.webhook_url.is_empty() {
            return Err(ProviderError::MissingField("webhook-url"));
        }
        Ok(())
    }
}
