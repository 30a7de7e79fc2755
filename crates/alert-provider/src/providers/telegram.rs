//! Telegram bot settings

use crate::client::ClientConfig;
use crate::error::ProviderError;
use crate::merge;
use crate::resolver::ProviderConfig;
use serde::{Deserialize, Serialize};

pub const DEFAULT_API_URL: &str = "https://api.telegram.org";

/// Telegram bot settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct TelegramConfig {
    /// Bot token
    pub token: String,
    /// Chat ID
    pub id: String,
    /// Forum topic within the chat
    pub topic_id: String,
    /// Bot API base URL
    pub api_url: String,
    /// Outbound client settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<ClientConfig>,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            id: String::new(),
            topic_id: String::new(),
            api_url: DEFAULT_API_URL.to_string(),
            client: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct TelegramPatch {
    pub token: Option<String>,
    pub id: Option<String>,
    pub topic_id: Option<String>,
    pub api_url: Option<String>,
    pub client: Option<ClientConfig>,
}

impl ProviderConfig for TelegramConfig {
    type Patch = TelegramPatch;

    fn merge(&mut self, patch: &TelegramPatch) {
        merge::nested(&mut self.client, &patch.client);
        merge::string(&mut self.token, &patch.token);
        merge::string(&mut self.id, &patch.id);
        merge::string(&mut self.topic_id, &patch.topic_id);
        merge::string(&mut self.api_url, &patch.api_url);
    }

    fn validate(&self) -> Result<(), ProviderError> {
        if self.token.is_empty() {
            return Err(ProviderError::MissingField("token"));
        }
        if self.id.is_empty() {
            return Err(ProviderError::MissingField("id"));
        }
        Ok(())
    }
}
