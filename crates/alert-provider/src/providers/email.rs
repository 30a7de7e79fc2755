//! SMTP email settings

use crate::client::ClientConfig;
use crate::error::ProviderError;
use crate::resolver::ProviderConfig;
use crate::{lenient, merge};
use serde::{Deserialize, Serialize};

/// Email provider settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct EmailConfig {
    /// Sender address
    pub from: String,
    /// SMTP username, the sender address when empty
    pub username: String,
    /// SMTP password, no authentication when empty
    pub password: String,
    /// SMTP host
    pub host: String,
    /// SMTP port
    pub port: u16,
    /// Comma-separated recipients
    pub to: String,
    /// Outbound client settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<ClientConfig>,
}

/// Partial email settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct EmailPatch {
    pub from: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub host: Option<String>,
    #[serde(default, deserialize_with = "lenient::option_integer")]
    pub port: Option<u16>,
    pub to: Option<String>,
    pub client: Option<ClientConfig>,
}

impl EmailConfig {
    /// Recipients, split on commas
    pub fn recipients(&self) -> Vec<&str> {
        self.to
            .split(',')
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .collect()
    }

    /// Username used to authenticate
    pub fn effective_username(&self) -> &str {
        if self.username.is_empty() {
            &self.from
        } else {
            &self.username
        }
    }
}

impl ProviderConfig for EmailConfig {
    type Patch = EmailPatch;

    fn merge(&mut self, patch: &EmailPatch) {
        merge::nested(&mut self.client, &patch.client);
        merge::string(&mut self.from, &patch.from);
        merge::string(&mut self.username, &patch.username);
        merge::string(&mut self.password, &patch.password);
        merge::string(&mut self.host, &patch.host);
        merge::number(&mut self.port, &patch.port);
        merge::string(&mut self.to, &patch.to);
    }

    fn validate(&self) -> Result<(), ProviderError> {
        if self.from.is_empty() {
            return Err(ProviderError::MissingField("from"));
        }
        if self.to.is_empty() {
            return Err(ProviderError::MissingField("to"));
        }
        if self.port == 0 {
            return Err(ProviderError::InvalidField {
                field: "port",
                reason: "must be between 1 and 65535".to_string(),
            });
        }
        if self.host.is_empty() {
            return Err(ProviderError::MissingField("host"));
        }
        Ok(())
    }
}
