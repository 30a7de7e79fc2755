//! ntfy topic settings

use crate::error::ProviderError;
use crate::resolver::ProviderConfig;
use crate::{lenient, merge};
use serde::{Deserialize, Serialize};

pub const DEFAULT_URL: &str = "https://ntfy.sh";
pub const DEFAULT_PRIORITY: u8 = 3;

const TOKEN_PREFIX: &str = "tk_";

/// ntfy provider settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct NtfyConfig {
    /// Topic the messages are published to
    pub topic: String,
    /// Server URL
    pub url: String,
    /// Access token, `tk_` prefixed
    pub token: String,
    /// Address the server forwards each message to
    pub email: String,
    /// URL opened when the notification is clicked
    pub click: String,
    /// 1 (min) to 5 (max)
    pub priority: u8,
    /// Skip the server's firewall checks (`X-Firewall: no`)
    pub disable_firewall: bool,
    /// Do not cache messages on the server (`X-Cache: no`)
    pub disable_cache: bool,
}

impl Default for NtfyConfig {
    fn default() -> Self {
        Self {
            topic: String::new(),
            url: DEFAULT_URL.to_string(),
            token: String::new(),
            email: String::new(),
            click: String::new(),
            priority: DEFAULT_PRIORITY,
            disable_firewall: false,
            disable_cache: false,
        }
    }
}

/// Partial ntfy settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct NtfyPatch {
    pub topic: Option<String>,
    pub url: Option<String>,
    pub token: Option<String>,
    pub email: Option<String>,
    pub click: Option<String>,
    #[serde(default, deserialize_with = "lenient::option_integer")]
    pub priority: Option<u8>,
    pub disable_firewall: Option<bool>,
    pub disable_cache: Option<bool>,
}

impl ProviderConfig for NtfyConfig {
    type Patch = NtfyPatch;

    fn merge(&mut self, patch: &NtfyPatch) {
        merge::string(&mut self.topic, &patch.topic);
        merge::string(&mut self.url, &patch.url);
        merge::string(&mut self.token, &patch.token);
        merge::string(&mut self.email, &patch.email);
        merge::string(&mut self.click, &patch.click);
        merge::number(&mut self.priority, &patch.priority);
        merge::flag(&mut self.disable_firewall, &patch.disable_firewall);
        merge::flag(&mut self.disable_cache, &patch.disable_cache);
    }

    fn validate(&self) -> Result<(), ProviderError> {
        if self.topic.is_empty() {
            return Err(ProviderError::MissingField("topic"));
        }
        if !(1..=5).contains(&self.priority) {
            return Err(ProviderError::InvalidField {
                field: "priority",
                reason: "must be between 1 and 5".to_string(),
            });
        }
        if !self.token.is_empty() && !self.token.starts_with(TOKEN_PREFIX) {
            return Err(ProviderError::InvalidField {
                field: "token",
                reason: format!("must start with {}", TOKEN_PREFIX),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate() {
        let cfg = NtfyConfig {
            topic: "alerts".to_string(),
            ..NtfyConfig::default()
        };
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.url, DEFAULT_URL);

        assert_eq!(
            NtfyConfig::default().validate(),
            Err(ProviderError::MissingField("topic"))
        );

        let mut loud = cfg.clone();
        loud.priority = 6;
        assert!(loud.validate().is_err());

        let mut tokened = cfg;
        tokened.token = "abc".to_string();
        assert!(tokened.validate().is_err());
        tokened.token = "tk_abc".to_string();
        assert!(tokened.validate().is_ok());
    }

    #[test]
    fn test_patch_with_string_priority_and_flags() {
        let mut cfg = NtfyConfig {
            topic: "alerts".to_string(),
            disable_cache: true,
            ..NtfyConfig::default()
        };
        let patch: NtfyPatch = serde_json::from_value(serde_json::json!({
            "priority": "5",
            "disable-cache": false
        }))
        .unwrap();
        cfg.merge(&patch);

        assert_eq!(cfg.priority, 5);
        assert!(!cfg.disable_cache);
        assert_eq!(cfg.topic, "alerts");
    }
}
