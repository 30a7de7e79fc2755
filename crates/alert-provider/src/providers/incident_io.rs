//! incident.io alert source settings

use crate::error::ProviderError;
use crate::merge;
use crate::resolver::ProviderConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Every alert source URL starts with this prefix
pub const ALERT_SOURCE_URL_PREFIX: &str = "https://api.incident.io/v2/alert_events/http/";

/// incident.io provider settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct IncidentIoConfig {
    /// HTTP alert source URL
    pub url: String,
    /// Bearer token of the alert source
    pub auth_token: String,
    /// Link back to the monitored endpoint, shown on the alert
    pub source_url: String,
    /// Extra metadata attached to every event
    pub metadata: HashMap<String, serde_json::Value>,
}

/// Partial incident.io settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct IncidentIoPatch {
    pub url: Option<String>,
    pub auth_token: Option<String>,
    pub source_url: Option<String>,
    pub metadata: Option<HashMap<String, serde_json::Value>>,
}

impl ProviderConfig for IncidentIoConfig {
    type Patch = IncidentIoPatch;

    fn merge(&mut self, patch: &IncidentIoPatch) {
        merge::string(&mut self.url, &patch.url);
        merge::string(&mut self.auth_token, &patch.auth_token);
        merge::string(&mut self.source_url, &patch.source_url);
        merge::map(&mut self.metadata, &patch.metadata);
    }

    fn validate(&self) -> Result<(), ProviderError> {
        if self.url.is_empty() {
            return Err(ProviderError::MissingField("url"));
        }
        if !self.url.starts_with(ALERT_SOURCE_URL_PREFIX) {
            return Err(ProviderError::InvalidField {
                field: "url",
                reason: format!("must start with {}", ALERT_SOURCE_URL_PREFIX),
            });
        }
        if self.auth_token.is_empty() {
            return Err(ProviderError::MissingField("auth-token"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid() -> IncidentIoConfig {
        IncidentIoConfig {
            url: format!("{}some-id", ALERT_SOURCE_URL_PREFIX),
            auth_token: "token".to_string(),
            ..IncidentIoConfig::default()
        }
    }

    #[test]
    fn test_validate() {
        assert!(valid().validate().is_ok());

        let mut cfg = valid();
        cfg.url = "https://example.org/hook".to_string();
        assert!(matches!(
            cfg.validate(),
            Err(ProviderError::InvalidField { field: "url", .. })
        ));

        let mut cfg = valid();
        cfg.auth_token.clear();
        assert_eq!(cfg.validate(), Err(ProviderError::MissingField("auth-token")));
    }

    #[test]
    fn test_metadata_keys_extend() {
        let mut cfg = IncidentIoConfig {
            metadata: HashMap::from([
                ("service".to_string(), json!("api")),
                ("tier".to_string(), json!(1)),
            ]),
            ..valid()
        };
        cfg.merge(&IncidentIoPatch {
            metadata: Some(HashMap::from([("tier".to_string(), json!(2))])),
            ..IncidentIoPatch::default()
        });
        assert_eq!(cfg.metadata["service"], json!("api"));
        assert_eq!(cfg.metadata["tier"], json!(2));
    }
}
