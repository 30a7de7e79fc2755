//! Custom HTTP request settings

use crate::client::ClientConfig;
use crate::error::ProviderError;
use crate::merge;
use crate::resolver::ProviderConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const METHODS: [&str; 6] = ["GET", "POST", "PUT", "PATCH", "DELETE", "HEAD"];

/// Custom provider settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CustomConfig {
    /// Target URL
    pub url: String,
    /// HTTP method, GET when empty
    pub method: String,
    /// Request body template
    pub body: String,
    /// Request headers
    pub headers: HashMap<String, String>,
    /// Per-placeholder value substitutions (e.g. `ALERT_TRIGGERED_OR_RESOLVED`)
    pub placeholders: HashMap<String, HashMap<String, String>>,
    /// Outbound client settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<ClientConfig>,
}

/// Partial custom settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct CustomPatch {
    pub url: Option<String>,
    pub method: Option<String>,
    pub body: Option<String>,
    pub headers: Option<HashMap<String, String>>,
    pub placeholders: Option<HashMap<String, HashMap<String, String>>>,
    pub client: Option<ClientConfig>,
}

impl CustomConfig {
    /// HTTP method to use
    pub fn effective_method(&self) -> String {
        if self.method.is_empty() {
            "GET".to_string()
        } else {
            self.method.to_uppercase()
        }
    }
}

impl ProviderConfig for CustomConfig {
    type Patch = CustomPatch;

    fn merge(&mut self, patch: &CustomPatch) {
        merge::nested(&mut self.client, &patch.client);
        merge::string(&mut self.url, &patch.url);
        merge::string(&mut self.method, &patch.method);
        merge::string(&mut self.body, &patch.body);
        merge::map(&mut self.headers, &patch.headers);
        merge::map(&mut self.placeholders, &patch.placeholders);
    }

    fn validate(&self) -> Result<(), ProviderError> {
        if self.url.is_empty() {
            return Err(ProviderError::MissingField("url"));
        }
        if !self.method.is_empty() && !METHODS.contains(&self.method.to_uppercase().as_str()) {
            return Err(ProviderError::InvalidField {
                field: "method",
                reason: format!("unsupported HTTP method {}", self.method),
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
        assert_eq!(
            CustomConfig::default().validate(),
            Err(ProviderError::MissingField("url"))
        );

        let mut cfg = CustomConfig {
            url: "https://hooks.example.org".to_string(),
            ..CustomConfig::default()
        };
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.effective_method(), "GET");

        cfg.method = "post".to_string();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.effective_method(), "POST");

        cfg.method = "TELEPORT".to_string();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_merge_headers_and_placeholders() {
        let mut cfg = CustomConfig {
            url: "https://hooks.example.org".to_string(),
            headers: HashMap::from([
                ("Authorization".to_string(), "Bearer base".to_string()),
                ("Content-Type".to_string(), "application/json".to_string()),
            ]),
            placeholders: HashMap::from([(
                "ALERT_TRIGGERED_OR_RESOLVED".to_string(),
                HashMap::from([("TRIGGERED".to_string(), "partial_outage".to_string())]),
            )]),
            ..CustomConfig::default()
        };

        let patch: CustomPatch = serde_json::from_value(serde_json::json!({
            "headers": {"Authorization": "Bearer inline"},
            "placeholders": {"ENDPOINT_NAME": {"api": "API"}}
        }))
        .unwrap();
        cfg.merge(&patch);

        assert_eq!(cfg.headers["Authorization"], "Bearer inline");
        assert_eq!(cfg.headers["Content-Type"], "application/json");
        assert_eq!(cfg.placeholders.len(), 2);
        assert_eq!(cfg.url, "https://hooks.example.org");
    }
}
