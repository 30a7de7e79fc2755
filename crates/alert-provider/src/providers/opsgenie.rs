//! Opsgenie alert API settings

use crate::error::ProviderError;
use crate::merge;
use crate::resolver::ProviderConfig;
use serde::{Deserialize, Serialize};

/// Default alert priority
pub const DEFAULT_PRIORITY: &str = "P1";

/// Default alert source
pub const DEFAULT_SOURCE: &str = "uptime";

const PRIORITIES: [&str; 5] = ["P1", "P2", "P3", "P4", "P5"];

/// Opsgenie provider settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OpsgenieConfig {
    /// GenieKey of the API integration
    pub api_key: String,
    /// P1 (critical) to P5 (informational)
    pub priority: String,
    /// Source field of created alerts
    pub source: String,
    /// Prepended to the endpoint name to form the alert entity
    pub entity_prefix: String,
    /// Prepended to the resolve key to form the alert alias
    pub alias_prefix: String,
    /// Tags added to every alert
    pub tags: Vec<String>,
}

impl Default for OpsgenieConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            priority: DEFAULT_PRIORITY.to_string(),
            source: DEFAULT_SOURCE.to_string(),
            entity_prefix: String::new(),
            alias_prefix: String::new(),
            tags: Vec::new(),
        }
    }
}

/// Partial Opsgenie settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct OpsgeniePatch {
    pub api_key: Option<String>,
    pub priority: Option<String>,
    pub source: Option<String>,
    pub entity_prefix: Option<String>,
    pub alias_prefix: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl ProviderConfig for OpsgenieConfig {
    type Patch = OpsgeniePatch;

    fn merge(&mut self, patch: &OpsgeniePatch) {
        merge::string(&mut self.api_key, &patch.api_key);
        merge::string(&mut self.priority, &patch.priority);
        merge::string(&mut self.source, &patch.source);
        merge::string(&mut self.entity_prefix, &patch.entity_prefix);
        merge::string(&mut self.alias_prefix, &patch.alias_prefix);
        merge::list(&mut self.tags, &patch.tags);
    }

    fn validate(&self) -> Result<(), ProviderError> {
        if self.api_key.is_empty() {
            return Err(ProviderError::MissingField("api-key"));
        }
        if !self.priority.is_empty() && !PRIORITIES.contains(&self.priority.as_str()) {
            return Err(ProviderError::InvalidField {
                field: "priority",
                reason: format!("{} is not one of P1..P5", self.priority),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_survive_partial_document() {
        let cfg: OpsgenieConfig = serde_json::from_value(serde_json::json!({
            "api-key": "00000000-0000-0000-0000-000000000000"
        }))
        .unwrap();
        assert_eq!(cfg.priority, "P1");
        assert_eq!(cfg.source, "uptime");
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_invalid_priority() {
        let cfg = OpsgenieConfig {
            api_key: "key".to_string(),
            priority: "P9".to_string(),
            ..OpsgenieConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ProviderError::InvalidField { field: "priority", .. })
        ));
    }

    #[test]
    fn test_empty_tags_do_not_replace() {
        let mut cfg = OpsgenieConfig {
            api_key: "key".to_string(),
            tags: vec!["prod".to_string()],
            ..OpsgenieConfig::default()
        };
        cfg.merge(&OpsgeniePatch {
            tags: Some(Vec::new()),
            priority: Some("P3".to_string()),
            ..OpsgeniePatch::default()
        });
        assert_eq!(cfg.tags, vec!["prod"]);
        assert_eq!(cfg.priority, "P3");
    }
}
