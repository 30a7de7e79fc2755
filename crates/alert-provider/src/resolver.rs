//! Three-tier configuration resolution
//!
//! Precedence, lowest first: the provider's default configuration, the
//! override registered for the endpoint's group, and the alert's inline
//! override.

use crate::error::ProviderError;
use alerting::Alert;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::Debug;
use tracing::debug;

/// A provider's strongly-typed settings
pub trait ProviderConfig: Clone + Debug + Send + Sync + Serialize + DeserializeOwned {
    /// Partial settings: every field optional, unknown fields rejected
    type Patch: Clone + Debug + Default + Send + Sync + Serialize + DeserializeOwned;

    /// Apply a patch on top of these settings
    fn merge(&mut self, patch: &Self::Patch);

    /// Check that required fields are present and usable
    fn validate(&self) -> Result<(), ProviderError>;
}

/// Settings that replace the defaults for endpoints of one group
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(
    serialize = "C::Patch: Serialize",
    deserialize = "C::Patch: DeserializeOwned"
))]
pub struct Override<C: ProviderConfig> {
    /// Group the override applies to
    pub group: String,
    /// Fields to override
    #[serde(flatten)]
    pub patch: C::Patch,
}

impl<C: ProviderConfig> Override<C> {
    /// Create an override for a group
    pub fn new(group: impl Into<String>, patch: C::Patch) -> Self {
        Self {
            group: group.into(),
            patch,
        }
    }
}

/// A provider as declared in the configuration document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(serialize = "C: Serialize", deserialize = "C: DeserializeOwned"))]
#[serde(rename_all = "kebab-case")]
pub struct AlertProvider<C: ProviderConfig> {
    /// Baseline settings
    #[serde(flatten)]
    pub default_config: C,
    /// Alert settings inherited by every alert of this provider's type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_alert: Option<Alert>,
    /// Group-keyed overrides, in declaration order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub overrides: Vec<Override<C>>,
}

impl<C: ProviderConfig> AlertProvider<C> {
    /// Create a provider with no overrides
    pub fn new(default_config: C) -> Self {
        Self {
            default_config,
            default_alert: None,
            overrides: Vec::new(),
        }
    }

    /// Register a group override
    pub fn with_override(mut self, group: impl Into<String>, patch: C::Patch) -> Self {
        self.overrides.push(Override::new(group, patch));
        self
    }

    /// Set the provider's default alert
    pub fn with_default_alert(mut self, alert: Alert) -> Self {
        self.default_alert = Some(alert);
        self
    }

    /// Validate the provider once, at load time.
    ///
    /// Every override needs a group, and no two overrides may share one.
    pub fn validate(&self) -> Result<(), ProviderError> {
        let mut registered = HashSet::with_capacity(self.overrides.len());
        for entry in &self.overrides {
            if entry.group.is_empty() || !registered.insert(entry.group.as_str()) {
                return Err(ProviderError::DuplicateGroupOverride);
            }
        }
        self.default_config.validate()
    }

    /// Effective settings for an alert of an endpoint in `group`.
    ///
    /// Never touches the stored defaults or overrides; the result is an
    /// independent copy.
    pub fn resolve(&self, group: &str, alert: &Alert) -> Result<C, ProviderError> {
        let mut cfg = self.default_config.clone();

        if let Some(entry) = self
            .overrides
            .iter()
            .find(|o| !group.is_empty() && o.group == group)
        {
            debug!("Applying override for group '{}'", group);
            cfg.merge(&entry.patch);
        }

        if !alert.provider_override.is_empty() {
            let patch = decode_patch::<C>(alert)?;
            debug!("Applying inline override of alert type {}", alert.alert_type);
            cfg.merge(&patch);
        }

        cfg.validate()?;
        Ok(cfg)
    }

    /// Check at load time that an alert's overrides resolve to valid settings
    pub fn validate_overrides(&self, group: &str, alert: &Alert) -> Result<(), ProviderError> {
        self.resolve(group, alert).map(|_| ())
    }
}

/// Re-decode an alert's untyped inline override into the provider's patch type
pub fn decode_patch<C: ProviderConfig>(alert: &Alert) -> Result<C::Patch, ProviderError> {
    serde_json::from_value(alert.provider_override_as_value())
        .map_err(|e| ProviderError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::email::{EmailConfig, EmailPatch};
    use crate::providers::opsgenie::{OpsgenieConfig, OpsgeniePatch};
    use alerting::AlertType;
    use proptest::prelude::*;
    use serde_json::json;

    fn email(to: &str) -> EmailConfig {
        EmailConfig {
            from: "alerts@x.com".to_string(),
            host: "smtp.x.com".to_string(),
            port: 587,
            to: to.to_string(),
            ..EmailConfig::default()
        }
    }

    fn email_patch(to: &str) -> EmailPatch {
        EmailPatch {
            to: Some(to.to_string()),
            ..EmailPatch::default()
        }
    }

    fn provider() -> AlertProvider<EmailConfig> {
        AlertProvider::new(email("a@x.com")).with_override("g", email_patch("b@x.com"))
    }

    #[test]
    fn test_group_override_precedence() {
        let provider = provider();
        let alert = Alert::new(AlertType::Email);

        assert_eq!(provider.resolve("g", &alert).unwrap().to, "b@x.com");
        assert_eq!(provider.resolve("", &alert).unwrap().to, "a@x.com");
        assert_eq!(provider.resolve("other", &alert).unwrap().to, "a@x.com");
    }

    #[test]
    fn test_inline_override_wins() {
        let provider = provider();
        let alert = Alert::new(AlertType::Email).with_override("to", json!("c@x.com"));

        assert_eq!(provider.resolve("g", &alert).unwrap().to, "c@x.com");
        assert_eq!(provider.resolve("", &alert).unwrap().to, "c@x.com");
    }

    #[test]
    fn test_inline_override_with_coerced_number() {
        let provider = provider();
        let alert = Alert::new(AlertType::Email).with_override("port", json!(2525.0));
        assert_eq!(provider.resolve("", &alert).unwrap().port, 2525);
    }

    #[test]
    fn test_inline_override_decode_errors() {
        let provider = provider();

        let wrong_shape = Alert::new(AlertType::Email).with_override("to", json!(["c@x.com"]));
        assert!(matches!(
            provider.resolve("", &wrong_shape),
            Err(ProviderError::Decode(_))
        ));

        let unknown = Alert::new(AlertType::Email).with_override("recipient", json!("c@x.com"));
        assert!(matches!(
            provider.resolve("", &unknown),
            Err(ProviderError::Decode(_))
        ));
    }

    #[test]
    fn test_resolve_validates_merged_result() {
        let provider = AlertProvider::new(OpsgenieConfig::default())
            .with_override(
                "core",
                OpsgeniePatch {
                    api_key: Some("group-key".to_string()),
                    ..OpsgeniePatch::default()
                },
            );
        let alert = Alert::new(AlertType::Opsgenie);

        assert_eq!(
            provider.resolve("", &alert).unwrap_err(),
            ProviderError::MissingField("api-key")
        );
        assert_eq!(provider.resolve("core", &alert).unwrap().api_key, "group-key");

        let inline = Alert::new(AlertType::Opsgenie).with_override("api-key", json!("inline"));
        assert_eq!(provider.resolve("", &inline).unwrap().api_key, "inline");
        assert!(provider.validate_overrides("", &inline).is_ok());
    }

    #[test]
    fn test_resolve_does_not_mutate_provider() {
        let provider = AlertProvider::new(OpsgenieConfig {
            api_key: "key".to_string(),
            tags: vec!["base".to_string()],
            ..OpsgenieConfig::default()
        });
        let alert = Alert::new(AlertType::Opsgenie).with_override("tags", json!(["inline"]));

        let mut resolved = provider.resolve("", &alert).unwrap();
        assert_eq!(resolved.tags, vec!["inline"]);
        resolved.tags.push("mutated".to_string());

        assert_eq!(provider.default_config.tags, vec!["base"]);
        let fresh = provider.resolve("", &Alert::new(AlertType::Opsgenie)).unwrap();
        assert_eq!(fresh.tags, vec!["base"]);
    }

    #[test]
    fn test_duplicate_group_override() {
        let duplicated = provider().with_override("g", email_patch("d@x.com"));
        assert_eq!(duplicated.validate(), Err(ProviderError::DuplicateGroupOverride));

        let empty_group =
            AlertProvider::new(email("a@x.com")).with_override("", email_patch("d@x.com"));
        assert_eq!(empty_group.validate(), Err(ProviderError::DuplicateGroupOverride));

        assert_eq!(provider().validate(), Ok(()));
    }

    #[test]
    fn test_concurrent_resolution() {
        let provider = std::sync::Arc::new(provider());
        let handles: Vec<_> = ["g", "", "g", "other"]
            .into_iter()
            .map(|group| {
                let provider = provider.clone();
                std::thread::spawn(move || {
                    let alert = Alert::new(AlertType::Email);
                    provider.resolve(group, &alert).map(|cfg| cfg.to)
                })
            })
            .collect();

        let resolved: Vec<_> = handles.into_iter().map(|h| h.join().unwrap().unwrap()).collect();
        assert_eq!(resolved, vec!["b@x.com", "a@x.com", "b@x.com", "a@x.com"]);
    }

    proptest! {
        #[test]
        fn prop_resolve_is_idempotent_and_pure(
            group_to in "[a-z]{1,8}@x\\.com",
            inline_to in proptest::option::of("[a-z]{1,8}@y\\.com"),
            group in prop::sample::select(vec!["g", "h", ""]),
        ) {
            let provider = AlertProvider::new(email("a@x.com"))
                .with_override("g", email_patch(&group_to));
            let before = serde_json::to_value(&provider).unwrap();

            let mut alert = Alert::new(AlertType::Email);
            if let Some(to) = &inline_to {
                alert = alert.with_override("to", json!(to));
            }

            let first = provider.resolve(group, &alert).unwrap();
            let second = provider.resolve(group, &alert).unwrap();
            prop_assert_eq!(&first, &second);
            prop_assert_eq!(serde_json::to_value(&provider).unwrap(), before);

            let expected = match (&inline_to, group) {
                (Some(to), _) => to.clone(),
                (None, "g") => group_to.clone(),
                (None, _) => "a@x.com".to_string(),
            };
            prop_assert_eq!(first.to, expected);
            prop_assert_eq!(first.host, "smtp.x.com");
        }

        #[test]
        fn prop_duplicate_groups_always_rejected(
            groups in proptest::collection::vec("[a-c]{0,2}", 1..8),
        ) {
            let mut provider = AlertProvider::new(email("a@x.com"));
            for group in &groups {
                provider = provider.with_override(group.clone(), email_patch("b@x.com"));
            }
            let unique: HashSet<_> = groups.iter().collect();
            let invalid = groups.iter().any(|g| g.is_empty()) || unique.len() != groups.len();
            prop_assert_eq!(provider.validate().is_err(), invalid);
            if invalid {
                prop_assert_eq!(provider.validate(), Err(ProviderError::DuplicateGroupOverride));
            }
        }
    }
}
