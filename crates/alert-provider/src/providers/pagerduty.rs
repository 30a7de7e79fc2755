//! PagerDuty Events API v2 settings

use crate::error::ProviderError;
use crate::merge;
use crate::resolver::ProviderConfig;
use serde::{Deserialize, Serialize};

const INTEGRATION_KEY_LEN: usize = 32;

/// PagerDuty provider settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PagerDutyConfig {
    /// 32-character routing key of the integration
    pub integration_key: String,
}

/// Partial PagerDuty settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct PagerDutyPatch {
    pub integration_key: Option<String>,
}

impl ProviderConfig for PagerDutyConfig {
    type Patch = PagerDutyPatch;

    fn merge(&mut self, patch: &PagerDutyPatch) {
        merge::string(&mut self.integration_key, &patch.integration_key);
    }

    fn validate(&self) -> Result<(), ProviderError> {
        if self.integration_key.is_empty() {
            return Err(ProviderError::MissingField("integration-key"));
        }
        if self.integration_key.len() != INTEGRATION_KEY_LEN {
            return Err(ProviderError::InvalidField {
                field: "integration-key",
                reason: format!("must be {} characters long", INTEGRATION_KEY_LEN),
            });
        }
        Ok(())
    }
}
