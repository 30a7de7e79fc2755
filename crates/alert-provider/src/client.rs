//! Outbound client settings shared by providers

use serde::{Deserialize, Serialize};

/// Default request timeout (seconds)
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

/// Settings of the client used to reach a provider's API.
///
/// Overrides replace this block wholesale rather than field by field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ClientConfig {
    /// Skip TLS certificate verification
    #[serde(default)]
    pub insecure: bool,
    /// Do not follow redirects
    #[serde(default)]
    pub ignore_redirect: bool,
    /// Request timeout (seconds)
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            insecure: false,
            ignore_redirect: false,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}
