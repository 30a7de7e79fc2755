//! Endpoint Identity

use serde::{Deserialize, Serialize};

/// Characters replaced with `-` when building an endpoint key
const KEY_SEPARATORS: [char; 8] = ['/', '_', ',', '.', '#', '+', '&', ' '];

/// Identity of a monitored endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Endpoint {
    /// Endpoint name
    pub name: String,
    /// Group the endpoint belongs to, used to select provider overrides
    #[serde(default)]
    pub group: String,
    /// Target URL of the check
    #[serde(default)]
    pub url: String,
}

impl Endpoint {
    /// Create a new endpoint identity
    pub fn new(group: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            group: group.into(),
            url: String::new(),
        }
    }

    /// Set the target URL
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Unique key of the endpoint (`<group>_<name>`, sanitized)
    pub fn key(&self) -> String {
        convert_group_and_name_to_key(&self.group, &self.name)
    }

    /// Human-readable name, `group/name` when the endpoint is grouped
    pub fn display_name(&self) -> String {
        if self.group.is_empty() {
            self.name.clone()
        } else {
            format!("{}/{}", self.group, self.name)
        }
    }
}

/// Build the key for a group and endpoint name
pub fn convert_group_and_name_to_key(group: &str, name: &str) -> String {
    format!("{}_{}", sanitize(group), sanitize(name))
}

fn sanitize(value: &str) -> String {
    value
        .to_lowercase()
        .chars()
        .map(|c| if KEY_SEPARATORS.contains(&c) { '-' } else { c })
        .collect()
}
