//! Alert Providers
//!
//! Resolves the effective settings of a provider for one alert of one
//! endpoint. Settings are layered: the provider's defaults, then the
//! override registered for the endpoint's group, then the alert's own
//! inline override. Resolution works on a copy and never mutates the
//! stored configuration, so it is safe to call concurrently.

mod client;
mod error;
mod lenient;
mod merge;
mod registry;
mod resolver;

pub mod providers;
pub mod settings;

pub use client::{ClientConfig, DEFAULT_TIMEOUT_SECONDS};
pub use error::ProviderError;
pub use registry::{AlertingConfig, ConfiguredProvider, ResolvedConfig, ValidationReport};
pub use resolver::{decode_patch, AlertProvider, Override, ProviderConfig};
pub use settings::ConfigError;
