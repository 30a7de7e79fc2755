//! Provider Registry
//!
//! The `alerting` section of the configuration document: at most one
//! provider per alert type, each resolved through its own typed settings.

use crate::error::ProviderError;
use crate::providers::*;
use crate::resolver::{AlertProvider, ProviderConfig};
use alerting::{Alert, AlertType};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Effective settings of one provider, after resolution
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedConfig {
    Custom(CustomConfig),
    Email(EmailConfig),
    IncidentIo(IncidentIoConfig),
    Ntfy(NtfyConfig),
    Opsgenie(OpsgenieConfig),
    PagerDuty(PagerDutyConfig),
    Slack(SlackConfig),
    Telegram(TelegramConfig),
}

macro_rules! resolved_config {
    ($($variant:ident($config:ty)),* $(,)?) => {
        impl ResolvedConfig {
            /// Provider these settings belong to
            pub fn alert_type(&self) -> AlertType {
                match self {
                    $(ResolvedConfig::$variant(_) => AlertType::$variant,)*
                }
            }
        }

        $(
            impl From<$config> for ResolvedConfig {
                fn from(config: $config) -> Self {
                    ResolvedConfig::$variant(config)
                }
            }
        )*
    };
}

resolved_config! {
    Custom(CustomConfig),
    Email(EmailConfig),
    IncidentIo(IncidentIoConfig),
    Ntfy(NtfyConfig),
    Opsgenie(OpsgenieConfig),
    PagerDuty(PagerDutyConfig),
    Slack(SlackConfig),
    Telegram(TelegramConfig),
}

/// A configured provider, independent of its settings type
pub trait ConfiguredProvider: Send + Sync {
    /// Load-time validation of overrides and default settings
    fn validate(&self) -> Result<(), ProviderError>;

    /// Effective settings for an alert of an endpoint in `group`
    fn resolve_config(&self, group: &str, alert: &Alert) -> Result<ResolvedConfig, ProviderError>;

    /// Alert settings inherited by every alert of this provider's type
    fn default_alert(&self) -> Option<&Alert>;
}

impl<C> ConfiguredProvider for AlertProvider<C>
where
    C: ProviderConfig + Into<ResolvedConfig>,
{
    fn validate(&self) -> Result<(), ProviderError> {
        AlertProvider::validate(self)
    }

    fn resolve_config(&self, group: &str, alert: &Alert) -> Result<ResolvedConfig, ProviderError> {
        self.resolve(group, alert).map(Into::into)
    }

    fn default_alert(&self) -> Option<&Alert> {
        self.default_alert.as_ref()
    }
}

/// Outcome of load-time provider validation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Providers that passed validation
    pub configured: Vec<AlertType>,
    /// Providers that were declared but disabled for being invalid
    pub ignored: Vec<AlertType>,
}

/// Every provider declared in the document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AlertingConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom: Option<AlertProvider<CustomConfig>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<AlertProvider<EmailConfig>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incident_io: Option<AlertProvider<IncidentIoConfig>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ntfy: Option<AlertProvider<NtfyConfig>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opsgenie: Option<AlertProvider<OpsgenieConfig>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagerduty: Option<AlertProvider<PagerDutyConfig>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slack: Option<AlertProvider<SlackConfig>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telegram: Option<AlertProvider<TelegramConfig>>,
}

fn as_dyn<C>(slot: &Option<AlertProvider<C>>) -> Option<&dyn ConfiguredProvider>
where
    C: ProviderConfig + Into<ResolvedConfig>,
{
    slot.as_ref().map(|p| p as &dyn ConfiguredProvider)
}

fn check<C>(
    slot: &mut Option<AlertProvider<C>>,
    alert_type: AlertType,
    report: &mut ValidationReport,
) where
    C: ProviderConfig,
{
    let Some(provider) = slot.as_ref() else {
        return;
    };
    match provider.validate() {
        Ok(()) => report.configured.push(alert_type),
        Err(e) => {
            warn!("Ignoring provider {} because its configuration is invalid: {}", alert_type, e);
            *slot = None;
            report.ignored.push(alert_type);
        }
    }
}

impl AlertingConfig {
    /// Provider for an alert type, if one is configured
    pub fn provider(&self, alert_type: AlertType) -> Option<&dyn ConfiguredProvider> {
        match alert_type {
            AlertType::Custom => as_dyn(&self.custom),
            AlertType::Email => as_dyn(&self.email),
            AlertType::IncidentIo => as_dyn(&self.incident_io),
            AlertType::Ntfy => as_dyn(&self.ntfy),
            AlertType::Opsgenie => as_dyn(&self.opsgenie),
            AlertType::PagerDuty => as_dyn(&self.pagerduty),
            AlertType::Slack => as_dyn(&self.slack),
            AlertType::Telegram => as_dyn(&self.telegram),
            _ => None,
        }
    }

    /// Effective settings for an alert of an endpoint in `group`
    pub fn resolve(
        &self,
        alert_type: AlertType,
        group: &str,
        alert: &Alert,
    ) -> Result<ResolvedConfig, ProviderError> {
        self.provider(alert_type)
            .ok_or(ProviderError::NotConfigured(alert_type))?
            .resolve_config(group, alert)
    }

    /// Validate every declared provider, disabling the invalid ones
    pub fn validate(&mut self) -> ValidationReport {
        let mut report = ValidationReport::default();
        check(&mut self.custom, AlertType::Custom, &mut report);
        check(&mut self.email, AlertType::Email, &mut report);
        check(&mut self.incident_io, AlertType::IncidentIo, &mut report);
        check(&mut self.ntfy, AlertType::Ntfy, &mut report);
        check(&mut self.opsgenie, AlertType::Opsgenie, &mut report);
        check(&mut self.pagerduty, AlertType::PagerDuty, &mut report);
        check(&mut self.slack, AlertType::Slack, &mut report);
        check(&mut self.telegram, AlertType::Telegram, &mut report);
        info!(
            "Configured providers: {:?}, ignored: {:?}",
            report.configured, report.ignored
        );
        report
    }

    /// Prepare an endpoint's alerts for evaluation.
    ///
    /// Each alert inherits its provider's default alert, gets its thresholds
    /// defaulted and its description checked, and has its overrides resolved
    /// once. Alerts that fail any of these steps are disabled. Alerts without
    /// a configured provider are still validated; they fail to resolve and
    /// are skipped when they fire. Returns how many alerts were disabled.
    pub fn prepare_alerts(&self, group: &str, alerts: &mut [Alert]) -> usize {
        let mut disabled = 0;
        for alert in alerts.iter_mut() {
            let provider = self.provider(alert.alert_type);
            if let Some(default) = provider.and_then(|p| p.default_alert()) {
                alert.merge_default(default);
            }

            let outcome = alert
                .validate_and_set_defaults()
                .map_err(|e| e.to_string())
                .and_then(|()| match provider {
                    Some(provider) => provider
                        .resolve_config(group, alert)
                        .map(|_| ())
                        .map_err(|e| e.to_string()),
                    None => {
                        debug!("No provider configured for alert of type {}", alert.alert_type);
                        Ok(())
                    }
                });
            if let Err(reason) = outcome {
                warn!(
                    "Disabling alert of type {} in group '{}': {}",
                    alert.alert_type, group, reason
                );
                alert.enabled = Some(false);
                disabled += 1;
            }
        }
        disabled
    }
}
