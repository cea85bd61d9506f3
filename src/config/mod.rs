#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::config::toml_config::{build_registry, TomlConfig, ZoneConfig};
use crate::core::registry::ZoneRegistry;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// 本地隨機產生讀數
    #[default]
    Simulated,
    /// 呼叫遠端預測服務
    Remote,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

/// Effective runtime settings after merging the TOML file and command line overrides.
#[derive(Debug, Clone)]
pub struct Settings {
    pub provider: ProviderKind,
    pub endpoint: Option<String>,
    pub headers: HashMap<String, String>,
    pub timeout: Duration,
    pub simulated_delay: Duration,
    pub seed: Option<u64>,
    pub hotspots_endpoint: Option<String>,
    pub verbose: bool,
    pub log_format: LogFormat,
    pub zones: Option<Vec<ZoneConfig>>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Simulated,
            endpoint: None,
            headers: HashMap::new(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
            simulated_delay: Duration::ZERO,
            seed: None,
            hotspots_endpoint: None,
            verbose: false,
            log_format: LogFormat::Compact,
            zones: None,
        }
    }
}

impl Settings {
    pub fn from_toml(config: &TomlConfig) -> Self {
        let defaults = Self::default();
        let simulation = config.simulation.clone().unwrap_or_default();
        let logging = config.logging.clone().unwrap_or_default();

        Self {
            provider: config.provider.kind,
            endpoint: config.provider.endpoint.clone(),
            headers: config.provider.headers.clone().unwrap_or_default(),
            timeout: config
                .provider
                .timeout_seconds
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
            simulated_delay: simulation
                .delay_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.simulated_delay),
            seed: simulation.seed,
            hotspots_endpoint: config.hotspots.as_ref().map(|h| h.endpoint.clone()),
            verbose: logging.verbose.unwrap_or(defaults.verbose),
            log_format: logging.format.unwrap_or(defaults.log_format),
            zones: config.zones.clone(),
        }
    }

    pub fn registry(&self) -> Result<ZoneRegistry> {
        build_registry(self.zones.as_deref())
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        if self.provider == ProviderKind::Remote {
            let endpoint = validation::validate_required_field("endpoint", &self.endpoint)?;
            validation::validate_url("endpoint", endpoint)?;
        }

        validation::validate_range("timeout_seconds", self.timeout.as_secs(), 1, 300)?;
        validation::validate_range(
            "delay_ms",
            self.simulated_delay.as_millis() as u64,
            0,
            60_000,
        )?;

        if let Some(endpoint) = &self.hotspots_endpoint {
            validation::validate_url("hotspots_endpoint", endpoint)?;
        }

        self.registry().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::PredictError;

    #[test]
    fn test_settings_from_toml() {
        let config = TomlConfig::from_toml_str(
            r#"
[provider]
kind = "remote"
endpoint = "http://localhost:8000/predict"

[simulation]
delay_ms = 250
seed = 9
"#,
        )
        .unwrap();

        let settings = Settings::from_toml(&config);
        assert_eq!(settings.provider, ProviderKind::Remote);
        assert_eq!(settings.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECONDS));
        assert_eq!(settings.simulated_delay, Duration::from_millis(250));
        assert_eq!(settings.seed, Some(9));
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_default_settings_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.registry().unwrap().len(), 10);
    }

    #[test]
    fn test_empty_zone_override_fails_validation() {
        let settings = Settings {
            zones: Some(vec![]),
            ..Settings::default()
        };
        assert!(matches!(settings.validate(), Err(PredictError::RegistryEmpty)));
    }
}
