use crate::config::{LogFormat, ProviderKind};
use crate::core::registry::ZoneRegistry;
use crate::domain::model::{GeoPoint, Zone};
use crate::utils::error::{PredictError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub provider: ProviderConfig,
    pub simulation: Option<SimulationConfig>,
    pub hotspots: Option<HotspotsConfig>,
    pub logging: Option<LoggingConfig>,
    pub zones: Option<Vec<ZoneConfig>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default)]
    pub kind: ProviderKind,
    pub endpoint: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub headers: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub delay_ms: Option<u64>,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotspotsConfig {
    pub endpoint: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub format: Option<LogFormat>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneConfig {
    pub name: String,
    pub species: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl ZoneConfig {
    pub fn to_zone(&self) -> Result<Zone> {
        Ok(Zone::new(
            self.name.clone(),
            self.species.clone(),
            GeoPoint::new(self.latitude, self.longitude)?,
        ))
    }
}

/// 未設定 zones 時使用內建清單；明確設定為空清單則視為啟動錯誤
pub fn build_registry(zones: Option<&[ZoneConfig]>) -> Result<ZoneRegistry> {
    match zones {
        None => Ok(ZoneRegistry::default_zones()),
        Some(entries) => {
            let zones = entries
                .iter()
                .map(ZoneConfig::to_zone)
                .collect::<Result<Vec<_>>>()?;
            ZoneRegistry::new(zones)
        }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PredictError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| PredictError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${PREDICT_ENDPOINT})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| PredictError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        if self.provider.kind == ProviderKind::Remote {
            let endpoint =
                validation::validate_required_field("provider.endpoint", &self.provider.endpoint)?;
            validation::validate_url("provider.endpoint", endpoint)?;
        }

        if let Some(timeout) = self.provider.timeout_seconds {
            validation::validate_range("provider.timeout_seconds", timeout, 1, 300)?;
        }

        if let Some(delay) = self.simulation.as_ref().and_then(|s| s.delay_ms) {
            validation::validate_range("simulation.delay_ms", delay, 0, 60_000)?;
        }

        if let Some(hotspots) = &self.hotspots {
            validation::validate_url("hotspots.endpoint", &hotspots.endpoint)?;
        }

        if let Some(zones) = &self.zones {
            for zone in zones {
                validation::validate_non_empty_string("zones.name", &zone.name)?;
                validation::validate_non_empty_string("zones.species", &zone.species)?;
            }
            build_registry(Some(zones.as_slice()))?;
        }

        Ok(())
    }

    pub fn registry(&self) -> Result<ZoneRegistry> {
        build_registry(self.zones.as_deref())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
