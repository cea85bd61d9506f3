use crate::config::toml_config::TomlConfig;
use crate::config::{LogFormat, ProviderKind, Settings};
use crate::utils::error::Result;
use clap::{Parser, Subcommand};
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(name = "shark-habitat")]
#[command(about = "Estimate shark foraging habitat suitability for a point on the map")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Source of environmental readings
    #[arg(long, value_enum, global = true)]
    pub provider: Option<ProviderKind>,

    /// Prediction service endpoint (remote provider)
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Hotspot overlay endpoint
    #[arg(long, global = true)]
    pub hotspots_endpoint: Option<String>,

    /// Seconds to wait for an environmental reading
    #[arg(long, global = true)]
    pub timeout_seconds: Option<u64>,

    /// Seed for simulated readings and jitter
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Artificial delay for simulated readings, in milliseconds
    #[arg(long, global = true)]
    pub delay_ms: Option<u64>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, value_enum, global = true)]
    pub log_format: Option<LogFormat>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Predict habitat suitability for one point
    Predict {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,

        /// Ping the remote service before predicting
        #[arg(long)]
        check: bool,
    },
    /// List the known aggregation zones
    Zones {
        /// Print the zones as a GeoJSON feature collection
        #[arg(long)]
        geojson: bool,
    },
    /// Fetch the precomputed hotspot overlay
    Hotspots,
}

impl CliConfig {
    /// 先讀 TOML，再套用命令列覆蓋
    pub fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::from_toml(&TomlConfig::from_file(path)?),
            None => Settings::default(),
        };
        self.apply_overrides(&mut settings);
        Ok(settings)
    }

    pub fn apply_overrides(&self, settings: &mut Settings) {
        if let Some(provider) = self.provider {
            settings.provider = provider;
        }
        if let Some(endpoint) = &self.endpoint {
            settings.endpoint = Some(endpoint.clone());
        }
        if let Some(endpoint) = &self.hotspots_endpoint {
            settings.hotspots_endpoint = Some(endpoint.clone());
        }
        if let Some(timeout) = self.timeout_seconds {
            settings.timeout = Duration::from_secs(timeout);
        }
        if let Some(seed) = self.seed {
            settings.seed = Some(seed);
        }
        if let Some(delay) = self.delay_ms {
            settings.simulated_delay = Duration::from_millis(delay);
        }
        if self.verbose {
            settings.verbose = true;
        }
        if let Some(format) = self.log_format {
            settings.log_format = format;
        }
    }
}
