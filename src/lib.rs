pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use app::{PredictionService, PredictionView};
pub use config::Settings;
pub use self::core::{
    jitter::{FixedJitter, RandomJitter},
    predictor::PredictionEngine,
    registry::ZoneRegistry,
};
pub use domain::model::{
    EnvironmentalReading, GeoPoint, Observation, PredictionResult, Probability, Zone,
};
pub use utils::error::{PredictError, Result};
