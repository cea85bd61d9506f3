pub mod geo;
pub mod jitter;
pub mod predictor;
pub mod registry;
pub mod scoring;

pub use crate::domain::model::{EnvironmentalReading, GeoPoint, PredictionResult, Probability, Zone};
pub use crate::domain::ports::{EnvironmentalDataProvider, JitterSource};
pub use crate::utils::error::Result;
