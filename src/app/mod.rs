pub mod service;
pub mod view;

pub use service::{load_hotspots, remote_provider, PredictionService};
pub use view::{to_pretty_json, PredictionView};
