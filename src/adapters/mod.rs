// Adapters layer: concrete implementations of the domain ports and other external collaborators.

pub mod hotspots;
pub mod remote;
pub mod simulated;

pub use hotspots::HotspotClient;
pub use remote::{RemoteAssessment, RemoteProvider};
pub use simulated::SimulatedProvider;
