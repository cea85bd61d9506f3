use crate::domain::model::{EnvironmentalReading, GeoPoint, Observation};
use crate::utils::error::Result;
use async_trait::async_trait;

/// 環境資料來源：本地模擬或遠端服務
#[async_trait]
pub trait EnvironmentalDataProvider: Send + Sync {
    async fn reading(&self, point: GeoPoint) -> Result<EnvironmentalReading>;

    /// Reading plus any estimate the source makes itself. Defaults to the bare reading.
    async fn observe(&self, point: GeoPoint) -> Result<Observation> {
        self.reading(point).await.map(Observation::from)
    }

    fn name(&self) -> &str;
}

/// Source of the bounded jitter added to every prediction. Samples lie in `[0, 5)`.
pub trait JitterSource: Send + Sync {
    fn sample(&self) -> f64;
}
