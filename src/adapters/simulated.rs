use crate::domain::model::{EnvironmentalReading, GeoPoint};
use crate::domain::ports::EnvironmentalDataProvider;
use crate::utils::error::Result;
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;
use std::time::Duration;

/// 模擬範圍：葉綠素 0-20 mg/m³，海溫 10-30 °C
pub const CHLOROPHYLL_RANGE: (f64, f64) = (0.0, 20.0);
pub const SST_RANGE: (f64, f64) = (10.0, 30.0);

/// Generates readings locally. Never fails.
pub struct SimulatedProvider {
    rng: Mutex<StdRng>,
    delay: Duration,
}

impl SimulatedProvider {
    pub fn new(delay: Duration) -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
            delay,
        }
    }

    pub fn seeded(seed: u64, delay: Duration) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            delay,
        }
    }

    fn sample(&self) -> EnvironmentalReading {
        // 鎖只在取樣期間持有，不跨越 await
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        EnvironmentalReading {
            chlorophyll: rng.gen_range(CHLOROPHYLL_RANGE.0..CHLOROPHYLL_RANGE.1),
            sea_surface_temperature: rng.gen_range(SST_RANGE.0..SST_RANGE.1),
        }
    }
}

#[async_trait]
impl EnvironmentalDataProvider for SimulatedProvider {
    async fn reading(&self, point: GeoPoint) -> Result<EnvironmentalReading> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let reading = self.sample();
        tracing::debug!(
            "Simulated reading for {}: chlorophyll={:.2}, sst={:.2}",
            point,
            reading.chlorophyll,
            reading.sea_surface_temperature
        );
        Ok(reading)
    }

    fn name(&self) -> &str {
        "simulated"
    }
}
