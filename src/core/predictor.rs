use crate::core::registry::ZoneRegistry;
use crate::core::scoring::{conditions_score, proximity_bonus};
use crate::domain::model::{
    EnvironmentalReading, GeoPoint, Observation, PredictionResult, Probability,
};
use crate::domain::ports::{EnvironmentalDataProvider, JitterSource};
use crate::utils::error::{PredictError, Result};
use std::sync::Arc;

pub const MIN_PERCENT: u8 = 5;
pub const MAX_PERCENT: u8 = 99;

const HIGH_BAND: f64 = 75.0;
const MODERATE_BAND: f64 = 40.0;
const OVERRIDE_MAX_CONDITIONS: u32 = 30;
const OVERRIDE_MIN_BONUS: u32 = 25;

/// Intermediate values of a single prediction.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    pub conditions_score: u32,
    pub proximity_bonus: u32,
    pub jitter: f64,
    pub base_probability: f64,
    pub final_percent: u8,
}

impl ScoreBreakdown {
    pub fn compute(reading: &EnvironmentalReading, distance_km: f64, jitter: f64) -> Self {
        let conditions_score = conditions_score(reading);
        let proximity_bonus = proximity_bonus(distance_km);
        let base_probability = f64::from(conditions_score + proximity_bonus) + jitter;
        let final_percent = base_probability
            .round()
            .clamp(f64::from(MIN_PERCENT), f64::from(MAX_PERCENT)) as u8;

        Self {
            conditions_score,
            proximity_bonus,
            jitter,
            base_probability,
            final_percent,
        }
    }

    /// 條件差但鄰近已知熱點時，改用距離訊息
    pub fn proximity_override(&self) -> bool {
        self.conditions_score < OVERRIDE_MAX_CONDITIONS
            && self.proximity_bonus >= OVERRIDE_MIN_BONUS
    }
}

fn select_message(
    breakdown: &ScoreBreakdown,
    zone_name: &str,
    species: &str,
    distance_km: f64,
) -> String {
    if breakdown.proximity_override() {
        return format!(
            "Conditions are not ideal, but this location is very close ({} km) to the {}. Shark activity is still possible.",
            distance_km.round(),
            zone_name
        );
    }

    if breakdown.base_probability > HIGH_BAND {
        format!(
            "High probability. This area shows favorable conditions and is located near the {}, a known habitat for {}.",
            zone_name, species
        )
    } else if breakdown.base_probability > MODERATE_BAND {
        format!(
            "Moderate probability. Conditions may be suitable or the location is reasonably close to the {}.",
            zone_name
        )
    } else {
        format!(
            "Low probability. The sea surface temperature or chlorophyll levels are not ideal, and it's distant from known foraging grounds like the {}.",
            zone_name
        )
    }
}

/// Pure scoring step: nearest zone, partial scores, clamp and message.
pub fn synthesize(
    registry: &ZoneRegistry,
    point: GeoPoint,
    reading: EnvironmentalReading,
    jitter: f64,
) -> PredictionResult {
    let nearest = registry.nearest_zone(point);
    let breakdown = ScoreBreakdown::compute(&reading, nearest.distance_km, jitter);

    tracing::debug!(
        "Scored {}: conditions={}, proximity={}, jitter={:.3}, base={:.2}, final={}%",
        point,
        breakdown.conditions_score,
        breakdown.proximity_bonus,
        breakdown.jitter,
        breakdown.base_probability,
        breakdown.final_percent
    );

    PredictionResult {
        probability: Some(Probability::from_percent(breakdown.final_percent)),
        message: select_message(
            &breakdown,
            &nearest.zone.name,
            &nearest.zone.species,
            nearest.distance_km,
        ),
        nearest_zone_name: nearest.zone.name.clone(),
        distance_km: nearest.distance_km,
        chlorophyll: Some(reading.chlorophyll),
        sea_surface_temperature: Some(reading.sea_surface_temperature),
        service_probability: None,
    }
}

/// Result for a point whose reading could not be obtained. Carries no probability.
pub fn failed(registry: &ZoneRegistry, point: GeoPoint, error: &PredictError) -> PredictionResult {
    let nearest = registry.nearest_zone(point);
    PredictionResult {
        probability: None,
        message: error.user_friendly_message(),
        nearest_zone_name: nearest.zone.name.clone(),
        distance_km: nearest.distance_km,
        chlorophyll: None,
        sea_surface_temperature: None,
        service_probability: None,
    }
}

#[derive(Clone)]
pub struct PredictionEngine {
    registry: Arc<ZoneRegistry>,
    provider: Arc<dyn EnvironmentalDataProvider>,
    jitter: Arc<dyn JitterSource>,
}

impl PredictionEngine {
    pub fn new(
        registry: Arc<ZoneRegistry>,
        provider: Arc<dyn EnvironmentalDataProvider>,
        jitter: Arc<dyn JitterSource>,
    ) -> Self {
        Self {
            registry,
            provider,
            jitter,
        }
    }

    pub fn registry(&self) -> &ZoneRegistry {
        &self.registry
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub async fn predict(&self, point: GeoPoint) -> PredictionResult {
        match self.acquire(point).await {
            Ok(observation) => self.score(point, observation),
            Err(e) => self.fail(point, &e),
        }
    }

    /// 唯一的非同步步驟
    pub async fn acquire(&self, point: GeoPoint) -> Result<Observation> {
        tracing::debug!("Requesting reading for {} from {}", point, self.provider.name());
        self.provider.observe(point).await
    }

    pub fn score(&self, point: GeoPoint, observation: Observation) -> PredictionResult {
        let mut result = synthesize(
            &self.registry,
            point,
            observation.reading,
            self.jitter.sample(),
        );
        result.service_probability = observation.service_probability;
        tracing::info!(
            "✅ Prediction for {}: {}% near {} ({:.0} km)",
            point,
            result.percent().unwrap_or_default(),
            result.nearest_zone_name,
            result.distance_km
        );
        result
    }

    pub fn fail(&self, point: GeoPoint, error: &PredictError) -> PredictionResult {
        tracing::warn!("❌ Prediction for {} failed: {}", point, error);
        failed(&self.registry, point, error)
    }
}
