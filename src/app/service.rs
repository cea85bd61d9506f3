use crate::adapters::{HotspotClient, RemoteProvider, SimulatedProvider};
use crate::config::{ProviderKind, Settings};
use crate::core::jitter::RandomJitter;
use crate::core::predictor::PredictionEngine;
use crate::domain::model::{FeatureCollection, GeoPoint, PredictionResult};
use crate::domain::ports::{EnvironmentalDataProvider, JitterSource};
use crate::utils::error::{PredictError, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;

/// Calling layer around [`PredictionEngine`]: owns the acquisition timeout and
/// turns a timed-out reading into a failed result.
#[derive(Clone)]
pub struct PredictionService {
    engine: PredictionEngine,
    timeout: Duration,
}

impl PredictionService {
    pub fn new(engine: PredictionEngine, timeout: Duration) -> Self {
        Self { engine, timeout }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let registry = Arc::new(settings.registry()?);

        let provider: Arc<dyn EnvironmentalDataProvider> = match settings.provider {
            ProviderKind::Simulated => Arc::new(match settings.seed {
                Some(seed) => SimulatedProvider::seeded(seed, settings.simulated_delay),
                None => SimulatedProvider::new(settings.simulated_delay),
            }),
            ProviderKind::Remote => Arc::new(remote_provider(settings)?),
        };

        // jitter 與模擬讀數使用不同的種子，避免兩者序列相關
        let jitter: Arc<dyn JitterSource> = match settings.seed {
            Some(seed) => Arc::new(RandomJitter::seeded(seed.wrapping_add(1))),
            None => Arc::new(RandomJitter::new()),
        };

        tracing::info!(
            "🦈 Prediction engine ready: provider={}, zones={}, timeout={:?}",
            provider.name(),
            registry.len(),
            settings.timeout
        );

        Ok(Self::new(
            PredictionEngine::new(registry, provider, jitter),
            settings.timeout,
        ))
    }

    pub fn engine(&self) -> &PredictionEngine {
        &self.engine
    }

    pub async fn predict(&self, point: GeoPoint) -> PredictionResult {
        match tokio::time::timeout(self.timeout, self.engine.acquire(point)).await {
            Ok(Ok(observation)) => self.engine.score(point, observation),
            Ok(Err(e)) => self.engine.fail(point, &e),
            Err(_) => {
                let error = PredictError::acquisition(format!(
                    "no reading within {} seconds",
                    self.timeout.as_secs_f64()
                ));
                self.engine.fail(point, &error)
            }
        }
    }

    /// 座標不合法時直接回傳錯誤，不進入計分流程
    pub async fn predict_coordinates(&self, latitude: f64, longitude: f64) -> Result<PredictionResult> {
        let point = GeoPoint::new(latitude, longitude)?;
        Ok(self.predict(point).await)
    }

    /// Runs predictions concurrently; results keep the order of `points`.
    pub async fn predict_batch(&self, points: &[GeoPoint]) -> Vec<PredictionResult> {
        let mut tasks = JoinSet::new();
        for (index, &point) in points.iter().enumerate() {
            let service = self.clone();
            tasks.spawn(async move { (index, service.predict(point).await) });
        }

        let mut results: Vec<Option<PredictionResult>> = vec![None; points.len()];
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, result)) => results[index] = Some(result),
                Err(e) => tracing::error!("Prediction task failed to complete: {}", e),
            }
        }

        results
            .into_iter()
            .zip(points)
            .map(|(result, &point)| {
                result.unwrap_or_else(|| {
                    self.engine
                        .fail(point, &PredictError::acquisition("prediction task was cancelled"))
                })
            })
            .collect()
    }
}

/// Remote provider with the configured endpoint, headers and timeout.
pub fn remote_provider(settings: &Settings) -> Result<RemoteProvider> {
    let endpoint = settings
        .endpoint
        .clone()
        .ok_or_else(|| PredictError::MissingConfigError {
            field: "endpoint".to_string(),
        })?;
    Ok(RemoteProvider::new(endpoint)
        .with_headers(settings.headers.clone())
        .with_timeout(settings.timeout))
}

/// 熱點圖層；未設定端點時回傳空集合
pub async fn load_hotspots(settings: &Settings) -> FeatureCollection {
    match &settings.hotspots_endpoint {
        Some(endpoint) => {
            HotspotClient::new(endpoint.clone())
                .with_timeout(settings.timeout)
                .fetch_or_empty()
                .await
        }
        None => {
            tracing::warn!("⚠️ No hotspot endpoint configured, using empty overlay");
            FeatureCollection::empty()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::jitter::FixedJitter;
    use crate::core::registry::ZoneRegistry;
    use crate::domain::model::EnvironmentalReading;
    use async_trait::async_trait;

    struct SlowProvider;

    #[async_trait]
    impl EnvironmentalDataProvider for SlowProvider {
        async fn reading(&self, _point: GeoPoint) -> Result<EnvironmentalReading> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(EnvironmentalReading::new(8.0, 22.0))
        }

        fn name(&self) -> &str {
            "slow"
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_becomes_failed_result() {
        let engine = PredictionEngine::new(
            Arc::new(ZoneRegistry::default_zones()),
            Arc::new(SlowProvider),
            Arc::new(FixedJitter::zero()),
        );
        let service = PredictionService::new(engine, Duration::from_secs(5));

        let result = service
            .predict(GeoPoint::new(25.0343, -77.3963).unwrap())
            .await;

        assert!(!result.is_success());
        assert!(result.message.contains("no reading within 5 seconds"));
    }

    #[tokio::test]
    async fn test_invalid_coordinates_are_rejected() {
        let service = PredictionService::from_settings(&Settings::default()).unwrap();
        let err = service.predict_coordinates(120.0, 0.0).await.unwrap_err();
        assert!(matches!(err, PredictError::InvalidCoordinate { .. }));
    }

    #[tokio::test]
    async fn test_batch_keeps_input_order() {
        let settings = Settings {
            seed: Some(5),
            ..Settings::default()
        };
        let service = PredictionService::from_settings(&settings).unwrap();
        let points = vec![
            GeoPoint::new(-18.2871, 147.6992).unwrap(),
            GeoPoint::new(38.7121, -27.2269).unwrap(),
            GeoPoint::new(-34.3568, 18.4740).unwrap(),
        ];

        let results = service.predict_batch(&points).await;
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].nearest_zone_name, "Great Barrier Reef, Australia");
        assert_eq!(results[1].nearest_zone_name, "Azores, North Atlantic Ocean");
        assert_eq!(
            results[2].nearest_zone_name,
            "Cape Town / False Bay, South Africa"
        );
        assert!(results.iter().all(PredictionResult::is_success));
    }

    #[tokio::test]
    async fn test_remote_without_endpoint_fails_to_build() {
        let settings = Settings {
            provider: ProviderKind::Remote,
            ..Settings::default()
        };
        assert!(PredictionService::from_settings(&settings).is_err());
    }

    #[test]
    fn test_remote_provider_uses_configured_timeout() {
        let settings = Settings {
            provider: ProviderKind::Remote,
            endpoint: Some("http://localhost:8000/predict".to_string()),
            timeout: Duration::from_secs(12),
            ..Settings::default()
        };
        let provider = remote_provider(&settings).unwrap();
        assert_eq!(provider.endpoint(), "http://localhost:8000/predict");
        assert_eq!(provider.timeout(), Some(Duration::from_secs(12)));
    }

    #[tokio::test]
    async fn test_hotspots_without_endpoint_are_empty() {
        let overlay = load_hotspots(&Settings::default()).await;
        assert!(overlay.is_empty());
    }
}
