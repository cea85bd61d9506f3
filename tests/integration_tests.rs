use httpmock::prelude::*;
use shark_habitat::config::toml_config::TomlConfig;
use shark_habitat::config::ProviderKind;
use shark_habitat::utils::validation::Validate;
use shark_habitat::adapters::RemoteProvider;
use shark_habitat::app::{remote_provider, to_pretty_json};
use shark_habitat::{
    FixedJitter, GeoPoint, PredictError, PredictionEngine, PredictionService, PredictionView,
    Settings, ZoneRegistry,
};
use std::collections::HashMap;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tempfile::NamedTempFile;

#[tokio::test]
async fn test_end_to_end_remote_prediction() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/predict");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "sst": 22.0,
                "chlorophyll": 8.0,
                "distance_from_coast_km": 0.5,
                "shark_presence_probability": 0.91
            }));
    });

    let mut config_file = NamedTempFile::new().unwrap();
    write!(
        config_file,
        r#"
[provider]
kind = "remote"
endpoint = "{}"
timeout_seconds = 5

[simulation]
seed = 3
"#,
        server.url("/predict")
    )
    .unwrap();

    let config = TomlConfig::from_file(config_file.path()).unwrap();
    assert!(config.validate().is_ok());

    let settings = Settings::from_toml(&config);
    assert_eq!(settings.provider, ProviderKind::Remote);

    let service = PredictionService::from_settings(&settings).unwrap();
    let result = service.predict_coordinates(25.0343, -77.3963).await.unwrap();

    api_mock.assert();
    assert_eq!(result.percent(), Some(99));
    assert_eq!(result.chlorophyll, Some(8.0));
    assert_eq!(result.sea_surface_temperature, Some(22.0));
    assert!(result.message.contains("Bahamas (Shark Alley & Bimini)"));
}

#[tokio::test]
async fn test_service_estimate_shown_as_percent_in_json_view() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/predict");
        then.status(200).json_body(serde_json::json!({
            "sst": 17.25,
            "chlorophyll": 6.1234,
            "distance_from_coast_km": 3.41,
            "shark_presence_probability": 0.8731
        }));
    });

    let settings = Settings {
        provider: ProviderKind::Remote,
        endpoint: Some(server.url("/predict")),
        seed: Some(11),
        ..Settings::default()
    };
    let service = PredictionService::from_settings(&settings).unwrap();
    let result = service.predict_coordinates(-34.3568, 18.474).await.unwrap();

    assert!(result.is_success());
    assert_eq!(result.service_probability.unwrap().value(), 0.8731);

    let rendered = to_pretty_json(&PredictionView::from(&result)).unwrap();
    let json: serde_json::Value = serde_json::from_str(&rendered).unwrap();
    assert_eq!(json["service_probability"], 87);
    // 本地計分與服務估計各自獨立
    assert_eq!(json["probability"], u64::from(result.percent().unwrap()));
    assert_eq!(json["data"]["sst"], "17.25");
}

#[tokio::test]
async fn test_health_check_sends_configured_headers() {
    let server = MockServer::start();
    let root_mock = server.mock(|when, then| {
        when.method(GET).path("/").header("x-api-key", "secret");
        then.status(200)
            .json_body(serde_json::json!({"message": "Welcome to the Sharky Prediction API"}));
    });

    let mut headers = HashMap::new();
    headers.insert("X-Api-Key".to_string(), "secret".to_string());
    let settings = Settings {
        provider: ProviderKind::Remote,
        endpoint: Some(server.url("/predict")),
        headers,
        timeout: Duration::from_secs(5),
        ..Settings::default()
    };

    let provider = remote_provider(&settings).unwrap();
    assert_eq!(provider.timeout(), Some(Duration::from_secs(5)));

    let message = provider.health_check().await.unwrap();
    root_mock.assert();
    assert_eq!(message, "Welcome to the Sharky Prediction API");
}

#[tokio::test]
async fn test_end_to_end_service_failure_has_no_probability() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/predict");
        then.status(503).json_body(serde_json::json!({
            "detail": "Could not retrieve Sea Surface Temperature data from NASA services for the selected point."
        }));
    });

    let settings = Settings {
        provider: ProviderKind::Remote,
        endpoint: Some(server.url("/predict")),
        ..Settings::default()
    };
    let service = PredictionService::from_settings(&settings).unwrap();
    let result = service.predict_coordinates(38.7121, -27.2269).await.unwrap();

    api_mock.assert();
    assert!(!result.is_success());
    assert_eq!(result.percent(), None);
    assert!(result.message.contains("Sea Surface Temperature"));
    assert_eq!(result.nearest_zone_name, "Azores, North Atlantic Ocean");
}

#[tokio::test]
async fn test_slow_service_times_out_as_failed_result() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/predict");
        then.status(200)
            .delay(Duration::from_secs(3))
            .json_body(serde_json::json!({
                "sst": 22.0,
                "chlorophyll": 8.0,
                "distance_from_coast_km": 0.5,
                "shark_presence_probability": 0.91
            }));
    });

    let engine = PredictionEngine::new(
        Arc::new(ZoneRegistry::default_zones()),
        Arc::new(RemoteProvider::new(server.url("/predict"))),
        Arc::new(FixedJitter::zero()),
    );
    let service = PredictionService::new(engine, Duration::from_millis(200));

    let result = service
        .predict(GeoPoint::new(25.0343, -77.3963).unwrap())
        .await;
    assert!(!result.is_success());
    assert!(result.chlorophyll.is_none());
}

#[tokio::test]
async fn test_simulated_seeded_service_is_reproducible() {
    let settings = Settings {
        seed: Some(1234),
        ..Settings::default()
    };
    let point = GeoPoint::new(-21.8405, 114.1484).unwrap();

    let first = PredictionService::from_settings(&settings)
        .unwrap()
        .predict(point)
        .await;
    let second = PredictionService::from_settings(&settings)
        .unwrap()
        .predict(point)
        .await;

    assert!(first.is_success());
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_concurrent_predictions_share_registry() {
    let settings = Settings {
        seed: Some(8),
        ..Settings::default()
    };
    let service = PredictionService::from_settings(&settings).unwrap();

    let points: Vec<GeoPoint> = (0..32)
        .map(|i| GeoPoint::new(-60.0 + f64::from(i) * 3.5, -170.0 + f64::from(i) * 10.0).unwrap())
        .collect();
    let results = service.predict_batch(&points).await;

    assert_eq!(results.len(), points.len());
    for (point, result) in points.iter().zip(&results) {
        let nearest = service.engine().registry().nearest_zone(*point);
        assert_eq!(result.nearest_zone_name, nearest.zone.name);
        assert!((5..=99).contains(&result.percent().unwrap()));
    }
}

#[test]
fn test_empty_zone_list_aborts_startup() {
    let config = TomlConfig::from_toml_str("zones = []\n").unwrap();
    let settings = Settings::from_toml(&config);
    assert!(matches!(
        PredictionService::from_settings(&settings),
        Err(PredictError::RegistryEmpty)
    ));
}
