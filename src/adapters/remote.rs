use crate::domain::model::{EnvironmentalReading, GeoPoint, Observation, Probability};
use crate::domain::ports::EnvironmentalDataProvider;
use crate::utils::error::{PredictError, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

#[derive(Debug, Serialize)]
struct PredictRequest {
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    shark_presence_probability: f64,
    chlorophyll: f64,
    sst: f64,
    distance_from_coast_km: f64,
}

/// FastAPI 錯誤回應格式
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: String,
}

#[derive(Debug, Deserialize)]
struct ServiceInfo {
    message: String,
}

/// Everything the remote service reports for one point.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteAssessment {
    pub probability: Probability,
    pub reading: EnvironmentalReading,
    pub distance_from_coast_km: f64,
}

impl TryFrom<PredictResponse> for RemoteAssessment {
    type Error = PredictError;

    fn try_from(body: PredictResponse) -> Result<Self> {
        let probability = Probability::new(body.shark_presence_probability).ok_or_else(|| {
            PredictError::acquisition(format!(
                "service probability {} is outside [0, 1]",
                body.shark_presence_probability
            ))
        })?;

        if !body.chlorophyll.is_finite() || body.chlorophyll < 0.0 {
            return Err(PredictError::acquisition(format!(
                "service chlorophyll {} is not a valid concentration",
                body.chlorophyll
            )));
        }
        if !body.sst.is_finite() {
            return Err(PredictError::acquisition("service returned a non-finite sst"));
        }

        Ok(Self {
            probability,
            reading: EnvironmentalReading::new(body.chlorophyll, body.sst),
            distance_from_coast_km: body.distance_from_coast_km,
        })
    }
}

/// Queries a prediction service over HTTP: `POST {endpoint}` with `{latitude, longitude}`.
pub struct RemoteProvider {
    client: Client,
    endpoint: String,
    timeout: Option<Duration>,
    headers: HashMap<String, String>,
}

impl RemoteProvider {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            timeout: None,
            headers: HashMap::new(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = headers;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// 每個請求都帶上設定的標頭與逾時
    fn configure(&self, mut request: RequestBuilder) -> RequestBuilder {
        for (key, value) in &self.headers {
            request = request.header(key, value);
        }

        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }
        request
    }

    pub async fn assess(&self, point: GeoPoint) -> Result<RemoteAssessment> {
        let request = self.configure(self.client.post(&self.endpoint).json(&PredictRequest {
            latitude: point.latitude(),
            longitude: point.longitude(),
        }));

        tracing::debug!("Making prediction request to: {}", self.endpoint);
        let response = request.send().await.map_err(|e| {
            PredictError::acquisition(format!("request to {} failed: {}", self.endpoint, e))
        })?;

        let status = response.status();
        tracing::debug!("Prediction service response status: {}", status);

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ErrorBody>(&text)
                .map(|body| body.detail)
                .unwrap_or(text);
            return Err(PredictError::acquisition(if detail.is_empty() {
                format!("service returned {}", status)
            } else {
                format!("service returned {}: {}", status, detail)
            }));
        }

        let body: PredictResponse = response.json().await.map_err(|e| {
            PredictError::acquisition(format!("could not decode service response: {}", e))
        })?;

        let assessment = RemoteAssessment::try_from(body)?;
        tracing::info!(
            "📡 Service reading for {}: chlorophyll={:.4}, sst={:.2}, service probability={:.4}",
            point,
            assessment.reading.chlorophyll,
            assessment.reading.sea_surface_temperature,
            assessment.probability.value()
        );
        Ok(assessment)
    }

    /// `GET /` on the service root, returning its welcome message.
    pub async fn health_check(&self) -> Result<String> {
        let root = Url::parse(&self.endpoint)
            .and_then(|url| url.join("/"))
            .map_err(|e| PredictError::InvalidConfigValueError {
                field: "provider.endpoint".to_string(),
                value: self.endpoint.clone(),
                reason: format!("Invalid URL format: {}", e),
            })?;

        let info: ServiceInfo = self
            .configure(self.client.get(root))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(info.message)
    }
}

#[async_trait]
impl EnvironmentalDataProvider for RemoteProvider {
    async fn reading(&self, point: GeoPoint) -> Result<EnvironmentalReading> {
        self.assess(point).await.map(|assessment| assessment.reading)
    }

    async fn observe(&self, point: GeoPoint) -> Result<Observation> {
        self.assess(point).await.map(|assessment| Observation {
            reading: assessment.reading,
            service_probability: Some(assessment.probability),
        })
    }

    fn name(&self) -> &str {
        "remote"
    }
}
