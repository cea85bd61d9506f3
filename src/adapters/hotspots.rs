use crate::domain::model::FeatureCollection;
use crate::utils::error::Result;
use reqwest::Client;
use std::time::Duration;

/// Read-only client for the precomputed hotspot overlay.
pub struct HotspotClient {
    client: Client,
    endpoint: String,
    timeout: Option<Duration>,
}

impl HotspotClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub async fn fetch(&self) -> Result<FeatureCollection> {
        let mut request = self.client.get(&self.endpoint);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        tracing::debug!("Fetching hotspot overlay from: {}", self.endpoint);
        let collection: FeatureCollection = request
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        tracing::info!("🗺️ Loaded {} hotspots", collection.len());
        Ok(collection)
    }

    /// 取得失敗時回傳空集合，地圖仍可正常顯示
    pub async fn fetch_or_empty(&self) -> FeatureCollection {
        match self.fetch().await {
            Ok(collection) => collection,
            Err(e) => {
                tracing::warn!("⚠️ Hotspot overlay unavailable, using empty overlay: {}", e);
                FeatureCollection::empty()
            }
        }
    }
}
