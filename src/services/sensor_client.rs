use std::time::Duration;
use reqwest::Client;

use crate::config::sensor::SensorSettings;
use crate::models::error::MonitorError;
use crate::models::sensor::{SensorData, SensorSample};
use crate::services::{BoxFuture, SensorSource};

/// Polls the sensor relay's `GET /data` endpoint.
pub struct SensorClient {
    base_url: String,
    client: Client,
}

impl SensorClient {
    pub fn new(settings: &SensorSettings) -> Result<Self, MonitorError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(settings.request_timeout_ms))
            .build()?;
        Ok(Self {
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    #[tracing::instrument(name = "Fetch sensor reading", skip(self))]
    pub async fn latest_reading(&self) -> Result<SensorSample, MonitorError> {
        let url = format!("{}/data", self.base_url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            tracing::warn!("❌ Sensor endpoint returned {}: {}", status, body);
            return Err(MonitorError::UnexpectedStatus { status: status.as_u16(), body });
        }

        let data = response.json::<SensorData>().await?;
        tracing::debug!("📡 Sensor reading: bpm={}, spo2={}", data.bpm, data.spo2);

        Ok(SensorSample::from(data))
    }
}

impl SensorSource for SensorClient {
    fn fetch_sample(&self) -> BoxFuture<'_, Result<SensorSample, MonitorError>> {
        Box::pin(self.latest_reading())
    }
}
