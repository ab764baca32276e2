use std::time::Duration;
use reqwest::{Client, RequestBuilder, Response};
use secrecy::{ExposeSecret, SecretString};

use crate::config::backend::BackendSettings;
use crate::models::error::MonitorError;
use crate::models::measurement::{sort_newest_first, MeasurementRecord, MeasurementRequest};
use crate::services::{BoxFuture, MeasurementSink};

/// Client for the measurement API: submission and per-user history.
pub struct MeasurementClient {
    base_url: String,
    api_token: Option<SecretString>,
    client: Client,
}

impl MeasurementClient {
    pub fn new(settings: &BackendSettings) -> Result<Self, MonitorError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(settings.request_timeout_ms))
            .build()?;
        Ok(Self {
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_token: settings.api_token.clone(),
            client,
        })
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_token {
            Some(token) => request.bearer_auth(token.expose_secret()),
            None => request,
        }
    }

    async fn ensure_success(response: Response) -> Result<Response, MonitorError> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let body = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
        tracing::error!("❌ Measurement API returned error {}: {}", status, body);
        Err(MonitorError::UnexpectedStatus { status: status.as_u16(), body })
    }

    #[tracing::instrument(
        name = "Submit measurement",
        skip(self, measurement),
        fields(user_email = %measurement.user_email)
    )]
    pub async fn submit_measurement(&self, measurement: &MeasurementRequest) -> Result<(), MonitorError> {
        let url = format!("{}/measurements/", self.base_url);

        let response = self
            .authorized(self.client.post(&url))
            .json(measurement)
            .send()
            .await?;
        Self::ensure_success(response).await?;

        tracing::info!("✅ Average measurements saved for {}", measurement.user_email);
        Ok(())
    }

    /// All stored measurements for the user, newest first.
    #[tracing::instrument(name = "Fetch measurement history", skip(self))]
    pub async fn fetch_history(&self, email: &str) -> Result<Vec<MeasurementRecord>, MonitorError> {
        let url = format!("{}/measurements/all-by-user", self.base_url);

        let response = self
            .authorized(self.client.get(&url))
            .query(&[("email", email)])
            .send()
            .await?;
        let mut records = Self::ensure_success(response)
            .await?
            .json::<Vec<MeasurementRecord>>()
            .await?;

        sort_newest_first(&mut records);
        tracing::info!("📊 Loaded {} measurements", records.len());
        Ok(records)
    }

    pub async fn latest_measurement(&self, email: &str) -> Result<Option<MeasurementRecord>, MonitorError> {
        Ok(self.fetch_history(email).await?.into_iter().next())
    }
}

impl MeasurementSink for MeasurementClient {
    fn submit(&self, measurement: MeasurementRequest) -> BoxFuture<'_, Result<(), MonitorError>> {
        Box::pin(async move { self.submit_measurement(&measurement).await })
    }
}
