// HTTP payload source implementation
use crate::application::payload_source::{FetchError, PayloadSource};
use crate::domain::telemetry::TelemetryPayload;
use async_trait::async_trait;
use std::time::Instant;

#[derive(Debug, Clone)]
pub struct HttpPayloadSource {
    client: reqwest::Client,
    data_url: String,
}

impl HttpPayloadSource {
    pub fn new(endpoint: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            data_url: format!("{}/data", endpoint.trim_end_matches('/')),
        }
    }

    pub fn data_url(&self) -> &str {
        &self.data_url
    }
}

#[async_trait]
impl PayloadSource for HttpPayloadSource {
    async fn fetch(&self) -> Result<TelemetryPayload, FetchError> {
        let start = Instant::now();

        let response = self
            .client
            .get(&self.data_url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: self.data_url.clone(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                url: self.data_url.clone(),
                status: response.status().as_u16(),
            });
        }

        let payload = response
            .json::<TelemetryPayload>()
            .await
            .map_err(|source| FetchError::Decode {
                url: self.data_url.clone(),
                source,
            })?;

        tracing::info!(
            url = %self.data_url,
            request_ms = start.elapsed().as_millis() as u64,
            families = payload.family_names().count(),
            "fetched telemetry payload"
        );

        Ok(payload)
    }
}
