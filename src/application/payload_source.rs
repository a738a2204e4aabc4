// Payload source trait for telemetry data access
use crate::domain::telemetry::TelemetryPayload;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to reach telemetry endpoint {url}: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("telemetry endpoint {url} returned status {status}")]
    Status { url: String, status: u16 },
    #[error("failed to decode telemetry payload from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

#[async_trait]
pub trait PayloadSource: Send + Sync {
    /// Fetch the whole payload once. No retry.
    async fn fetch(&self) -> Result<TelemetryPayload, FetchError>;
}
