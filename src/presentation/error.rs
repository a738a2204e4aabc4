// Mapping of service failures to HTTP responses
use crate::application::chart_builder::ChartError;
use crate::application::chart_service::ServiceError;
use crate::application::payload_source::FetchError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

#[derive(Debug)]
pub struct ApiError(ServiceError);

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        Self(err)
    }
}

impl From<FetchError> for ApiError {
    fn from(err: FetchError) -> Self {
        Self(ServiceError::Fetch(err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            ServiceError::Fetch(_) => StatusCode::BAD_GATEWAY,
            ServiceError::Chart(ChartError::MissingMetricFamily(_)) => StatusCode::NOT_FOUND,
        };

        if status.is_server_error() {
            tracing::error!(error = %self.0, "chart request failed");
        } else {
            tracing::warn!(error = %self.0, "chart request rejected");
        }

        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}
