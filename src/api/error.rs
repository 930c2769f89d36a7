use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::{debug, error};

use crate::provider::ProviderError;
use crate::tutor::ValidationError;

use super::models::ErrorResponse;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Rejected before any upstream call.
    #[error("{0}")]
    InvalidInput(String),
    #[error("Error generating tutor response: {0}")]
    Upstream(#[from] ProviderError),
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::InvalidInput(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidInput(rejection.body_text())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = self.to_string();

        match &self {
            Self::InvalidInput(_) => debug!(%detail, "Rejected tutor request"),
            Self::Upstream(source) => error!(error = %source, "Tutor generation failed"),
        }

        (status, Json(ErrorResponse { detail })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_client_faults() {
        let err = ApiError::from(ValidationError::StressLevel);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.to_string(),
            "'stress_level' must be an integer between 1 and 10"
        );
    }

    #[test]
    fn provider_errors_are_server_faults_with_detail() {
        let err = ApiError::from(ProviderError::Blocked("SAFETY".to_string()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            err.to_string(),
            "Error generating tutor response: prompt was blocked by Gemini: SAFETY"
        );
    }
}
