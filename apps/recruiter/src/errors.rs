use std::time::Duration;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::session::HandoffKey;
use crate::wizard::Step;

/// Error type shared by the backend client, the hand-off store and the wizard steps.
/// Implements `IntoResponse` so the backend server handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    /// Client-detected bad input. Never reaches the backend from a wizard step.
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Backend call timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    /// A required hand-off key is absent. Not shown to the candidate; the caller
    /// navigates to `redirect` instead.
    #[error("Missing hand-off state '{key}', redirecting to {redirect}")]
    MissingState { key: HandoffKey, redirect: Step },

    #[error("Unexpected backend response: {0}")]
    Protocol(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Network and timeout failures leave the action re-enabled for a manual retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::Network(_) | AppError::Timeout(_))
    }

    /// Where the candidate should be sent when this error means "state is missing".
    pub fn redirect(&self) -> Option<Step> {
        match self {
            AppError::MissingState { redirect, .. } => Some(*redirect),
            _ => None,
        }
    }

    /// Stable machine-readable code, shared by the server and the HTTP client.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Network(_) => "NETWORK_ERROR",
            AppError::Timeout(_) => "TIMEOUT",
            AppError::MissingState { .. } => "MISSING_STATE",
            AppError::Protocol(_) => "PROTOCOL_ERROR",
            AppError::Serialization(_) => "SERIALIZATION_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        AppError::Network(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Timeout(_) => (StatusCode::GATEWAY_TIMEOUT, self.to_string()),
            AppError::MissingState { .. } => (StatusCode::CONFLICT, self.to_string()),
            AppError::Network(msg) | AppError::Protocol(msg) => {
                tracing::error!("Upstream error: {msg}");
                (StatusCode::BAD_GATEWAY, msg.clone())
            }
            AppError::Serialization(e) => {
                tracing::error!("Serialization error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A serialization error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": self.code(),
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_and_timeout_are_retryable() {
        assert!(AppError::Network("reset".to_string()).is_retryable());
        assert!(AppError::Timeout(Duration::from_secs(1)).is_retryable());
        assert!(!AppError::Validation("bad".to_string()).is_retryable());
        assert!(!AppError::NotFound("job 9".to_string()).is_retryable());
    }

    #[test]
    fn test_missing_state_carries_redirect() {
        let err = AppError::MissingState {
            key: HandoffKey::ApplicationData,
            redirect: Step::CvUpload,
        };
        assert_eq!(err.redirect(), Some(Step::CvUpload));
        assert!(err.to_string().contains("applicationData"));
        assert_eq!(AppError::Network("x".to_string()).redirect(), None);
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let response = AppError::NotFound("Job 42 not found".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_validation_maps_to_400() {
        let response = AppError::Validation("email".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
