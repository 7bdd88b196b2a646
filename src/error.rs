// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type shared by the gateway, the controller and the API.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// No usable API credential was configured.
    #[error("{0}")]
    Configuration(String),

    /// The completion service rejected the call, timed out or returned an
    /// unusable status.
    #[error("Gemini API error: {0}")]
    Upstream(String),

    /// The completion service answered, but not in the declared shape.
    #[error("Unexpected response from Gemini: {0}")]
    Decode(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Message used when no credential is configured at call time.
    pub const API_KEY_MISSING: &'static str =
        "API_KEY environment variable not set. Please ensure your Gemini API key is configured.";

    /// Upstream message that an invalid credential is normalized to.
    pub const ENTITY_NOT_FOUND: &'static str = "Requested entity was not found.";

    /// Single user-facing message for every credential problem.
    pub const CHECK_API_KEY: &'static str =
        "Your Gemini API Key is missing or invalid. Please ensure it's configured correctly.";

    /// Whether this error is a missing or rejected credential.
    ///
    /// "API key not valid" and "Requested entity was not found" are treated
    /// as the same condition; UI text depends on it.
    pub fn is_credential_error(&self) -> bool {
        match self {
            AppError::Configuration(_) => true,
            AppError::Upstream(msg) => {
                msg.contains("API key not valid")
                    || msg.contains("API_KEY")
                    || msg.contains(Self::ENTITY_NOT_FOUND)
            }
            _ => false,
        }
    }

    /// Human-readable message stored in view state in place of a result.
    pub fn user_message(&self) -> String {
        if self.is_credential_error() {
            return Self::CHECK_API_KEY.to_string();
        }
        match self {
            AppError::Internal(_) => "An unknown error occurred.".to_string(),
            other => other.to_string(),
        }
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::Configuration(_) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "configuration_error",
                Some(self.user_message()),
            ),
            AppError::Upstream(_) => (
                StatusCode::BAD_GATEWAY,
                "upstream_error",
                Some(self.user_message()),
            ),
            AppError::Decode(msg) => {
                tracing::warn!(error = %msg, "Undecodable completion response");
                (StatusCode::BAD_GATEWAY, "decode_error", Some(msg.clone()))
            }
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone()))
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", Some(msg.clone())),
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::BadRequest(errors.to_string())
    }
}

/// Result type alias for gateway operations and handlers
pub type Result<T> = std::result::Result<T, AppError>;
