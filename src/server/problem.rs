// src/server/problem.rs
//! RFC 7807 problem documents for API errors

use crate::store::StoreError;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};

/// Error response format (RFC 7807)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemDetails {
    /// Error type URI
    #[serde(rename = "type")]
    pub error_type: String,
    /// Human-readable title
    pub title: String,
    /// HTTP status code
    pub status: u16,
    /// Detailed description
    pub detail: String,
    /// The request path that caused the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
}

impl ProblemDetails {
    pub fn new(error_type: &str, title: &str, status: u16, detail: &str) -> Self {
        Self {
            error_type: format!("urn:recipe-box:error:{}", error_type),
            title: title.to_string(),
            status,
            detail: detail.to_string(),
            instance: None,
        }
    }

    pub fn validation(detail: &str) -> Self {
        Self::new("validation", "Validation Failed", 400, detail)
    }

    pub fn bad_request(detail: &str) -> Self {
        Self::new("bad_request", "Bad Request", 400, detail)
    }

    pub fn not_found(detail: &str) -> Self {
        Self::new("not_found", "Not Found", 404, detail)
    }

    pub fn internal(detail: &str) -> Self {
        Self::new("internal", "Internal Error", 500, detail)
    }

    pub fn with_instance(mut self, instance: impl Into<String>) -> Self {
        self.instance = Some(instance.into());
        self
    }
}

/// Handler error, rendered as `application/problem+json`
#[derive(Debug)]
pub struct ApiError(pub ProblemDetails);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.0.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn with_instance(self, instance: impl Into<String>) -> Self {
        Self(self.0.with_instance(instance))
    }
}

impl From<ProblemDetails> for ApiError {
    fn from(problem: ProblemDetails) -> Self {
        ApiError(problem)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        let detail = err.to_string();
        let problem = match err {
            StoreError::Validation { .. } | StoreError::IdMismatch { .. } => {
                ProblemDetails::validation(&detail)
            }
            StoreError::NotFound(_) => ProblemDetails::not_found(&detail),
            StoreError::IdsExhausted(_) => ProblemDetails::internal(&detail),
        };
        ApiError(problem)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError(ProblemDetails::bad_request(&rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        (
            status,
            [("content-type", "application/problem+json")],
            Json(self.0),
        )
            .into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
