use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::{debug, error};
use serde_json::json;
use thiserror::Error;

use crate::crypto::CipherError;

// Submission failures the client can see. Internal detail on the processing
// variant is logged, not echoed.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("Invalid method")]
    MethodNotAllowed,

    #[error("Failed to process request")]
    Processing(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Processing(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        match &self {
            ApiError::Processing(detail) => error!("Request processing failed: {}", detail),
            other => debug!("Request rejected: {}", other),
        }

        let body = Json(json!({
            "status": "error",
            "message": self.to_string(),
        }));

        (status, body).into_response()
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        Self::Processing(e.to_string())
    }
}

impl From<CipherError> for ApiError {
    fn from(e: CipherError) -> Self {
        Self::Processing(e.to_string())
    }
}

impl From<Box<dyn std::error::Error + Send + Sync>> for ApiError {
    fn from(e: Box<dyn std::error::Error + Send + Sync>) -> Self {
        Self::Processing(e.to_string())
    }
}
