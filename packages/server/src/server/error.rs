use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::domains::companies::IngestError;

/// Handler error, rendered as `{"error": "<message>"}`.
#[derive(Debug)]
pub enum ApiError {
    Ingest(IngestError),
    Multipart(MultipartError),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::Ingest(IngestError::validation(message))
    }
}

impl From<IngestError> for ApiError {
    fn from(err: IngestError) -> Self {
        Self::Ingest(err)
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::Ingest(IngestError::Store(err))
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        Self::Multipart(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Ingest(IngestError::Validation(message)) => (StatusCode::BAD_REQUEST, message),
            Self::Ingest(err @ IngestError::Store(_)) => {
                tracing::error!(error = %err, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
            Self::Multipart(err) => (err.status(), err.body_text()),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
