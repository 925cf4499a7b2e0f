use axum::{
    extract::{Extension, Multipart},
    Json,
};
use serde::Serialize;

use crate::domains::companies::cleaning::parse_csv;
use crate::domains::companies::{ingest_rows, IngestSummary};
use crate::server::app::AppState;
use crate::server::error::ApiError;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// Input rows processed
    pub inserted: usize,
    pub summary: IngestSummary,
}

/// `POST /api/upload`
///
/// Multipart form with a CSV `file` and an optional `use_ai` flag ("1"
/// enables enrichment when the service is configured).
pub async fn upload_handler(
    Extension(state): Extension<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut file: Option<Vec<u8>> = None;
    let mut use_ai = false;

    while let Some(field) = multipart.next_field().await? {
        match field.name() {
            Some("file") => file = Some(field.bytes().await?.to_vec()),
            Some("use_ai") => use_ai = field.text().await?.trim() == "1",
            _ => {}
        }
    }

    let file = file.ok_or_else(|| ApiError::bad_request("file is required"))?;
    let content =
        String::from_utf8(file).map_err(|_| ApiError::bad_request("file must be UTF-8 text"))?;

    let rows = parse_csv(&content)?;
    let summary = ingest_rows(&state.deps, rows, use_ai).await?;

    Ok(Json(UploadResponse {
        inserted: summary.rows,
        summary,
    }))
}
