use axum::{
    extract::{Extension, Query},
    Json,
};
use serde::Serialize;

use crate::domains::companies::models::{CompanyListQuery, CompanyPage};
use crate::server::app::AppState;
use crate::server::error::ApiError;

/// `GET /api/companies`: filtered page, newest first
pub async fn list_companies_handler(
    Extension(state): Extension<AppState>,
    Query(query): Query<CompanyListQuery>,
) -> Result<Json<CompanyPage>, ApiError> {
    let page = state.deps.store.list(&query).await?;
    Ok(Json(page))
}

#[derive(Debug, Serialize)]
pub struct ClearResponse {
    pub ok: bool,
    pub deleted: u64,
}

/// `DELETE /api/companies`: bulk clear
pub async fn clear_companies_handler(
    Extension(state): Extension<AppState>,
) -> Result<Json<ClearResponse>, ApiError> {
    let deleted = state.deps.store.delete_all().await?;
    tracing::info!(deleted, "Cleared all companies");
    Ok(Json(ClearResponse { ok: true, deleted }))
}
