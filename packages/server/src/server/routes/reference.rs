use axum::Json;
use serde::Serialize;

use crate::domains::companies::normalize::{country_names, EMPLOYEE_BUCKETS};

#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub data: Vec<T>,
}

/// `GET /api/countries`: canonical names, sorted
pub async fn countries_handler() -> Json<ListResponse<&'static str>> {
    Json(ListResponse {
        data: country_names(),
    })
}

/// `GET /api/employee-sizes`: buckets in ordinal order
pub async fn employee_sizes_handler() -> Json<ListResponse<&'static str>> {
    Json(ListResponse {
        data: EMPLOYEE_BUCKETS.to_vec(),
    })
}
