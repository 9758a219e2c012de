//! Delete handler.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};

use crate::response::ApiResponse;
use crate::routes::airquality::common::store_error_response;
use crate::state::AppState;
use db::models::measurement::Model as MeasurementModel;

/// DELETE /api/airquality/{id}
///
/// Hard delete. Returns the removed record; 404 for an unknown id.
pub async fn delete_measurement(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    match MeasurementModel::delete(app_state.db(), id).await {
        Ok(record) => (StatusCode::OK, Json(ApiResponse::success(record))).into_response(),
        Err(err) => store_error_response(err),
    }
}
