//! Update handler.

use axum::{
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use validator::Validate;

use crate::response::ApiResponse;
use crate::routes::airquality::common::{UpdateMeasurementRequest, store_error_response};
use crate::state::AppState;
use common::format_validation_errors;
use db::models::measurement::Model as MeasurementModel;

/// PUT /api/airquality/{id}
///
/// Applies a partial or full update to a measurement. The merged result
/// is re-validated against all invariants; 404 for an unknown id.
pub async fn update_measurement(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<UpdateMeasurementRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<()>::error(rejection.body_text())),
            )
                .into_response();
        }
    };

    if let Err(errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<()>::error(format_validation_errors(&errors))),
        )
            .into_response();
    }

    match MeasurementModel::update(app_state.db(), id, req.into()).await {
        Ok(record) => (StatusCode::OK, Json(ApiResponse::success(record))).into_response(),
        Err(err) => store_error_response(err),
    }
}
