//! Create handler.

use axum::{
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use validator::Validate;

use crate::response::ApiResponse;
use crate::routes::airquality::common::{CreateMeasurementRequest, store_error_response};
use crate::state::AppState;
use common::format_validation_errors;
use db::models::measurement::Model as MeasurementModel;
use db::models::station::Model as StationModel;
use db::{StoreError, thresholds};

/// POST /api/airquality
///
/// Validates the payload, rejects unknown stations with 404, persists the
/// measurement, and returns 201 with the stored record plus any threshold
/// exceedances its readings produced.
pub async fn create_measurement(
    State(app_state): State<AppState>,
    payload: Result<Json<CreateMeasurementRequest>, JsonRejection>,
) -> Response {
    let db = app_state.db();

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

    match StationModel::find_by_station_id(db, &req.station_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<()>::error("Station not found")),
            )
                .into_response();
        }
        Err(err) => return store_error_response(StoreError::Db(err)),
    }

    match MeasurementModel::create(db, req.into()).await {
        Ok(record) => {
            let exceedances = thresholds::evaluate(&record.pollutants);
            if !exceedances.is_empty() {
                log::warn!(
                    "station {}: {} threshold exceedance(s) at {}",
                    record.station_id,
                    exceedances.len(),
                    record.measurement_time
                );
            }
            (
                StatusCode::CREATED,
                Json(ApiResponse::success_with_exceedances(record, exceedances)),
            )
                .into_response()
        }
        Err(err) => store_error_response(err),
    }
}
