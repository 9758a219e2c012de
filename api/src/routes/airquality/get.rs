//! Read handlers: filtered list, latest-per-station, and statistics.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use std::str::FromStr;

use crate::response::{ApiResponse, Pagination};
use crate::routes::airquality::common::{parse_datetime, store_error_response};
use crate::state::AppState;
use db::models::measurement::{MeasurementFilter, Model as MeasurementModel};
use db::models::measurement_reading::Pollutant;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub station_id: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub pollutant: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

/// GET /api/airquality
///
/// Paginated measurement list, newest first. Query parameters:
/// `station_id` (exact match), `start_date`/`end_date` (inclusive bounds,
/// RFC 3339 or `YYYY-MM-DD`), `pollutant` (containment in the reading
/// sequence), `page` (default 1), `limit` (default 100).
pub async fn get_measurements(
    State(app_state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> impl IntoResponse {
    let db = app_state.db();

    let page = params.page.unwrap_or(1).max(1);
    let limit = params.limit.unwrap_or(100).clamp(1, 1000);

    let mut filter = MeasurementFilter {
        station_id: params.station_id.filter(|s| !s.is_empty()),
        ..Default::default()
    };

    if let Some(ref raw) = params.start_date {
        match parse_datetime(raw) {
            Some(t) => filter.start = Some(t),
            None => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::<()>::error("Invalid start_date")),
                )
                    .into_response();
            }
        }
    }

    if let Some(ref raw) = params.end_date {
        match parse_datetime(raw) {
            Some(t) => filter.end = Some(t),
            None => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::<()>::error("Invalid end_date")),
                )
                    .into_response();
            }
        }
    }

    if let Some(ref raw) = params.pollutant {
        match Pollutant::from_str(raw) {
            Ok(p) => filter.pollutant = Some(p),
            Err(_) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::<()>::error(format!("Unknown pollutant: {raw}"))),
                )
                    .into_response();
            }
        }
    }

    match MeasurementModel::list(db, &filter, page, limit).await {
        Ok((records, total)) => (
            StatusCode::OK,
            Json(ApiResponse::success_paginated(
                records,
                Pagination::new(page, limit, total),
            )),
        )
            .into_response(),
        Err(err) => store_error_response(err),
    }
}

/// GET /api/airquality/latest
///
/// One record per distinct station: the measurement with the maximum
/// measurement_time.
pub async fn get_latest(State(app_state): State<AppState>) -> impl IntoResponse {
    match MeasurementModel::latest_per_station(app_state.db()).await {
        Ok(records) => (StatusCode::OK, Json(ApiResponse::success(records))).into_response(),
        Err(err) => store_error_response(err),
    }
}

#[derive(Debug, Deserialize)]
pub struct StatisticsQuery {
    pub station_id: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub pollutant: Option<String>,
}

/// GET /api/airquality/statistics
///
/// Count/avg/min/max/latest for one station, pollutant, and inclusive
/// time range. All four query parameters are required. An empty matching
/// set yields `data: null`, not an error.
pub async fn get_statistics(
    State(app_state): State<AppState>,
    Query(params): Query<StatisticsQuery>,
) -> impl IntoResponse {
    let bad_request = |msg: &str| {
        (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<()>::error(msg)),
        )
            .into_response()
    };

    let Some(station_id) = params.station_id else {
        return bad_request("station_id is required");
    };
    let Some(ref raw_start) = params.start_date else {
        return bad_request("start_date is required");
    };
    let Some(ref raw_end) = params.end_date else {
        return bad_request("end_date is required");
    };
    let Some(ref raw_pollutant) = params.pollutant else {
        return bad_request("pollutant is required");
    };

    let Some(start) = parse_datetime(raw_start) else {
        return bad_request("Invalid start_date");
    };
    let Some(end) = parse_datetime(raw_end) else {
        return bad_request("Invalid end_date");
    };
    let Ok(pollutant) = Pollutant::from_str(raw_pollutant) else {
        return bad_request(&format!("Unknown pollutant: {raw_pollutant}"));
    };

    match MeasurementModel::statistics(app_state.db(), &station_id, start, end, &pollutant).await {
        Ok(stats) => (StatusCode::OK, Json(ApiResponse::success(stats))).into_response(),
        Err(err) => store_error_response(err),
    }
}
