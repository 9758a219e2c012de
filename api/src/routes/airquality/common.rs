//! Shared request DTOs and helpers for the `/airquality` route group.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::Deserialize;
use validator::Validate;

use crate::response::ApiResponse;
use db::StoreError;
use db::models::measurement::{
    MeasurementPatch, NewMeasurement, NewMetadata, PollutantReading,
};

#[derive(Debug, Default, Deserialize)]
pub struct MetadataRequest {
    pub source: Option<String>,
    pub import_time: Option<DateTime<Utc>>,
    pub original_data: Option<serde_json::Value>,
    pub processing_notes: Option<String>,
}

impl From<MetadataRequest> for NewMetadata {
    fn from(req: MetadataRequest) -> Self {
        Self {
            source: req.source,
            import_time: req.import_time,
            original_data: req.original_data,
            processing_notes: req.processing_notes,
        }
    }
}

/// Payload for POST requests: a full measurement.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateMeasurementRequest {
    #[validate(length(min = 1, message = "station_id is required"))]
    pub station_id: String,
    pub measurement_time: DateTime<Utc>,
    #[serde(default)]
    pub pollutants: Vec<PollutantReading>,
    #[serde(default)]
    pub metadata: MetadataRequest,
}

impl From<CreateMeasurementRequest> for NewMeasurement {
    fn from(req: CreateMeasurementRequest) -> Self {
        Self {
            station_id: req.station_id,
            measurement_time: req.measurement_time,
            pollutants: req.pollutants,
            metadata: req.metadata.into(),
        }
    }
}

/// Payload for PUT requests: any subset of measurement fields.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateMeasurementRequest {
    #[validate(length(min = 1, message = "station_id cannot be empty"))]
    pub station_id: Option<String>,
    pub measurement_time: Option<DateTime<Utc>>,
    pub pollutants: Option<Vec<PollutantReading>>,
    pub metadata: Option<MetadataRequest>,
}

impl From<UpdateMeasurementRequest> for MeasurementPatch {
    fn from(req: UpdateMeasurementRequest) -> Self {
        Self {
            station_id: req.station_id,
            measurement_time: req.measurement_time,
            pollutants: req.pollutants,
            metadata: req.metadata.map(Into::into),
        }
    }
}

/// Parses a query-string timestamp: RFC 3339, or a bare `YYYY-MM-DD`
/// taken as midnight UTC.
pub fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?))
}

/// Maps a store failure onto the response policy: validation → 400,
/// not-found → 404, anything database-side → 500 with a generic message
/// and a log record.
pub fn store_error_response(err: StoreError) -> Response {
    match err {
        StoreError::Validation(msg) => (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<()>::error(msg)),
        )
            .into_response(),
        StoreError::NotFound(msg) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<()>::error(msg)),
        )
            .into_response(),
        StoreError::Db(err) => {
            log::error!("database error: {err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("Internal server error")),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::parse_datetime;
    use chrono::{TimeZone, Utc};

    #[test]
    fn parses_rfc3339_and_bare_dates() {
        assert_eq!(
            parse_datetime("2025-06-01T10:30:00Z").unwrap(),
            Utc.with_ymd_and_hms(2025, 6, 1, 10, 30, 0).unwrap()
        );
        assert_eq!(
            parse_datetime("2025-06-01").unwrap(),
            Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap()
        );
        assert!(parse_datetime("yesterday").is_none());
    }
}
