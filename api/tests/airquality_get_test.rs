mod helpers;

#[cfg(test)]
mod tests {
    use crate::helpers::{get_request, make_test_app, read_json_body};
    use axum::http::StatusCode;
    use chrono::{DateTime, TimeZone, Utc};
    use db::models::measurement::{Model as MeasurementModel, NewMeasurement, NewMetadata, PollutantReading};
    use db::models::measurement_reading::{AveragingPeriod, Pollutant, QualityFlag, Unit};
    use sea_orm::DatabaseConnection;
    use tower::ServiceExt;

    async fn seed_measurement(
        db: &DatabaseConnection,
        station_id: &str,
        time: DateTime<Utc>,
        pollutants: Vec<PollutantReading>,
    ) {
        MeasurementModel::create(
            db,
            NewMeasurement {
                station_id: station_id.to_owned(),
                measurement_time: time,
                pollutants,
                metadata: NewMetadata::default(),
            },
        )
        .await
        .expect("Failed to seed measurement");
    }

    fn pm25(value: f64) -> PollutantReading {
        PollutantReading {
            pollutant: Pollutant::Pm25,
            value,
            unit: Unit::MicrogramsPerCubicMeter,
            averaging_period: AveragingPeriod::default(),
            quality_flag: QualityFlag::default(),
        }
    }

    #[tokio::test]
    async fn list_paginates_newest_first() {
        let (app, db) = make_test_app().await;

        for minute in 0..25u32 {
            let time = Utc.with_ymd_and_hms(2025, 6, 1, 0, minute, 0).unwrap();
            seed_measurement(&db, "S1", time, vec![]).await;
        }

        let res = app
            .oneshot(get_request("/api/airquality?page=2&limit=10"))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let json = read_json_body(res).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["pagination"]["page"], 2);
        assert_eq!(json["pagination"]["limit"], 10);
        assert_eq!(json["pagination"]["total"], 25);
        assert_eq!(json["pagination"]["pages"], 3);

        let records = json["data"].as_array().unwrap();
        assert_eq!(records.len(), 10);
        // Newest first: page 2 runs from minute 14 down to minute 5.
        let first = records[0]["measurement_time"].as_str().unwrap();
        let last = records[9]["measurement_time"].as_str().unwrap();
        assert!(first.contains("00:14:00"), "got {first}");
        assert!(last.contains("00:05:00"), "got {last}");
    }

    #[tokio::test]
    async fn list_filters_by_station_pollutant_and_range() {
        let (app, db) = make_test_app().await;

        let t9 = Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap();
        let t12 = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        seed_measurement(&db, "S1", t9, vec![pm25(10.0)]).await;
        seed_measurement(&db, "S1", t12, vec![]).await;
        seed_measurement(&db, "S2", t12, vec![pm25(20.0)]).await;

        let res = app
            .clone()
            .oneshot(get_request("/api/airquality?station_id=S1"))
            .await
            .unwrap();
        let json = read_json_body(res).await;
        assert_eq!(json["pagination"]["total"], 2);

        let res = app
            .clone()
            .oneshot(get_request("/api/airquality?pollutant=PM2.5"))
            .await
            .unwrap();
        let json = read_json_body(res).await;
        assert_eq!(json["pagination"]["total"], 2);

        let res = app
            .clone()
            .oneshot(get_request(
                "/api/airquality?start_date=2025-06-01T10:00:00Z&end_date=2025-06-01T12:00:00Z",
            ))
            .await
            .unwrap();
        let json = read_json_body(res).await;
        // Inclusive upper bound keeps both noon measurements.
        assert_eq!(json["pagination"]["total"], 2);

        let res = app
            .oneshot(get_request("/api/airquality?start_date=not-a-date"))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_pollutant_filter_is_400() {
        let (app, _db) = make_test_app().await;

        let res = app
            .oneshot(get_request("/api/airquality?pollutant=Radon"))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let json = read_json_body(res).await;
        assert_eq!(json["success"], false);
    }

    #[tokio::test]
    async fn latest_returns_one_record_per_station() {
        let (app, db) = make_test_app().await;

        for hour in [8, 10, 12] {
            let time = Utc.with_ymd_and_hms(2025, 6, 1, hour, 0, 0).unwrap();
            seed_measurement(&db, "S1", time, vec![]).await;
        }
        for hour in [9, 11, 13] {
            let time = Utc.with_ymd_and_hms(2025, 6, 1, hour, 0, 0).unwrap();
            seed_measurement(&db, "S2", time, vec![]).await;
        }

        let res = app
            .oneshot(get_request("/api/airquality/latest"))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let json = read_json_body(res).await;
        let records = json["data"].as_array().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["station_id"], "S1");
        assert!(
            records[0]["measurement_time"]
                .as_str()
                .unwrap()
                .contains("12:00:00")
        );
        assert_eq!(records[1]["station_id"], "S2");
        assert!(
            records[1]["measurement_time"]
                .as_str()
                .unwrap()
                .contains("13:00:00")
        );
    }

    #[tokio::test]
    async fn latest_on_empty_store_is_empty_list() {
        let (app, _db) = make_test_app().await;

        let res = app
            .oneshot(get_request("/api/airquality/latest"))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let json = read_json_body(res).await;
        assert_eq!(json["data"].as_array().unwrap().len(), 0);
    }
}
