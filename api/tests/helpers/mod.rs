#![allow(dead_code)]

use api::{routes::routes, state::AppState};
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::Request;
use sea_orm::DatabaseConnection;
use serde_json::Value;

/// Builds the full application router over a fresh in-memory database.
/// Returns the connection too so tests can seed through the models.
pub async fn make_test_app() -> (Router, DatabaseConnection) {
    let db = db::test_utils::setup_test_db().await;
    let state = AppState::new(db.clone());
    let app = Router::new().nest("/api", routes()).with_state(state);
    (app, db)
}

pub async fn seed_station(db: &DatabaseConnection, station_id: &str) {
    db::models::station::Model::create(db, station_id, "Test station", None, None, None)
        .await
        .expect("Failed to seed station");
}

pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn read_json_body(res: axum::response::Response) -> Value {
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
