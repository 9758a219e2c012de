use crate::state::AppState;
use axum::Router;

pub mod common;
pub mod delete;
pub mod get;
pub mod post;
pub mod put;

use axum::routing::{delete, get, post, put};
use self::delete::delete_measurement;
use self::get::{get_latest, get_measurements, get_statistics};
use self::post::create_measurement;
use self::put::update_measurement;

pub fn airquality_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_measurements))
        .route("/", post(create_measurement))
        .route("/latest", get(get_latest))
        .route("/statistics", get(get_statistics))
        .route("/{id}", put(update_measurement))
        .route("/{id}", delete(delete_measurement))
}
