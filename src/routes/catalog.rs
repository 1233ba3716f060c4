use crate::handlers::catalog;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/plants", get(catalog::list).post(catalog::create))
        .route("/plants/:name", get(catalog::get).put(catalog::add_reading))
        .route("/plants/:name/sensor", get(catalog::readings))
}
