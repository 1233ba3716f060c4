//! Direct plants plus the reading and attribute histories hanging off them.

use crate::handlers::{attribute, plant, sensor};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn plant_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/plant/:username",
            get(plant::list_plants).post(plant::add_plant).delete(plant::delete_plants),
        )
        .route(
            "/plant/:username/:plant_name",
            get(plant::get_plant).put(sensor::put_reading).delete(plant::delete_plant),
        )
        .route(
            "/sensor/:username/:plant_name",
            get(sensor::get_readings).post(sensor::add_reading),
        )
        .route(
            "/attribute/:username/:plant_name",
            get(attribute::get_latest).post(attribute::add_attribute),
        )
}
