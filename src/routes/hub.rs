use crate::handlers::hub::{
    add_hub_plant, clear_hub, create_hub, delete_hub_plant, get_hub_plant, list_hub_plants, list_hubs,
};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn hub_routes() -> Router<AppState> {
    Router::new()
        .route("/hubs/:username", get(list_hubs))
        .route(
            "/hub/:username/:hub",
            get(list_hub_plants).post(add_hub_plant).put(create_hub).delete(clear_hub),
        )
        .route(
            "/hub/:username/:hub/:plant_name",
            get(get_hub_plant).delete(delete_hub_plant),
        )
}
