//! Route table. Every resource router shares one `AppState`.

mod catalog;
mod common;
mod hub;
mod plant;
mod user;

pub use common::{common_routes, ApiDoc};

use crate::state::AppState;
use axum::Router;

/// All resource routes: users, plants, readings, attributes, hubs and the catalog.
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .merge(user::user_routes())
        .merge(plant::plant_routes())
        .merge(hub::hub_routes())
        .merge(catalog::catalog_routes())
        .with_state(state)
}
