//! Plant registry: a REST backend for users, their hubs and plants, and the
//! sensor readings and attribute entries recorded for each plant.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod model;
pub mod password;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::{Config, StorageBackend};
pub use error::{AppError, ConfigError};
pub use response::{Message, MessageType};
pub use routes::{api_routes, common_routes, ApiDoc};
pub use state::AppState;
pub use store::{ensure_database_exists, DocumentStore, MemoryStore, PgStore};

use axum::extract::DefaultBodyLimit;
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// The full HTTP application: resource routes, operational routes, body limit and request tracing.
pub fn app(state: AppState, body_limit: usize) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(api_routes(state))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(TraceLayer::new_for_http())
}
