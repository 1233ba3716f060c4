//! Common routes: health, readiness, version, OpenAPI document.

use crate::model::{
    AttributeEntry, AttributeInput, CreateHub, CreateUser, Hub, HubInput, HubView, ImageOfTheDay, LoginRequest,
    Plant, PlantInput, PlantSummary, RenameUser, SensorInput, SensorReading, UserView,
};
use crate::response::{Message, MessageType};
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(title = "Plant registry API", description = "Users, hubs, plants and their sensor/attribute history"),
    components(schemas(
        Message,
        MessageType,
        UserView,
        CreateUser,
        LoginRequest,
        RenameUser,
        Hub,
        HubInput,
        HubView,
        CreateHub,
        PlantSummary,
        Plant,
        PlantInput,
        SensorReading,
        SensorInput,
        AttributeEntry,
        AttributeInput,
        ImageOfTheDay,
    ))
)]
pub struct ApiDoc;

#[derive(Serialize)]
struct HealthBody {
    status: &'static str,
}

#[derive(Serialize)]
struct ReadyBody {
    status: &'static str,
    store: &'static str,
}

async fn health() -> Json<HealthBody> {
    Json(HealthBody { status: "ok" })
}

async fn ready(State(state): State<AppState>) -> (StatusCode, Json<ReadyBody>) {
    match state.store().ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(ReadyBody {
                status: "ok",
                store: "ok",
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ReadyBody {
                    status: "degraded",
                    store: "unavailable",
                }),
            )
        }
    }
}

async fn version() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// GET /health, /ready, /version, /openapi.json.
pub fn common_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/version", get(version))
        .route("/openapi.json", get(openapi))
        .with_state(state)
}
