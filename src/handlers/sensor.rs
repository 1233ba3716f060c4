//! Sensor readings of a user's plant.

use super::{locate, locate_mut, HistoryQuery};
use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::model::{latest, SensorInput};
use crate::response::{json_ok, success};
use crate::service::UserService;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};

/// GET /sensor/:username/:plant_name[?latest=true][&hub=name]
///
/// With `latest`, returns the last appended reading (`null` when there is none).
pub async fn get_readings(
    State(state): State<AppState>,
    Path((username, plant_name)): Path<(String, String)>,
    Query(query): Query<HistoryQuery>,
) -> Result<Response, AppError> {
    let user = UserService::load(state.store(), &username).await?;
    let plant = locate(&user, query.hub.as_deref(), &plant_name)?;
    if query.wants_latest() {
        return Ok(json_ok(latest(&plant.sensor)).into_response());
    }
    Ok(json_ok(&plant.sensor).into_response())
}

/// Append one reading built from the request body.
async fn append(
    state: &AppState,
    username: &str,
    hub: Option<&str>,
    plant_name: &str,
    input: SensorInput,
) -> Result<(), AppError> {
    UserService::modify(state.store(), username, |user| {
        locate_mut(user, hub, plant_name)?.push_reading(input.clone().into_reading());
        Ok(())
    })
    .await
}

/// POST /sensor/:username/:plant_name[?hub=name]
pub async fn add_reading(
    State(state): State<AppState>,
    Path((username, plant_name)): Path<(String, String)>,
    Query(query): Query<HistoryQuery>,
    JsonBody(body): JsonBody<SensorInput>,
) -> Result<impl IntoResponse, AppError> {
    append(&state, &username, query.hub.as_deref(), &plant_name, body).await?;
    Ok(success("Sensor data added"))
}

/// PUT /plant/:username/:plant_name
pub async fn put_reading(
    State(state): State<AppState>,
    Path((username, plant_name)): Path<(String, String)>,
    JsonBody(body): JsonBody<SensorInput>,
) -> Result<impl IntoResponse, AppError> {
    append(&state, &username, None, &plant_name, body).await?;
    Ok(success("Sensor data added"))
}
