//! Hubs and the plants in their slots.

use super::{place_error, HUB_EXISTS, HUB_NOT_FOUND, PLANT_NOT_FOUND};
use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::model::{summarize, CreateHub, Hub, HubView, PlantInput};
use crate::response::{created, json_ok, success};
use crate::service::UserService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};

fn hub_not_found() -> AppError {
    AppError::NotFound(HUB_NOT_FOUND.into())
}

/// GET /hubs/:username
pub async fn list_hubs(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user = UserService::load(state.store(), &username).await?;
    let hubs: Vec<HubView> = user.hubs.iter().map(HubView::from).collect();
    Ok(json_ok(hubs))
}

/// PUT /hub/:username/:hub
pub async fn create_hub(
    State(state): State<AppState>,
    Path((username, hub_name)): Path<(String, String)>,
    JsonBody(body): JsonBody<CreateHub>,
) -> Result<impl IntoResponse, AppError> {
    UserService::modify(state.store(), &username, |user| {
        if user.hub(&hub_name).is_some() {
            return Err(AppError::Conflict(HUB_EXISTS.into()));
        }
        user.hubs.push(Hub::new(hub_name.clone(), body.location.clone(), body.slots));
        Ok(())
    })
    .await?;
    Ok(created("Hub created"))
}

/// GET /hub/:username/:hub
///
/// Empty slots are reported as `null` so positions line up with the hub.
pub async fn list_hub_plants(
    State(state): State<AppState>,
    Path((username, hub_name)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let user = UserService::load(state.store(), &username).await?;
    let hub = user.hub(&hub_name).ok_or_else(hub_not_found)?;
    Ok(json_ok(summarize(hub)))
}

/// POST /hub/:username/:hub
pub async fn add_hub_plant(
    State(state): State<AppState>,
    Path((username, hub_name)): Path<(String, String)>,
    JsonBody(body): JsonBody<PlantInput>,
) -> Result<impl IntoResponse, AppError> {
    let slot = UserService::modify(state.store(), &username, |user| {
        let hub = user.hub_mut(&hub_name).ok_or_else(hub_not_found)?;
        hub.place(body.clone().into_plant()).map_err(place_error)
    })
    .await?;
    tracing::debug!(%username, hub = %hub_name, slot, "plant placed");
    Ok(success("Plant added"))
}

/// DELETE /hub/:username/:hub
pub async fn clear_hub(
    State(state): State<AppState>,
    Path((username, hub_name)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    UserService::modify(state.store(), &username, |user| {
        user.hub_mut(&hub_name).ok_or_else(hub_not_found)?.clear();
        Ok(())
    })
    .await?;
    Ok(success("Hub cleared"))
}

/// GET /hub/:username/:hub/:plant_name
pub async fn get_hub_plant(
    State(state): State<AppState>,
    Path((username, hub_name, plant_name)): Path<(String, String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let user = UserService::load(state.store(), &username).await?;
    let plant = user
        .hub(&hub_name)
        .ok_or_else(hub_not_found)?
        .find_plant(&plant_name)
        .cloned()
        .ok_or_else(|| AppError::NotFound(PLANT_NOT_FOUND.into()))?;
    Ok(json_ok(plant))
}

/// DELETE /hub/:username/:hub/:plant_name
///
/// Leaves the slot empty instead of shrinking the hub.
pub async fn delete_hub_plant(
    State(state): State<AppState>,
    Path((username, hub_name, plant_name)): Path<(String, String, String)>,
) -> Result<impl IntoResponse, AppError> {
    UserService::modify(state.store(), &username, |user| {
        let hub = user.hub_mut(&hub_name).ok_or_else(hub_not_found)?;
        if !hub.vacate(&plant_name) {
            return Err(AppError::NotFound(PLANT_NOT_FOUND.into()));
        }
        Ok(())
    })
    .await?;
    Ok(success("Plant deleted"))
}
