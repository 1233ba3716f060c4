//! Plants kept directly under a user.

use super::user::push_plant;
use super::PLANT_NOT_FOUND;
use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::model::{find_plant, PlantInput};
use crate::response::{json_ok, success};
use crate::service::UserService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};

/// GET /plant/:username
pub async fn list_plants(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user = UserService::load(state.store(), &username).await?;
    Ok(json_ok(user.plants))
}

/// GET /plant/:username/:plant_name
pub async fn get_plant(
    State(state): State<AppState>,
    Path((username, plant_name)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let user = UserService::load(state.store(), &username).await?;
    let plant = find_plant(&user.plants, &plant_name)
        .cloned()
        .ok_or_else(|| AppError::NotFound(PLANT_NOT_FOUND.into()))?;
    Ok(json_ok(plant))
}

/// POST /plant/:username
pub async fn add_plant(
    State(state): State<AppState>,
    Path(username): Path<String>,
    JsonBody(body): JsonBody<PlantInput>,
) -> Result<impl IntoResponse, AppError> {
    push_plant(&state, &username, body).await?;
    Ok(success("Plant added"))
}

/// DELETE /plant/:username
pub async fn delete_plants(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    UserService::modify(state.store(), &username, |user| {
        user.plants.clear();
        Ok(())
    })
    .await?;
    Ok(success("Plants deleted successfully"))
}

/// DELETE /plant/:username/:plant_name
pub async fn delete_plant(
    State(state): State<AppState>,
    Path((username, plant_name)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    UserService::modify(state.store(), &username, |user| {
        let index = user
            .plants
            .iter()
            .position(|p| p.name == plant_name)
            .ok_or_else(|| AppError::NotFound(PLANT_NOT_FOUND.into()))?;
        user.plants.remove(index);
        Ok(())
    })
    .await?;
    Ok(success("Plant removed correctly"))
}
