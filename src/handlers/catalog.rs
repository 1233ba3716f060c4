//! Standalone plants that belong to no user.

use super::{LatestQuery, PLANT_EXISTS};
use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::model::{latest, PlantInput, SensorInput};
use crate::response::{json_created, json_ok};
use crate::service::{CatalogService, CATALOG_PLANT_NOT_FOUND};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CatalogReading {
    pub sensor: SensorInput,
}

/// GET /plants
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    Ok(json_ok(state.store().list_catalog().await?))
}

/// GET /plants/:name
pub async fn get(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let stored = state
        .store()
        .find_catalog_plant(&name)
        .await?
        .ok_or_else(|| AppError::NotFound(CATALOG_PLANT_NOT_FOUND.into()))?;
    Ok(json_ok(stored.doc))
}

/// POST /plants
pub async fn create(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<PlantInput>,
) -> Result<impl IntoResponse, AppError> {
    let plant = body.into_plant();
    if !state.store().insert_catalog_plant(&plant).await? {
        return Err(AppError::Conflict(PLANT_EXISTS.into()));
    }
    Ok(json_created(plant))
}

/// PUT /plants/:name
pub async fn add_reading(
    State(state): State<AppState>,
    Path(name): Path<String>,
    JsonBody(body): JsonBody<CatalogReading>,
) -> Result<impl IntoResponse, AppError> {
    let plant = CatalogService::modify(state.store(), &name, |plant| {
        plant.push_reading(body.sensor.clone().into_reading());
        Ok(plant.clone())
    })
    .await?;
    Ok(json_ok(plant))
}

/// GET /plants/:name/sensor[?latest=true]
pub async fn readings(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(query): Query<LatestQuery>,
) -> Result<Response, AppError> {
    let stored = state
        .store()
        .find_catalog_plant(&name)
        .await?
        .ok_or_else(|| AppError::NotFound(CATALOG_PLANT_NOT_FOUND.into()))?;
    let sensor = stored.doc.sensor;
    if query.wants_latest() {
        return Ok(json_ok(latest(&sensor)).into_response());
    }
    Ok(json_ok(sensor).into_response())
}
