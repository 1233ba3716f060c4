//! Attribute entries (condition score and tags) of a user's plant.

use super::{locate, locate_mut, HistoryQuery};
use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::model::{latest, AttributeInput};
use crate::response::{json_ok, success};
use crate::service::UserService;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};

/// GET /attribute/:username/:plant_name[?hub=name]
///
/// Always the last appended entry, or `null` before the first one.
pub async fn get_latest(
    State(state): State<AppState>,
    Path((username, plant_name)): Path<(String, String)>,
    Query(query): Query<HistoryQuery>,
) -> Result<impl IntoResponse, AppError> {
    let user = UserService::load(state.store(), &username).await?;
    let plant = locate(&user, query.hub.as_deref(), &plant_name)?;
    Ok(json_ok(latest(&plant.attributes).cloned()))
}

/// POST /attribute/:username/:plant_name[?hub=name]
pub async fn add_attribute(
    State(state): State<AppState>,
    Path((username, plant_name)): Path<(String, String)>,
    Query(query): Query<HistoryQuery>,
    JsonBody(body): JsonBody<AttributeInput>,
) -> Result<impl IntoResponse, AppError> {
    UserService::modify(state.store(), &username, |user| {
        locate_mut(user, query.hub.as_deref(), &plant_name)?.push_attribute(body.clone().into_entry());
        Ok(())
    })
    .await?;
    Ok(success("Attribute added"))
}
