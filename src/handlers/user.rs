//! User handlers: create, fetch, login, delete, rename, and adding direct plants.

use super::{place_error, HUB_EXISTS, PLANT_EXISTS};
use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::model::{find_plant, AssembleError, CreateUser, LoginRequest, PlantInput, RenameUser, UserDocument, UserView};
use crate::password;
use crate::response::{created, json_ok, success};
use crate::service::{UserService, USER_NOT_FOUND};
use crate::state::AppState;
use crate::store::RenameOutcome;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

const WRONG_CREDENTIALS: &str = "Wrong username or password";

/// POST /user
pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<CreateUser>,
) -> Result<impl IntoResponse, AppError> {
    let conflict = || AppError::Conflict(format!("The user {} already exists", body.username));
    if state.store().find_user(&body.username).await?.is_some() {
        return Err(conflict());
    }
    // Nested plants and hubs obey the same rules as adding them one by one.
    let mut doc = UserDocument::assemble(
        body.username.clone(),
        String::new(),
        body.plants.clone().unwrap_or_default(),
        body.hubs.clone().unwrap_or_default(),
    )
    .map_err(|e| match e {
        AssembleError::DuplicatePlant(_) => AppError::Conflict(PLANT_EXISTS.into()),
        AssembleError::DuplicateHub(_) => AppError::Conflict(HUB_EXISTS.into()),
        AssembleError::Hub(_, e) => place_error(e),
    })?;
    doc.password_hash = password::hash(body.password.clone(), state.bcrypt_cost).await?;
    // The username may have been claimed while hashing.
    if !state.store().insert_user(&doc).await? {
        return Err(conflict());
    }
    tracing::info!(username = %doc.username, "user created");
    Ok(created("User created"))
}

/// GET /user/:username
pub async fn get_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let doc = UserService::load(state.store(), &username).await?;
    Ok(json_ok(UserView::from(doc)))
}

/// POST /user/login
///
/// A wrong password is reported as NOT_FOUND, same as an unknown user.
pub async fn login(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let doc = UserService::load(state.store(), &body.username).await?;
    if !password::verify(body.password, doc.password_hash.clone()).await? {
        tracing::warn!(username = %body.username, "login rejected");
        return Err(AppError::NotFound(WRONG_CREDENTIALS.into()));
    }
    Ok(json_ok(UserView::from(doc)))
}

/// DELETE /user/:username
pub async fn delete_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if !state.store().delete_user(&username).await? {
        return Err(AppError::NotFound(USER_NOT_FOUND.into()));
    }
    tracing::info!(%username, "user deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /user/:username
pub async fn rename_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
    JsonBody(body): JsonBody<RenameUser>,
) -> Result<impl IntoResponse, AppError> {
    match state.store().rename_user(&username, &body.new_name).await? {
        RenameOutcome::Renamed => Ok(StatusCode::NO_CONTENT),
        RenameOutcome::NotFound => Err(AppError::NotFound(USER_NOT_FOUND.into())),
        RenameOutcome::Taken => Err(AppError::Conflict(format!(
            "The user {} already exists",
            body.new_name
        ))),
    }
}

/// Append a plant to the user's direct plants, refusing duplicate names.
pub(crate) async fn push_plant(state: &AppState, username: &str, input: PlantInput) -> Result<(), AppError> {
    UserService::modify(state.store(), username, |user| {
        if find_plant(&user.plants, &input.name).is_some() {
            return Err(AppError::Conflict(PLANT_EXISTS.into()));
        }
        user.plants.push(input.clone().into_plant());
        Ok(())
    })
    .await
}

/// PUT /user/:username
pub async fn put_plant(
    State(state): State<AppState>,
    Path(username): Path<String>,
    JsonBody(body): JsonBody<PlantInput>,
) -> Result<impl IntoResponse, AppError> {
    push_plant(&state, &username, body).await?;
    Ok(success("Plant added"))
}

/// POST /user/:username
pub async fn post_plant(
    State(state): State<AppState>,
    Path(username): Path<String>,
    JsonBody(body): JsonBody<PlantInput>,
) -> Result<impl IntoResponse, AppError> {
    push_plant(&state, &username, body).await?;
    Ok(created("Plant added"))
}
