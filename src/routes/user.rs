use crate::handlers::user::{create_user, delete_user, get_user, login, post_plant, put_plant, rename_user};
use crate::state::AppState;
use axum::{routing::get, routing::post, Router};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/user", post(create_user))
        .route("/user/login", post(login))
        .route(
            "/user/:username",
            get(get_user)
                .delete(delete_user)
                .patch(rename_user)
                .put(put_plant)
                .post(post_plant),
        )
}
