use super::{CONCURRENT_MODIFICATION, MAX_ATTEMPTS};
use crate::error::AppError;
use crate::model::UserDocument;
use crate::store::DocumentStore;

pub const USER_NOT_FOUND: &str = "User not found";

pub struct UserService;

impl UserService {
    /// Fetch a user or fail with NOT_FOUND.
    pub async fn load(store: &dyn DocumentStore, username: &str) -> Result<UserDocument, AppError> {
        store
            .find_user(username)
            .await?
            .map(|stored| stored.doc)
            .ok_or_else(|| AppError::NotFound(USER_NOT_FOUND.into()))
    }

    /// Apply `mutate` to the current user document and persist it.
    ///
    /// `mutate` sees the version that will be written back: when another request
    /// commits in between, the document is reloaded and `mutate` runs again on
    /// the fresh copy. An `Err` from `mutate` aborts without writing.
    pub async fn modify<T, F>(store: &dyn DocumentStore, username: &str, mut mutate: F) -> Result<T, AppError>
    where
        F: FnMut(&mut UserDocument) -> Result<T, AppError> + Send,
        T: Send,
    {
        for attempt in 1..=MAX_ATTEMPTS {
            let stored = store
                .find_user(username)
                .await?
                .ok_or_else(|| AppError::NotFound(USER_NOT_FOUND.into()))?;
            let mut doc = stored.doc;
            let out = mutate(&mut doc)?;
            doc.touch();
            if store.replace_user(&doc, stored.version).await? {
                return Ok(out);
            }
            tracing::warn!(username, attempt, "user changed concurrently, retrying");
        }
        Err(AppError::Conflict(CONCURRENT_MODIFICATION.into()))
    }
}
