use super::{CONCURRENT_MODIFICATION, MAX_ATTEMPTS};
use crate::error::AppError;
use crate::model::Plant;
use crate::store::DocumentStore;

pub const CATALOG_PLANT_NOT_FOUND: &str = "This plant does not exist";

/// Same read-modify-write loop as `UserService`, for standalone catalog plants.
pub struct CatalogService;

impl CatalogService {
    pub async fn modify<T, F>(store: &dyn DocumentStore, name: &str, mut mutate: F) -> Result<T, AppError>
    where
        F: FnMut(&mut Plant) -> Result<T, AppError> + Send,
        T: Send,
    {
        for attempt in 1..=MAX_ATTEMPTS {
            let stored = store
                .find_catalog_plant(name)
                .await?
                .ok_or_else(|| AppError::NotFound(CATALOG_PLANT_NOT_FOUND.into()))?;
            let mut plant = stored.doc;
            let out = mutate(&mut plant)?;
            if store.replace_catalog_plant(&plant, stored.version).await? {
                return Ok(out);
            }
            tracing::warn!(name, attempt, "catalog plant changed concurrently, retrying");
        }
        Err(AppError::Conflict(CONCURRENT_MODIFICATION.into()))
    }
}
