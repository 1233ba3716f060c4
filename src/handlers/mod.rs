//! HTTP handlers, one module per resource.

pub mod attribute;
pub mod catalog;
pub mod hub;
pub mod plant;
pub mod sensor;
pub mod user;

use crate::error::AppError;
use crate::model::{find_plant, find_plant_mut, PlaceError, Plant, UserDocument};
use serde::Deserialize;

pub const PLANT_NOT_FOUND: &str = "Plant not found";
pub const PLANT_EXISTS: &str = "Plant already exists";
pub const HUB_NOT_FOUND: &str = "Hub not found";
pub const HUB_EXISTS: &str = "Hub already exists";
pub const HUB_FULL: &str = "Hub is full";

/// Query parameters shared by the reading endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct HistoryQuery {
    pub latest: Option<String>,
    /// Look the plant up inside this hub instead of the user's direct plants.
    pub hub: Option<String>,
}

impl HistoryQuery {
    pub fn wants_latest(&self) -> bool {
        self.latest.as_deref().map(is_truthy).unwrap_or(false)
    }
}

/// `?latest=` on reads that have no hub scope.
#[derive(Debug, Default, Deserialize)]
pub struct LatestQuery {
    pub latest: Option<String>,
}

impl LatestQuery {
    pub fn wants_latest(&self) -> bool {
        self.latest.as_deref().map(is_truthy).unwrap_or(false)
    }
}

fn is_truthy(s: &str) -> bool {
    matches!(s.trim().to_ascii_lowercase().as_str(), "true" | "1" | "yes")
}

/// A full hub answers NOT_FOUND, a duplicate name CONFLICT.
pub(crate) fn place_error(e: PlaceError) -> AppError {
    match e {
        PlaceError::Full => AppError::NotFound(HUB_FULL.into()),
        PlaceError::Duplicate => AppError::Conflict(PLANT_EXISTS.into()),
    }
}

/// Find a plant among the user's direct plants, or inside `hub` when given.
pub(crate) fn locate<'a>(user: &'a UserDocument, hub: Option<&str>, name: &str) -> Result<&'a Plant, AppError> {
    let plant = match hub {
        Some(hub) => user
            .hub(hub)
            .ok_or_else(|| AppError::NotFound(HUB_NOT_FOUND.into()))?
            .find_plant(name),
        None => find_plant(&user.plants, name),
    };
    plant.ok_or_else(|| AppError::NotFound(PLANT_NOT_FOUND.into()))
}

pub(crate) fn locate_mut<'a>(
    user: &'a mut UserDocument,
    hub: Option<&str>,
    name: &str,
) -> Result<&'a mut Plant, AppError> {
    let plant = match hub {
        Some(hub) => user
            .hub_mut(hub)
            .ok_or_else(|| AppError::NotFound(HUB_NOT_FOUND.into()))?
            .find_plant_mut(name),
        None => find_plant_mut(&mut user.plants, name),
    };
    plant.ok_or_else(|| AppError::NotFound(PLANT_NOT_FOUND.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_flag_parsing() {
        let q = |v: Option<&str>| HistoryQuery {
            latest: v.map(String::from),
            hub: None,
        };
        assert!(q(Some("true")).wants_latest());
        assert!(q(Some("TRUE")).wants_latest());
        assert!(q(Some("1")).wants_latest());
        assert!(!q(Some("false")).wants_latest());
        assert!(!q(Some("")).wants_latest());
        assert!(!q(None).wants_latest());
    }

    #[test]
    fn catalog_query_ignores_unknown_keys() {
        let q: LatestQuery = serde_json::from_value(serde_json::json!({ "latest": "yes", "hub": "kitchen" })).unwrap();
        assert!(q.wants_latest());
        assert!(!LatestQuery::default().wants_latest());
    }
}
