//! Read-modify-write over aggregate roots with optimistic concurrency.

mod catalog;
mod users;
pub use catalog::{CatalogService, CATALOG_PLANT_NOT_FOUND};
pub use users::{UserService, USER_NOT_FOUND};

/// How many times a mutation is re-applied after losing a version race.
pub const MAX_ATTEMPTS: usize = 5;

pub const CONCURRENT_MODIFICATION: &str = "Concurrent modification, retry";
