//! Persistence of aggregate roots.
//!
//! Each root (a user, or a catalog plant) is one record carrying a version
//! counter. Writes are whole-document replacements guarded by that version, so a
//! write based on a stale read is refused instead of overwriting newer data.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::{ensure_database_exists, PgStore};

use crate::error::AppError;
use crate::model::{Plant, UserDocument};
use async_trait::async_trait;

/// A document together with the version it was read at.
#[derive(Clone, Debug, PartialEq)]
pub struct Stored<T> {
    pub doc: T,
    pub version: i64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenameOutcome {
    Renamed,
    NotFound,
    /// Another user already holds the new name.
    Taken,
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn ping(&self) -> Result<(), AppError>;

    async fn find_user(&self, username: &str) -> Result<Option<Stored<UserDocument>>, AppError>;

    /// Insert unless the username exists. Returns false when it already did.
    async fn insert_user(&self, doc: &UserDocument) -> Result<bool, AppError>;

    /// Replace the stored user if its version is still `expected_version`.
    /// Returns false when the user changed or vanished since it was read.
    async fn replace_user(&self, doc: &UserDocument, expected_version: i64) -> Result<bool, AppError>;

    async fn rename_user(&self, from: &str, to: &str) -> Result<RenameOutcome, AppError>;

    /// Returns false when no such user exists.
    async fn delete_user(&self, username: &str) -> Result<bool, AppError>;

    /// Catalog plants in creation order.
    async fn list_catalog(&self) -> Result<Vec<Plant>, AppError>;

    async fn find_catalog_plant(&self, name: &str) -> Result<Option<Stored<Plant>>, AppError>;

    async fn insert_catalog_plant(&self, plant: &Plant) -> Result<bool, AppError>;

    async fn replace_catalog_plant(&self, plant: &Plant, expected_version: i64) -> Result<bool, AppError>;
}
