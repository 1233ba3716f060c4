//! In-process store with the same versioning contract as PostgreSQL.

use super::{DocumentStore, RenameOutcome, Stored};
use crate::error::AppError;
use crate::model::{Plant, UserDocument};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<String, Stored<UserDocument>>>,
    catalog: RwLock<Vec<Stored<Plant>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn find_user(&self, username: &str) -> Result<Option<Stored<UserDocument>>, AppError> {
        Ok(self.users.read().await.get(username).cloned())
    }

    async fn insert_user(&self, doc: &UserDocument) -> Result<bool, AppError> {
        let mut users = self.users.write().await;
        if users.contains_key(&doc.username) {
            return Ok(false);
        }
        users.insert(
            doc.username.clone(),
            Stored {
                doc: doc.clone(),
                version: 1,
            },
        );
        Ok(true)
    }

    async fn replace_user(&self, doc: &UserDocument, expected_version: i64) -> Result<bool, AppError> {
        let mut users = self.users.write().await;
        match users.get_mut(&doc.username) {
            Some(stored) if stored.version == expected_version => {
                stored.doc = doc.clone();
                stored.version += 1;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn rename_user(&self, from: &str, to: &str) -> Result<RenameOutcome, AppError> {
        let mut users = self.users.write().await;
        if !users.contains_key(from) {
            return Ok(RenameOutcome::NotFound);
        }
        if from == to {
            return Ok(RenameOutcome::Renamed);
        }
        if users.contains_key(to) {
            return Ok(RenameOutcome::Taken);
        }
        if let Some(mut stored) = users.remove(from) {
            stored.doc.username = to.to_string();
            stored.doc.touch();
            stored.version += 1;
            users.insert(to.to_string(), stored);
        }
        Ok(RenameOutcome::Renamed)
    }

    async fn delete_user(&self, username: &str) -> Result<bool, AppError> {
        Ok(self.users.write().await.remove(username).is_some())
    }

    async fn list_catalog(&self) -> Result<Vec<Plant>, AppError> {
        Ok(self.catalog.read().await.iter().map(|s| s.doc.clone()).collect())
    }

    async fn find_catalog_plant(&self, name: &str) -> Result<Option<Stored<Plant>>, AppError> {
        Ok(self.catalog.read().await.iter().find(|s| s.doc.name == name).cloned())
    }

    async fn insert_catalog_plant(&self, plant: &Plant) -> Result<bool, AppError> {
        let mut catalog = self.catalog.write().await;
        if catalog.iter().any(|s| s.doc.name == plant.name) {
            return Ok(false);
        }
        catalog.push(Stored {
            doc: plant.clone(),
            version: 1,
        });
        Ok(true)
    }

    async fn replace_catalog_plant(&self, plant: &Plant, expected_version: i64) -> Result<bool, AppError> {
        let mut catalog = self.catalog.write().await;
        match catalog.iter_mut().find(|s| s.doc.name == plant.name) {
            Some(stored) if stored.version == expected_version => {
                stored.doc = plant.clone();
                stored.version += 1;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
