//! The user document (aggregate root) and its API shapes.

use super::{find_plant, Hub, HubInput, PlaceError, Plant, PlantInput};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDocument {
    pub username: String,
    /// bcrypt hash; the plaintext is never stored.
    pub password_hash: String,
    #[serde(default)]
    pub plants: Vec<Plant>,
    #[serde(default)]
    pub hubs: Vec<Hub>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Why a create request could not become a user document.
#[derive(Debug, PartialEq, Eq)]
pub enum AssembleError {
    DuplicatePlant(String),
    DuplicateHub(String),
    /// Hub name and the reason its plants did not fit.
    Hub(String, PlaceError),
}

impl UserDocument {
    /// A new user holding `plants` and `hubs`, checked with the same rules as
    /// adding them one at a time.
    pub fn assemble(
        username: String,
        password_hash: String,
        plants: Vec<PlantInput>,
        hubs: Vec<HubInput>,
    ) -> Result<Self, AssembleError> {
        let now = Utc::now();
        let mut doc = UserDocument {
            username,
            password_hash,
            plants: Vec::with_capacity(plants.len()),
            hubs: Vec::with_capacity(hubs.len()),
            created_at: now,
            updated_at: now,
        };
        for input in plants {
            if find_plant(&doc.plants, &input.name).is_some() {
                return Err(AssembleError::DuplicatePlant(input.name));
            }
            doc.plants.push(input.into_plant());
        }
        for input in hubs {
            if doc.hub(&input.name).is_some() {
                return Err(AssembleError::DuplicateHub(input.name));
            }
            let name = input.name.clone();
            let hub = input.into_hub().map_err(|e| AssembleError::Hub(name, e))?;
            doc.hubs.push(hub);
        }
        Ok(doc)
    }

    pub fn hub(&self, name: &str) -> Option<&Hub> {
        self.hubs.iter().find(|h| h.name == name)
    }

    pub fn hub_mut(&mut self, name: &str) -> Option<&mut Hub> {
        self.hubs.iter_mut().find(|h| h.name == name)
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// What `GET /user/:username` and login return. Never carries the password.
#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct UserView {
    pub username: String,
    pub plants: Vec<Plant>,
    pub hubs: Vec<Hub>,
}

impl From<UserDocument> for UserView {
    fn from(doc: UserDocument) -> Self {
        UserView {
            username: doc.username,
            plants: doc.plants,
            hubs: doc.hubs,
        }
    }
}

#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct CreateUser {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub plants: Option<Vec<PlantInput>>,
    #[serde(default)]
    pub hubs: Option<Vec<HubInput>>,
}

#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Clone, Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RenameUser {
    pub new_name: String,
}
