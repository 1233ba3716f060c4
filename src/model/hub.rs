//! Hubs: fixed-capacity groups of plant slots.
//!
//! A removed plant leaves an empty slot behind so the positions of the other
//! plants never shift. Empty slots serialize as `null`.

use super::{Plant, PlantInput};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "Option<Plant>", into = "Option<Plant>")]
pub enum Slot {
    Occupied(Plant),
    Empty,
}

impl From<Option<Plant>> for Slot {
    fn from(value: Option<Plant>) -> Self {
        match value {
            Some(plant) => Slot::Occupied(plant),
            None => Slot::Empty,
        }
    }
}

impl From<Slot> for Option<Plant> {
    fn from(slot: Slot) -> Self {
        match slot {
            Slot::Occupied(plant) => Some(plant),
            Slot::Empty => None,
        }
    }
}

impl Slot {
    pub fn plant(&self) -> Option<&Plant> {
        match self {
            Slot::Occupied(plant) => Some(plant),
            Slot::Empty => None,
        }
    }

    pub fn plant_mut(&mut self) -> Option<&mut Plant> {
        match self {
            Slot::Occupied(plant) => Some(plant),
            Slot::Empty => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Hub {
    pub name: String,
    pub location: String,
    pub slots: u32,
    #[serde(default)]
    #[schema(value_type = Vec<Option<Plant>>)]
    pub plants: Vec<Slot>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Why a plant could not be placed in a hub.
#[derive(Debug, PartialEq, Eq)]
pub enum PlaceError {
    Full,
    Duplicate,
}

impl Hub {
    pub fn new(name: String, location: String, slots: u32) -> Self {
        let now = Utc::now();
        Hub {
            name,
            location,
            slots,
            plants: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn find_plant(&self, name: &str) -> Option<&Plant> {
        self.plants.iter().filter_map(Slot::plant).find(|p| p.name == name)
    }

    pub fn find_plant_mut(&mut self, name: &str) -> Option<&mut Plant> {
        self.plants.iter_mut().filter_map(Slot::plant_mut).find(|p| p.name == name)
    }

    /// Put a plant into the first empty slot, or append while below capacity.
    /// Returns the slot index used.
    pub fn place(&mut self, plant: Plant) -> Result<usize, PlaceError> {
        if self.find_plant(&plant.name).is_some() {
            return Err(PlaceError::Duplicate);
        }
        let index = match self.plants.iter().position(|s| matches!(s, Slot::Empty)) {
            Some(i) => {
                self.plants[i] = Slot::Occupied(plant);
                i
            }
            None if self.plants.len() < self.slots as usize => {
                self.plants.push(Slot::Occupied(plant));
                self.plants.len() - 1
            }
            None => return Err(PlaceError::Full),
        };
        self.updated_at = Utc::now();
        Ok(index)
    }

    /// Empty the slot holding `name`. Returns false when no such plant is present.
    pub fn vacate(&mut self, name: &str) -> bool {
        let slot = self
            .plants
            .iter_mut()
            .find(|s| s.plant().map(|p| p.name == name).unwrap_or(false));
        match slot {
            Some(slot) => {
                *slot = Slot::Empty;
                self.updated_at = Utc::now();
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.plants.clear();
        self.updated_at = Utc::now();
    }
}

#[derive(Clone, Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HubInput {
    pub name: String,
    pub location: String,
    pub slots: u32,
    #[serde(default)]
    pub plants: Option<Vec<PlantInput>>,
}

impl HubInput {
    /// Build the hub by placing each listed plant in turn, so the capacity and
    /// per-hub name rules hold exactly as for `POST /hub/:username/:hub`.
    pub fn into_hub(self) -> Result<Hub, PlaceError> {
        let mut hub = Hub::new(self.name, self.location, self.slots);
        for input in self.plants.unwrap_or_default() {
            hub.place(input.into_plant())?;
        }
        Ok(hub)
    }
}

/// Body of `PUT /hub/:username/:hub`.
#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct CreateHub {
    pub location: String,
    pub slots: u32,
}

/// One entry of `GET /hubs/:username`.
#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct HubView {
    pub hub_name: String,
    #[schema(value_type = Vec<Option<Plant>>)]
    pub plants: Vec<Slot>,
    pub location: String,
    pub slots: u32,
}

impl From<&Hub> for HubView {
    fn from(hub: &Hub) -> Self {
        HubView {
            hub_name: hub.name.clone(),
            plants: hub.plants.clone(),
            location: hub.location.clone(),
            slots: hub.slots,
        }
    }
}

/// Slot projection used by `GET /hub/:username/:hub`.
#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct PlantSummary {
    pub name: String,
    #[serde(rename = "type")]
    pub plant_type: Option<String>,
    pub description: Option<String>,
}

/// Empty slots stay in place as `None`.
pub type HubSummary = Vec<Option<PlantSummary>>;

pub fn summarize(hub: &Hub) -> HubSummary {
    hub.plants
        .iter()
        .map(|slot| {
            slot.plant().map(|p| PlantSummary {
                name: p.name.clone(),
                plant_type: p.plant_type.clone(),
                description: p.description.clone(),
            })
        })
        .collect()
}
