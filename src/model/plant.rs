//! Plants and their embedded histories.

use super::{AttributeEntry, SensorInput, SensorReading};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Plant {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plant_type: Option<String>,
    #[serde(default)]
    pub sensor: Vec<SensorReading>,
    #[serde(default)]
    pub attributes: Vec<AttributeEntry>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Plant {
    pub fn push_reading(&mut self, reading: SensorReading) {
        self.sensor.push(reading);
        self.updated_at = Utc::now();
    }

    pub fn push_attribute(&mut self, entry: AttributeEntry) {
        self.attributes.push(entry);
        self.updated_at = Utc::now();
    }
}

/// Body used wherever a plant is created: user, hub and catalog paths.
#[derive(Clone, Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlantInput {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub plant_type: Option<String>,
    #[serde(default)]
    pub sensor: Option<Vec<SensorInput>>,
}

impl PlantInput {
    pub fn into_plant(self) -> Plant {
        let now = Utc::now();
        Plant {
            name: self.name,
            description: self.description,
            plant_type: self.plant_type,
            sensor: self
                .sensor
                .unwrap_or_default()
                .into_iter()
                .map(SensorInput::into_reading)
                .collect(),
            attributes: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Find a plant by exact, case-sensitive name.
pub fn find_plant<'a>(plants: &'a [Plant], name: &str) -> Option<&'a Plant> {
    plants.iter().find(|p| p.name == name)
}

pub fn find_plant_mut<'a>(plants: &'a mut [Plant], name: &str) -> Option<&'a mut Plant> {
    plants.iter_mut().find(|p| p.name == name)
}
