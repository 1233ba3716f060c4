//! Sensor readings: immutable, appended to a plant's history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SensorReading {
    pub id: Uuid,
    pub air_humidity: f64,
    pub soil_moisture: f64,
    pub air_temperature: f64,
    pub light_intensity: f64,
    pub timestamp: DateTime<Utc>,
}

/// Body of a new reading. All four measurements are required; ranges are not checked.
#[derive(Clone, Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SensorInput {
    pub air_humidity: f64,
    pub soil_moisture: f64,
    pub air_temperature: f64,
    pub light_intensity: f64,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl SensorInput {
    pub fn into_reading(self) -> SensorReading {
        SensorReading {
            id: Uuid::new_v4(),
            air_humidity: self.air_humidity,
            soil_moisture: self.soil_moisture,
            air_temperature: self.air_temperature,
            light_intensity: self.light_intensity,
            timestamp: self.timestamp.unwrap_or_else(Utc::now),
        }
    }
}
