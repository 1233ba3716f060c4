//! Qualitative attribute entries: a 0-10 condition score, free-text tags and an optional photo.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImageOfTheDay {
    pub data: Vec<u8>,
    pub content_type: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttributeEntry {
    pub id: Uuid,
    /// Intended range 0-10, not enforced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default)]
    pub attributes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_of_the_day: Option<ImageOfTheDay>,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttributeInput {
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub attributes: Option<Vec<String>>,
}

impl AttributeInput {
    pub fn into_entry(self) -> AttributeEntry {
        AttributeEntry {
            id: Uuid::new_v4(),
            score: self.score,
            attributes: self.attributes.unwrap_or_default(),
            image_of_the_day: None,
            created_at: Utc::now(),
        }
    }
}
