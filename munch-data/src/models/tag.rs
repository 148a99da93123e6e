//! Tag Model

use serde::{Deserialize, Serialize};

/// Tag type enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TagType {
    Food,
    Cuisine,
    Establishment,
    Amenities,
    Timing,
    /// Defensive decoding: any unrecognized tag type
    #[serde(other)]
    Other,
}

/// Tag attached to a place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub tag_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub tag_type: TagType,

    pub names: Option<Vec<String>>,
    pub created_millis: Option<i64>,
    pub updated_millis: Option<i64>,
}
