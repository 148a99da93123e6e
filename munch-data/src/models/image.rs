//! Image Model

use serde::{Deserialize, Serialize};

/// Image record with its pre-scaled size variants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub image_id: Option<String>,
    #[serde(default)]
    pub sizes: Vec<ImageSize>,
    pub profile: Option<ImageProfile>,
}

/// A single pre-scaled variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
    pub url: String,
}

/// Source attribution for an image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageProfile {
    #[serde(rename = "type")]
    pub profile_type: Option<String>,
    pub id: Option<String>,
    pub name: Option<String>,
}
