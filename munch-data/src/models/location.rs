//! Location Models
//!
//! Address, landmark and area records attached to places. `lat_lng` is the
//! API's `"lat,lng"` string form, passed through untouched.

use serde::{Deserialize, Serialize};

use super::{Hour, Image};

/// Place address and geography
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub address: Option<String>,
    pub street: Option<String>,
    pub unit_number: Option<String>,
    pub neighbourhood: Option<String>,

    pub city: Option<String>,
    pub country: Option<String>,
    pub postcode: Option<String>,

    pub lat_lng: Option<String>,
    pub polygon: Option<Polygon>,

    #[serde(default)]
    pub landmarks: Vec<Landmark>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub points: Vec<String>,
}

/// Landmark type enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LandmarkType {
    Train,
    /// Defensive decoding: any unrecognized landmark type
    #[serde(other)]
    Other,
}

/// Landmark near a place, used for wayfinding copy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Landmark {
    pub landmark_id: String,

    #[serde(rename = "type")]
    pub landmark_type: LandmarkType,
    pub name: String,
    #[serde(default)]
    pub location: Location,

    pub created_millis: Option<i64>,
    pub updated_millis: Option<i64>,
}

/// Area type enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AreaType {
    City,
    Region,
    Cluster,
    /// Defensive decoding: any unrecognized area type
    #[serde(other)]
    Other,
}

/// Named area a place belongs to (city, region or curated cluster)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Area {
    pub area_id: String,

    #[serde(rename = "type")]
    pub area_type: AreaType,
    pub name: String,
    pub names: Option<Vec<String>>,

    pub website: Option<String>,
    pub description: Option<String>,

    pub images: Option<Vec<Image>>,
    pub hour: Option<Vec<Hour>>,
    pub counts: Option<AreaCounts>,

    #[serde(default)]
    pub location: Location,

    pub created_millis: Option<i64>,
    pub updated_millis: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AreaCounts {
    pub total: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landmark_type_defensive_decode() {
        let decoded: LandmarkType = serde_json::from_str(r#""train""#).unwrap();
        assert_eq!(decoded, LandmarkType::Train);

        let decoded: LandmarkType = serde_json::from_str(r#""bus""#).unwrap();
        assert_eq!(decoded, LandmarkType::Other);
    }

    #[test]
    fn test_area_type_defensive_decode() {
        let decoded: AreaType = serde_json::from_str(r#""City""#).unwrap();
        assert_eq!(decoded, AreaType::City);

        let decoded: AreaType = serde_json::from_str(r#""Galaxy""#).unwrap();
        assert_eq!(decoded, AreaType::Other);
    }
}
