//! Place Model
//!
//! The central discovery record. Doubles as the payload of the
//! recent-places cache, so optional fields default on decode: a cached
//! record written before a field existed still decodes.

use serde::{Deserialize, Serialize};

use super::{Area, Hour, HourError, Image, Location, Schedule, Tag};

/// Place record served by the discovery API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub place_id: String,
    pub status: Status,

    pub name: String,
    #[serde(default)]
    pub names: Vec<String>,
    #[serde(default)]
    pub tags: Vec<Tag>,

    pub phone: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,

    pub menu: Option<Menu>,
    pub price: Option<Price>,
    pub counts: Option<Counts>,

    #[serde(default)]
    pub location: Location,

    #[serde(default)]
    pub hours: Vec<Hour>,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub areas: Vec<Area>,

    pub created_millis: Option<i64>,
    pub updated_millis: Option<i64>,

    pub ranking: Option<f64>,
}

impl Place {
    /// Decode the raw hour rows into a queryable schedule
    pub fn schedule(&self) -> Result<Schedule, HourError> {
        Schedule::from_hours(&self.hours)
    }
}

/// Operating status enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusType {
    Open,
    Renovation,
    Closed,
    Moved,
    /// Defensive decoding: any unrecognized status
    #[serde(other)]
    Other,
}

/// Operating status with the optional forwarding record for moved places
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    #[serde(rename = "type")]
    pub status_type: StatusType,
    pub moved: Option<Moved>,
    pub updated_millis: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Moved {
    pub place_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Menu {
    pub url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    pub per_pax: Option<f64>,
}

/// Content rollups shown on the place page
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Counts {
    pub article: Option<ArticleCounts>,
    pub instagram: Option<InstagramCounts>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArticleCounts {
    pub profile: i64,
    pub single: i64,
    pub list: i64,
    pub total: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InstagramCounts {
    pub profile: i64,
    pub total: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Day, OpenState};
    use chrono::NaiveDate;

    fn decode_place(json: serde_json::Value) -> Place {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_decode_minimal_record() {
        let place = decode_place(serde_json::json!({
            "placeId": "p-1",
            "status": {"type": "open"},
            "name": "Sin Kee",
        }));

        assert_eq!(place.place_id, "p-1");
        assert_eq!(place.status.status_type, StatusType::Open);
        assert!(place.hours.is_empty());
        assert!(place.location.address.is_none());
    }

    #[test]
    fn test_status_defensive_decode() {
        let place = decode_place(serde_json::json!({
            "placeId": "p-2",
            "status": {"type": "hibernating"},
            "name": "Bear Cafe",
        }));
        assert_eq!(place.status.status_type, StatusType::Other);
    }

    #[test]
    fn test_moved_status_carries_forwarding_id() {
        let place = decode_place(serde_json::json!({
            "placeId": "p-3",
            "status": {"type": "moved", "moved": {"placeId": "p-4"}},
            "name": "Wanderer",
        }));
        assert_eq!(place.status.status_type, StatusType::Moved);
        assert_eq!(place.status.moved.unwrap().place_id, "p-4");
    }

    #[test]
    fn test_schedule_from_hours() {
        let place = decode_place(serde_json::json!({
            "placeId": "p-5",
            "status": {"type": "open"},
            "name": "Nine To Five",
            "hours": [
                {"day": "mon", "open": "09:00", "close": "17:00"}
            ],
        }));

        let schedule = place.schedule().unwrap();
        assert_eq!(schedule.grouped().day(Day::Mon), "9:00am - 5:00pm");

        // 2018-06-18 was a Monday
        let noon = NaiveDate::from_ymd_opt(2018, 6, 18)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        assert_eq!(schedule.state_at(noon, 0, 0), OpenState::Open);
    }

    #[test]
    fn test_roundtrip_preserves_record() {
        let place = decode_place(serde_json::json!({
            "placeId": "p-6",
            "status": {"type": "open"},
            "name": "Roundabout",
            "tags": [{"tagId": "t-1", "name": "Hawker", "type": "Establishment"}],
            "price": {"perPax": 12.5},
            "hours": [{"day": "sat", "open": "08:00", "close": "15:00"}],
        }));

        let encoded = serde_json::to_string(&place).unwrap();
        let decoded: Place = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, place);
    }
}
