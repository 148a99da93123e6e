//! Search Query Model
//!
//! `SearchQuery` is both an input and an output value: it is posted to the
//! search service and written back into the recent-searches cache. Equality
//! is semantic: two queries are the same search if their query text,
//! filter and sort agree; paging fields are ignored.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeSet;

use crate::models::{Image, Location};

/// Search request for the places service
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub from: Option<u32>,
    pub size: Option<u32>,

    pub query: Option<String>,
    pub lat_lng: Option<String>,
    pub radius: Option<f64>,

    #[serde(default)]
    pub filter: Filter,
    #[serde(default)]
    pub sort: Sort,
}

impl SearchQuery {
    /// Bumped whenever the serialized shape changes; the recent-searches
    /// namespace embeds it so incompatible cached queries are orphaned
    /// instead of half-decoded.
    pub const SCHEMA_VERSION: u32 = 4;

    /// Stable dedup key for the recency cache: sha256 over the semantic
    /// fields, serialized the same way they are compared
    pub fn recent_key(&self) -> String {
        let mut hasher = Sha256::new();

        hasher.update(serde_json::to_string(&self.query).unwrap_or_default());
        hasher.update(b"\x00");
        hasher.update(serde_json::to_string(&self.filter).unwrap_or_default());
        hasher.update(b"\x00");
        hasher.update(serde_json::to_string(&self.sort).unwrap_or_default());

        format!("{:x}", hasher.finalize())
    }
}

impl Default for SearchQuery {
    fn default() -> Self {
        SearchQuery {
            from: Some(0),
            size: Some(20),
            query: None,
            lat_lng: None,
            radius: None,
            filter: Filter::default(),
            sort: Sort::default(),
        }
    }
}

/// Semantic equality: paging fields excluded
impl PartialEq for SearchQuery {
    fn eq(&self, other: &Self) -> bool {
        self.query == other.query && self.filter == other.filter && self.sort == other.sort
    }
}

/// Search filters; every section is optional and defaults to unfiltered
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Filter {
    #[serde(default)]
    pub price: PriceFilter,
    #[serde(default)]
    pub tag: TagFilter,
    #[serde(default)]
    pub hour: HourFilter,
    pub location: Option<Location>,
    pub containers: Option<Vec<Container>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PriceFilter {
    pub name: Option<String>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Tag ids the results must carry. A sorted set keeps serialization (and
/// hence `recent_key`) order-independent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TagFilter {
    #[serde(default)]
    pub positives: BTreeSet<String>,
}

/// "Open at" filter: either a named preset or an explicit day/time window
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HourFilter {
    pub name: Option<String>,

    pub day: Option<String>,
    pub open: Option<String>,
    pub close: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Sort {
    #[serde(rename = "type")]
    pub sort_type: Option<String>,
}

/// Curated collection a search can be scoped to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub container_type: Option<String>,
    pub name: Option<String>,

    pub images: Option<Vec<Image>>,
    #[serde(default)]
    pub ranking: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_empty_object() {
        let query: SearchQuery = serde_json::from_str("{}").unwrap();
        assert!(query.query.is_none());
        assert!(query.filter.tag.positives.is_empty());
        assert!(query.sort.sort_type.is_none());
    }

    #[test]
    fn test_equality_ignores_paging() {
        let mut a = SearchQuery {
            query: Some("chicken rice".to_string()),
            ..SearchQuery::default()
        };
        let mut b = a.clone();

        a.from = Some(0);
        b.from = Some(40);
        b.size = Some(60);
        assert_eq!(a, b);

        b.query = Some("laksa".to_string());
        assert_ne!(a, b);
    }

    #[test]
    fn test_equality_covers_filter_and_sort() {
        let base = SearchQuery::default();

        let mut tagged = base.clone();
        tagged.filter.tag.positives.insert("halal".to_string());
        assert_ne!(base, tagged);

        let mut sorted = base.clone();
        sorted.sort.sort_type = Some("price_asc".to_string());
        assert_ne!(base, sorted);
    }

    #[test]
    fn test_recent_key_tracks_semantic_equality() {
        let mut a = SearchQuery {
            query: Some("ramen".to_string()),
            ..SearchQuery::default()
        };
        a.filter.tag.positives.insert("Japanese".to_string());
        a.filter.tag.positives.insert("Dinner".to_string());

        // Same semantics, different paging and insertion order
        let mut b = SearchQuery {
            from: Some(20),
            size: Some(40),
            query: Some("ramen".to_string()),
            ..SearchQuery::default()
        };
        b.filter.tag.positives.insert("Dinner".to_string());
        b.filter.tag.positives.insert("Japanese".to_string());

        assert_eq!(a, b);
        assert_eq!(a.recent_key(), b.recent_key());

        let mut c = a.clone();
        c.filter.price.max = Some(30.0);
        assert_ne!(a, c);
        assert_ne!(a.recent_key(), c.recent_key());
    }

    #[test]
    fn test_recent_key_is_hex_digest() {
        let key = SearchQuery::default().recent_key();
        assert_eq!(key.len(), 64);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
