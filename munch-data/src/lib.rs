//! Shared data model for the munch client
//!
//! Typed records decoded from the discovery API: places, business hours,
//! locations, tags and the search query. Decoding is defensive across the
//! whole model: unrecognized enum strings map to a catch-all variant
//! instead of failing the record.

pub mod models;
pub mod search;
pub mod util;

// Re-exports
pub use models::{Day, Grouped, Hour, HourError, OpenState, Place, Schedule};
pub use search::SearchQuery;
pub use serde::{Deserialize, Serialize};
