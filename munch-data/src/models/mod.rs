//! Data models
//!
//! Records decoded from the discovery API, shared between the search,
//! place and recency layers. Wire field names are camelCase.

pub mod hour;
pub mod image;
pub mod location;
pub mod place;
pub mod tag;

// Re-exports
pub use hour::*;
pub use image::*;
pub use location::*;
pub use place::*;
pub use tag::*;
