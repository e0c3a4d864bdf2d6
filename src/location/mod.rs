//! Location resolution for the batch pipelines.
//!
//! Turns an address (Google Places text search) or a company web domain
//! (Clearbit) into a coordinate, reporting why an entry could not be used.

pub mod providers;
pub mod resolver;
pub mod types;

pub use resolver::{http_agent, Geocoder, LocationResolver};
pub use types::{LocationError, LocationSource, ResolveFailure, ResolveStrategy, ResolvedLocation};
