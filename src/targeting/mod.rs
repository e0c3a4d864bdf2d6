//! Geo-targeting assembly.
//!
//! Turns resolved coordinates into the ad-set `targeting` document: one
//! inclusion circle per coordinate plus a ring of four exclusion circles
//! around it, so delivery covers the neighbourhood but not the building.

pub mod assembler;
pub mod types;

pub use assembler::{assemble, build_exclusion_ring, BLOCK_EXCLUSION};
pub use types::{Coordinate, ExclusionOffset, GeoLocations, Interest, TargetingSpec, Zone};
