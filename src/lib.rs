//! Donut geo-targeting for Facebook/Instagram ad sets.
//!
//! Resolves company addresses or web domains to coordinates, surrounds each
//! with a ring of exclusion circles, and creates an ad set targeting the
//! result through the Marketing API.

pub mod batch;
pub mod config;
pub mod facebook;
pub mod location;
pub mod targeting;

#[cfg(test)]
mod test_support;
