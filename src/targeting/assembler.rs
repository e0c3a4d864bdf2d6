//! Targeting assembly: inclusion circles plus a four-point exclusion ring.
//!
//! Pure and deterministic. No I/O, no clock, no randomness, so the same
//! coordinates always serialize to the same bytes.

use super::types::{Coordinate, ExclusionOffset, GeoLocations, TargetingSpec, Zone};

/// Roughly one city block at mid latitudes.
pub const BLOCK_EXCLUSION: ExclusionOffset = ExclusionOffset {
    d_lat: 0.0099,
    d_lng: 0.01391,
};

const LOCATION_TYPE_RECENT: &str = "recent";
const PUBLISHER_PLATFORMS: &[&str] = &["facebook", "instagram"];
const FACEBOOK_POSITIONS: &[&str] = &["feed"];
const INSTAGRAM_POSITIONS: &[&str] = &["stream"];

/// Four exclusion zones around `c`: north, south, east, west (in that order).
pub fn build_exclusion_ring(c: Coordinate) -> [Zone; 4] {
    let ExclusionOffset { d_lat, d_lng } = BLOCK_EXCLUSION;
    [
        Zone::around(c.shift_lat(d_lat)),
        Zone::around(c.shift_lat(-d_lat)),
        Zone::around(c.shift_lng(d_lng)),
        Zone::around(c.shift_lng(-d_lng)),
    ]
}

/// Assemble the targeting document for `coordinates`, preserving input order.
///
/// `interest_label` is accepted but not written into the document; interest
/// layering is opt-in via [`TargetingSpec::with_interests`].
pub fn assemble(coordinates: &[Coordinate], interest_label: &str) -> TargetingSpec {
    let _ = interest_label;

    let excluded: Vec<Zone> = coordinates
        .iter()
        .flat_map(|&c| build_exclusion_ring(c))
        .collect();
    let included: Vec<Zone> = coordinates.iter().map(|&c| Zone::around(c)).collect();

    TargetingSpec {
        excluded_geo_locations: GeoLocations {
            custom_locations: excluded,
            location_types: None,
        },
        geo_locations: GeoLocations {
            custom_locations: included,
            location_types: Some(vec![LOCATION_TYPE_RECENT]),
        },
        publisher_platforms: PUBLISHER_PLATFORMS,
        facebook_positions: FACEBOOK_POSITIONS,
        instagram_positions: INSTAGRAM_POSITIONS,
        interests: None,
    }
}
