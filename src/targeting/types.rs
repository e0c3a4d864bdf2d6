//! Core types for the targeting document.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A resolved point in WGS84 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Shift north (positive) or south (negative) by `delta` degrees.
    pub fn shift_lat(self, delta: f64) -> Self {
        Self::new(self.lat + delta, self.lng)
    }

    /// Shift east (positive) or west (negative) by `delta` degrees.
    pub fn shift_lng(self, delta: f64) -> Self {
        Self::new(self.lat, self.lng + delta)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5}, {:.5}", self.lat, self.lng)
    }
}

/// Angular displacement, in degrees, used to place the exclusion ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExclusionOffset {
    pub d_lat: f64,
    pub d_lng: f64,
}

/// Radius of every zone, as the Marketing API expects it (a string).
pub const ZONE_RADIUS: &str = "1";
pub const ZONE_DISTANCE_UNIT: &str = "kilometer";

/// A circular custom location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Zone {
    pub latitude: f64,
    pub longitude: f64,
    pub radius: &'static str,
    pub distance_unit: &'static str,
}

impl Zone {
    /// A 1 km circle centred on `center`.
    pub fn around(center: Coordinate) -> Self {
        Self {
            latitude: center.lat,
            longitude: center.lng,
            radius: ZONE_RADIUS,
            distance_unit: ZONE_DISTANCE_UNIT,
        }
    }

    pub fn center(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// A `geo_locations` / `excluded_geo_locations` group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoLocations {
    pub custom_locations: Vec<Zone>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_types: Option<Vec<&'static str>>,
}

/// A Facebook interest (or work position / employer) used for audience layering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interest {
    pub id: String,
    pub name: String,
}

/// The ad-set `targeting` document.
///
/// Field order matches the wire layout the Marketing API is fed; serde keeps
/// declaration order, so do not reorder.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetingSpec {
    pub excluded_geo_locations: GeoLocations,
    pub geo_locations: GeoLocations,
    pub publisher_platforms: &'static [&'static str],
    pub facebook_positions: &'static [&'static str],
    pub instagram_positions: &'static [&'static str],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interests: Option<Vec<Interest>>,
}

impl TargetingSpec {
    pub fn inclusion_zones(&self) -> &[Zone] {
        &self.geo_locations.custom_locations
    }

    pub fn exclusion_zones(&self) -> &[Zone] {
        &self.excluded_geo_locations.custom_locations
    }

    /// Layer interest targeting on top of the geo targeting.
    /// An empty list leaves the document untouched.
    pub fn with_interests(mut self, interests: Vec<Interest>) -> Self {
        if !interests.is_empty() {
            self.interests = Some(interests);
        }
        self
    }

    /// Compact JSON, as sent in the `targeting` form field.
    ///
    /// No whitespace after `,` or `:`. The Graph API parses the document, so
    /// only key order and values are significant on the wire.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
