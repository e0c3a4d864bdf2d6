//! Core types for the location subsystem.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::targeting::Coordinate;

/// How a location was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocationSource {
    GoogleMaps,
    Clearbit,
}

impl fmt::Display for LocationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GoogleMaps => write!(f, "Google Maps"),
            Self::Clearbit => write!(f, "Clearbit"),
        }
    }
}

/// Which kind of input list is being resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolveStrategy {
    /// Free-text postal address, looked up via Places text search.
    Address,
    /// Company web domain, looked up via Clearbit.
    Domain,
}

impl fmt::Display for ResolveStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Address => write!(f, "address"),
            Self::Domain => write!(f, "domain"),
        }
    }
}

/// A successfully resolved input entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedLocation {
    /// The line from the input list, as given.
    pub input: String,
    pub coordinate: Coordinate,
    pub source: LocationSource,
    /// Formatted address or company name from the provider.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// ISO 3166-1 alpha-2 country code, when the provider reports one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
}

/// Why an entry produced no coordinate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("HTTP status {0}")]
    HttpStatus(u16),
    #[error("Lookup rejected: {0}")]
    Rejected(String),
    #[error("Location not found: '{0}'")]
    NotFound(String),
    #[error("No geo data for '{0}'")]
    MissingGeo(String),
    #[error("'{domain}' is located in {country_code}, not US")]
    OutsideUnitedStates { domain: String, country_code: String },
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
    #[error("{0} is not configured")]
    MissingCredential(&'static str),
}

impl From<ureq::Error> for LocationError {
    fn from(e: ureq::Error) -> Self {
        match e {
            ureq::Error::Status(code, _) => Self::HttpStatus(code),
            ureq::Error::Transport(t) => Self::Network(t.to_string()),
        }
    }
}

impl Serialize for LocationError {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

/// An input entry that was dropped from the batch, and why.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolveFailure {
    pub input: String,
    pub reason: LocationError,
}
