//! Location providers: Google Places text search and Clearbit company lookup.

use super::types::{LocationError, LocationSource, ResolvedLocation};
use crate::targeting::Coordinate;
use base64::Engine as _;
use serde::Deserialize;

/// Only companies headquartered here are kept from domain lookups.
pub const DOMAIN_COUNTRY_FILTER: &str = "US";

// ─── Google Places text search ──────────────────────────────────

#[derive(Deserialize, Debug, Clone)]
pub struct PlacesResponse {
    #[serde(default)]
    pub results: Vec<PlaceResult>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct PlaceResult {
    pub geometry: PlaceGeometry,
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct PlaceGeometry {
    pub location: LatLng,
}

#[derive(Deserialize, Debug, Clone, Copy)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// Look up a free-text address and take the first match.
pub fn places_text_search(
    agent: &ureq::Agent,
    base_url: &str,
    api_key: &str,
    address: &str,
) -> Result<ResolvedLocation, LocationError> {
    let url = format!("{}/maps/api/place/textsearch/json", base_url.trim_end_matches('/'));

    let response = agent
        .get(&url)
        .query("query", address)
        .query("region", "")
        .query("key", api_key)
        .call()?;

    if response.status() != 200 {
        return Err(LocationError::HttpStatus(response.status()));
    }

    let body: PlacesResponse = response
        .into_json()
        .map_err(|e| LocationError::InvalidResponse(e.to_string()))?;

    place_to_resolved(address, body)
}

/// Interpret a Places response for `address`.
pub fn place_to_resolved(address: &str, body: PlacesResponse) -> Result<ResolvedLocation, LocationError> {
    match body.status.as_deref() {
        None | Some("OK") | Some("ZERO_RESULTS") => {}
        Some(other) => {
            let detail = match body.error_message {
                Some(msg) => format!("{} ({})", other, msg),
                None => other.to_string(),
            };
            return Err(LocationError::Rejected(detail));
        }
    }

    let first = body
        .results
        .into_iter()
        .next()
        .ok_or_else(|| LocationError::NotFound(address.to_string()))?;

    let LatLng { lat, lng } = first.geometry.location;

    Ok(ResolvedLocation {
        input: address.to_string(),
        coordinate: Coordinate::new(lat, lng),
        source: LocationSource::GoogleMaps,
        label: first.formatted_address.or(first.name),
        country_code: None,
    })
}

// ─── Clearbit company lookup ────────────────────────────────────

#[derive(Deserialize, Debug, Clone)]
pub struct CompanyResponse {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub geo: Option<CompanyGeo>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CompanyGeo {
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
}

/// Look up a company by web domain.
pub fn clearbit_find(
    agent: &ureq::Agent,
    base_url: &str,
    token: &str,
    domain: &str,
) -> Result<ResolvedLocation, LocationError> {
    let url = format!("{}/v2/companies/find", base_url.trim_end_matches('/'));

    let response = agent
        .get(&url)
        .query("domain", domain)
        .set("Authorization", &basic_auth(token))
        .call()?;

    // 202 means the lookup was queued; there is nothing to use yet.
    if response.status() != 200 {
        return Err(LocationError::HttpStatus(response.status()));
    }

    let body: CompanyResponse = response
        .into_json()
        .map_err(|e| LocationError::InvalidResponse(e.to_string()))?;

    company_to_resolved(domain, body)
}

/// Interpret a Clearbit company record for `domain`, applying the US filter.
pub fn company_to_resolved(domain: &str, body: CompanyResponse) -> Result<ResolvedLocation, LocationError> {
    let geo = body
        .geo
        .ok_or_else(|| LocationError::MissingGeo(domain.to_string()))?;

    let (lat, lng) = match (geo.lat, geo.lng) {
        (Some(lat), Some(lng)) => (lat, lng),
        _ => return Err(LocationError::MissingGeo(domain.to_string())),
    };

    let country_code = geo.country_code.unwrap_or_default();
    if country_code != DOMAIN_COUNTRY_FILTER {
        return Err(LocationError::OutsideUnitedStates {
            domain: domain.to_string(),
            country_code: if country_code.is_empty() { "??".into() } else { country_code },
        });
    }

    let label = match (body.name, geo.city) {
        (Some(name), Some(city)) => Some(format!("{}, {}", name, city)),
        (name, city) => name.or(city),
    };

    Ok(ResolvedLocation {
        input: domain.to_string(),
        coordinate: Coordinate::new(lat, lng),
        source: LocationSource::Clearbit,
        label,
        country_code: Some(country_code),
    })
}

/// HTTP Basic credentials with the API key as user and an empty password.
fn basic_auth(token: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(format!("{}:", token));
    format!("Basic {}", encoded)
}
