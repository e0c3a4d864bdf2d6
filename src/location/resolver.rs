//! Location resolver — picks the provider for each input entry.
//!
//! Address flow: Places text search → first result → error
//! Domain flow:  Clearbit company lookup → US filter → error

use std::time::Duration;

use tracing::debug;

use super::providers;
use super::types::{LocationError, ResolveStrategy, ResolvedLocation};
use crate::config::Config;

/// Anything that can turn an address or a company domain into a coordinate.
pub trait Geocoder {
    fn resolve_by_address(&self, address: &str) -> Result<ResolvedLocation, LocationError>;

    fn resolve_by_domain(&self, domain: &str) -> Result<ResolvedLocation, LocationError>;

    fn resolve(&self, strategy: ResolveStrategy, input: &str) -> Result<ResolvedLocation, LocationError> {
        match strategy {
            ResolveStrategy::Address => self.resolve_by_address(input),
            ResolveStrategy::Domain => self.resolve_by_domain(input),
        }
    }
}

/// Resolver backed by the public Google Maps and Clearbit endpoints.
pub struct LocationResolver {
    agent: ureq::Agent,
    google_base_url: String,
    google_api_key: Option<String>,
    clearbit_base_url: String,
    clearbit_token: Option<String>,
}

impl LocationResolver {
    pub fn new(config: &Config) -> Self {
        Self {
            agent: http_agent(config.http_timeout),
            google_base_url: config.google_maps_base_url.clone(),
            google_api_key: config.google_maps_api_key.clone(),
            clearbit_base_url: config.clearbit_base_url.clone(),
            clearbit_token: config.clearbit_access_token.clone(),
        }
    }
}

impl Geocoder for LocationResolver {
    fn resolve_by_address(&self, address: &str) -> Result<ResolvedLocation, LocationError> {
        let key = self
            .google_api_key
            .as_deref()
            .ok_or(LocationError::MissingCredential("GOOGLE_MAPS_API_KEY"))?;
        debug!(address, "places text search");
        providers::places_text_search(&self.agent, &self.google_base_url, key, address)
    }

    fn resolve_by_domain(&self, domain: &str) -> Result<ResolvedLocation, LocationError> {
        let token = self
            .clearbit_token
            .as_deref()
            .ok_or(LocationError::MissingCredential("CLEARBIT_ACCESS_TOKEN"))?;
        debug!(domain, "clearbit company lookup");
        providers::clearbit_find(&self.agent, &self.clearbit_base_url, token, domain)
    }
}

/// Blocking HTTP agent shared by every outbound call of a run.
pub fn http_agent(timeout: Duration) -> ureq::Agent {
    ureq::AgentBuilder::new()
        .timeout(timeout)
        .user_agent(concat!("geo-adset/", env!("CARGO_PKG_VERSION")))
        .build()
}
