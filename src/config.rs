//! Run configuration: credentials, account identifiers and endpoints.
//!
//! Built once at startup from the environment (after loading `.env`) and
//! passed by reference to the resolver, publisher and Graph clients.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_GOOGLE_MAPS_BASE_URL: &str = "https://maps.googleapis.com";
pub const DEFAULT_CLEARBIT_BASE_URL: &str = "https://company.clearbit.com";
pub const DEFAULT_GRAPH_BASE_URL: &str = "https://graph.facebook.com";
pub const DEFAULT_GRAPH_VERSION: &str = "v3.3";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not set (add it to the environment or .env)")]
    Missing(&'static str),
    #[error("{var} has an invalid value '{value}'")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub google_maps_api_key: Option<String>,
    pub clearbit_access_token: Option<String>,
    pub facebook_access_token: Option<String>,
    /// Ad account id without the `act_` prefix.
    pub facebook_ad_account: Option<String>,
    pub facebook_campaign_id: Option<String>,
    /// Page promoted by lead-generation ad sets.
    pub facebook_page_id: Option<String>,
    pub graph_version: String,
    /// Attach interest targeting to the assembled document.
    pub layer_interests: bool,
    pub google_maps_base_url: String,
    pub clearbit_base_url: String,
    pub graph_base_url: String,
    pub http_timeout: Duration,
}

impl Config {
    /// Read the process environment. Call [`load_dotenv`] first.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let layer_interests = match get("FACEBOOK_LAYER_INTERESTS") {
            Some(v) => parse_bool("FACEBOOK_LAYER_INTERESTS", &v)?,
            None => false,
        };

        let http_timeout = match get("GEO_ADSET_HTTP_TIMEOUT_SECS") {
            Some(v) => match v.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::Invalid {
                        var: "GEO_ADSET_HTTP_TIMEOUT_SECS",
                        value: v,
                    })
                }
            },
            None => Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        };

        Ok(Self {
            google_maps_api_key: get("GOOGLE_MAPS_API_KEY"),
            clearbit_access_token: get("CLEARBIT_ACCESS_TOKEN"),
            facebook_access_token: get("FACEBOOK_ACCESS_TOKEN"),
            facebook_ad_account: get("FACEBOOK_AD_ACCOUNT")
                .map(|a| a.trim_start_matches("act_").to_string()),
            facebook_campaign_id: get("FACEBOOK_CAMPAIGN_ID"),
            facebook_page_id: get("FACEBOOK_PAGE_ID"),
            graph_version: get("FACEBOOK_GRAPH_VERSION").unwrap_or_else(|| DEFAULT_GRAPH_VERSION.into()),
            layer_interests,
            google_maps_base_url: get("GOOGLE_MAPS_BASE_URL")
                .unwrap_or_else(|| DEFAULT_GOOGLE_MAPS_BASE_URL.into()),
            clearbit_base_url: get("CLEARBIT_BASE_URL").unwrap_or_else(|| DEFAULT_CLEARBIT_BASE_URL.into()),
            graph_base_url: get("FACEBOOK_GRAPH_BASE_URL").unwrap_or_else(|| DEFAULT_GRAPH_BASE_URL.into()),
            http_timeout,
        })
    }

    pub fn access_token(&self) -> Result<&str, ConfigError> {
        required(&self.facebook_access_token, "FACEBOOK_ACCESS_TOKEN")
    }

    pub fn ad_account(&self) -> Result<&str, ConfigError> {
        required(&self.facebook_ad_account, "FACEBOOK_AD_ACCOUNT")
    }

    pub fn campaign_id(&self) -> Result<&str, ConfigError> {
        required(&self.facebook_campaign_id, "FACEBOOK_CAMPAIGN_ID")
    }

    pub fn page_id(&self) -> Result<&str, ConfigError> {
        required(&self.facebook_page_id, "FACEBOOK_PAGE_ID")
    }

    /// `{graph_base}/{version}`
    pub fn graph_root(&self) -> String {
        format!("{}/{}", self.graph_base_url.trim_end_matches('/'), self.graph_version)
    }
}

fn required<'a>(value: &'a Option<String>, var: &'static str) -> Result<&'a str, ConfigError> {
    value.as_deref().ok_or(ConfigError::Missing(var))
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            var,
            value: value.to_string(),
        }),
    }
}

/// Load a `.env` file into the process environment.
///
/// Searches the working directory and its parents first, then
/// `<config_dir>/geo-adset/.env`. Variables already set are not overridden.
pub fn load_dotenv() -> Option<PathBuf> {
    if let Ok(path) = dotenvy::dotenv() {
        return Some(path);
    }
    let fallback = dirs::config_dir()?.join("geo-adset").join(".env");
    if fallback.is_file() && dotenvy::from_path(&fallback).is_ok() {
        return Some(fallback);
    }
    None
}
