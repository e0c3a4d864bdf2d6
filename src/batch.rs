//! One batch run: load a list, resolve every entry, assemble, publish once.
//!
//! Entries that fail to resolve are dropped from the targeting but kept in
//! the report with the reason, so nothing disappears silently.

use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::{Config, ConfigError};
use crate::facebook::{CampaignType, GraphError, PublishAck, Publisher};
use crate::location::{Geocoder, ResolveFailure, ResolveStrategy, ResolvedLocation};
use crate::targeting::{assemble, Coordinate, Interest, TargetingSpec};

/// Pause after the ad-set request so back-to-back runs stay under rate limits.
pub const DEFAULT_PUBLISH_DELAY: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("Cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Cannot serialize targeting: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Publish failed: {0}")]
    Publish(#[from] GraphError),
}

#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub campaign: CampaignType,
    /// Free-text audience label; only used through `interests`.
    pub interest_label: String,
    /// Interest targeting to layer on, already looked up. Empty means none.
    pub interests: Vec<Interest>,
    /// Ad-set name; defaults to `multi-adset-<resolved count>`.
    pub name: Option<String>,
    /// Assemble but do not publish.
    pub dry_run: bool,
    pub publish_delay: Duration,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            campaign: CampaignType::Traffic,
            interest_label: String::new(),
            interests: Vec::new(),
            name: None,
            dry_run: false,
            publish_delay: DEFAULT_PUBLISH_DELAY,
        }
    }
}

/// Everything a run did, printed as JSON at the end.
#[derive(Debug, Serialize)]
pub struct BatchReport {
    pub started_at: DateTime<Utc>,
    pub strategy: ResolveStrategy,
    pub campaign: CampaignType,
    pub ad_set_name: String,
    pub entries: usize,
    pub resolved: Vec<ResolvedLocation>,
    pub failures: Vec<ResolveFailure>,
    pub targeting: TargetingSpec,
    pub dry_run: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ad_set: Option<PublishAck>,
}

/// Fail fast on credentials the run will need, before any lookup is made.
pub fn preflight(config: &Config, strategy: ResolveStrategy, options: &BatchOptions) -> Result<(), ConfigError> {
    match strategy {
        ResolveStrategy::Address if config.google_maps_api_key.is_none() => {
            return Err(ConfigError::Missing("GOOGLE_MAPS_API_KEY"));
        }
        ResolveStrategy::Domain if config.clearbit_access_token.is_none() => {
            return Err(ConfigError::Missing("CLEARBIT_ACCESS_TOKEN"));
        }
        _ => {}
    }

    if !options.dry_run {
        config.access_token()?;
        config.ad_account()?;
        config.campaign_id()?;
        if options.campaign == CampaignType::Leads {
            config.page_id()?;
        }
    }
    Ok(())
}

/// Read a newline-delimited list. Lines are trimmed; blank lines are skipped.
pub fn load_list(path: &Path) -> Result<Vec<String>, BatchError> {
    let data = fs::read_to_string(path).map_err(|source| BatchError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(data
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect())
}

/// Resolve every entry in order, splitting successes from failures.
pub fn resolve_all<G: Geocoder + ?Sized>(
    geocoder: &G,
    strategy: ResolveStrategy,
    entries: &[String],
) -> (Vec<ResolvedLocation>, Vec<ResolveFailure>) {
    let mut resolved = Vec::new();
    let mut failures = Vec::new();

    for input in entries {
        match geocoder.resolve(strategy, input) {
            Ok(loc) => {
                info!(input = %input, coordinate = %loc.coordinate, source = %loc.source, "resolved");
                resolved.push(loc);
            }
            Err(reason) => {
                warn!(input = %input, %reason, "skipping entry");
                failures.push(ResolveFailure {
                    input: input.clone(),
                    reason,
                });
            }
        }
    }

    (resolved, failures)
}

/// Run one batch end to end.
pub fn run<G, P>(
    geocoder: &G,
    publisher: &P,
    strategy: ResolveStrategy,
    entries: &[String],
    options: &BatchOptions,
) -> Result<BatchReport, BatchError>
where
    G: Geocoder + ?Sized,
    P: Publisher + ?Sized,
{
    let started_at = Utc::now();
    info!(%strategy, entries = entries.len(), campaign = %options.campaign, "starting batch");

    let (resolved, failures) = resolve_all(geocoder, strategy, entries);
    if !failures.is_empty() {
        warn!(
            dropped = failures.len(),
            kept = resolved.len(),
            "some entries were dropped from the batch"
        );
    }

    let coordinates: Vec<Coordinate> = resolved.iter().map(|loc| loc.coordinate).collect();
    let targeting = assemble(&coordinates, &options.interest_label).with_interests(options.interests.clone());

    let ad_set_name = options
        .name
        .clone()
        .unwrap_or_else(|| format!("multi-adset-{}", coordinates.len()));

    let ad_set = if options.dry_run {
        info!(ad_set = %ad_set_name, "dry run, not publishing");
        None
    } else {
        let payload = targeting.to_json()?;
        let result = publisher.publish(&ad_set_name, &payload, options.campaign);
        thread::sleep(options.publish_delay);
        Some(result?)
    };

    Ok(BatchReport {
        started_at,
        strategy,
        campaign: options.campaign,
        ad_set_name,
        entries: entries.len(),
        resolved,
        failures,
        targeting,
        dry_run: options.dry_run,
        ad_set,
    })
}
