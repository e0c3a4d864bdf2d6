//! Facebook Marketing (Graph) API client.
//!
//! Ad-set creation, interest search and campaign insights. All calls are
//! blocking and made once; a non-success status is reported, never retried.

pub mod campaign;
pub mod insights;
pub mod interests;
pub mod publisher;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

use crate::config::{Config, ConfigError};
use crate::location::http_agent;

pub use campaign::CampaignType;
pub use interests::InterestKind;
pub use publisher::{PublishAck, Publisher};

#[derive(Debug, Error)]
pub enum GraphError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Graph API returned {status}: {message}")]
    Status { status: u16, message: String, body: String },
    #[error("Invalid Graph API response: {0}")]
    InvalidResponse(String),
}

#[derive(Deserialize)]
struct GraphErrorEnvelope {
    error: GraphErrorBody,
}

#[derive(Deserialize)]
struct GraphErrorBody {
    message: String,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    code: Option<i64>,
}

/// Pull the human-readable message out of a Graph error body.
fn graph_error_message(body: &str) -> String {
    match serde_json::from_str::<GraphErrorEnvelope>(body) {
        Ok(GraphErrorEnvelope { error }) => match (error.kind, error.code) {
            (Some(kind), Some(code)) => format!("{} ({} #{})", error.message, kind, code),
            (Some(kind), None) => format!("{} ({})", error.message, kind),
            _ => error.message,
        },
        Err(_) if body.trim().is_empty() => "empty response body".into(),
        Err(_) => body.trim().to_string(),
    }
}

/// Client for the Graph endpoints used by a run.
pub struct GraphClient {
    agent: ureq::Agent,
    config: Config,
}

impl GraphClient {
    pub fn new(config: &Config) -> Self {
        Self {
            agent: http_agent(config.http_timeout),
            config: config.clone(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.graph_root(), path.trim_start_matches('/'))
    }

    /// Turn a finished request into a decoded body or a [`GraphError`].
    fn read_json<T: DeserializeOwned>(result: Result<ureq::Response, ureq::Error>) -> Result<T, GraphError> {
        match result {
            Ok(response) => response
                .into_json()
                .map_err(|e| GraphError::InvalidResponse(e.to_string())),
            Err(ureq::Error::Status(status, response)) => {
                let body = response.into_string().unwrap_or_default();
                Err(GraphError::Status {
                    status,
                    message: graph_error_message(&body),
                    body,
                })
            }
            Err(ureq::Error::Transport(t)) => Err(GraphError::Network(t.to_string())),
        }
    }
}
