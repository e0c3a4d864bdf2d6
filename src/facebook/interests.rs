//! Targeting search: interests, job titles and employers by keyword.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use tracing::debug;

use super::{GraphClient, GraphError};
use crate::targeting::Interest;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterestKind {
    Interest,
    WorkPosition,
    Employer,
}

impl InterestKind {
    /// Value of the `type` parameter on `GET /search`.
    pub fn search_type(self) -> &'static str {
        match self {
            Self::Interest => "adinterest",
            Self::WorkPosition => "adworkposition",
            Self::Employer => "adworkemployer",
        }
    }
}

impl fmt::Display for InterestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Interest => write!(f, "interest"),
            Self::WorkPosition => write!(f, "position"),
            Self::Employer => write!(f, "employer"),
        }
    }
}

impl FromStr for InterestKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "interest" | "adinterest" => Ok(Self::Interest),
            "position" | "job" | "adworkposition" => Ok(Self::WorkPosition),
            "employer" | "adworkemployer" => Ok(Self::Employer),
            _ => Err(format!(
                "Unknown search kind '{}'. Use 'interest', 'position' or 'employer'.",
                s
            )),
        }
    }
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<Interest>,
}

impl GraphClient {
    /// Look up targeting entities matching `query`.
    pub fn search_interests(&self, kind: InterestKind, query: &str) -> Result<Vec<Interest>, GraphError> {
        let token = self.config.access_token()?;
        debug!(%kind, query, "graph targeting search");

        let response: SearchResponse = Self::read_json(
            self.agent
                .get(&self.url("search"))
                .query("type", kind.search_type())
                .query("q", query)
                .query("access_token", token)
                .call(),
        )?;

        Ok(response.data)
    }
}
