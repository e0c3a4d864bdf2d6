//! Ad-level insights for the configured campaign.

use serde::Deserialize;

use super::{GraphClient, GraphError};

pub const DEFAULT_INSIGHT_FIELDS: &[&str] = &["impressions"];

#[derive(Deserialize)]
struct InsightsResponse {
    #[serde(default)]
    data: Vec<serde_json::Value>,
}

impl GraphClient {
    /// `GET <campaign>/insights?level=ad&fields=...`, one row per ad.
    pub fn campaign_insights(&self, fields: &[&str]) -> Result<Vec<serde_json::Value>, GraphError> {
        let campaign_id = self.config.campaign_id()?;
        let token = self.config.access_token()?;
        let fields = if fields.is_empty() { DEFAULT_INSIGHT_FIELDS } else { fields };

        let response: InsightsResponse = Self::read_json(
            self.agent
                .get(&self.url(&format!("{}/insights", campaign_id)))
                .query("level", "ad")
                .query("fields", &fields.join(","))
                .query("access_token", token)
                .call(),
        )?;

        Ok(response.data)
    }
}
