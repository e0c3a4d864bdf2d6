//! Campaign types and the ad-set request parameters each one requires.
//!
//! Facebook rejects ad sets whose optimisation/billing fields do not match the
//! parent campaign's objective, so every campaign type owns its parameter set.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignType {
    /// Link-click traffic campaigns.
    Traffic,
    /// Lead-generation campaigns (promote a page's lead form).
    Leads,
}

impl fmt::Display for CampaignType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Traffic => write!(f, "traffic"),
            Self::Leads => write!(f, "leads"),
        }
    }
}

impl FromStr for CampaignType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "traffic" => Ok(Self::Traffic),
            "leads" | "lead" => Ok(Self::Leads),
            _ => Err(format!("Unknown campaign type '{}'. Use 'traffic' or 'leads'.", s)),
        }
    }
}

/// Everything an ad-set request needs besides the campaign-specific fields.
#[derive(Debug, Clone, Copy)]
pub struct AdSetRequest<'a> {
    pub name: &'a str,
    /// Serialized targeting document.
    pub targeting: &'a str,
    pub campaign_id: &'a str,
    pub access_token: &'a str,
    pub page_id: Option<&'a str>,
}

pub type FormParams = Vec<(&'static str, String)>;

impl CampaignType {
    /// Form fields for `POST act_<account>/adsets`.
    pub fn ad_set_params(self, req: &AdSetRequest<'_>) -> Result<FormParams, ConfigError> {
        match self {
            Self::Traffic => Ok(traffic_params(req)),
            Self::Leads => leads_params(req),
        }
    }
}

fn traffic_params(req: &AdSetRequest<'_>) -> FormParams {
    vec![
        ("name", req.name.to_string()),
        ("optimization_goal", "LINK_CLICKS".into()),
        ("billing_event", "IMPRESSIONS".into()),
        ("bid_strategy", "LOWEST_COST_WITHOUT_CAP".into()),
        ("bid_amount", "100".into()),
        ("status", "ACTIVE".into()),
        ("targeting", req.targeting.to_string()),
        ("campaign_id", req.campaign_id.to_string()),
        ("access_token", req.access_token.to_string()),
    ]
}

fn leads_params(req: &AdSetRequest<'_>) -> Result<FormParams, ConfigError> {
    let page_id = req.page_id.ok_or(ConfigError::Missing("FACEBOOK_PAGE_ID"))?;
    // Numeric page ids go out as JSON numbers.
    let promoted_object = match page_id.parse::<u64>() {
        Ok(id) => serde_json::json!({ "page_id": id }),
        Err(_) => serde_json::json!({ "page_id": page_id }),
    }
    .to_string();

    Ok(vec![
        ("name", req.name.to_string()),
        ("objective", "LEAD_GENERATION".into()),
        ("optimization_goal", "LEAD_GENERATION".into()),
        ("billing_event", "IMPRESSIONS".into()),
        ("TARGET_COST", "5000".into()),
        ("promoted_object", promoted_object),
        ("status", "ACTIVE".into()),
        ("campaign_id", req.campaign_id.to_string()),
        ("targeting", req.targeting.to_string()),
        ("access_token", req.access_token.to_string()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(page_id: Option<&'static str>) -> AdSetRequest<'static> {
        AdSetRequest {
            name: "multi-adset-2",
            targeting: "{}",
            campaign_id: "2385",
            access_token: "EAAB",
            page_id,
        }
    }

    fn value<'a>(params: &'a FormParams, key: &str) -> Option<&'a str> {
        params.iter().find(|(k, _)| *k == key).map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_parse_campaign_type() {
        assert_eq!("traffic".parse::<CampaignType>(), Ok(CampaignType::Traffic));
        assert_eq!("LEADS".parse::<CampaignType>(), Ok(CampaignType::Leads));
        assert!("awareness".parse::<CampaignType>().is_err());
    }

    #[test]
    fn test_traffic_params() {
        let params = CampaignType::Traffic.ad_set_params(&request(None)).unwrap();
        assert_eq!(value(&params, "optimization_goal"), Some("LINK_CLICKS"));
        assert_eq!(value(&params, "bid_strategy"), Some("LOWEST_COST_WITHOUT_CAP"));
        assert_eq!(value(&params, "bid_amount"), Some("100"));
        assert_eq!(value(&params, "targeting"), Some("{}"));
        assert_eq!(value(&params, "name"), Some("multi-adset-2"));
        assert_eq!(value(&params, "objective"), None);
    }

    #[test]
    fn test_leads_params() {
        let params = CampaignType::Leads.ad_set_params(&request(Some("109789313259125"))).unwrap();
        assert_eq!(value(&params, "objective"), Some("LEAD_GENERATION"));
        assert_eq!(value(&params, "optimization_goal"), Some("LEAD_GENERATION"));
        assert_eq!(value(&params, "TARGET_COST"), Some("5000"));
        assert_eq!(value(&params, "promoted_object"), Some(r#"{"page_id":109789313259125}"#));
        assert_eq!(value(&params, "bid_strategy"), None);
    }

    #[test]
    fn test_leads_non_numeric_page_stays_string() {
        let params = CampaignType::Leads.ad_set_params(&request(Some("acme-page"))).unwrap();
        assert_eq!(value(&params, "promoted_object"), Some(r#"{"page_id":"acme-page"}"#));
    }

    #[test]
    fn test_leads_requires_page() {
        assert_eq!(
            CampaignType::Leads.ad_set_params(&request(None)),
            Err(ConfigError::Missing("FACEBOOK_PAGE_ID"))
        );
    }
}
