//! Ad-set creation.

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use super::campaign::{AdSetRequest, CampaignType};
use super::{GraphClient, GraphError};

/// Acknowledgement returned by `POST act_<account>/adsets`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishAck {
    pub id: String,
}

/// Anything that can create an ad set from a serialized targeting document.
pub trait Publisher {
    fn publish(&self, name: &str, targeting: &str, campaign: CampaignType) -> Result<PublishAck, GraphError>;
}

impl Publisher for GraphClient {
    fn publish(&self, name: &str, targeting: &str, campaign: CampaignType) -> Result<PublishAck, GraphError> {
        let request = AdSetRequest {
            name,
            targeting,
            campaign_id: self.config.campaign_id()?,
            access_token: self.config.access_token()?,
            page_id: self.config.facebook_page_id.as_deref(),
        };
        let params = campaign.ad_set_params(&request)?;
        let url = self.url(&format!("act_{}/adsets", self.config.ad_account()?));

        let form: Vec<(&str, &str)> = params.iter().map(|(k, v)| (*k, v.as_str())).collect();
        info!(ad_set = name, %campaign, "creating ad set");

        match Self::read_json::<PublishAck>(self.agent.post(&url).send_form(&form)) {
            Ok(ack) => {
                info!(id = %ack.id, ad_set = name, "ad set created");
                Ok(ack)
            }
            Err(e) => {
                if let GraphError::Status { status, body, .. } = &e {
                    error!(status, body = %body, "ad set creation rejected");
                }
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, ConfigError};
    use crate::targeting::{assemble, Coordinate};
    use crate::test_support::{form_value, StubServer};

    fn client(pairs: &'static [(&'static str, &'static str)]) -> GraphClient {
        let config = Config::from_lookup(|k| {
            pairs.iter().find(|(key, _)| *key == k).map(|(_, v)| v.to_string())
        })
        .unwrap();
        GraphClient::new(&config)
    }

    #[test]
    fn test_publish_requires_campaign() {
        let client = client(&[("FACEBOOK_ACCESS_TOKEN", "EAAB"), ("FACEBOOK_AD_ACCOUNT", "1")]);
        let err = client.publish("multi-adset-0", "{}", CampaignType::Traffic).unwrap_err();
        assert!(matches!(err, GraphError::Config(ConfigError::Missing("FACEBOOK_CAMPAIGN_ID"))));
    }

    #[test]
    fn test_publish_requires_ad_account() {
        let client = client(&[("FACEBOOK_ACCESS_TOKEN", "EAAB"), ("FACEBOOK_CAMPAIGN_ID", "2385")]);
        let err = client.publish("multi-adset-0", "{}", CampaignType::Traffic).unwrap_err();
        assert!(matches!(err, GraphError::Config(ConfigError::Missing("FACEBOOK_AD_ACCOUNT"))));
    }

    #[test]
    fn test_leads_publish_requires_page() {
        let client = client(&[
            ("FACEBOOK_ACCESS_TOKEN", "EAAB"),
            ("FACEBOOK_AD_ACCOUNT", "1"),
            ("FACEBOOK_CAMPAIGN_ID", "2385"),
        ]);
        let err = client.publish("multi-adset-0", "{}", CampaignType::Leads).unwrap_err();
        assert!(matches!(err, GraphError::Config(ConfigError::Missing("FACEBOOK_PAGE_ID"))));
    }

    fn client_at(base_url: &str) -> GraphClient {
        let base_url = base_url.to_string();
        let config = Config::from_lookup(|k| match k {
            "FACEBOOK_ACCESS_TOKEN" => Some("EAAB".into()),
            "FACEBOOK_AD_ACCOUNT" => Some("act_9".into()),
            "FACEBOOK_CAMPAIGN_ID" => Some("2385".into()),
            "FACEBOOK_GRAPH_BASE_URL" => Some(base_url.clone()),
            _ => None,
        })
        .unwrap();
        GraphClient::new(&config)
    }

    #[test]
    fn test_publish_posts_targeting_form() {
        let targeting = assemble(&[Coordinate::new(47.6205, -122.3493)], "Product Management")
            .to_json()
            .unwrap();
        let server = StubServer::respond(200, r#"{"id":"23843"}"#);

        let ack = client_at(&server.base_url)
            .publish("multi-adset-1", &targeting, CampaignType::Traffic)
            .unwrap();
        assert_eq!(ack.id, "23843");

        let request = server.request();
        assert!(request.starts_with("POST /v3.3/act_9/adsets "), "{}", request);
        let (_, body) = request.split_once("\r\n\r\n").unwrap();
        assert_eq!(form_value(body, "targeting"), Some(targeting));
        assert_eq!(form_value(body, "name").as_deref(), Some("multi-adset-1"));
        assert_eq!(form_value(body, "optimization_goal").as_deref(), Some("LINK_CLICKS"));
        assert_eq!(form_value(body, "campaign_id").as_deref(), Some("2385"));
        assert_eq!(form_value(body, "access_token").as_deref(), Some("EAAB"));
    }

    #[test]
    fn test_publish_rejection_carries_graph_message() {
        let body = r#"{"error":{"message":"Invalid parameter","type":"OAuthException","code":100}}"#;
        let server = StubServer::respond(400, body);

        let err = client_at(&server.base_url)
            .publish("multi-adset-1", "{}", CampaignType::Traffic)
            .unwrap_err();
        match err {
            GraphError::Status {
                status,
                message,
                body: raw,
            } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Invalid parameter (OAuthException #100)");
                assert_eq!(raw, body);
            }
            other => panic!("unexpected: {:?}", other),
        }
        server.request();
    }

    #[test]
    fn test_ack_decodes() {
        let ack: PublishAck = serde_json::from_str(r#"{"id":"23843"}"#).unwrap();
        assert_eq!(ack.id, "23843");
    }
}
