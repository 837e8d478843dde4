//! PagerDuty Addons API.
//!
//! Addons embed third-party content into the PagerDuty UI, either as a
//! full page or on the incident show screen. Single-object request and
//! response bodies are wrapped in an `addon` envelope on the wire.

use std::sync::Arc;

use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::Result;
use crate::transport::{endpoint_with_query, Transport};

/// Where an addon is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AddonType {
    #[serde(rename = "full_page_addon_reference")]
    FullPageAddon,
    #[serde(rename = "incident_show_addon_reference")]
    IncidentShowAddon,
}

impl AddonType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AddonType::FullPageAddon => "full_page_addon_reference",
            AddonType::IncidentShowAddon => "incident_show_addon_reference",
        }
    }
}

/// An installed addon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Addon {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: AddonType,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
}

/// A new addon to install.
#[derive(Debug, Clone, Serialize)]
pub struct NewAddon {
    #[serde(rename = "type")]
    pub kind: AddonType,
    pub name: String,
    pub src: String,
}

/// Sparse update for an installed addon.
///
/// Unset fields are omitted from the outgoing payload entirely, so the
/// server leaves them untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AddonUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
}

/// One page of addons plus the classic pagination metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct AddonsPage {
    #[serde(default)]
    pub addons: Vec<Addon>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    #[serde(default)]
    pub more: bool,
    pub total: Option<u32>,
}

/// Pagination and filter parameters for [`AddonsApi::list`].
///
/// Only explicitly-set fields become query parameters.
#[derive(Debug, Clone, Default)]
pub struct ListAddonsQuery {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    /// Ask the server to compute the `total` field.
    pub total: Option<bool>,
    pub filter: Option<AddonType>,
    pub service_ids: Vec<String>,
}

impl ListAddonsQuery {
    fn to_query(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(offset) = self.offset {
            pairs.push(("offset".to_string(), offset.to_string()));
        }
        if let Some(total) = self.total {
            pairs.push(("total".to_string(), total.to_string()));
        }
        if let Some(filter) = self.filter {
            pairs.push(("filter".to_string(), filter.as_str().to_string()));
        }
        for id in &self.service_ids {
            pairs.push(("service_ids[]".to_string(), id.clone()));
        }
        pairs
    }
}

#[derive(Debug, Deserialize)]
struct AddonEnvelope {
    addon: Addon,
}

/// Resource module for the `/addons` endpoints.
#[derive(Debug, Clone)]
pub struct AddonsApi {
    transport: Arc<Transport>,
}

impl AddonsApi {
    pub fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    /// List installed addons, one page at a time.
    ///
    /// An empty account yields an empty page, not an error. Callers page
    /// manually via `limit`/`offset` and the returned `more` flag.
    pub async fn list(&self, query: Option<&ListAddonsQuery>) -> Result<AddonsPage> {
        let endpoint = match query {
            Some(q) => endpoint_with_query("/addons", &q.to_query()),
            None => "/addons".to_string(),
        };

        let res = self
            .transport
            .request(Method::GET, &endpoint, None, None)
            .await?;

        res.expect_status(StatusCode::OK)?.json()
    }

    /// Fetch one addon by id; `None` when it does not exist.
    pub async fn get(&self, id: &str) -> Result<Option<Addon>> {
        let res = self
            .transport
            .request(Method::GET, &format!("/addons/{id}"), None, None)
            .await?;

        match res.expect_status_or_absent(StatusCode::OK)? {
            Some(res) => {
                let envelope: AddonEnvelope = res.json()?;
                Ok(Some(envelope.addon))
            }
            None => Ok(None),
        }
    }

    /// Install a new addon.
    pub async fn install(&self, addon: &NewAddon) -> Result<Addon> {
        let body = json!({ "addon": addon });
        let res = self
            .transport
            .request(Method::POST, "/addons", None, Some(&body))
            .await?;

        let envelope: AddonEnvelope = res.expect_status(StatusCode::CREATED)?.json()?;
        Ok(envelope.addon)
    }

    /// Update an installed addon; `None` when it does not exist.
    ///
    /// Only the fields populated in `update` are sent.
    pub async fn update(&self, id: &str, update: &AddonUpdate) -> Result<Option<Addon>> {
        let body = json!({ "addon": update });
        let res = self
            .transport
            .request(Method::PUT, &format!("/addons/{id}"), None, Some(&body))
            .await?;

        match res.expect_status_or_absent(StatusCode::OK)? {
            Some(res) => {
                let envelope: AddonEnvelope = res.json()?;
                Ok(Some(envelope.addon))
            }
            None => Ok(None),
        }
    }

    /// Uninstall an addon.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let res = self
            .transport
            .request(Method::DELETE, &format!("/addons/{id}"), None, None)
            .await?;

        res.expect_status(StatusCode::NO_CONTENT)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_update_serializes_to_empty_object() {
        let value = serde_json::to_value(AddonUpdate::default()).unwrap();
        assert_eq!(value, json!({}));
    }

    #[test]
    fn update_contains_only_populated_fields() {
        let update = AddonUpdate {
            name: Some("renamed".to_string()),
            src: None,
        };
        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(value, json!({ "name": "renamed" }));
    }

    #[test]
    fn addon_tolerates_missing_optional_keys_and_extras() {
        let raw = json!({
            "id": "PKX7619",
            "type": "full_page_addon_reference",
            "name": "Internal Status Page",
            "html_url": null,
            "brand_new_server_field": 42
        });
        let addon: Addon = serde_json::from_value(raw).unwrap();
        assert_eq!(addon.id, "PKX7619");
        assert_eq!(addon.kind, AddonType::FullPageAddon);
        assert!(addon.html_url.is_none());
        assert!(addon.src.is_none());
    }

    #[test]
    fn empty_query_builds_no_parameters() {
        assert!(ListAddonsQuery::default().to_query().is_empty());
    }

    #[test]
    fn query_includes_only_set_fields() {
        let query = ListAddonsQuery {
            limit: Some(25),
            filter: Some(AddonType::IncidentShowAddon),
            service_ids: vec!["PABC123".to_string()],
            ..Default::default()
        };
        let pairs = query.to_query();
        assert_eq!(
            pairs,
            vec![
                ("limit".to_string(), "25".to_string()),
                ("filter".to_string(), "incident_show_addon_reference".to_string()),
                ("service_ids[]".to_string(), "PABC123".to_string()),
            ]
        );
    }
}
