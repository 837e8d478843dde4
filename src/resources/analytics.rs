//! PagerDuty Analytics API.
//!
//! Aggregate metrics are grouped account-wide, per service, or per team;
//! raw incident data pages through opaque `first`/`last` cursors. These
//! endpoints sit behind the `X-EARLY-ACCESS: analytics-v2` feature header.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;
use crate::transport::Transport;

const EARLY_ACCESS_HEADER: &str = "X-EARLY-ACCESS";
const EARLY_ACCESS_VALUE: &str = "analytics-v2";

/// Incident urgency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    High,
    Low,
}

/// Bucket size for aggregated metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregateUnit {
    Day,
    Week,
    Month,
}

/// Filters for the incident analytics endpoints.
///
/// Unset options and empty id lists are omitted from the serialized body,
/// leaving the server defaults in effect.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateDataFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at_start: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at_end: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urgency: Option<Urgency>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub major: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub team_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub service_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub priority_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub priority_names: Vec<String>,
}

/// One row of aggregated incident metrics.
///
/// Every metric is optional: the server sends `null` for buckets it cannot
/// compute, and those stay `None` rather than collapsing to zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregatedMetrics {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mean_assignment_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mean_engaged_seconds: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mean_engaged_user_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mean_seconds_to_engage: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mean_seconds_to_first_ack: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mean_seconds_to_mobilize: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mean_seconds_to_resolve: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_start: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_business_hour_interruptions: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_engaged_seconds: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_escalation_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_incident_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_off_hour_interruptions: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_sleep_hour_interruptions: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_incidents_acknowledged: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_incidents_auto_resolved: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_incidents_manual_escalated: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_incidents_reassigned: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_incidents_timeout_escalated: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_interruptions: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_notifications: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_snoozed_seconds: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub up_time_pct: Option<f64>,
}

/// Response wrapper from the aggregate analytics endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct AggregateAnalyticsResponse {
    pub time_zone: Option<String>,
    pub order: Option<String>,
    pub order_by: Option<String>,
    #[serde(default)]
    pub filters: Option<AggregateDataFilters>,
    #[serde(default)]
    pub data: Vec<AggregatedMetrics>,
}

/// One raw incident row from `/analytics/raw/incidents`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawIncidentData {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incident_number: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub major: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urgency: Option<Urgency>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignment_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_hour_interruptions: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub off_hour_interruptions: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sleep_hour_interruptions: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engaged_seconds: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engaged_user_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub escalation_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seconds_to_engage: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seconds_to_first_ack: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seconds_to_mobilize: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seconds_to_resolve: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snoozed_seconds: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_defined_effort_seconds: Option<i64>,
}

/// Parameters for [`AnalyticsApi::raw_incident_data`].
///
/// Only populated fields are sent; `starting_after`/`ending_before` take the
/// opaque cursors returned in a previous page's `first`/`last`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RawIncidentsQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<AggregateDataFilters>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starting_after: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ending_before: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

/// One page of raw incident rows plus cursor metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct RawIncidentsResponse {
    pub first: Option<String>,
    pub last: Option<String>,
    pub limit: Option<u32>,
    #[serde(default)]
    pub more: bool,
    pub order: Option<String>,
    pub order_by: Option<String>,
    pub time_zone: Option<String>,
    #[serde(default)]
    pub data: Vec<RawIncidentData>,
}

/// Resource module for the `/analytics` endpoints.
#[derive(Debug, Clone)]
pub struct AnalyticsApi {
    transport: Arc<Transport>,
}

impl AnalyticsApi {
    pub fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    /// Account-wide aggregated incident metrics.
    pub async fn aggregated_incident_data(
        &self,
        filters: Option<&AggregateDataFilters>,
        time_zone: Option<&str>,
        aggregate_unit: Option<AggregateUnit>,
    ) -> Result<AggregateAnalyticsResponse> {
        self.aggregate_data_fetch("all", filters, time_zone, aggregate_unit)
            .await
    }

    /// Aggregated incident metrics grouped by service.
    pub async fn aggregated_service_data(
        &self,
        filters: Option<&AggregateDataFilters>,
        time_zone: Option<&str>,
        aggregate_unit: Option<AggregateUnit>,
    ) -> Result<AggregateAnalyticsResponse> {
        self.aggregate_data_fetch("services", filters, time_zone, aggregate_unit)
            .await
    }

    /// Aggregated incident metrics grouped by team.
    pub async fn aggregated_team_data(
        &self,
        filters: Option<&AggregateDataFilters>,
        time_zone: Option<&str>,
        aggregate_unit: Option<AggregateUnit>,
    ) -> Result<AggregateAnalyticsResponse> {
        self.aggregate_data_fetch("teams", filters, time_zone, aggregate_unit)
            .await
    }

    /// One page of raw incident data; page with the returned cursors.
    pub async fn raw_incident_data(&self, query: &RawIncidentsQuery) -> Result<RawIncidentsResponse> {
        let body = serde_json::to_value(query)?;
        let res = self
            .transport
            .request(
                Method::POST,
                "/analytics/raw/incidents",
                Some(early_access_headers()),
                Some(&body),
            )
            .await?;

        res.expect_status(StatusCode::OK)?.json()
    }

    async fn aggregate_data_fetch(
        &self,
        domain: &str,
        filters: Option<&AggregateDataFilters>,
        time_zone: Option<&str>,
        aggregate_unit: Option<AggregateUnit>,
    ) -> Result<AggregateAnalyticsResponse> {
        let mut body = Map::new();
        if let Some(filters) = filters {
            body.insert("filters".to_string(), serde_json::to_value(filters)?);
        }
        if let Some(time_zone) = time_zone {
            body.insert("time_zone".to_string(), Value::String(time_zone.to_string()));
        }
        if let Some(unit) = aggregate_unit {
            body.insert("aggregate_unit".to_string(), serde_json::to_value(unit)?);
        }
        let body = Value::Object(body);

        let res = self
            .transport
            .request(
                Method::POST,
                &format!("/analytics/metrics/incidents/{domain}"),
                Some(early_access_headers()),
                Some(&body),
            )
            .await?;

        res.expect_status(StatusCode::OK)?.json()
    }
}

fn early_access_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(EARLY_ACCESS_HEADER, HeaderValue::from_static(EARLY_ACCESS_VALUE));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_filters_serialize_to_empty_object() {
        let value = serde_json::to_value(AggregateDataFilters::default()).unwrap();
        assert_eq!(value, json!({}));
    }

    #[test]
    fn filters_omit_unset_fields_and_empty_lists() {
        let filters = AggregateDataFilters {
            urgency: Some(Urgency::High),
            team_ids: vec!["PTEAM1".to_string()],
            ..Default::default()
        };
        let value = serde_json::to_value(&filters).unwrap();
        assert_eq!(value, json!({ "urgency": "high", "team_ids": ["PTEAM1"] }));
    }

    #[test]
    fn metrics_keep_nulls_as_none() {
        let raw = json!({
            "mean_seconds_to_resolve": null,
            "total_incident_count": 17,
            "up_time_pct": null,
            "service_id": "PSVC001"
        });
        let metrics: AggregatedMetrics = serde_json::from_value(raw).unwrap();
        assert!(metrics.mean_seconds_to_resolve.is_none());
        assert_eq!(metrics.total_incident_count, Some(17));
        assert!(metrics.up_time_pct.is_none());
        assert_eq!(metrics.service_id.as_deref(), Some("PSVC001"));
    }

    #[test]
    fn aggregate_response_tolerates_missing_metadata() {
        let raw = json!({ "data": [] });
        let res: AggregateAnalyticsResponse = serde_json::from_value(raw).unwrap();
        assert!(res.time_zone.is_none());
        assert!(res.filters.is_none());
        assert!(res.data.is_empty());
    }

    #[test]
    fn raw_query_serializes_only_populated_fields() {
        let query = RawIncidentsQuery {
            limit: Some(100),
            starting_after: Some("opaque-cursor".to_string()),
            ..Default::default()
        };
        let value = serde_json::to_value(&query).unwrap();
        assert_eq!(value, json!({ "limit": 100, "starting_after": "opaque-cursor" }));
    }
}
