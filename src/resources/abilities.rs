//! PagerDuty Abilities API.
//!
//! Abilities describe the features an account is entitled to use.

use std::sync::Arc;

use reqwest::{Method, StatusCode};
use serde::Deserialize;

use crate::error::Result;
use crate::transport::Transport;

#[derive(Debug, Deserialize)]
struct ListAbilitiesResponse {
    #[serde(default)]
    abilities: Vec<String>,
}

/// Resource module for the `/abilities` endpoints.
#[derive(Debug, Clone)]
pub struct AbilitiesApi {
    transport: Arc<Transport>,
}

impl AbilitiesApi {
    pub fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    /// List the abilities available on the account, in server order.
    pub async fn list(&self) -> Result<Vec<String>> {
        let res = self
            .transport
            .request(Method::GET, "/abilities", None, None)
            .await?;

        let body: ListAbilitiesResponse = res.expect_status(StatusCode::OK)?.json()?;
        Ok(body.abilities)
    }

    /// Check whether a single ability is enabled for the account.
    ///
    /// The server answers 204 when the ability is enabled and 402 when the
    /// account is not entitled to it; both are mapped to a boolean rather
    /// than an error.
    pub async fn is_enabled(&self, id: &str) -> Result<bool> {
        let res = self
            .transport
            .request(Method::GET, &format!("/abilities/{id}"), None, None)
            .await?;

        match res.status {
            StatusCode::NO_CONTENT => Ok(true),
            StatusCode::PAYMENT_REQUIRED => Ok(false),
            _ => Err(res.into_status_error()),
        }
    }
}
