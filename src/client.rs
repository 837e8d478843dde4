//! PagerDuty API client facade.
//!
//! Bundles every resource module behind one shared [`Transport`]. Multiple
//! clients with independent transports can coexist, which keeps tests
//! isolated from each other.

use std::sync::Arc;

use crate::error::Result;
use crate::resources::abilities::AbilitiesApi;
use crate::resources::addons::AddonsApi;
use crate::resources::analytics::AnalyticsApi;
use crate::transport::{Transport, DEFAULT_BASE_URL};

/// Entry point for calling the PagerDuty REST API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    transport: Arc<Transport>,
    pub abilities: AbilitiesApi,
    pub addons: AddonsApi,
    pub analytics: AnalyticsApi,
}

impl ApiClient {
    /// Create a client for the production API.
    pub fn new(token: &str) -> Result<Self> {
        Self::with_base_url(token, DEFAULT_BASE_URL)
    }

    /// Create a client against a different base URL.
    ///
    /// This is also the seam for pointing the client at a mock server.
    pub fn with_base_url(token: &str, base_url: &str) -> Result<Self> {
        let transport = Arc::new(Transport::new(token, Some(base_url))?);

        Ok(Self {
            abilities: AbilitiesApi::new(Arc::clone(&transport)),
            addons: AddonsApi::new(Arc::clone(&transport)),
            analytics: AnalyticsApi::new(Arc::clone(&transport)),
            transport,
        })
    }

    /// The shared transport behind all resource modules.
    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    /// Shut the client down, releasing the transport's pooled connections.
    ///
    /// Dropping the client (and its clones) has the same effect, so the
    /// pool is released on every exit path even without an explicit call.
    pub fn close(self) {
        tracing::debug!("closing API client");
    }
}
