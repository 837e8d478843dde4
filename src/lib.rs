//! Async client library for the PagerDuty REST API.
//!
//! One shared [`Transport`] carries the base URL, the auth token, and the
//! connection pool; each resource module borrows it and exposes typed
//! operations. The [`ApiClient`] facade bundles all resource modules behind
//! a single entry point.
//!
//! # Module Structure
//!
//! - [`client`] - the [`ApiClient`] facade
//! - [`transport`] - shared HTTP transport and raw responses
//! - [`resources`] - per-entity resource modules (abilities, addons, analytics)
//! - [`error`] - error taxonomy
//!
//! # Example
//!
//! ```no_run
//! use pagerduty_client::ApiClient;
//!
//! async fn example() -> pagerduty_client::Result<()> {
//!     let client = ApiClient::new("my-api-token")?;
//!     let abilities = client.abilities.list().await?;
//!     println!("{abilities:?}");
//!     client.close();
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod resources;
pub mod transport;

pub use client::ApiClient;
pub use error::{Error, Result};
pub use transport::{ApiResponse, Transport, DEFAULT_BASE_URL};
