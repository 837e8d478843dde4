//! PagerDuty API resource modules.
//!
//! Each module wraps the shared [`Transport`](crate::transport::Transport)
//! and translates domain operations into HTTP calls: it builds the request,
//! branches on an explicit set of status codes, and maps the JSON body into
//! typed records. Any status outside an operation's success/absent sets is
//! surfaced as [`Error::Status`](crate::error::Error::Status).
//!
//! # Module Structure
//!
//! - [`abilities`] - account ability listing and entitlement checks
//! - [`addons`] - addon install, list, get, update, and delete
//! - [`analytics`] - aggregated and raw incident analytics

pub mod abilities;
pub mod addons;
pub mod analytics;
