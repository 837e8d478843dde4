//! HTTP transport for PagerDuty REST API calls.
//!
//! The transport owns the connection pool, the base URL, and the fixed
//! session headers. It returns raw responses without interpreting status
//! codes; status-code policy lives in [`ApiResponse`] and is applied by
//! each resource operation.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::error::{Error, Result};

/// Default PagerDuty REST API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.pagerduty.com";

/// REST API v2 content negotiation header.
const ACCEPT_VALUE: &str = "application/vnd.pagerduty+json;version=2";

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Sanitize response body for logging
/// Truncates long responses and strips non-printable characters
fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        // back up to a char boundary so the slice never splits a code point
        let cut = (0..=MAX_LOG_BODY_LENGTH)
            .rev()
            .find(|&i| body.is_char_boundary(i))
            .unwrap_or(0);
        format!("{}... [truncated, {} bytes total]", &body[..cut], body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// Shared HTTP transport bound to one base URL and one auth token.
///
/// Safe for concurrent use: the only state is the immutable configuration
/// plus the reqwest connection pool, which permits multiple in-flight calls.
#[derive(Debug, Clone)]
pub struct Transport {
    http: Client,
    base_url: Url,
}

impl Transport {
    /// Create a transport for the given API token.
    ///
    /// `base_url` falls back to [`DEFAULT_BASE_URL`] when `None`.
    pub fn new(token: &str, base_url: Option<&str>) -> Result<Self> {
        let mut base_url = Url::parse(base_url.unwrap_or(DEFAULT_BASE_URL))
            .map_err(|e| Error::Config(format!("invalid base URL: {e}")))?;

        // A trailing slash makes Url::join keep any path prefix of the base
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }

        let mut auth = HeaderValue::from_str(&format!("Token token={token}"))
            .map_err(|_| Error::Config("API token contains invalid header characters".into()))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_VALUE));

        let http = Client::builder()
            .user_agent(concat!("pagerduty-client/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()?;

        Ok(Self { http, base_url })
    }

    /// The base URL this transport targets.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Execute one HTTP request against the PagerDuty REST API.
    ///
    /// Per-call `headers` are merged over the session defaults; for `POST`
    /// and `PUT` without explicit headers the content type defaults to JSON.
    /// Non-2xx statuses are returned, not raised — interpreting them is the
    /// caller's responsibility.
    pub async fn request(
        &self,
        method: Method,
        endpoint: &str,
        headers: Option<HeaderMap>,
        body: Option<&Value>,
    ) -> Result<ApiResponse> {
        // endpoints are rooted at the base URL's path, not at the host
        let url = self
            .base_url
            .join(endpoint.trim_start_matches('/'))
            .map_err(|e| Error::Config(format!("invalid endpoint {endpoint}: {e}")))?;

        tracing::debug!("{} {}", method, url);

        let mut request = self.http.request(method.clone(), url);

        match headers {
            Some(h) => request = request.headers(h),
            None => {
                if method == Method::POST || method == Method::PUT {
                    request = request.header(CONTENT_TYPE, "application/json");
                }
            }
        }

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            // Only log sanitized/truncated bodies to avoid leaking sensitive data
            tracing::debug!("API returned {}: {}", status, sanitize_for_log(&body));
        }

        Ok(ApiResponse { status, body })
    }

    /// Release the pooled connections.
    ///
    /// Dropping the transport has the same effect; this exists for callers
    /// who want the shutdown to be explicit.
    pub fn close(self) {
        tracing::debug!("closing transport for {}", self.base_url);
    }
}

/// Raw result of one HTTP call: status code and unparsed body.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: String,
}

impl ApiResponse {
    /// Decode the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_str(&self.body)?)
    }

    /// Require exactly `expected`; every other status is a failure.
    pub fn expect_status(self, expected: StatusCode) -> Result<Self> {
        if self.status == expected {
            Ok(self)
        } else {
            Err(self.into_status_error())
        }
    }

    /// Require `expected`, treating 404 as "resource does not exist".
    ///
    /// Any status outside `{expected, 404}` is a failure.
    pub fn expect_status_or_absent(self, expected: StatusCode) -> Result<Option<Self>> {
        if self.status == expected {
            Ok(Some(self))
        } else if self.status == StatusCode::NOT_FOUND {
            Ok(None)
        } else {
            Err(self.into_status_error())
        }
    }

    /// Convert this response into an [`Error::Status`] failure.
    pub fn into_status_error(self) -> Error {
        Error::Status {
            status: self.status,
            body: self.body,
        }
    }
}

/// Append query parameters to an endpoint path.
pub(crate) fn endpoint_with_query(endpoint: &str, pairs: &[(String, String)]) -> String {
    if pairs.is_empty() {
        return endpoint.to_string();
    }

    let mut query = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in pairs {
        query.append_pair(key, value);
    }
    format!("{}?{}", endpoint, query.finish())
}
