//! The HTTP seam between [`MalClient`](crate::MalClient) and the network.

use std::future::Future;
use std::time::Duration;

use hyper::ext::ReasonPhrase;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::client::Credentials;
use crate::error::MalError;

const DEFAULT_BASE_URL: &str = "https://myanimelist.net";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// One request against the service, relative to the transport's base URL.
#[derive(Debug, Clone)]
pub struct ApiRequest<'a> {
    pub method: Method,
    pub path: String,
    pub query: Vec<(&'static str, String)>,
    pub form: Option<Vec<(&'static str, String)>>,
    pub credentials: &'a Credentials,
}

/// Status line and body of a completed exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends requests to the service.
///
/// Implementations attach the request's credentials as basic auth and
/// report network failures and timeouts as [`MalError::Transport`].
pub trait Transport: Send + Sync {
    fn send(
        &self,
        request: ApiRequest<'_>,
    ) -> impl Future<Output = Result<ApiResponse, MalError>> + Send;
}

/// Connection settings for [`HttpTransport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: concat!("kiroku/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// reqwest-backed transport with a fixed per-request timeout.
pub struct HttpTransport {
    base_url: String,
    http: Client,
}

impl HttpTransport {
    pub fn new(config: &TransportConfig) -> Result<Self, MalError> {
        let http = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
        })
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest<'_>) -> Result<ApiResponse, MalError> {
        let url = format!("{}{}", self.base_url, request.path);
        tracing::debug!(method = ?request.method, %url, "MAL request");

        let builder = match request.method {
            Method::Get => self.http.get(&url),
            Method::Post => self
                .http
                .post(&url)
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded"),
        };
        let mut builder = builder
            .basic_auth(&request.credentials.username, Some(&request.credentials.password));
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(form) = &request.form {
            builder = builder.form(form);
        }

        let resp = builder.send().await?;
        let status = resp.status();
        // hyper only records the reason phrase when it differs from the canonical one.
        let reason = match resp.extensions().get::<ReasonPhrase>() {
            Some(phrase) => Some(String::from_utf8_lossy(phrase.as_bytes()).into_owned()),
            None => status.canonical_reason().map(str::to_string),
        };
        let status_text = match reason {
            Some(reason) => format!("{} {reason}", status.as_u16()),
            None => status.as_u16().to_string(),
        };
        let body = resp.text().await?;

        Ok(ApiResponse {
            status: status.as_u16(),
            status_text,
            body,
        })
    }
}
