//! HTTP plumbing shared by every endpoint client.
//!
//! [`Transport`] is the single seam between the crate and the network: it takes a
//! fully built request and hands back the raw status and body. Status
//! classification and JSON decoding live here too so each endpoint client only
//! deals with typed values.

use crate::config::HttpConfig;
use crate::error::network::NetworkError;
use async_trait::async_trait;
use reqwest::Method;
use serde::de::DeserializeOwned;
use std::fmt;
use std::time::Duration;
use tracing::warn;

pub const CONTENT_TYPE_HEADER: &str = "Content-Type";
pub const ACCEPT_HEADER: &str = "Accept";
pub const ACCESS_TOKEN_HEADER: &str = "x-access-token";
pub const JSON_CONTENT_TYPE: &str = "application/json";

#[derive(Clone, PartialEq, Eq)]
pub struct TransportRequest {
    pub url: String,
    pub method: Method,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl TransportRequest {
    /// A POST carrying `body` as JSON.
    pub fn post_json(url: impl Into<String>, body: Vec<u8>) -> Self {
        Self {
            url: url.into(),
            method: Method::POST,
            headers: vec![(CONTENT_TYPE_HEADER.to_string(), JSON_CONTENT_TYPE.to_string())],
            body,
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// First value of `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter().find(|(key, _)| key.eq_ignore_ascii_case(name)).map(|(_, value)| value.as_str())
    }
}

// Bodies carry passwords and headers carry the access token.
impl fmt::Debug for TransportRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header_names: Vec<&str> = self.headers.iter().map(|(name, _)| name.as_str()).collect();
        f.debug_struct("TransportRequest")
            .field("url", &self.url)
            .field("method", &self.method)
            .field("headers", &header_names)
            .field("body_len", &self.body.len())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self { status, body: body.into() }
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    /// Performs one exchange. Any status the server sends back is a successful
    /// exchange; only failures to get an answer are errors here.
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, NetworkError>;
}

pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// `request_timeout_secs` bounds connecting and each wait for data,
    /// `resource_timeout_secs` the whole exchange.
    pub fn new(config: &HttpConfig) -> Result<Self, NetworkError> {
        let request_timeout = Duration::from_secs(config.request_timeout_secs);
        let client = reqwest::Client::builder()
            .connect_timeout(request_timeout)
            .read_timeout(request_timeout)
            .timeout(Duration::from_secs(config.resource_timeout_secs))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, NetworkError> {
        let url = reqwest::Url::parse(&request.url).map_err(|e| NetworkError::invalid_request(format!("{}: {}", request.url, e)))?;

        let mut builder = self.client.request(request.method, url).body(request.body);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;

        Ok(TransportResponse { status, body: body.to_vec() })
    }
}

/// Maps a response status onto the error taxonomy. Any 2xx passes.
pub fn classify_status(status: u16) -> Result<(), NetworkError> {
    match status {
        200..=299 => Ok(()),
        401 => Err(NetworkError::Unauthorized),
        400..=499 => Err(NetworkError::ClientError(status)),
        500..=599 => Err(NetworkError::ServerError(status)),
        _ => Err(NetworkError::UnexpectedStatus(status)),
    }
}

/// Decodes a JSON body, logging where it stopped matching the expected shape.
/// The body itself is never logged since it may carry personal data.
pub fn decode_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, NetworkError> {
    serde_json::from_slice::<T>(body).map_err(|e| {
        warn!(
            error_message = %e,
            error_line = e.line(),
            error_column = e.column(),
            error_category = ?e.classify(),
            body_len = body.len(),
            "Failed to parse JSON response body"
        );
        NetworkError::Decode(e)
    })
}

/// Appends `path` to `base_url` with exactly one `/` between them. An empty path
/// returns the base URL unchanged.
pub fn join_url(base_url: &str, path: &str) -> String {
    let suffix = path.trim_start_matches('/');
    if suffix.is_empty() {
        return base_url.to_string();
    }

    let base = base_url.trim_end_matches('/');
    format!("{}/{}", base, suffix)
}
