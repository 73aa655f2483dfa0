use async_trait::async_trait;
use reqwest::header::{HeaderMap, ACCEPT};
use reqwest::{Client, StatusCode};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use crate::error::TransportError;

/// Media type pinning responses to version 3 of the GitHub REST API
pub const GITHUB_API_V3_MEDIA_TYPE: &str = "application/vnd.github.v3+json";

/// Status, headers and body of a completed GET request
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl RawResponse {
    /// True when the payload is empty or whitespace only.
    pub fn has_empty_body(&self) -> bool {
        self.body.iter().all(|b| b.is_ascii_whitespace())
    }
}

/// Outbound HTTP seam used by [`crate::github::GitHubClient`].
///
/// Implementations perform exactly one request per call and never retry.
/// Any status code, including 4xx and 5xx, is a successful transport outcome.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &Url) -> Result<RawResponse, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn get(&self, url: &Url) -> Result<RawResponse, TransportError> {
        (**self).get(url).await
    }
}

/// [`Transport`] backed by a shared `reqwest` client
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;

        Ok(ReqwestTransport { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: &Url) -> Result<RawResponse, TransportError> {
        let response = self
            .client
            .get(url.clone())
            .header(ACCEPT, GITHUB_API_V3_MEDIA_TYPE)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    TransportError::Connection(e.to_string())
                } else {
                    TransportError::Request(e)
                }
            })?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}
