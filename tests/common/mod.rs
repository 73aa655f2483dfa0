#![allow(dead_code)]

use async_trait::async_trait;
use org_contributors_server::error::TransportError;
use org_contributors_server::github::GitHubClient;
use org_contributors_server::transport::{RawResponse, Transport};
use reqwest::header::{HeaderMap, HeaderValue, LINK};
use reqwest::StatusCode;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use url::Url;

pub const BASE_URL: &str = "https://api.github.com";

pub fn repos_url(organization: &str) -> String {
    format!("{}/orgs/{}/repos?per_page=100", BASE_URL, organization)
}

pub fn contributors_url(owner: &str, repo: &str) -> String {
    format!("{}/repos/{}/{}/contributors?per_page=100", BASE_URL, owner, repo)
}

pub fn next_link(url: &str) -> String {
    format!("<{}>; rel=\"next\"", url)
}

#[derive(Clone)]
enum Reply {
    Response(RawResponse),
    Failure(String),
}

/// Scripted in-memory transport. Unknown URLs answer 404 like GitHub does.
#[derive(Default)]
pub struct FakeTransport {
    replies: Mutex<HashMap<String, Reply>>,
    delays: Mutex<HashMap<String, Duration>>,
    calls: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl FakeTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, url: &str, status: u16, link: Option<&str>, body: &str) -> &Self {
        let mut headers = HeaderMap::new();
        if let Some(link) = link {
            headers.insert(LINK, HeaderValue::from_str(link).expect("valid link header"));
        }
        let response = RawResponse {
            status: StatusCode::from_u16(status).expect("valid status code"),
            headers,
            body: body.as_bytes().to_vec(),
        };
        self.replies
            .lock()
            .unwrap()
            .insert(url.to_string(), Reply::Response(response));
        self
    }

    pub fn page(&self, url: &str, body: serde_json::Value, next: Option<&str>) -> &Self {
        let link = next.map(next_link);
        self.respond(url, 200, link.as_deref(), &body.to_string())
    }

    pub fn status(&self, url: &str, status: u16) -> &Self {
        self.respond(url, status, None, "")
    }

    pub fn fail(&self, url: &str, reason: &str) -> &Self {
        self.replies
            .lock()
            .unwrap()
            .insert(url.to_string(), Reply::Failure(reason.to_string()));
        self
    }

    pub fn delay(&self, url: &str, delay: Duration) -> &Self {
        self.delays.lock().unwrap().insert(url.to_string(), delay);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn get(&self, url: &Url) -> Result<RawResponse, TransportError> {
        let key = url.as_str().to_string();
        self.calls.lock().unwrap().push(key.clone());

        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        let delay = self.delays.lock().unwrap().get(&key).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let reply = self.replies.lock().unwrap().get(&key).cloned();
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match reply {
            Some(Reply::Response(response)) => Ok(response),
            Some(Reply::Failure(reason)) => Err(TransportError::Connection(reason)),
            None => Ok(RawResponse {
                status: StatusCode::NOT_FOUND,
                headers: HeaderMap::new(),
                body: br#"{"message":"Not Found"}"#.to_vec(),
            }),
        }
    }
}

pub fn client(transport: &Arc<FakeTransport>) -> GitHubClient<Arc<FakeTransport>> {
    GitHubClient::new(Arc::clone(transport), BASE_URL).expect("valid base url")
}
