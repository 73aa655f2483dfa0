use crate::error::{DomainError, Result};
use crate::models::{Contributor, Repository};
use crate::pagination::{Page, PageLinks};
use crate::transport::Transport;
use crate::types::{ContributorDto, RepositoryDto};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use tracing::{debug, error, warn};
use url::Url;

pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";
const PER_PAGE: u32 = 100;

pub struct GitHubClient<T> {
    transport: T,
    base_url: Url,
}

impl<T: Transport> GitHubClient<T> {
    pub fn new(transport: T, base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| {
            DomainError::IllegalArgument(format!("Invalid API base URL {}: {}", base_url, e))
        })?;

        if base_url.cannot_be_a_base() {
            return Err(DomainError::IllegalArgument(format!(
                "API base URL cannot carry a path: {}",
                base_url
            )));
        }

        Ok(GitHubClient { transport, base_url })
    }

    /// `{base}/orgs/{organization}/repos`
    pub fn repositories_url(&self, organization: &str) -> Url {
        self.endpoint(&["orgs", organization, "repos"])
    }

    /// `{base}/repos/{owner}/{repo}/contributors`
    pub fn contributors_url(&self, owner: &str, repo: &str) -> Url {
        self.endpoint(&["repos", owner, repo, "contributors"])
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Checked in `new`: the base URL always has path segments.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url.query_pairs_mut()
            .append_pair("per_page", &PER_PAGE.to_string());
        url
    }

    /// Fetch and decode a single page, along with the cursor to the next one.
    pub async fn fetch_page<R>(&self, url: &Url) -> Result<Page<R>>
    where
        R: DeserializeOwned + Send,
    {
        let response = self.transport.get(url).await.map_err(|e| {
            error!(%url, "HTTP call error: {}", e);
            DomainError::ApiCallError(format!("Request to {} failed: {}", url, e))
        })?;

        match response.status {
            StatusCode::NOT_FOUND => {
                return Err(DomainError::NotFound(url.to_string()));
            }
            StatusCode::NO_CONTENT => {
                debug!(%url, "GitHub responded with no content");
                return Ok(Page::empty());
            }
            status if !status.is_success() => {
                error!(%url, %status, "GitHub responded with unexpected status");
                return Err(DomainError::ApiCallError(format!(
                    "GitHub responded with status {} for {}",
                    status, url
                )));
            }
            _ => {}
        }

        if response.has_empty_body() {
            error!(%url, status = %response.status, "GitHub responded with empty body");
            return Err(DomainError::ApiCallError(format!(
                "GitHub responded with an empty body for {}",
                url
            )));
        }

        let records: Vec<R> = serde_json::from_slice(&response.body).map_err(|e| {
            error!(%url, "Failed to decode GitHub response: {}", e);
            DomainError::ApiCallError(format!("Unexpected response shape from {}: {}", url, e))
        })?;

        let next = PageLinks::from_headers(&response.headers).next_url();

        Ok(Page { records, next })
    }

    /// Follow `next` cursors from `start` until the last page, failing fast.
    ///
    /// A cursor that points back at an already fetched page ends the walk.
    pub async fn collect_all<R>(&self, start: Url) -> Result<Vec<R>>
    where
        R: DeserializeOwned + Send,
    {
        let mut records = Vec::new();
        let mut visited = HashSet::new();
        let mut url = start;

        loop {
            let page = self.fetch_page::<R>(&url).await?;

            debug!(%url, page = visited.len() + 1, count = page.records.len(), "Fetched page");

            records.extend(page.records);
            visited.insert(url);

            match page.next {
                Some(next) if visited.contains(&next) => {
                    warn!(%next, "Next link points to a page already fetched, ending walk");
                    break;
                }
                Some(next) => url = next,
                None => break,
            }
        }

        Ok(records)
    }

    pub async fn list_repositories(&self, organization: &str) -> Result<Vec<Repository>> {
        if organization.trim().is_empty() {
            return Err(DomainError::IllegalArgument(
                "Organization name cannot be blank".to_string(),
            ));
        }

        let url = self.repositories_url(organization);
        let repositories: Vec<RepositoryDto> = self.collect_all(url).await?;

        Ok(repositories.into_iter().map(Repository::from).collect())
    }

    /// A repository without contributors yields an empty list.
    pub async fn list_contributors(&self, owner: &str, repo: &str) -> Result<Vec<Contributor>> {
        if owner.trim().is_empty() || repo.trim().is_empty() {
            return Err(DomainError::IllegalArgument(
                "Owner and repository names cannot be blank".to_string(),
            ));
        }

        let url = self.contributors_url(owner, repo);
        let contributors: Vec<ContributorDto> = self.collect_all(url).await?;

        Ok(contributors.into_iter().map(Contributor::from).collect())
    }
}
