use futures::future::join_all;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::aggregate;
use crate::error::{DomainError, Result};
use crate::github::GitHubClient;
use crate::models::{Contributor, ContributorTotal, Repository};
use crate::transport::Transport;

/// Maximum number of contributor fetches in flight at once
pub const DEFAULT_WORKER_POOL_SIZE: usize = 32;

type Dispatched = Result<JoinHandle<Result<Vec<Contributor>>>>;

/// Ranks the contributors of every repository in an organization.
///
/// Per-repository fetches run on a bounded pool shared by all calls made
/// through the same service.
pub struct ContributorService<T> {
    client: Arc<GitHubClient<T>>,
    workers: Arc<Semaphore>,
    pool_size: usize,
}

impl<T: Transport + 'static> ContributorService<T> {
    pub fn new(client: GitHubClient<T>, pool_size: usize) -> Self {
        let pool_size = std::cmp::max(1, pool_size);

        Self {
            client: Arc::new(client),
            workers: Arc::new(Semaphore::new(pool_size)),
            pool_size,
        }
    }

    pub fn pool_size(&self) -> usize {
        self.pool_size
    }

    pub fn available_workers(&self) -> usize {
        self.workers.available_permits()
    }

    pub async fn get_contributors_by_organization(
        &self,
        organization: &str,
    ) -> Result<Vec<ContributorTotal>> {
        let repositories = self.client.list_repositories(organization).await?;

        info!(
            organization,
            repositories = repositories.len(),
            "Fetching contributors for organization"
        );

        let per_repository = self.fetch_contributors(organization, repositories).await;
        let ranked = aggregate::merge(per_repository)?;

        info!(organization, contributors = ranked.len(), "Contributors ranked");

        Ok(ranked)
    }

    /// One outcome per repository, in the same order as `repositories`.
    ///
    /// Dispatch waits for a free worker before spawning each fetch. All
    /// dispatched fetches run to completion even when one of them fails.
    async fn fetch_contributors(
        &self,
        organization: &str,
        repositories: Vec<Repository>,
    ) -> Vec<Result<Vec<Contributor>>> {
        let mut dispatched: Vec<Dispatched> = Vec::with_capacity(repositories.len());

        for repository in repositories {
            let permit = match Arc::clone(&self.workers).acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => {
                    dispatched.push(Err(DomainError::Unexpected(
                        "Worker pool closed unexpectedly".to_string(),
                    )));
                    continue;
                }
            };

            let client = Arc::clone(&self.client);
            let owner = organization.to_string();

            let handle = tokio::spawn(async move {
                let _permit = permit;

                let result = client.list_contributors(&owner, &repository.name).await;
                match &result {
                    Ok(contributors) => debug!(
                        repository = %repository.name,
                        contributors = contributors.len(),
                        "Fetched repository contributors"
                    ),
                    Err(e) => warn!(
                        repository = %repository.name,
                        "Failed to fetch repository contributors: {}",
                        e
                    ),
                }
                result
            });

            dispatched.push(Ok(handle));
        }

        join_all(dispatched.into_iter().map(|dispatch| async move {
            match dispatch {
                Ok(handle) => handle.await.unwrap_or_else(|e| {
                    Err(DomainError::Unexpected(format!(
                        "Contributor fetch task failed: {}",
                        e
                    )))
                }),
                Err(e) => Err(e),
            }
        }))
        .await
    }
}
