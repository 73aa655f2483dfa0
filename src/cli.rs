use clap::Parser;

use crate::github::DEFAULT_API_BASE_URL;

#[derive(Parser, Debug)]
#[command(name = "org-contributors-server")]
#[command(about = "Organization Contributors Server - Ranks contributors across every repository of a GitHub organization")]
#[command(version)]
pub struct Cli {
    /// Address to bind the HTTP server to
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to bind the HTTP server to
    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Base URL of the GitHub REST API
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_BASE_URL)]
    pub api_url: String,

    /// Maximum number of repository contributor fetches in flight
    #[arg(long, env = "FETCH_WORKERS", default_value_t = crate::service::DEFAULT_WORKER_POOL_SIZE)]
    pub workers: usize,

    /// Per-request timeout for GitHub API calls, in seconds
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    pub request_timeout: u64,

    /// User agent sent to the GitHub API
    #[arg(long, env = "USER_AGENT", default_value = concat!("org-contributors-server/", env!("CARGO_PKG_VERSION")))]
    pub user_agent: String,
}
