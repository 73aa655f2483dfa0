use clap::Parser;
use colored::*;
use org_contributors_server::cli::Cli;
use org_contributors_server::github::GitHubClient;
use org_contributors_server::server::{create_router, AppState};
use org_contributors_server::service::ContributorService;
use org_contributors_server::transport::ReqwestTransport;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .init();

    let cli = Cli::parse();

    println!("{}", "Organization Contributors Server".bold().green());
    println!("{}\n", "=".repeat(50).dimmed());

    let transport = ReqwestTransport::new(
        &cli.user_agent,
        Duration::from_secs(cli.request_timeout),
    )?;
    let client = GitHubClient::new(transport, &cli.api_url)?;
    let service = Arc::new(ContributorService::new(client, cli.workers));

    println!("✅ GitHub API: {}", cli.api_url);
    println!("✅ Worker pool: {} concurrent fetches", service.pool_size());

    let app = create_router(AppState::new(service));

    let addr = format!("{}:{}", cli.host, cli.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("Contributors server listening on http://{}", addr);
    println!("📡 Serving GET /org/{{organization}}/contributors");
    println!("\nPress Ctrl+C to stop the server\n");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    println!("✅ Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        eprintln!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    println!("\n🛑 Shutting down server...");
}
