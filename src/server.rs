use crate::error::DomainError;
use crate::models::ContributorTotal;
use crate::service::ContributorService;
use crate::transport::Transport;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

const BLANK_ORGANIZATION: &str = "Organization name cannot be blank";
const TROUBLE_FETCHING: &str = "Sorry, we have troubles fetching repositories. Please, try again later";

/// Response for errors
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub workers: WorkerPoolStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerPoolStatus {
    pub capacity: usize,
    pub available: usize,
}

/// Liveness probe response (minimal, just indicates the process is running)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LivenessResponse {
    pub status: String,
}

/// Application state shared by every handler
pub struct AppState<T> {
    pub service: Arc<ContributorService<T>>,
    pub start_time: Instant,
}

impl<T> AppState<T> {
    pub fn new(service: Arc<ContributorService<T>>) -> Self {
        Self {
            service,
            start_time: Instant::now(),
        }
    }
}

impl<T> Clone for AppState<T> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            start_time: self.start_time,
        }
    }
}

pub fn create_router<T: Transport + 'static>(state: AppState<T>) -> Router {
    Router::new()
        .route("/org/:organization/contributors", get(get_contributors::<T>))
        .route("/health", get(health_check::<T>))
        .route("/livez", get(liveness_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn get_contributors<T: Transport + 'static>(
    State(state): State<AppState<T>>,
    Path(organization): Path<String>,
) -> Result<Json<Vec<ContributorTotal>>, Response> {
    state
        .service
        .get_contributors_by_organization(&organization)
        .await
        .map(Json)
        .map_err(|e| error_response(&organization, e))
}

/// Map a domain failure to the status code and message seen by API clients.
fn error_response(organization: &str, error: DomainError) -> Response {
    let (status, message) = match &error {
        DomainError::IllegalArgument(_) => (StatusCode::BAD_REQUEST, BLANK_ORGANIZATION.to_string()),
        DomainError::NotFound(_) => (
            StatusCode::NOT_FOUND,
            "Organization not found".to_string(),
        ),
        DomainError::ApiCallError(_) => {
            warn!(organization, "Contributors request failed: {}", error);
            (StatusCode::INTERNAL_SERVER_ERROR, TROUBLE_FETCHING.to_string())
        }
        DomainError::Unexpected(_) => {
            error!(organization, "Domain error not mapped at the HTTP boundary: {}", error);
            (StatusCode::INTERNAL_SERVER_ERROR, TROUBLE_FETCHING.to_string())
        }
    };

    (status, Json(ErrorResponse { error: message })).into_response()
}

/// Main health check endpoint
async fn health_check<T: Transport + 'static>(
    State(state): State<AppState<T>>,
) -> impl IntoResponse {
    let response = HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        workers: WorkerPoolStatus {
            capacity: state.service.pool_size(),
            available: state.service.available_workers(),
        },
    };

    (StatusCode::OK, Json(response))
}

/// Kubernetes liveness probe - just checks if the process is alive
async fn liveness_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(LivenessResponse {
            status: "alive".to_string(),
        }),
    )
}
