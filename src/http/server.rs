//! Intake HTTP server.
//!
//! # Responsibilities
//! - Create the Axum router and its middleware (tracing, request ID)
//! - Turn `/entrypoint` requests into workers
//! - List live workers on `/jobs`
//! - Abort remaining workers once the server has shut down
//!
//! # Design Decisions
//! - `/entrypoint` always answers 202 with an empty body; malformed requests
//!   are dropped silently and probe outcomes are never reported back

use std::sync::Arc;

use axum::{
    extract::{RawQuery, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::LoadgenConfig;
use crate::job::parse_job_request;
use crate::probe::ProbeSet;
use crate::worker::{JobSummary, Pacing, WorkerRegistry};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<WorkerRegistry>,
}

/// HTTP server accepting load-generation jobs.
pub struct HttpServer {
    router: Router,
    registry: Arc<WorkerRegistry>,
}

impl HttpServer {
    /// Create a server whose workers use the configured probes and pacing.
    pub fn new(config: &LoadgenConfig) -> Self {
        let probes = ProbeSet::from_config(&config.probe);
        let registry = Arc::new(WorkerRegistry::new(probes, Pacing::from(&config.worker)));
        Self::with_registry(registry)
    }

    /// Create a server around an existing registry.
    pub fn with_registry(registry: Arc<WorkerRegistry>) -> Self {
        let state = AppState {
            registry: registry.clone(),
        };
        Self {
            router: Self::build_router(state),
            registry,
        }
    }

    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/entrypoint", get(submit_job))
            .route("/jobs", get(list_jobs))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::x_request_id()),
            )
    }

    /// Workers spawned by this server.
    pub fn registry(&self) -> Arc<WorkerRegistry> {
        self.registry.clone()
    }

    /// Serve until `shutdown` fires, then abort every worker.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "Intake server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        self.registry.abort_all();
        tracing::info!("Intake server stopped");
        Ok(())
    }
}

/// `GET /entrypoint?port&image&memory&makespan&host`
async fn submit_job(State(state): State<AppState>, RawQuery(query): RawQuery) -> StatusCode {
    let Some(query) = query else {
        tracing::debug!("Job request without query, ignoring");
        return StatusCode::ACCEPTED;
    };

    match parse_job_request(&query) {
        Ok(job) => {
            let host = job.target_host().to_string();
            let port = job.target_port();
            let probe = job.probe_kind();
            let request_rate = job.request_rate();
            let job_id = state.registry.spawn(job);
            tracing::info!(
                job_id = %job_id,
                host = %host,
                port,
                probe = %probe,
                request_rate,
                "Job accepted"
            );
        }
        Err(e) => {
            tracing::debug!(query = %query, error = %e, "Malformed job request, ignoring");
        }
    }

    StatusCode::ACCEPTED
}

/// `GET /jobs`
async fn list_jobs(State(state): State<AppState>) -> Json<Vec<JobSummary>> {
    Json(state.registry.snapshot())
}
