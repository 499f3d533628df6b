//! Target probing subsystem.
//!
//! # Data Flow
//! ```text
//! Worker tick
//!     → Probe::check(host, port)
//!         key_value.rs: fresh redis connection → SMEMBERS + EXISTS, results discarded
//!         http.rs:      fresh HTTP connection → GET {path}, body read to the end
//!     → Ok(()) | Err(ProbeFailure)
//! ```
//!
//! # Design Decisions
//! - One attempt per call; retrying is the worker's decision and it never does
//! - No connection reuse between calls
//! - The probe variant is chosen once per worker via `ProbeSet::select`

pub mod http;
pub mod key_value;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::time;

use crate::config::ProbeConfig;
use crate::job::ProbeKind;

pub use self::http::HttpProbe;
pub use self::key_value::KeyValueProbe;

/// Why a probe call failed. Every variant is fatal to the worker.
#[derive(Debug, Error)]
pub enum ProbeFailure {
    /// Connection or protocol error talking to the key-value store.
    #[error("key-value store error: {0}")]
    KeyValue(#[from] redis::RedisError),

    /// Connection or protocol error issuing the HTTP request.
    #[error("HTTP request failed: {0}")]
    Http(#[from] hyper_util::client::legacy::Error),

    /// The response body could not be read to completion.
    #[error("HTTP body read failed: {0}")]
    Body(#[from] axum::Error),

    #[error("probe timed out after {0:?}")]
    Timeout(Duration),

    /// Host/port could not be turned into a request target.
    #[error("invalid target: {0}")]
    InvalidTarget(String),
}

/// A single reachability check against a target.
#[async_trait]
pub trait Probe: Send + Sync {
    /// The variant this probe implements.
    fn kind(&self) -> ProbeKind;

    /// Issue one probe. No retries.
    async fn check(&self, host: &str, port: u16) -> Result<(), ProbeFailure>;
}

/// Run a probe future under an optional deadline.
pub(crate) async fn with_timeout<F>(limit: Option<Duration>, fut: F) -> Result<(), ProbeFailure>
where
    F: Future<Output = Result<(), ProbeFailure>>,
{
    match limit {
        Some(limit) => time::timeout(limit, fut)
            .await
            .map_err(|_| ProbeFailure::Timeout(limit))?,
        None => fut.await,
    }
}

/// One probe per variant, shared by all workers.
#[derive(Clone)]
pub struct ProbeSet {
    key_value: Arc<dyn Probe>,
    http: Arc<dyn Probe>,
}

impl ProbeSet {
    pub fn new(key_value: Arc<dyn Probe>, http: Arc<dyn Probe>) -> Self {
        Self { key_value, http }
    }

    /// Build the production probes from configuration.
    pub fn from_config(config: &ProbeConfig) -> Self {
        Self::new(
            Arc::new(KeyValueProbe::new(config)),
            Arc::new(HttpProbe::new(config)),
        )
    }

    /// The probe for `kind`.
    pub fn select(&self, kind: ProbeKind) -> Arc<dyn Probe> {
        match kind {
            ProbeKind::KeyValue => self.key_value.clone(),
            ProbeKind::Http => self.http.clone(),
        }
    }
}
