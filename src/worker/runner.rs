//! Per-job probe loop.
//!
//! # States
//! - Running: issuing bursts
//! - Stopped: terminal, reached only through a probe failure
//!
//! # Loop
//! ```text
//! loop {
//!     repeat request_rate times: sleep(tick) → probe
//!         failure → Stopped, log host + cause, return (idle skipped)
//!     sleep(idle)
//! }
//! ```

use std::sync::Arc;
use std::time::Duration;

use tokio::time;

use crate::config::WorkerConfig;
use crate::job::JobSpec;
use crate::probe::{Probe, ProbeFailure, ProbeSet};

/// Worker lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    Running,
    Stopped,
}

/// Wait intervals between probes and between bursts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    pub tick: Duration,
    pub idle: Duration,
}

impl From<&WorkerConfig> for Pacing {
    fn from(config: &WorkerConfig) -> Self {
        Self {
            tick: config.tick(),
            idle: config.idle(),
        }
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Pacing::from(&WorkerConfig::default())
    }
}

/// How a worker ended.
#[derive(Debug)]
pub struct WorkerExit {
    /// Probe calls issued, including the failing one.
    pub probes_issued: u64,
    /// Bursts that completed in full.
    pub bursts_completed: u64,
    pub cause: ProbeFailure,
}

/// Drives one job until its target stops answering.
pub struct Worker {
    job: JobSpec,
    probe: Arc<dyn Probe>,
    pacing: Pacing,
    state: WorkerState,
}

impl Worker {
    pub fn new(job: JobSpec, probe: Arc<dyn Probe>, pacing: Pacing) -> Self {
        Self {
            job,
            probe,
            pacing,
            state: WorkerState::Running,
        }
    }

    /// Pick the probe for the job's kind. The choice is fixed for the
    /// worker's lifetime.
    pub fn for_job(job: JobSpec, probes: &ProbeSet, pacing: Pacing) -> Self {
        let probe = probes.select(job.probe_kind());
        Self::new(job, probe, pacing)
    }

    pub fn job(&self) -> &JobSpec {
        &self.job
    }

    pub fn state(&self) -> WorkerState {
        self.state
    }

    /// Run bursts until a probe fails. A target that never fails keeps this
    /// future pending forever.
    pub async fn run(&mut self) -> WorkerExit {
        let host = self.job.target_host().to_string();
        let port = self.job.target_port();
        let rate = self.job.request_rate();

        tracing::info!(
            host = %host,
            port,
            probe = %self.job.probe_kind(),
            request_rate = rate,
            "Worker started"
        );

        let mut probes_issued: u64 = 0;
        let mut bursts_completed: u64 = 0;

        loop {
            for _ in 0..rate {
                time::sleep(self.pacing.tick).await;
                probes_issued += 1;

                if let Err(cause) = self.probe.check(&host, port).await {
                    self.state = WorkerState::Stopped;
                    tracing::warn!(
                        host = %host,
                        error = %cause,
                        probes_issued,
                        "Done at target, worker stopped"
                    );
                    return WorkerExit {
                        probes_issued,
                        bursts_completed,
                        cause,
                    };
                }

                tracing::trace!(host = %host, probes_issued, "Probe succeeded");
            }

            bursts_completed += 1;
            tracing::debug!(host = %host, bursts_completed, idle = ?self.pacing.idle, "Burst complete, idling");
            time::sleep(self.pacing.idle).await;
        }
    }
}
