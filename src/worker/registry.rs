//! Ownership of running workers.
//!
//! Every accepted job gets its own task immediately; there is no pool and no
//! admission limit. The registry keeps each task's handle so the process can
//! list live workers and tear them down on shutdown. Finished handles are
//! pruned lazily on the next spawn or snapshot.

use std::fmt;

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tracing::Instrument;
use uuid::Uuid;

use crate::job::{JobSpec, ProbeKind};
use crate::probe::ProbeSet;
use crate::worker::runner::{Pacing, Worker};

/// Identifier assigned to a job when its worker is spawned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(Uuid);

impl JobId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Operator view of one live worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSummary {
    pub id: JobId,
    pub host: String,
    pub port: u16,
    pub probe: ProbeKind,
    pub request_rate: u32,
    pub memory_bytes: u64,
    pub makespan: String,
}

struct WorkerEntry {
    job: JobSpec,
    handle: JoinHandle<()>,
}

/// Spawns workers and holds their task handles.
pub struct WorkerRegistry {
    workers: DashMap<JobId, WorkerEntry>,
    probes: ProbeSet,
    pacing: Pacing,
}

impl WorkerRegistry {
    pub fn new(probes: ProbeSet, pacing: Pacing) -> Self {
        Self {
            workers: DashMap::new(),
            probes,
            pacing,
        }
    }

    /// Start a worker for `job` on its own task.
    pub fn spawn(&self, job: JobSpec) -> JobId {
        self.prune();

        let id = JobId::new();
        let mut worker = Worker::for_job(job.clone(), &self.probes, self.pacing);
        let span = tracing::info_span!(
            "worker",
            job_id = %id,
            host = %job.target_host(),
            port = job.target_port(),
            probe = %job.probe_kind(),
        );

        let handle = tokio::spawn(
            async move {
                let exit = worker.run().await;
                tracing::debug!(
                    probes_issued = exit.probes_issued,
                    bursts_completed = exit.bursts_completed,
                    "Worker exited"
                );
            }
            .instrument(span),
        );

        self.workers.insert(id, WorkerEntry { job, handle });
        id
    }

    /// Drop handles of workers that have stopped.
    pub fn prune(&self) {
        self.workers.retain(|_, entry| !entry.handle.is_finished());
    }

    /// Number of live workers.
    pub fn len(&self) -> usize {
        self.prune();
        self.workers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Live workers.
    pub fn snapshot(&self) -> Vec<JobSummary> {
        self.prune();
        self.workers
            .iter()
            .map(|entry| {
                let job = &entry.value().job;
                JobSummary {
                    id: *entry.key(),
                    host: job.target_host().to_string(),
                    port: job.target_port(),
                    probe: job.probe_kind(),
                    request_rate: job.request_rate(),
                    memory_bytes: job.memory_bytes(),
                    makespan: job.makespan().to_string(),
                }
            })
            .collect()
    }

    /// Abort every worker. Used on process shutdown only.
    pub fn abort_all(&self) {
        let count = self.workers.len();
        for entry in self.workers.iter() {
            entry.value().handle.abort();
        }
        self.workers.clear();
        tracing::info!(count, "Aborted workers");
    }
}
