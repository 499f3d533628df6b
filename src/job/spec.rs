//! Immutable job description.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::job::rate::request_rate;

/// Image identifier that selects the key-value probe.
const KEY_VALUE_IMAGE: &str = "redis";

/// Which probe a job's worker issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeKind {
    KeyValue,
    Http,
}

impl ProbeKind {
    /// Map an image identifier to a probe kind. Total: anything that is not
    /// the key-value image is probed over HTTP.
    pub fn from_image(image: &str) -> Self {
        if image == KEY_VALUE_IMAGE {
            ProbeKind::KeyValue
        } else {
            ProbeKind::Http
        }
    }
}

impl fmt::Display for ProbeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeKind::KeyValue => write!(f, "key_value"),
            ProbeKind::Http => write!(f, "http"),
        }
    }
}

/// Rejected JobSpec inputs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JobSpecError {
    #[error("target host is empty")]
    EmptyHost,

    #[error("target port must be non-zero")]
    InvalidPort,
}

/// One load-generation job. The request rate is derived once here and never
/// recomputed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSpec {
    target_port: u16,
    probe_kind: ProbeKind,
    memory_bytes: u64,
    makespan: String,
    target_host: String,
    request_rate: u32,
}

impl JobSpec {
    pub fn new(
        target_port: u16,
        image: &str,
        memory_bytes: u64,
        makespan: impl Into<String>,
        target_host: impl Into<String>,
    ) -> Result<Self, JobSpecError> {
        let target_host = target_host.into();
        if target_host.trim().is_empty() {
            return Err(JobSpecError::EmptyHost);
        }
        if target_port == 0 {
            return Err(JobSpecError::InvalidPort);
        }

        Ok(Self {
            target_port,
            probe_kind: ProbeKind::from_image(image),
            memory_bytes,
            makespan: makespan.into(),
            target_host,
            request_rate: request_rate(memory_bytes),
        })
    }

    pub fn target_port(&self) -> u16 {
        self.target_port
    }

    pub fn target_host(&self) -> &str {
        &self.target_host
    }

    pub fn probe_kind(&self) -> ProbeKind {
        self.probe_kind
    }

    pub fn memory_bytes(&self) -> u64 {
        self.memory_bytes
    }

    /// Carried through for operators; nothing in the worker reads it.
    pub fn makespan(&self) -> &str {
        &self.makespan
    }

    /// Probes per burst.
    pub fn request_rate(&self) -> u32 {
        self.request_rate
    }
}
