//! Worker subsystem.
//!
//! # Data Flow
//! ```text
//! JobSpec (accepted)
//!     → registry.rs (JobId, tokio task, handle kept)
//!     → runner.rs (burst of request_rate probes, idle, repeat)
//!     → first ProbeFailure: one warn record, task ends
//! ```
//!
//! # Design Decisions
//! - One task per job, unbounded
//! - Workers share nothing but the probe instances and the log sink
//! - No external cancellation; only process shutdown aborts workers

pub mod registry;
pub mod runner;

pub use registry::{JobId, JobSummary, WorkerRegistry};
pub use runner::{Pacing, Worker, WorkerExit, WorkerState};
