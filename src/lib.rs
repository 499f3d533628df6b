//! Load generator for deployed workloads.
//!
//! A job names a target and its memory size; the memory size fixes a request
//! rate, and a dedicated worker probes the target in bursts of that many
//! calls, one per tick, idling between bursts, until a probe fails.

pub mod config;
pub mod http;
pub mod job;
pub mod lifecycle;
pub mod observability;
pub mod probe;
pub mod worker;

pub use config::LoadgenConfig;
pub use http::HttpServer;
pub use job::{JobSpec, ProbeKind};
pub use lifecycle::Shutdown;
pub use worker::{Worker, WorkerRegistry};
