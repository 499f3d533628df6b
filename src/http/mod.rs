//! HTTP intake subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum router, request ID, trace layer)
//!     → /entrypoint: job::intake parse → WorkerRegistry::spawn
//!     → /jobs: WorkerRegistry::snapshot
//! ```

pub mod server;

pub use server::HttpServer;
