//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! intake, workers, probes
//!     → tracing events (worker span: job_id, host, port, probe)
//!     → logging.rs subscriber (stdout, pretty or JSON)
//! ```
//!
//! The subscriber is the only state shared by all workers; records from
//! different workers carry no ordering guarantee.

pub mod logging;

pub use logging::init_logging;
