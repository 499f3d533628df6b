//! Job model.
//!
//! # Data Flow
//! ```text
//! raw request "port&image&memory&makespan&host"
//!     → intake.rs (positional parse)
//!     → spec.rs (JobSpec::new: preconditions, ProbeKind, rate)
//!     → rate.rs (memory → requests per burst, computed once)
//! ```

pub mod intake;
pub mod rate;
pub mod spec;

pub use intake::{parse_job_request, IntakeError};
pub use rate::request_rate;
pub use spec::{JobSpec, JobSpecError, ProbeKind};
