//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → LoadgenConfig (validated, immutable)
//!     → probe settings cloned into ProbeSet, pacing into each Worker
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; running workers never observe changes
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{
    ListenerConfig, LoadgenConfig, LogFormat, ObservabilityConfig, ProbeConfig, WorkerConfig,
};
pub use validation::ValidationError;
