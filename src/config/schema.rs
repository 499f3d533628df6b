//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the load
//! generator. All types derive Serde traits for deserialization from config
//! files.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration for the load generator.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct LoadgenConfig {
    /// Intake listener configuration.
    pub listener: ListenerConfig,

    /// Probe settings shared by every worker.
    pub probe: ProbeConfig,

    /// Worker pacing.
    pub worker: WorkerConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8001").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8001".to_string(),
        }
    }
}

/// Probe configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Path requested by the HTTP probe.
    pub http_path: String,

    /// Key queried for set membership by the key-value probe.
    pub set_key: String,

    /// Key checked for existence by the key-value probe.
    pub exists_key: String,

    /// Optional HTTP probe timeout in seconds. `None` waits indefinitely.
    pub timeout_secs: Option<u64>,

    /// Key-value probe deadline for connecting and for each reply, in
    /// milliseconds.
    pub key_value_timeout_millis: u64,
}

impl ProbeConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn key_value_timeout(&self) -> Duration {
        Duration::from_millis(self.key_value_timeout_millis)
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            http_path: "/timeserver".to_string(),
            set_key: "key1".to_string(),
            exists_key: "key10000000000000".to_string(),
            timeout_secs: None,
            key_value_timeout_millis: 2000,
        }
    }
}

/// Worker pacing configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WorkerConfig {
    /// Wait before each probe in a burst, in milliseconds.
    pub tick_millis: u64,

    /// Idle period after a completed burst, in seconds.
    pub idle_secs: u64,
}

impl WorkerConfig {
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_millis)
    }

    pub fn idle(&self) -> Duration {
        Duration::from_secs(self.idle_secs)
    }
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            tick_millis: 1000,
            idle_secs: 100,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Human-readable or JSON log lines.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_fixed_pacing() {
        let config = LoadgenConfig::default();
        assert_eq!(config.worker.tick(), Duration::from_secs(1));
        assert_eq!(config.worker.idle(), Duration::from_secs(100));
        assert_eq!(config.probe.http_path, "/timeserver");
        assert_eq!(config.probe.set_key, "key1");
        assert_eq!(config.probe.exists_key, "key10000000000000");
        assert!(config.probe.timeout().is_none());
        assert_eq!(config.probe.key_value_timeout(), Duration::from_secs(2));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: LoadgenConfig = toml::from_str(
            r#"
            [listener]
            bind_address = "127.0.0.1:9000"

            [observability]
            log_format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.listener.bind_address, "127.0.0.1:9000");
        assert_eq!(config.observability.log_format, LogFormat::Json);
        assert_eq!(config.observability.log_level, "info");
        assert_eq!(config.worker.tick_millis, 1000);
    }

    #[test]
    fn test_timeout_parsed_when_present() {
        let config: LoadgenConfig = toml::from_str("[probe]\ntimeout_secs = 5\n").unwrap();
        assert_eq!(config.probe.timeout(), Some(Duration::from_secs(5)));
    }
}
