//! Key-value store probe.
//!
//! # Responsibilities
//! - Open a fresh redis connection to the target
//! - Issue `SMEMBERS {set_key}` and `EXISTS {exists_key}`
//! - Discard both replies; only connection and protocol errors matter
//! - Bound connecting and each reply by the configured deadline

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use redis::{AsyncCommands, ConnectionAddr, ConnectionInfo, RedisConnectionInfo, RedisResult};
use tokio::time;

use crate::config::ProbeConfig;
use crate::job::ProbeKind;
use crate::probe::{Probe, ProbeFailure};

pub struct KeyValueProbe {
    set_key: String,
    exists_key: String,
    timeout: Duration,
}

/// Await one redis step, failing with `Timeout` past `limit`.
async fn within<T, F>(limit: Duration, step: F) -> Result<T, ProbeFailure>
where
    F: Future<Output = RedisResult<T>>,
{
    let reply = time::timeout(limit, step)
        .await
        .map_err(|_| ProbeFailure::Timeout(limit))?;
    Ok(reply?)
}

impl KeyValueProbe {
    pub fn new(config: &ProbeConfig) -> Self {
        Self {
            set_key: config.set_key.clone(),
            exists_key: config.exists_key.clone(),
            timeout: config.key_value_timeout(),
        }
    }

    async fn query(&self, host: &str, port: u16) -> Result<(), ProbeFailure> {
        let info = ConnectionInfo {
            addr: ConnectionAddr::Tcp(host.to_string(), port),
            redis: RedisConnectionInfo::default(),
        };
        let client = redis::Client::open(info)?;
        let mut conn = within(self.timeout, client.get_multiplexed_async_connection()).await?;

        let members: redis::Value =
            within(self.timeout, conn.smembers(self.set_key.as_str())).await?;
        let exists: redis::Value =
            within(self.timeout, conn.exists(self.exists_key.as_str())).await?;

        tracing::trace!(
            host = %host,
            members = ?members,
            exists = ?exists,
            "Key-value probe replies"
        );
        Ok(())
    }
}

#[async_trait]
impl Probe for KeyValueProbe {
    fn kind(&self) -> ProbeKind {
        ProbeKind::KeyValue
    }

    async fn check(&self, host: &str, port: u16) -> Result<(), ProbeFailure> {
        self.query(host, port).await
    }
}
