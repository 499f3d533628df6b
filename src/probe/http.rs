//! HTTP probe.
//!
//! # Responsibilities
//! - GET `http://{host}:{port}{path}` over a fresh connection
//! - Read the whole body; a completed read is success whatever the status

use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use url::Url;

use crate::config::ProbeConfig;
use crate::job::ProbeKind;
use crate::probe::{with_timeout, Probe, ProbeFailure};

pub struct HttpProbe {
    client: Client<HttpConnector, Body>,
    path: String,
    timeout: Option<Duration>,
}

impl HttpProbe {
    pub fn new(config: &ProbeConfig) -> Self {
        // Idle connections are never kept, so each call dials the target.
        let client = Client::builder(TokioExecutor::new())
            .pool_max_idle_per_host(0)
            .build(HttpConnector::new());

        Self {
            client,
            path: config.http_path.clone(),
            timeout: config.timeout(),
        }
    }

    fn target_url(&self, host: &str, port: u16) -> Result<Url, ProbeFailure> {
        let host = if host.contains(':') && !host.starts_with('[') {
            format!("[{}]", host)
        } else {
            host.to_string()
        };
        let raw = format!("http://{}:{}{}", host, port, self.path);
        Url::parse(&raw).map_err(|e| ProbeFailure::InvalidTarget(format!("{}: {}", raw, e)))
    }

    async fn fetch(&self, url: Url) -> Result<(), ProbeFailure> {
        let request = Request::builder()
            .method(Method::GET)
            .uri(url.as_str())
            .body(Body::empty())
            .map_err(|e| ProbeFailure::InvalidTarget(e.to_string()))?;

        let response = self.client.request(request).await?;
        let status = response.status();

        let body = axum::body::to_bytes(Body::new(response.into_body()), usize::MAX).await?;
        let text = String::from_utf8_lossy(&body);
        let response_line: String = text.lines().collect();

        tracing::trace!(
            url = %url,
            status = %status,
            response = %response_line,
            "Probe response"
        );
        Ok(())
    }
}

#[async_trait]
impl Probe for HttpProbe {
    fn kind(&self) -> ProbeKind {
        ProbeKind::Http
    }

    async fn check(&self, host: &str, port: u16) -> Result<(), ProbeFailure> {
        let url = self.target_url(host, port)?;
        with_timeout(self.timeout, self.fetch(url)).await
    }
}
