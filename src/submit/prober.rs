//! HTTP liveness prober
//!
//! Checks the live status of each input URL before any indexing decision is
//! made. Redirects are followed, so the status observed is the one the final
//! hop returns. Every network-level failure (timeout, DNS, TLS, connection
//! reset) is normalized to status 0; the core does not distinguish the
//! sub-error.

use crate::config::ProbeConfig;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Outcome of checking a URL's liveness
#[derive(Debug, Clone, Copy)]
pub struct ProbeResult {
    /// HTTP status of the final response, or 0 on any network failure
    pub http_status: u16,

    /// When the probe completed
    pub timestamp: DateTime<Utc>,
}

/// Trait for URL liveness probing
///
/// Probing is infallible by design: failures are data (status 0), not
/// errors, because an unreachable URL is a normal classification outcome.
#[async_trait]
pub trait Prober {
    /// Probes a URL and returns its observed status
    async fn probe(&self, url: &Url) -> ProbeResult;
}

/// Builds the HTTP client used for probing
///
/// # Arguments
///
/// * `config` - The probe configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_probe_client(config: &ProbeConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Live prober backed by a reqwest client
pub struct HttpProber {
    client: Client,
}

impl HttpProber {
    /// Creates a prober from the probe configuration
    pub fn new(config: &ProbeConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_probe_client(config)?,
        })
    }
}

#[async_trait]
impl Prober for HttpProber {
    async fn probe(&self, url: &Url) -> ProbeResult {
        let http_status = match self.client.get(url.clone()).send().await {
            Ok(response) => response.status().as_u16(),
            Err(e) => {
                if e.is_timeout() {
                    tracing::warn!("Probe timeout for {}", url);
                } else if e.is_connect() {
                    tracing::warn!("Probe connection failure for {}", url);
                } else {
                    tracing::warn!("Probe failure for {}: {}", url, e);
                }
                0
            }
        };

        ProbeResult {
            http_status,
            timestamp: Utc::now(),
        }
    }
}
