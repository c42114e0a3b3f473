//! Indexing-API submission client
//!
//! Performs one notification call per invocation, authenticated by the
//! credential the pool currently holds active. The client never retries:
//! the single credential-failure retry lives in the batch runner, and
//! everything else is at-most-once per URL per run.

use crate::classify::Action;
use crate::config::SubmissionConfig;
use crate::pool::Credential;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use url::Url;

/// Result of one notification call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifyResult {
    /// The API accepted the notification
    Success,

    /// The API rejected this credential specifically (auth or quota);
    /// the caller should rotate and may retry once
    CredentialRejected(String),

    /// A failure unrelated to the credential (server error, network);
    /// no indexing effect occurred and no quota should be charged
    Transient(String),
}

/// Trait for the indexing API
#[async_trait]
pub trait IndexingApi {
    /// Submits one URL notification with the given credential
    ///
    /// Never called for non-submittable actions; the runner filters
    /// `Skip` and `Unreachable` before reaching this seam.
    async fn notify(&self, url: &Url, action: Action, credential: &Credential) -> NotifyResult;
}

/// HTTP client for the URL notification endpoint
pub struct HttpSubmissionClient {
    client: Client,
    endpoint: Url,
}

impl HttpSubmissionClient {
    /// Creates a submission client from the submission configuration
    pub fn new(config: &SubmissionConfig) -> Result<Self, crate::HeraldError> {
        let endpoint = Url::parse(&config.endpoint)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl IndexingApi for HttpSubmissionClient {
    async fn notify(&self, url: &Url, action: Action, credential: &Credential) -> NotifyResult {
        let body = serde_json::json!({
            "url": url.as_str(),
            "type": action.as_report_str(),
        });

        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(credential.token())
            .json(&body)
            .send()
            .await;

        match response {
            Ok(response) => {
                let status = response.status();
                if status.is_success() {
                    tracing::debug!("API accepted {} for {}", action, url);
                    return NotifyResult::Success;
                }

                match status {
                    StatusCode::UNAUTHORIZED
                    | StatusCode::FORBIDDEN
                    | StatusCode::TOO_MANY_REQUESTS => NotifyResult::CredentialRejected(format!(
                        "API returned HTTP {} for credential '{}'",
                        status.as_u16(),
                        credential.identifier()
                    )),
                    _ => NotifyResult::Transient(format!(
                        "API returned HTTP {}",
                        status.as_u16()
                    )),
                }
            }
            Err(e) => NotifyResult::Transient(format!("API request failed: {}", e)),
        }
    }
}
