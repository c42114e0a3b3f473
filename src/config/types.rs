use serde::Deserialize;

/// Main configuration structure for Herald
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub submission: SubmissionConfig,
    pub probe: ProbeConfig,
    pub input: InputConfig,
    pub report: ReportConfig,
    #[serde(default)]
    pub credential: Vec<CredentialEntry>,
}

/// Indexing-API submission configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionConfig {
    /// Endpoint the URL notifications are posted to
    pub endpoint: String,

    /// Maximum submissions per credential before rotation is required
    #[serde(rename = "per-credential-quota")]
    pub per_credential_quota: u32,

    /// Timeout for one submission request (seconds)
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Liveness probe configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ProbeConfig {
    /// User agent presented when probing URLs
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Timeout for one probe request (seconds)
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Input source configuration
#[derive(Debug, Clone, Deserialize)]
pub struct InputConfig {
    /// Path to the URL list; a `.csv` extension selects the tabular
    /// `URL,Status` variant with optional pre-computed action hints
    #[serde(rename = "url-file")]
    pub url_file: String,
}

/// Report output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    /// Directory the per-domain CSV reports are written into
    #[serde(rename = "output-dir")]
    pub output_dir: String,
}

/// One credential identity in failover order
///
/// The order of `[[credential]]` entries in the config file is the order
/// the pool tries them in; operators rely on that sequence.
#[derive(Debug, Clone, Deserialize)]
pub struct CredentialEntry {
    /// Display name used in logs and report rows
    pub name: String,

    /// Path to the JSON key file holding the account and token
    #[serde(rename = "key-file")]
    pub key_file: String,
}

fn default_timeout_secs() -> u64 {
    30
}
