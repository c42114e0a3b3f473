use crate::config::types::{
    Config, CredentialEntry, InputConfig, ProbeConfig, ReportConfig, SubmissionConfig,
};
use crate::ConfigError;
use std::collections::HashSet;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_submission_config(&config.submission)?;
    validate_probe_config(&config.probe)?;
    validate_input_config(&config.input)?;
    validate_report_config(&config.report)?;
    validate_credentials(&config.credential)?;
    Ok(())
}

/// Validates submission configuration
fn validate_submission_config(config: &SubmissionConfig) -> Result<(), ConfigError> {
    let endpoint = Url::parse(&config.endpoint)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid endpoint: {}", e)))?;

    if endpoint.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "endpoint must use HTTPS scheme, got '{}'",
            endpoint.scheme()
        )));
    }

    if config.per_credential_quota < 1 {
        return Err(ConfigError::Validation(format!(
            "per_credential_quota must be >= 1, got {}",
            config.per_credential_quota
        )));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "submission timeout_secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    Ok(())
}

/// Validates probe configuration
fn validate_probe_config(config: &ProbeConfig) -> Result<(), ConfigError> {
    if config.user_agent.is_empty() {
        return Err(ConfigError::Validation(
            "probe user_agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "probe timeout_secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    Ok(())
}

/// Validates input configuration
fn validate_input_config(config: &InputConfig) -> Result<(), ConfigError> {
    if config.url_file.is_empty() {
        return Err(ConfigError::Validation(
            "url_file cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates report configuration
fn validate_report_config(config: &ReportConfig) -> Result<(), ConfigError> {
    if config.output_dir.is_empty() {
        return Err(ConfigError::Validation(
            "output_dir cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates credential entries
///
/// At least one credential is required, names must be unique (they key the
/// report rows), and every entry must point at a key file.
fn validate_credentials(entries: &[CredentialEntry]) -> Result<(), ConfigError> {
    if entries.is_empty() {
        return Err(ConfigError::Validation(
            "at least one [[credential]] entry is required".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for entry in entries {
        if entry.name.is_empty() {
            return Err(ConfigError::Validation(
                "credential name cannot be empty".to_string(),
            ));
        }

        if !seen.insert(entry.name.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate credential name '{}'",
                entry.name
            )));
        }

        if entry.key_file.is_empty() {
            return Err(ConfigError::Validation(format!(
                "credential '{}' has an empty key-file",
                entry.name
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        Config {
            submission: SubmissionConfig {
                endpoint: "https://indexing.example.com/v3/urlNotifications:publish".to_string(),
                per_credential_quota: 200,
                timeout_secs: 30,
            },
            probe: ProbeConfig {
                user_agent: "Herald/1.0".to_string(),
                timeout_secs: 30,
            },
            input: InputConfig {
                url_file: "urls.txt".to_string(),
            },
            report: ReportConfig {
                output_dir: "./reports".to_string(),
            },
            credential: vec![CredentialEntry {
                name: "primary".to_string(),
                key_file: "keys/primary.json".to_string(),
            }],
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate(&valid_config()).is_ok());
    }

    #[test]
    fn test_http_endpoint_rejected() {
        let mut config = valid_config();
        config.submission.endpoint = "http://indexing.example.com/publish".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_malformed_endpoint_rejected() {
        let mut config = valid_config();
        config.submission.endpoint = "not a url".to_string();
        assert!(matches!(validate(&config), Err(ConfigError::InvalidUrl(_))));
    }

    #[test]
    fn test_zero_quota_rejected() {
        let mut config = valid_config();
        config.submission.per_credential_quota = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_empty_user_agent_rejected() {
        let mut config = valid_config();
        config.probe.user_agent = String::new();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_no_credentials_rejected() {
        let mut config = valid_config();
        config.credential.clear();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_duplicate_credential_names_rejected() {
        let mut config = valid_config();
        config.credential.push(CredentialEntry {
            name: "primary".to_string(),
            key_file: "keys/other.json".to_string(),
        });
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_empty_key_file_rejected() {
        let mut config = valid_config();
        config.credential[0].key_file = String::new();
        assert!(validate(&config).is_err());
    }
}
