//! Integration tests for the submission runner
//!
//! These tests use wiremock to stand in for both the probed sites and the
//! indexing API, and drive the full run end-to-end through `run_batch`,
//! including the per-domain CSV reports.

use herald::config::{
    Config, CredentialEntry, InputConfig, ProbeConfig, ReportConfig, SubmissionConfig,
};
use herald::submit::run_batch;
use std::io::Write;
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Scratch layout for one test run: key files, input list, report dir
struct TestRun {
    dir: TempDir,
}

impl TestRun {
    fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// Writes a credential key file and returns its config entry
    fn key_file(&self, name: &str, token: &str) -> CredentialEntry {
        let path = self.dir.path().join(format!("{}.json", name));
        let mut file = std::fs::File::create(&path).expect("Failed to create key file");
        write!(
            file,
            r#"{{"account": "{}@example.com", "token": "{}"}}"#,
            name, token
        )
        .expect("Failed to write key file");

        CredentialEntry {
            name: name.to_string(),
            key_file: path.to_string_lossy().into_owned(),
        }
    }

    /// Writes the input list and returns its path as a string
    fn input_file(&self, name: &str, content: &str) -> String {
        let path = self.dir.path().join(name);
        std::fs::write(&path, content).expect("Failed to write input file");
        path.to_string_lossy().into_owned()
    }

    fn report_dir(&self) -> String {
        self.dir.path().join("reports").to_string_lossy().into_owned()
    }

    /// Builds a run config against the given indexing endpoint
    fn config(
        &self,
        endpoint: &str,
        url_file: String,
        quota: u32,
        credentials: Vec<CredentialEntry>,
    ) -> Config {
        Config {
            submission: SubmissionConfig {
                endpoint: endpoint.to_string(),
                per_credential_quota: quota,
                timeout_secs: 5,
            },
            probe: ProbeConfig {
                user_agent: "HeraldTest/1.0".to_string(),
                timeout_secs: 5,
            },
            input: InputConfig { url_file },
            report: ReportConfig {
                output_dir: self.report_dir(),
            },
            credential: credentials,
        }
    }

    /// Reads the report file written for a domain today
    fn read_report(&self, domain: &str) -> String {
        let date = chrono::Utc::now().format("%Y-%m-%d");
        let path = Path::new(&self.report_dir()).join(format!("{}_{}.csv", domain, date));
        std::fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("Failed to read report {}: {}", path.display(), e))
    }
}

#[tokio::test]
async fn test_full_run_mixed_statuses() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    // Probe targets
    Mock::given(method("GET"))
        .and(path("/live"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    // Indexing API accepting everything
    Mock::given(method("POST"))
        .and(path("/publish"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2) // /live update + /gone delete, nothing else
        .mount(&server)
        .await;

    let run = TestRun::new();
    let input = run.input_file(
        "urls.txt",
        &format!("{base}/live\n{base}/gone\n{base}/broken\n", base = base_url),
    );
    let config = run.config(
        &format!("{}/publish", base_url),
        input,
        200,
        vec![run.key_file("primary", "tok-primary")],
    );

    let summary = run_batch(config).await.expect("Run failed");

    assert_eq!(summary.total, 3);
    assert_eq!(summary.submitted, 2);
    assert_eq!(summary.skipped, 1);
    assert!(summary.completed_cleanly());

    // All three URLs share the mock server's host, so one report file
    // holds header + three rows.
    let domain = url::Url::parse(&base_url)
        .unwrap()
        .host_str()
        .unwrap()
        .to_string();
    let report = run.read_report(&domain);
    assert_eq!(report.lines().count(), 4);
    assert!(report.contains("URL_UPDATED"));
    assert!(report.contains("URL_DELETED"));
    assert!(report.contains("URL_SKIPPED"));
    assert!(report.contains("primary"));
}

#[tokio::test]
async fn test_submission_body_and_bearer_token() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    Mock::given(method("GET"))
        .and(path("/page"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    // The notification must carry the URL, the action type, and the
    // credential's bearer token.
    Mock::given(method("POST"))
        .and(path("/publish"))
        .and(header("authorization", "Bearer tok-primary"))
        .and(body_partial_json(serde_json::json!({
            "type": "URL_UPDATED",
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let run = TestRun::new();
    let input = run.input_file("urls.txt", &format!("{}/page\n", base_url));
    let config = run.config(
        &format!("{}/publish", base_url),
        input,
        200,
        vec![run.key_file("primary", "tok-primary")],
    );

    let summary = run_batch(config).await.expect("Run failed");
    assert_eq!(summary.submitted, 1);
}

#[tokio::test]
async fn test_credential_rotation_on_auth_rejection() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    Mock::given(method("GET"))
        .and(path("/page"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    // First credential is rejected outright; the second is accepted.
    Mock::given(method("POST"))
        .and(path("/publish"))
        .and(header("authorization", "Bearer tok-a"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/publish"))
        .and(header("authorization", "Bearer tok-b"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let run = TestRun::new();
    let input = run.input_file("urls.txt", &format!("{}/page\n", base_url));
    let config = run.config(
        &format!("{}/publish", base_url),
        input,
        200,
        vec![
            run.key_file("first", "tok-a"),
            run.key_file("second", "tok-b"),
        ],
    );

    let summary = run_batch(config).await.expect("Run failed");

    assert_eq!(summary.submitted, 1);
    assert!(summary.completed_cleanly());

    // The rejected credential shows zero submissions in the usage table.
    assert_eq!(summary.credential_usage[0].name, "first");
    assert_eq!(summary.credential_usage[0].submissions, 0);
    assert_eq!(summary.credential_usage[1].name, "second");
    assert_eq!(summary.credential_usage[1].submissions, 1);
}

#[tokio::test]
async fn test_pool_exhaustion_terminates_remaining_urls() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/publish"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let run = TestRun::new();
    let input = run.input_file(
        "urls.txt",
        &format!("{base}/1\n{base}/2\n{base}/3\n", base = base_url),
    );
    // Quota of 1 on a single credential: only the first URL fits.
    let config = run.config(
        &format!("{}/publish", base_url),
        input,
        1,
        vec![run.key_file("primary", "tok-primary")],
    );

    let summary = run_batch(config).await.expect("Run failed");

    assert_eq!(summary.total, 3);
    assert_eq!(summary.submitted, 1);
    assert_eq!(summary.unsubmitted, 2);
    assert!(!summary.completed_cleanly());

    // The force-terminated URLs still appear in the report.
    let domain = url::Url::parse(&base_url)
        .unwrap()
        .host_str()
        .unwrap()
        .to_string();
    let report = run.read_report(&domain);
    assert_eq!(report.lines().count(), 4);
    assert_eq!(report.matches("UNSUBMITTED").count(), 2);
}

#[tokio::test]
async fn test_csv_hints_bypass_probing() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    // Hinted entries must never be probed.
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/publish"))
        .and(body_partial_json(serde_json::json!({
            "url": "https://shop.example.com/discontinued",
            "type": "URL_DELETED",
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let run = TestRun::new();
    let input = run.input_file(
        "urls.csv",
        "URL,Status\nhttps://shop.example.com/discontinued,URL_DELETED\n",
    );
    let config = run.config(
        &format!("{}/publish", base_url),
        input,
        200,
        vec![run.key_file("primary", "tok-primary")],
    );

    let summary = run_batch(config).await.expect("Run failed");
    assert_eq!(summary.submitted, 1);

    // The report groups by the URL's own domain, not the API's.
    let report = run.read_report("shop.example.com");
    assert!(report.contains("https://shop.example.com/discontinued,0,URL_DELETED"));
}

#[tokio::test]
async fn test_transient_api_error_recorded_and_run_continues() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    // The API fails once with a server error, then recovers.
    Mock::given(method("POST"))
        .and(path("/publish"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/publish"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let run = TestRun::new();
    let input = run.input_file(
        "urls.txt",
        &format!("{base}/1\n{base}/2\n", base = base_url),
    );
    let config = run.config(
        &format!("{}/publish", base_url),
        input,
        200,
        vec![run.key_file("primary", "tok-primary")],
    );

    let summary = run_batch(config).await.expect("Run failed");

    assert_eq!(summary.failed, 1);
    assert_eq!(summary.submitted, 1);
    assert!(summary.completed_cleanly());

    // The failed submission did not consume quota.
    assert_eq!(summary.credential_usage[0].quota_remaining, 199);
}

#[tokio::test]
async fn test_unreachable_probe_recorded_without_submission() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    Mock::given(method("POST"))
        .and(path("/publish"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let run = TestRun::new();
    // Port 9 (discard) refuses connections; the probe normalizes to 0.
    let input = run.input_file("urls.txt", "http://127.0.0.1:9/dead\n");
    let config = run.config(
        &format!("{}/publish", base_url),
        input,
        200,
        vec![run.key_file("primary", "tok-primary")],
    );

    let summary = run_batch(config).await.expect("Run failed");

    assert_eq!(summary.total, 1);
    assert_eq!(summary.unreachable, 1);
    assert_eq!(summary.submitted, 0);

    let report = run.read_report("127.0.0.1");
    assert!(report.contains("http://127.0.0.1:9/dead,0,UNREACHABLE"));
}
