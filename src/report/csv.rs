//! Per-domain CSV report files
//!
//! One append-only CSV file per domain, named `<domain>_<YYYY-MM-DD>.csv`,
//! written into the configured report directory. Rows are flushed as they
//! are recorded, so an interrupted run keeps everything written so far.

use crate::report::sink::{Outcome, ReportError, ReportResult, ResultSink};
use chrono::Utc;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

const HEADER: &str = "URL,Status Code,Status,Error,Date,Credential";

/// Result sink writing one CSV report file per domain
pub struct CsvSink {
    output_dir: PathBuf,
    date_str: String,
    files: HashMap<String, File>,
}

impl CsvSink {
    /// Creates a sink writing into `output_dir`, creating it if needed
    pub fn new(output_dir: &Path) -> ReportResult<Self> {
        std::fs::create_dir_all(output_dir)?;
        Ok(Self {
            output_dir: output_dir.to_path_buf(),
            date_str: Utc::now().format("%Y-%m-%d").to_string(),
            files: HashMap::new(),
        })
    }

    /// Returns the report file path for a domain
    pub fn path_for_domain(&self, domain: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}_{}.csv", domain, self.date_str))
    }

    /// Opens (or creates) the report file for a domain, writing the header
    /// on first creation
    fn file_for_domain(&mut self, domain: &str) -> ReportResult<&mut File> {
        let path = self.path_for_domain(domain);

        match self.files.entry(domain.to_string()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let is_new = !path.exists();

                let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
                if is_new {
                    writeln!(file, "{}", HEADER)?;
                }

                tracing::debug!("Opened report file {}", path.display());
                Ok(entry.insert(file))
            }
        }
    }
}

impl ResultSink for CsvSink {
    fn record(&mut self, outcome: &Outcome) -> ReportResult<()> {
        let row = format!(
            "{},{},{},{},{},{}",
            escape_field(&outcome.url),
            outcome.http_status,
            outcome.status_label(),
            escape_field(outcome.error_detail.as_deref().unwrap_or("N/A")),
            outcome.timestamp.format("%Y-%m-%d"),
            escape_field(outcome.credential.as_deref().unwrap_or("N/A")),
        );

        let file = self.file_for_domain(&outcome.domain)?;
        writeln!(file, "{}", row)?;

        // Flush per row so nothing is lost if the run is interrupted.
        file.flush()?;
        Ok(())
    }

    fn finalize(&mut self) -> ReportResult<()> {
        for (domain, file) in &mut self.files {
            file.flush().map_err(|e| {
                ReportError::Write(format!("Failed to flush report for {}: {}", domain, e))
            })?;
        }
        tracing::info!("Wrote reports for {} domains", self.files.len());
        Ok(())
    }
}

/// Quotes a CSV field when it contains a delimiter, quote, or newline
fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
