//! Report export.
//!
//! Reports are written as pretty-printed JSON, one file per export, named
//! after the export timestamp.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::fs;
use tracing::info;

use crate::domain::Report;

/// Destination for exported reports
#[async_trait]
pub trait ReportWriter: Send + Sync {
    /// Persist a report, returning where it was written
    async fn write(&self, report: &Report) -> Result<PathBuf>;
}

/// Writes reports into a directory on disk
pub struct FileReportWriter {
    dir: PathBuf,
}

impl FileReportWriter {
    /// Create a writer targeting `dir` (created on first write)
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Create a writer targeting the configured reports directory
    pub fn from_config() -> Result<Self> {
        Ok(Self::new(crate::config::reports_dir()?))
    }

    /// Get the output directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl ReportWriter for FileReportWriter {
    async fn write(&self, report: &Report) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("Failed to create reports directory: {}", self.dir.display()))?;

        let body = report
            .to_json_pretty()
            .context("Failed to serialize report")?;

        let path = self.dir.join(report.file_name());
        fs::write(&path, body)
            .await
            .with_context(|| format!("Failed to write report: {}", path.display()))?;

        info!(path = %path.display(), claims = report.results.len(), "Report exported");
        Ok(path)
    }
}

/// Load a previously exported report
pub async fn read_report(path: &Path) -> Result<Report> {
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read report: {}", path.display()))?;

    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse report: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Session;
    use chrono::Utc;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_creates_directory_and_file() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("nested").join("reports");
        let writer = FileReportWriter::new(&dir);

        let report = Report::from_session(&Session::new(), Utc::now());
        let path = writer.write(&report).await.unwrap();

        assert!(path.starts_with(&dir));
        assert!(path.exists());
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            report.file_name()
        );
    }

    #[tokio::test]
    async fn test_read_report_rejects_garbage() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.json");
        std::fs::write(&path, "not json").unwrap();

        let err = read_report(&path).await.unwrap_err();
        assert!(err.to_string().contains("Failed to parse report"));
    }
}
