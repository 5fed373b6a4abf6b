//! Exported report snapshots.
//!
//! The serialized layout (camelCase keys, `input.fileName`) matches what the
//! download button has always produced, so existing reports stay readable.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};

use super::claim::Claim;
use super::session::Session;

/// Prefix of every exported report file
pub const REPORT_FILE_PREFIX: &str = "truthlens_report_";

/// Immutable snapshot of a session at export time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// When the snapshot was taken (millisecond precision on the wire)
    #[serde(serialize_with = "serialize_millis")]
    pub generated_at: DateTime<Utc>,

    /// Input that was selected at export time
    pub input: ReportInput,

    /// Claims revealed so far
    pub results: Vec<Claim>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportInput {
    pub file_name: String,
}

/// Write a timestamp as `2026-10-19T08:30:00.123Z`
fn serialize_millis<S: Serializer>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_millis(at))
}

fn format_millis(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl Report {
    /// Snapshot a session at the given time
    pub fn from_session(session: &Session, generated_at: DateTime<Utc>) -> Self {
        Self {
            generated_at,
            input: ReportInput {
                file_name: session.input_label.clone(),
            },
            results: session.results.clone(),
        }
    }

    /// File name derived from the export timestamp,
    /// e.g. `truthlens_report_2026-10-19T08-30-00-123Z.json`
    pub fn file_name(&self) -> String {
        let stamp = format_millis(&self.generated_at).replace([':', '.'], "-");
        format!("{}{}.json", REPORT_FILE_PREFIX, stamp)
    }

    /// Pretty-printed JSON body
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
