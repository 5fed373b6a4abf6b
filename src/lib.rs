//! truthlens - Mocked real-time fact checker
//!
//! Simulates a fact-checking session: a file name is selected, a fixed set of
//! claims with jittered confidence is "analyzed", and the claims are revealed
//! one at a time on a fixed cadence. The session can be exported as a JSON
//! report at any point.
//!
//! # Modules
//!
//! - `adapters`: Claim sources (the in-process mock generator)
//! - `core`: Session controller, claim generation, report export
//! - `domain`: Data structures (Claim, Session, Report)
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Analyze a file name and export the report
//! truthlens analyze report.pdf --export
//!
//! # Print a saved report
//! truthlens show ~/.truthlens/reports/truthlens_report_<timestamp>.json
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;

// Re-export main types at crate root for convenience
pub use adapters::{ClaimSource, MockClaimGenerator};
pub use crate::core::{AnalysisError, FileReportWriter, ReportWriter, RunOutcome, SessionController};
pub use domain::{Claim, Report, Session, SessionState, SourceLink, Verdict};
