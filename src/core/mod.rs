//! Core session logic.
//!
//! This module contains:
//! - Generator: Fixed mock claims with jittered confidence
//! - Controller: Session ownership and the staggered reveal sequence
//! - Export: Report serialization and file output
//! - Error: Analysis failure kinds

pub mod controller;
pub mod error;
pub mod export;
pub mod generator;

// Re-export commonly used types
pub use controller::{RevealTiming, RunHandle, RunOutcome, SessionController};
pub use error::AnalysisError;
pub use export::{read_report, FileReportWriter, ReportWriter};
pub use generator::{IdStamper, CLAIM_COUNT, DEFAULT_LABEL};
