//! Domain types for truthlens.
//!
//! Claims, the session they accumulate in, and the reports exported from it.

pub mod claim;
pub mod report;
pub mod session;

pub use claim::{Claim, ConfidenceBand, SourceLink, Verdict};
pub use report::{Report, ReportInput, REPORT_FILE_PREFIX};
pub use session::{Session, SessionState};
