//! Errors raised at the analysis boundary.

use thiserror::Error;

use crate::domain::Claim;

/// Terminal failure of an analysis run
#[derive(Debug, Clone, Error)]
pub enum AnalysisError {
    #[error("No input supplied for analysis")]
    InputUnavailable,

    #[error("Claim source unavailable: {0}")]
    BackendUnavailable(String),

    #[error("Analysis timed out after {seconds}s")]
    Timeout { seconds: u64 },

    /// Some claims were produced before the source failed
    #[error("Analysis stopped after {} claim(s): {reason}", .claims.len())]
    PartialResult { claims: Vec<Claim>, reason: String },
}

impl AnalysisError {
    /// Claims that should still be revealed despite the failure
    pub fn into_partial_claims(self) -> Vec<Claim> {
        match self {
            Self::PartialResult { claims, .. } => claims,
            _ => Vec::new(),
        }
    }
}
