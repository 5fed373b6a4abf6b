//! Claim sources.
//!
//! A claim source turns a source label into a list of claims. The session
//! controller only talks to this trait, so a real retrieval/verification
//! backend can replace the mock without touching the reveal logic.

pub mod mock;

use async_trait::async_trait;

use crate::core::AnalysisError;
use crate::domain::Claim;

pub use mock::MockClaimGenerator;

/// Trait for anything that can produce claims for an input
#[async_trait]
pub trait ClaimSource: Send + Sync {
    /// Human-readable source name
    fn name(&self) -> &str;

    /// Produce the ordered claim list for `label`
    async fn analyze(&self, label: &str) -> Result<Vec<Claim>, AnalysisError>;
}
