//! In-process mock claim source.
//!
//! Wraps the fixed claim generator with an injectable random source so runs
//! can be made reproducible.

use std::sync::Mutex;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::ClaimSource;
use crate::core::generator::{self, IdStamper};
use crate::core::AnalysisError;
use crate::domain::Claim;

/// Mock claim source backed by `core::generator`
pub struct MockClaimGenerator {
    rng: Mutex<StdRng>,
    stamper: IdStamper,
}

impl Default for MockClaimGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl MockClaimGenerator {
    /// Create a generator seeded from OS entropy
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Create a generator with a specific random source
    pub fn with_rng(rng: StdRng) -> Self {
        Self {
            rng: Mutex::new(rng),
            stamper: IdStamper::new(),
        }
    }

    /// Create a reproducible generator
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    /// Generate claims synchronously
    pub fn generate(&self, label: &str) -> Vec<Claim> {
        let stamp = self.stamper.next();
        // A poisoned lock still holds a usable RNG
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        generator::generate(label, stamp, &mut *rng)
    }
}

#[async_trait]
impl ClaimSource for MockClaimGenerator {
    fn name(&self) -> &str {
        "mock"
    }

    async fn analyze(&self, label: &str) -> Result<Vec<Claim>, AnalysisError> {
        Ok(self.generate(label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[tokio::test]
    async fn test_mock_source_name_and_output() {
        let source = MockClaimGenerator::seeded(5);
        assert_eq!(source.name(), "mock");

        let claims = source.analyze("notes.txt").await.unwrap();
        assert_eq!(claims.len(), generator::CLAIM_COUNT);
        assert!(claims[0].text.contains("notes.txt"));
    }

    #[test]
    fn test_ids_unique_across_repeated_calls() {
        let source = MockClaimGenerator::seeded(1);
        let mut ids = HashSet::new();

        for _ in 0..100 {
            for claim in source.generate("a") {
                assert!(ids.insert(claim.id), "duplicate id");
            }
        }
    }

    #[test]
    fn test_seeded_generators_agree_on_confidence() {
        let a = MockClaimGenerator::seeded(11).generate("x");
        let b = MockClaimGenerator::seeded(11).generate("x");

        let conf_a: Vec<u8> = a.iter().map(|c| c.confidence).collect();
        let conf_b: Vec<u8> = b.iter().map(|c| c.confidence).collect();
        assert_eq!(conf_a, conf_b);
    }
}
