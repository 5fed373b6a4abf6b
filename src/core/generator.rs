//! Mock claim generation.
//!
//! Produces a fixed sequence of three claims for a source label. Text, verdict,
//! explanation and sources are fixed per position; only the confidence is
//! jittered so that repeated runs look different.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use rand::Rng;

use crate::domain::{Claim, SourceLink, Verdict};

/// Label used when no file has been selected
pub const DEFAULT_LABEL: &str = "uploaded_document.pdf";

/// Lowest confidence a generated claim may carry
pub const MIN_CONFIDENCE: u8 = 10;

/// Highest confidence a generated claim may carry
pub const MAX_CONFIDENCE: u8 = 95;

/// Maximum absolute jitter applied to a base confidence
pub const JITTER: f64 = 5.0;

/// Fixed per-position claim template
struct BaseClaim {
    text: fn(&str) -> String,
    confidence: u8,
    verdict: Verdict,
    explanation: &'static str,
    sources: &'static [(&'static str, &'static str)],
}

fn green_tea_text(label: &str) -> String {
    format!(
        "The uploaded {} states that \u{201c}green tea boosts metabolism by 30%.\u{201d}",
        label
    )
}

fn blue_light_text(_label: &str) -> String {
    "It also claims that \u{201c}all blue light glasses prevent digital eye strain.\u{201d}".to_string()
}

fn step_goal_text(_label: &str) -> String {
    "Finally, it suggests \u{201c}a daily 10,000-step goal is essential for health.\u{201d}".to_string()
}

const BASE_CLAIMS: [BaseClaim; 3] = [
    BaseClaim {
        text: green_tea_text,
        confidence: 78,
        verdict: Verdict::LikelyTrue,
        explanation: "Multiple peer-reviewed meta-analyses suggest a modest increase in energy \
            expenditure due to catechins and caffeine, though effect sizes vary.",
        sources: &[
            ("NIH Fact Sheet", "https://ods.od.nih.gov/"),
            ("Cochrane Review (related)", "https://www.cochranelibrary.com/"),
        ],
    },
    BaseClaim {
        text: blue_light_text,
        confidence: 42,
        verdict: Verdict::Uncertain,
        explanation: "Evidence is mixed; some RCTs report no significant benefit for symptoms \
            vs. standard lenses. More robust, standardized trials are needed.",
        sources: &[
            ("AAO (Blue Light)", "https://www.aao.org/eye-health"),
            ("PubMed Search", "https://pubmed.ncbi.nlm.nih.gov/"),
        ],
    },
    BaseClaim {
        text: step_goal_text,
        confidence: 31,
        verdict: Verdict::LikelyFalse,
        explanation: "Health benefits accrue well below 10k steps; recent cohort studies show \
            risk reduction around 6\u{2013}8k steps/day for many adults.",
        sources: &[
            ("CDC Physical Activity", "https://www.cdc.gov/physicalactivity/"),
            ("WHO Guidelines", "https://www.who.int/news-room/fact-sheets"),
        ],
    },
];

/// Number of claims every generation produces
pub const CLAIM_COUNT: usize = BASE_CLAIMS.len();

/// Verdicts in generation order, independent of any jitter
pub fn base_verdicts() -> [Verdict; CLAIM_COUNT] {
    [
        BASE_CLAIMS[0].verdict,
        BASE_CLAIMS[1].verdict,
        BASE_CLAIMS[2].verdict,
    ]
}

/// Apply jitter to a base confidence and clamp into [MIN_CONFIDENCE, MAX_CONFIDENCE]
pub fn jitter_confidence<R: Rng + ?Sized>(base: u8, rng: &mut R) -> u8 {
    let offset: f64 = rng.gen_range(-JITTER..JITTER);
    let jittered = (f64::from(base) + offset).round();
    jittered.clamp(f64::from(MIN_CONFIDENCE), f64::from(MAX_CONFIDENCE)) as u8
}

/// Issues strictly increasing millisecond stamps for claim ids.
///
/// Two generations inside the same millisecond still get distinct stamps.
#[derive(Debug, Default)]
pub struct IdStamper {
    last: AtomicI64,
}

impl IdStamper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next stamp: the current time in ms, or last + 1 if the clock hasn't moved
    pub fn next(&self) -> i64 {
        let now = Utc::now().timestamp_millis();
        let previous = self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now.max(last + 1))
            })
            .unwrap_or_else(|last| last);
        now.max(previous + 1)
    }
}

/// Generate the claim sequence for `label` using `stamp` as the id prefix.
///
/// Never fails; an empty label is used verbatim.
pub fn generate<R: Rng + ?Sized>(label: &str, stamp: i64, rng: &mut R) -> Vec<Claim> {
    BASE_CLAIMS
        .iter()
        .enumerate()
        .map(|(index, base)| Claim {
            id: format!("{}_{}", stamp, index),
            text: (base.text)(label),
            confidence: jitter_confidence(base.confidence, rng),
            verdict: base.verdict,
            explanation: base.explanation.to_string(),
            sources: base
                .sources
                .iter()
                .map(|(name, url)| SourceLink::new(*name, *url))
                .collect(),
        })
        .collect()
}
