//! Claims produced by an analysis run.
//!
//! A claim is an immutable value: once generated it is only ever cloned into
//! the session and into exported reports.

use serde::{Deserialize, Serialize};

/// A single statement under evaluation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    /// Unique within a session: "{stamp}_{index}"
    pub id: String,

    /// Human-readable claim statement
    pub text: String,

    /// Confidence percentage, always within [10, 95]
    pub confidence: u8,

    /// Fixed per base claim, independent of `confidence`
    pub verdict: Verdict,

    /// Free-text rationale
    pub explanation: String,

    /// Supporting sources (never empty)
    pub sources: Vec<SourceLink>,
}

impl Claim {
    /// Color bucket used when rendering the confidence bar
    pub fn band(&self) -> ConfidenceBand {
        ConfidenceBand::from_confidence(self.confidence)
    }
}

/// Categorical judgment on a claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    #[serde(rename = "Likely True")]
    LikelyTrue,

    #[serde(rename = "Uncertain")]
    Uncertain,

    #[serde(rename = "Likely False")]
    LikelyFalse,
}

impl Verdict {
    pub fn label(&self) -> &'static str {
        match self {
            Self::LikelyTrue => "Likely True",
            Self::Uncertain => "Uncertain",
            Self::LikelyFalse => "Likely False",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A named reference link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLink {
    pub name: String,
    pub url: String,
}

impl SourceLink {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Rendering bucket for a confidence value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceBand {
    /// 75 and above
    High,

    /// 45 to 74
    Medium,

    /// Below 45
    Low,
}

impl ConfidenceBand {
    pub fn from_confidence(confidence: u8) -> Self {
        if confidence >= 75 {
            Self::High
        } else if confidence >= 45 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}
