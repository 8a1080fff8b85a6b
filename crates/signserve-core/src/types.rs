//! Prediction domain types shared between the pipeline and the HTTP layer

use serde::{Deserialize, Serialize};

/// A single label paired with the classifier's confidence for it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredLabel {
    /// Sign/class name
    pub sign: String,

    /// Confidence score (0.0-1.0)
    pub confidence: f32,
}

impl ScoredLabel {
    /// Create a new scored label
    pub fn new(sign: impl Into<String>, confidence: f32) -> Self {
        Self {
            sign: sign.into(),
            confidence,
        }
    }
}

/// Ranked prediction for a single request
///
/// `all_predictions` is sorted descending by confidence (ties broken by
/// label order in the model's label set) and truncated to the configured
/// top-k. The first entry is duplicated into `predicted_sign`/`confidence`
/// for callers that only care about the winner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Highest-ranked sign
    pub predicted_sign: String,

    /// Confidence of the highest-ranked sign
    pub confidence: f32,

    /// Top-k ranked (sign, confidence) pairs, best first
    pub all_predictions: Vec<ScoredLabel>,
}

impl Prediction {
    /// Build a prediction from an already-ranked list.
    ///
    /// Returns `None` for an empty ranking; a loaded bundle always has at
    /// least one label, so this only happens with hand-built inputs.
    pub fn from_ranked(ranked: Vec<ScoredLabel>) -> Option<Self> {
        let top = ranked.first()?.clone();
        Some(Self {
            predicted_sign: top.sign,
            confidence: top.confidence,
            all_predictions: ranked,
        })
    }
}
