//! Ranking of classifier output
//!
//! Pairs each probability with its label, sorts descending by confidence
//! with ties broken by ascending label index, and truncates to top-k.
//! The tie-break makes the ordering fully deterministic, which the test
//! suite and any caller diffing responses rely on.

use crate::schema::LabelSet;
use signserve_core::ScoredLabel;

/// Rank a probability vector against the label set.
///
/// `probabilities` and `labels` must be index-aligned (the bundle loader
/// guarantees matching lengths). Returns at most `top_k` entries; when the
/// class count is smaller, all classes are returned.
pub fn rank(probabilities: &[f32], labels: &LabelSet, top_k: usize) -> Vec<ScoredLabel> {
    debug_assert_eq!(probabilities.len(), labels.len());

    let mut indexed: Vec<(usize, f32)> = probabilities.iter().copied().enumerate().collect();
    indexed.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));

    indexed
        .into_iter()
        .take(top_k)
        .filter_map(|(index, confidence)| {
            labels
                .get(index)
                .map(|label| ScoredLabel::new(label, confidence))
        })
        .collect()
}
