//! Classifier capability trait
//!
//! The scoring function is a black box: given F floats, return C floats.
//! Everything else in the pipeline is independent of the concrete model
//! format, so swapping the embedded network for another implementation
//! touches nothing but the type behind this trait.

use async_trait::async_trait;
use signserve_core::{Error, Result};

/// Trait for all sign classifiers
#[async_trait]
pub trait SignClassifier: Send + Sync {
    /// Score a normalized feature vector into a probability distribution
    /// over the classes
    async fn infer(&self, features: &[f32]) -> Result<Vec<f32>>;

    /// Input dimensionality (F)
    fn num_inputs(&self) -> usize;

    /// Output dimensionality (C)
    fn num_classes(&self) -> usize;

    /// Get the classifier name
    fn name(&self) -> &str;
}

/// Run the classifier and check its output before it reaches the ranker.
///
/// The distribution itself is the model's contract (values are not checked
/// to sum to 1), but a non-finite value or a wrong-sized output is an
/// inference failure and must never propagate silently.
pub async fn invoke_checked(classifier: &dyn SignClassifier, features: &[f32]) -> Result<Vec<f32>> {
    let probabilities = classifier.infer(features).await?;

    if probabilities.len() != classifier.num_classes() {
        return Err(Error::inference(format!(
            "classifier '{}' returned {} outputs, expected {}",
            classifier.name(),
            probabilities.len(),
            classifier.num_classes()
        )));
    }

    if let Some(index) = probabilities.iter().position(|p| !p.is_finite()) {
        return Err(Error::inference(format!(
            "classifier '{}' returned a non-finite value at output {}",
            classifier.name(),
            index
        )));
    }

    Ok(probabilities)
}
