//! Per-request prediction pipeline
//!
//! Strictly linear flow over request-local data:
//! validate → normalize → infer → rank. The bundle is read-only, so any
//! number of requests can run this concurrently.

use crate::bundle::ModelBundle;
use crate::classifier::invoke_checked;
use crate::ranker::rank;
use crate::validate::{order_features, FeatureMap};
use signserve_core::{Error, Prediction, Result};
use std::time::Instant;
use tracing::debug;

impl ModelBundle {
    /// Run the full pipeline for one feature map.
    ///
    /// Validation failures surface before any numeric work; classifier
    /// failures and non-finite outputs surface as inference errors.
    pub async fn predict(&self, features: &FeatureMap, top_k: usize) -> Result<Prediction> {
        let start = Instant::now();

        let ordered = order_features(features, self.schema())?;
        let normalized = self.scaler().normalize(&ordered);
        let probabilities = invoke_checked(self.classifier(), &normalized).await?;
        let ranked = rank(&probabilities, self.labels(), top_k);

        let prediction = Prediction::from_ranked(ranked)
            .ok_or_else(|| Error::internal("ranking produced no entries"))?;

        debug!(
            predicted = %prediction.predicted_sign,
            confidence = prediction.confidence,
            latency_us = start.elapsed().as_micros() as u64,
            "prediction complete"
        );

        Ok(prediction)
    }
}
