//! Per-feature affine normalization
//!
//! Reproduces the standardization applied at training time: each feature
//! is shifted by its fitted mean and divided by its fitted scale, using
//! the mean/scale pair at the matching schema index.

use signserve_core::{Error, Result};

/// Fitted mean/scale pairs, index-aligned with the feature schema
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizationParams {
    mean: Vec<f32>,
    scale: Vec<f32>,
}

impl NormalizationParams {
    /// Create normalization parameters.
    ///
    /// Fails if the sequences differ in length or any scale entry is zero;
    /// a zero scale would make normalization undefined and must be caught
    /// at load time rather than mid-request.
    pub fn new(mean: Vec<f32>, scale: Vec<f32>) -> Result<Self> {
        if mean.len() != scale.len() {
            return Err(Error::load(format!(
                "scaler mean/scale length mismatch: {} vs {}",
                mean.len(),
                scale.len()
            )));
        }
        if let Some(index) = scale.iter().position(|&s| s == 0.0) {
            return Err(Error::load(format!(
                "scaler has zero scale at feature index {index}"
            )));
        }
        Ok(Self { mean, scale })
    }

    /// Number of per-feature pairs
    pub fn len(&self) -> usize {
        self.mean.len()
    }

    /// True if no pairs are present
    pub fn is_empty(&self) -> bool {
        self.mean.is_empty()
    }

    /// Standardize a schema-ordered vector: `(x[i] - mean[i]) / scale[i]`.
    ///
    /// Precondition: `raw.len()` equals `self.len()` (the validator
    /// guarantees this for request traffic).
    pub fn normalize(&self, raw: &[f32]) -> Vec<f32> {
        debug_assert_eq!(raw.len(), self.len());
        raw.iter()
            .zip(self.mean.iter().zip(self.scale.iter()))
            .map(|(&x, (&mean, &scale))| (x - mean) / scale)
            .collect()
    }

    /// Inverse transform: `x[i] * scale[i] + mean[i]`
    pub fn denormalize(&self, normalized: &[f32]) -> Vec<f32> {
        debug_assert_eq!(normalized.len(), self.len());
        normalized
            .iter()
            .zip(self.mean.iter().zip(self.scale.iter()))
            .map(|(&x, (&mean, &scale))| x * scale + mean)
            .collect()
    }
}
