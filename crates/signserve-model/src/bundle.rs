//! Model artifact bundle loading
//!
//! The training pipeline writes four artifacts into a model directory:
//! `features.json`, `labels.json`, `scaler.json`, and `model.safetensors`.
//! They are co-dependent (index-aligned) and loaded together here, with
//! every cross-check done at load time so a bad bundle fails startup
//! instead of a request.

use crate::classifier::SignClassifier;
use crate::mlp::MlpClassifier;
use crate::scaler::NormalizationParams;
use crate::schema::{FeatureSchema, LabelSet};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use signserve_core::{Error, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Locations of the four artifact files
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    pub features: PathBuf,
    pub labels: PathBuf,
    pub scaler: PathBuf,
    pub weights: PathBuf,
}

impl ArtifactPaths {
    /// Standard artifact layout inside a model directory
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            features: dir.join("features.json"),
            labels: dir.join("labels.json"),
            scaler: dir.join("scaler.json"),
            weights: dir.join("model.safetensors"),
        }
    }
}

#[derive(Debug, Deserialize)]
struct FeaturesFile {
    feature_names: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct LabelsFile {
    labels: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ScalerFile {
    mean: Vec<f32>,
    scale: Vec<f32>,
}

/// Immutable set of everything needed to serve predictions.
///
/// Constructed once at startup, shared read-only by all requests, never
/// mutated afterward.
pub struct ModelBundle {
    schema: FeatureSchema,
    labels: LabelSet,
    scaler: NormalizationParams,
    classifier: Arc<dyn SignClassifier>,
}

impl ModelBundle {
    /// Load and cross-check the full artifact set.
    ///
    /// Any inconsistency (length mismatches, zero scale, duplicate names,
    /// classifier dimensionality) is a fatal `Load` error.
    pub fn load(paths: &ArtifactPaths) -> Result<Self> {
        let features: FeaturesFile = read_json(&paths.features)?;
        let schema = FeatureSchema::new(features.feature_names)?;
        info!(num_features = schema.len(), "loaded feature schema");

        let labels: LabelsFile = read_json(&paths.labels)?;
        let labels = LabelSet::new(labels.labels)?;
        info!(num_classes = labels.len(), "loaded label set");

        let scaler: ScalerFile = read_json(&paths.scaler)?;
        let scaler = NormalizationParams::new(scaler.mean, scaler.scale)?;
        info!("loaded scaler parameters");

        let classifier = MlpClassifier::load(&paths.weights)?;
        info!(
            model = classifier.name(),
            num_inputs = classifier.num_inputs(),
            num_classes = classifier.num_classes(),
            "loaded classifier weights"
        );

        Self::from_parts(schema, labels, scaler, Arc::new(classifier))
    }

    /// Assemble a bundle from already-built parts, applying the same
    /// cross-checks as `load`. Useful for tests with fake classifiers.
    pub fn from_parts(
        schema: FeatureSchema,
        labels: LabelSet,
        scaler: NormalizationParams,
        classifier: Arc<dyn SignClassifier>,
    ) -> Result<Self> {
        if schema.is_empty() {
            return Err(Error::load("feature schema is empty"));
        }
        if labels.is_empty() {
            return Err(Error::load("label set is empty"));
        }
        if scaler.len() != schema.len() {
            return Err(Error::load(format!(
                "scaler has {} entries but schema has {} features",
                scaler.len(),
                schema.len()
            )));
        }
        if classifier.num_inputs() != schema.len() {
            return Err(Error::load(format!(
                "classifier expects {} inputs but schema has {} features",
                classifier.num_inputs(),
                schema.len()
            )));
        }
        if classifier.num_classes() != labels.len() {
            return Err(Error::load(format!(
                "classifier produces {} classes but label set has {}",
                classifier.num_classes(),
                labels.len()
            )));
        }

        Ok(Self {
            schema,
            labels,
            scaler,
            classifier,
        })
    }

    /// Ordered feature schema
    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    /// Ordered label set
    pub fn labels(&self) -> &LabelSet {
        &self.labels
    }

    /// Normalization parameters
    pub fn scaler(&self) -> &NormalizationParams {
        &self.scaler
    }

    /// The scoring function behind the capability trait
    pub fn classifier(&self) -> &dyn SignClassifier {
        self.classifier.as_ref()
    }

    /// Number of features (F)
    pub fn num_features(&self) -> usize {
        self.schema.len()
    }

    /// Number of classes (C)
    pub fn num_classes(&self) -> usize {
        self.labels.len()
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::load(format!("failed to read {}: {e}", path.display())))?;
    serde_json::from_str(&content)
        .map_err(|e| Error::load(format!("failed to parse {}: {e}", path.display())))
}
