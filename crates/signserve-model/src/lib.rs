//! SignServe Model
//!
//! Model artifact bundle and prediction pipeline for hand-sign recognition.
//!
//! The bundle is the unit of deployment: an ordered feature schema, an
//! ordered label set, per-feature normalization parameters, and a trained
//! scoring network. All four are produced together by the training pipeline
//! and loaded together at startup; a bundle that fails any consistency
//! check is never published.
//!
//! Per-request flow: validate → normalize → infer → rank. Every stage is a
//! pure function over request-local data except the classifier call, which
//! goes through the [`SignClassifier`] capability trait.

pub mod bundle;
pub mod classifier;
pub mod mlp;
pub mod pipeline;
pub mod ranker;
pub mod scaler;
pub mod schema;
pub mod validate;

pub use bundle::{ArtifactPaths, ModelBundle};
pub use classifier::SignClassifier;
pub use mlp::MlpClassifier;
pub use ranker::rank;
pub use scaler::NormalizationParams;
pub use schema::{FeatureSchema, LabelSet};
pub use validate::{order_features, FeatureMap};

/// Default number of ranked entries returned per prediction
pub const DEFAULT_TOP_K: usize = 5;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::bundle::{ArtifactPaths, ModelBundle};
    pub use crate::classifier::SignClassifier;
    pub use crate::mlp::MlpClassifier;
    pub use crate::scaler::NormalizationParams;
    pub use crate::schema::{FeatureSchema, LabelSet};
    pub use crate::validate::FeatureMap;
    pub use crate::DEFAULT_TOP_K;
}
