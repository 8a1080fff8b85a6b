//! Request feature validation and reordering
//!
//! Incoming requests carry features as a name→value map in arbitrary
//! order. This module checks the map against the schema and produces the
//! fixed-length vector in schema order that the rest of the pipeline
//! operates on.

use crate::schema::FeatureSchema;
use signserve_core::ValidationError;
use std::collections::HashMap;

/// Request-scoped mapping from feature name to value
pub type FeatureMap = HashMap<String, f32>;

/// Check a feature map against the schema and return values in schema order.
///
/// The check is deliberately two-stage: the key count is compared first,
/// then each schema name is looked up in schema order. A map with the
/// right count but a wrong key surfaces as `MissingFeature` for the first
/// schema name it lacks; extra keys are never reported separately because
/// the count check already excludes them when any expected name is present.
pub fn order_features(
    input: &FeatureMap,
    schema: &FeatureSchema,
) -> Result<Vec<f32>, ValidationError> {
    if input.len() != schema.len() {
        return Err(ValidationError::FeatureCountMismatch {
            expected: schema.len(),
            actual: input.len(),
        });
    }

    let mut ordered = Vec::with_capacity(schema.len());
    for name in schema.iter() {
        match input.get(name) {
            Some(&value) => ordered.push(value),
            None => return Err(ValidationError::MissingFeature(name.to_string())),
        }
    }
    Ok(ordered)
}
