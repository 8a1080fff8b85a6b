//! Ordered feature and label name sequences
//!
//! Order is load-bearing in both: feature position i feeds classifier
//! input i, and classifier output i is reported as label i.

use signserve_core::{Error, Result};
use std::collections::HashSet;

/// Ordered sequence of feature names expected by the classifier.
///
/// The order must match the order used when the normalization parameters
/// were fitted; it defines the positional layout of every vector that
/// flows through the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSchema {
    names: Vec<String>,
}

impl FeatureSchema {
    /// Create a schema, rejecting duplicate names
    pub fn new(names: Vec<String>) -> Result<Self> {
        check_unique(&names, "feature")?;
        Ok(Self { names })
    }

    /// Number of features (F)
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// True if the schema has no features
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Feature names in schema order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Iterate over names in schema order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

/// Ordered sequence of class labels.
///
/// Index i corresponds to output position i of the classifier's
/// probability vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelSet {
    labels: Vec<String>,
}

impl LabelSet {
    /// Create a label set, rejecting duplicate labels
    pub fn new(labels: Vec<String>) -> Result<Self> {
        check_unique(&labels, "label")?;
        Ok(Self { labels })
    }

    /// Number of classes (C)
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// True if the set has no labels
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Labels in output order
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Label at output position `index`
    pub fn get(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }
}

fn check_unique(names: &[String], kind: &str) -> Result<()> {
    let mut seen = HashSet::with_capacity(names.len());
    for name in names {
        if !seen.insert(name.as_str()) {
            return Err(Error::load(format!("duplicate {kind} name: {name}")));
        }
    }
    Ok(())
}
