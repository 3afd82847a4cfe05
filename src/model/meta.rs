//! Model metadata.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::data::Table;

/// Metadata captured at training time.
///
/// The schema (feature names, in order) is what prediction validates
/// against; the fingerprint ties a persisted artifact back to the data it
/// was trained on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelMeta {
    /// Number of input features.
    pub n_features: usize,
    /// Feature names, in training-table order.
    pub feature_names: Vec<String>,
    /// Hash of the training data (shape, schema, and values).
    pub train_fingerprint: u64,
}

impl ModelMeta {
    /// Capture metadata from the training inputs.
    pub fn from_training_data(features: &Table, targets: &[f32]) -> Self {
        Self {
            n_features: features.n_cols(),
            feature_names: features.column_names().to_vec(),
            train_fingerprint: data_fingerprint(features, targets),
        }
    }
}

/// Deterministic hash over shape, schema, and bit-exact values.
pub(crate) fn data_fingerprint(features: &Table, targets: &[f32]) -> u64 {
    let mut hasher = DefaultHasher::new();
    features.n_rows().hash(&mut hasher);
    features.n_cols().hash(&mut hasher);
    for name in features.column_names() {
        name.hash(&mut hasher);
    }
    for col in 0..features.n_cols() {
        for &value in features.column(col) {
            value.to_bits().hash(&mut hasher);
        }
    }
    for &target in targets {
        target.to_bits().hash(&mut hasher);
    }
    hasher.finish()
}

// =============================================================================
// Tests
// =============================================================================
