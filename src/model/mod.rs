//! High-level model: training entry point and schema-checked prediction.

use crate::data::Table;
use crate::repr::Forest;
use crate::training::{GBDTParams, GBDTTrainer, SquaredLoss, TrainError};

mod meta;

pub use meta::ModelMeta;

// =============================================================================
// ModelError
// =============================================================================

/// Prediction-time failures.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    /// The prediction table has a different width than the training table.
    #[error("feature count mismatch: model expects {expected}, table has {actual}")]
    FeatureCount { expected: usize, actual: usize },

    /// The prediction table renames or reorders a column.
    #[error("feature schema mismatch at position {position}: model expects '{expected}', table has '{found}'")]
    SchemaMismatch {
        position: usize,
        expected: String,
        found: String,
    },
}

// =============================================================================
// GBDTModel
// =============================================================================

/// A fitted boosted-tree regressor.
///
/// Holds the [`Forest`], the metadata captured at fit time, and the
/// parameters used. The model owns no reference to its training data.
#[derive(Debug, Clone)]
pub struct GBDTModel {
    forest: Forest,
    meta: ModelMeta,
    params: GBDTParams,
}

impl GBDTModel {
    /// Fit a model on a feature table and row-aligned labels.
    pub fn train(features: &Table, labels: &[f32], params: GBDTParams) -> Result<Self, TrainError> {
        let trainer = GBDTTrainer::new(SquaredLoss, params.clone());
        let forest = trainer.train(features, labels)?;
        let meta = ModelMeta::from_training_data(features, labels);
        Ok(Self { forest, meta, params })
    }

    /// Reassemble a model from its parts (used when loading an artifact).
    pub fn from_parts(forest: Forest, meta: ModelMeta, params: GBDTParams) -> Self {
        Self { forest, meta, params }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn forest(&self) -> &Forest {
        &self.forest
    }

    pub fn meta(&self) -> &ModelMeta {
        &self.meta
    }

    pub fn params(&self) -> &GBDTParams {
        &self.params
    }

    // =========================================================================
    // Prediction
    // =========================================================================

    /// Predict every row of `features`, in row order.
    ///
    /// The table's column schema must match the training schema exactly;
    /// a renamed, reordered, or missing column fails fast instead of
    /// silently mis-predicting.
    pub fn predict(&self, features: &Table) -> Result<Vec<f32>, ModelError> {
        self.check_schema(features)?;
        Ok((0..features.n_rows())
            .map(|row| self.forest.predict_row(|f| features.value(f, row)))
            .collect())
    }

    fn check_schema(&self, features: &Table) -> Result<(), ModelError> {
        if features.n_cols() != self.meta.n_features {
            return Err(ModelError::FeatureCount {
                expected: self.meta.n_features,
                actual: features.n_cols(),
            });
        }
        for (position, (expected, found)) in self
            .meta
            .feature_names
            .iter()
            .zip(features.column_names())
            .enumerate()
        {
            if expected != found {
                return Err(ModelError::SchemaMismatch {
                    position,
                    expected: expected.clone(),
                    found: found.clone(),
                });
            }
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
