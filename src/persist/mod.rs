//! Model persistence: save/load the fitted regressor.
//!
//! The on-disk artifact is a Postcard-encoded [`Payload`]: a version tag,
//! the hyperparameters used, feature names, a training-data fingerprint,
//! and the forest itself. A loaded model reproduces bit-identical
//! predictions.

use std::fs;
use std::path::{Path, PathBuf};

use crate::model::{GBDTModel, ModelMeta};
use crate::repr::{Forest, Tree, TreeValidationError};
use crate::training::GBDTParams;

mod payload;

pub use payload::{ArtifactMeta, ForestPayload, ParamsPayload, Payload, PayloadV1, TreePayload};

// =============================================================================
// PersistError
// =============================================================================

/// Failures while writing or reading a model artifact.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    /// The artifact could not be written or read.
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The payload could not be encoded or decoded.
    #[error("artifact codec error: {0}")]
    Codec(#[from] postcard::Error),

    /// The artifact decoded but describes an invalid tree.
    #[error("corrupt artifact: {0}")]
    InvalidTree(#[from] TreeValidationError),
}

// =============================================================================
// Save / Load
// =============================================================================

/// Serialize a fitted model to `path`, overwriting any existing file.
///
/// Fails with an I/O error if the path is unwritable (e.g. its parent
/// directory is missing); the error names the path.
pub fn save_model(model: &GBDTModel, path: &Path) -> Result<(), PersistError> {
    let payload = to_payload(model);
    let bytes = postcard::to_allocvec(&payload)?;
    fs::write(path, bytes).map_err(|source| PersistError::Io {
        path: path.to_owned(),
        source,
    })
}

/// Load a model artifact written by [`save_model`].
pub fn load_model(path: &Path) -> Result<GBDTModel, PersistError> {
    let bytes = fs::read(path).map_err(|source| PersistError::Io {
        path: path.to_owned(),
        source,
    })?;
    let payload: Payload = postcard::from_bytes(&bytes)?;
    from_payload(payload)
}

// =============================================================================
// Conversion
// =============================================================================

fn to_payload(model: &GBDTModel) -> Payload {
    let params = model.params();
    let meta = model.meta();
    let forest = model.forest();

    Payload::V1(PayloadV1 {
        meta: ArtifactMeta {
            n_features: meta.n_features as u32,
            feature_names: meta.feature_names.clone(),
            params: ParamsPayload {
                n_trees: params.n_trees,
                learning_rate: params.learning_rate,
                max_depth: params.max_depth,
                reg_lambda: params.reg_lambda,
                min_child_weight: params.min_child_weight,
                min_gain: params.min_gain,
                subsample: params.subsample,
                seed: params.seed,
            },
            train_fingerprint: meta.train_fingerprint,
        },
        forest: ForestPayload {
            base_score: forest.base_score(),
            trees: forest
                .trees()
                .map(|tree| TreePayload {
                    split_features: tree.split_features().to_vec(),
                    thresholds: tree.thresholds().to_vec(),
                    left_children: tree.left_children().to_vec(),
                    right_children: tree.right_children().to_vec(),
                    is_leaf: tree.leaf_flags().to_vec(),
                    leaf_values: tree.leaf_values().to_vec(),
                })
                .collect(),
        },
    })
}

fn from_payload(payload: Payload) -> Result<GBDTModel, PersistError> {
    let Payload::V1(v1) = payload;

    let mut forest = Forest::new(v1.forest.base_score);
    for tree in v1.forest.trees {
        forest.push_tree(Tree::from_arrays(
            tree.split_features,
            tree.thresholds,
            tree.left_children,
            tree.right_children,
            tree.is_leaf,
            tree.leaf_values,
        )?);
    }

    let meta = ModelMeta {
        n_features: v1.meta.n_features as usize,
        feature_names: v1.meta.feature_names,
        train_fingerprint: v1.meta.train_fingerprint,
    };

    let p = v1.meta.params;
    let params = GBDTParams {
        n_trees: p.n_trees,
        learning_rate: p.learning_rate,
        max_depth: p.max_depth,
        reg_lambda: p.reg_lambda,
        min_child_weight: p.min_child_weight,
        min_gain: p.min_gain,
        subsample: p.subsample,
        seed: p.seed,
        ..Default::default()
    };

    Ok(GBDTModel::from_parts(forest, meta, params))
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Table;
    use ndarray::array;

    fn trained_model() -> (GBDTModel, Table) {
        let table = Table::new(
            vec!["x0".into(), "x1".into()],
            array![
                [0.0, 1.0, 2.0, 3.0, 4.0, 5.0],
                [5.0, 4.0, 3.0, 2.0, 1.0, 0.0]
            ],
        );
        let labels = vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0];
        let params = GBDTParams {
            n_trees: 15,
            max_depth: 3,
            ..Default::default()
        };
        let model = GBDTModel::train(&table, &labels, params).unwrap();
        (model, table)
    }

    #[test]
    fn save_then_load_reproduces_predictions_bit_for_bit() {
        let (model, table) = trained_model();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.sav");

        save_model(&model, &path).unwrap();
        let loaded = load_model(&path).unwrap();

        let before = model.predict(&table).unwrap();
        let after = loaded.predict(&table).unwrap();
        let before_bits: Vec<u32> = before.iter().map(|p| p.to_bits()).collect();
        let after_bits: Vec<u32> = after.iter().map(|p| p.to_bits()).collect();
        assert_eq!(before_bits, after_bits);
    }

    #[test]
    fn artifact_carries_meta_and_params() {
        let (model, _) = trained_model();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.sav");

        save_model(&model, &path).unwrap();
        let loaded = load_model(&path).unwrap();

        assert_eq!(loaded.meta(), model.meta());
        assert_eq!(loaded.params().n_trees, 15);
        assert_eq!(loaded.params().seed, model.params().seed);
    }

    #[test]
    fn save_overwrites_existing_artifact() {
        let (model, table) = trained_model();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.sav");

        std::fs::write(&path, b"stale").unwrap();
        save_model(&model, &path).unwrap();

        let loaded = load_model(&path).unwrap();
        assert_eq!(loaded.predict(&table).unwrap(), model.predict(&table).unwrap());
    }

    #[test]
    fn missing_parent_directory_is_io_error() {
        let (model, _) = trained_model();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("model.sav");

        let err = save_model(&model, &path).unwrap_err();
        assert!(matches!(err, PersistError::Io { .. }));
        assert!(err.to_string().contains("model.sav"));
    }

    #[test]
    fn artifact_with_cyclic_tree_is_rejected() {
        // Decodes fine, but the split node's children point back at itself;
        // loading must refuse it instead of handing out a model whose first
        // prediction would never terminate.
        let payload = Payload::V1(PayloadV1 {
            meta: ArtifactMeta {
                n_features: 1,
                feature_names: vec!["x0".into()],
                params: ParamsPayload {
                    n_trees: 1,
                    learning_rate: 0.3,
                    max_depth: 6,
                    reg_lambda: 1.0,
                    min_child_weight: 1.0,
                    min_gain: 0.0,
                    subsample: 1.0,
                    seed: 42,
                },
                train_fingerprint: 0,
            },
            forest: ForestPayload {
                base_score: 0.0,
                trees: vec![TreePayload {
                    split_features: vec![0],
                    thresholds: vec![0.5],
                    left_children: vec![0],
                    right_children: vec![0],
                    is_leaf: vec![false],
                    leaf_values: vec![0.0],
                }],
            },
        });

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.sav");
        std::fs::write(&path, postcard::to_allocvec(&payload).unwrap()).unwrap();

        assert!(matches!(
            load_model(&path),
            Err(PersistError::InvalidTree(_))
        ));
    }

    #[test]
    fn truncated_artifact_fails_to_decode() {
        let (model, _) = trained_model();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.sav");

        save_model(&model, &path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        std::fs::write(&path, &bytes[..bytes.len() / 2]).unwrap();

        assert!(matches!(load_model(&path), Err(PersistError::Codec(_))));
    }
}
