//! Payload structures for the model artifact.
//!
//! These structs are specifically designed for serialization with Postcard.
//! They mirror the runtime types but carry everything needed to make the
//! artifact self-describing: format version (the enum variant), the
//! hyperparameters used, and a fingerprint of the training data.

use serde::{Deserialize, Serialize};

// ============================================================================
// Top-Level Payload
// ============================================================================

/// Version-tagged payload enum for forward compatibility.
///
/// New format versions add new variants rather than modifying existing ones;
/// older readers detect unsupported versions by the enum discriminant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Payload {
    /// Version 1 payload format.
    V1(PayloadV1),
}

/// Version 1 payload structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayloadV1 {
    /// Artifact metadata.
    pub meta: ArtifactMeta,
    /// The trained forest.
    pub forest: ForestPayload,
}

// ============================================================================
// Metadata
// ============================================================================

/// Everything needed to validate an artifact before using it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactMeta {
    /// Number of input features.
    pub n_features: u32,
    /// Feature names, in training order.
    pub feature_names: Vec<String>,
    /// Hyperparameters the model was trained with.
    pub params: ParamsPayload,
    /// Hash of the training data (shape, schema, values).
    pub train_fingerprint: u64,
}

/// Training hyperparameters, recorded for reproducibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParamsPayload {
    pub n_trees: u32,
    pub learning_rate: f32,
    pub max_depth: u32,
    pub reg_lambda: f32,
    pub min_child_weight: f32,
    pub min_gain: f64,
    pub subsample: f32,
    pub seed: u64,
}

// ============================================================================
// Forest
// ============================================================================

/// Forest of regression trees.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestPayload {
    /// Base score added to every prediction.
    pub base_score: f32,
    /// Individual tree payloads, in training order.
    pub trees: Vec<TreePayload>,
}

/// Single regression tree payload (parallel arrays, one entry per node).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreePayload {
    /// Split feature indices (0 for leaves).
    pub split_features: Vec<u32>,
    /// Split thresholds (0.0 for leaves).
    pub thresholds: Vec<f32>,
    /// Left child indices (0 for leaves).
    pub left_children: Vec<u32>,
    /// Right child indices (0 for leaves).
    pub right_children: Vec<u32>,
    /// Whether each node is a leaf.
    pub is_leaf: Vec<bool>,
    /// Leaf values (0.0 for internal nodes).
    pub leaf_values: Vec<f32>,
}

// ============================================================================
// Tests
// ============================================================================
