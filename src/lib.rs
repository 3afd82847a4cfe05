//! capboost: gradient-boosted regression for capture-count data.
//!
//! A one-shot training pipeline: load pre-split train/test tables, fit a
//! boosted-tree regressor, evaluate RMSE, render residual diagnostics, and
//! persist the fitted model.
//!
//! # Key Types
//!
//! - [`GBDTModel`] - High-level model with train/predict
//! - [`GBDTParams`] - Training configuration
//! - [`Table`] - Column-named tabular data loaded from CSV
//! - [`Evaluator`] - RMSE evaluation with operator-facing reporting
//!
//! # Pipeline
//!
//! The [`pipeline`] module wires the stages together; the `capboost-train`
//! binary runs it end to end with the configuration fixed in source.

// Re-export approx traits for users who want to compare predictions
pub use approx;

pub mod data;
pub mod diagnostics;
pub mod eval;
pub mod model;
pub mod persist;
pub mod pipeline;
pub mod repr;
pub mod training;

// =============================================================================
// Convenience Re-exports
// =============================================================================

// High-level model types
pub use model::{GBDTModel, ModelError, ModelMeta};

// Data types (for preparing training data)
pub use data::{read_table, DataError, Table};

// Training types
pub use training::{GBDTParams, GBDTTrainer, Rmse, SquaredLoss, TrainError, Verbosity};

// Evaluation and diagnostics
pub use diagnostics::{analyze, PlotDomain, ResidualSummary};
pub use eval::{EvalError, Evaluator};

// Persistence
pub use persist::{load_model, save_model, PersistError};
