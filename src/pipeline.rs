//! The one-shot training pipeline.
//!
//! Load the four pre-split tables, fit, predict, evaluate, render residual
//! diagnostics, and persist the model. Strictly sequential; every failure
//! is fatal and names the stage it came from.

use std::path::PathBuf;

use crate::data::{read_table, DataError};
use crate::diagnostics::{self, DiagnosticsError, PlotDomain, ResidualSummary};
use crate::eval::{EvalError, Evaluator};
use crate::model::{GBDTModel, ModelError};
use crate::persist::{save_model, PersistError};
use crate::training::{GBDTParams, TrainError, Verbosity};

// =============================================================================
// PipelineError
// =============================================================================

/// A pipeline failure, tagged with the stage that produced it.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("data loading failed: {0}")]
    Load(#[from] DataError),

    #[error("training failed: {0}")]
    Train(#[from] TrainError),

    #[error("prediction failed: {0}")]
    Predict(#[from] ModelError),

    #[error("evaluation failed: {0}")]
    Evaluate(#[from] EvalError),

    #[error("residual analysis failed: {0}")]
    Diagnostics(#[from] DiagnosticsError),

    #[error("model persistence failed: {0}")]
    Persist(#[from] PersistError),
}

// =============================================================================
// PipelineConfig
// =============================================================================

/// Fixed configuration for one pipeline run.
///
/// The `capboost-train` binary uses the defaults below; there are no
/// command-line flags or environment variables.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub x_train: PathBuf,
    pub y_train: PathBuf,
    pub x_test: PathBuf,
    pub y_test: PathBuf,
    /// Where the serialized model is written (overwritten each run).
    pub model_out: PathBuf,
    /// Where the two-panel diagnostic figure is written.
    pub plot_out: PathBuf,
    pub params: GBDTParams,
    /// Digits shown when reporting RMSE.
    pub ndigits: usize,
    /// Axis domain for the diagnostic panels.
    pub plot_domain: PlotDomain,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            x_train: PathBuf::from("data/X_train.csv"),
            y_train: PathBuf::from("data/y_train.csv"),
            x_test: PathBuf::from("data/X_test.csv"),
            y_test: PathBuf::from("data/y_test.csv"),
            model_out: PathBuf::from("models/cat_boost_model.sav"),
            plot_out: PathBuf::from("models/error_analysis.svg"),
            params: GBDTParams {
                n_trees: 10_000,
                max_depth: 6,
                learning_rate: 0.1,
                log_every: 100,
                verbosity: Verbosity::Info,
                ..Default::default()
            },
            ndigits: 3,
            plot_domain: PlotDomain::Fixed {
                min: -400.0,
                max: 350.0,
            },
        }
    }
}

/// What a completed run produced.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub n_predictions: usize,
    pub rmse: f64,
    pub residual_summary: ResidualSummary,
}

// =============================================================================
// run
// =============================================================================

/// Run the pipeline end to end.
pub fn run(config: &PipelineConfig) -> Result<PipelineReport, PipelineError> {
    // Load all four tables up front and report their shapes so schema
    // problems are visible before any training time is spent.
    let x_train = read_table(&config.x_train)?;
    let y_train = read_table(&config.y_train)?;
    let x_test = read_table(&config.x_test)?;
    let y_test = read_table(&config.y_test)?;

    println!("X_train: ({}, {})", x_train.n_rows(), x_train.n_cols());
    println!("y_train: ({}, {})", y_train.n_rows(), y_train.n_cols());
    println!("X_test: ({}, {})", x_test.n_rows(), x_test.n_cols());
    println!("y_test: ({}, {})", y_test.n_rows(), y_test.n_cols());

    x_train.check_schema_matches(&x_test).map_err(PipelineError::Load)?;
    let (train_label, y_train_values) = y_train.single_column().map_err(PipelineError::Load)?;
    let (test_label, y_test_values) = y_test.single_column().map_err(PipelineError::Load)?;
    if train_label != test_label {
        return Err(PipelineError::Load(DataError::SchemaMismatch {
            position: 0,
            expected: train_label.to_string(),
            found: test_label.to_string(),
        }));
    }
    if x_train.n_rows() != y_train_values.len() {
        return Err(PipelineError::Load(DataError::RowMismatch {
            features: x_train.n_rows(),
            labels: y_train_values.len(),
        }));
    }
    if x_test.n_rows() != y_test_values.len() {
        return Err(PipelineError::Load(DataError::RowMismatch {
            features: x_test.n_rows(),
            labels: y_test_values.len(),
        }));
    }

    let model = GBDTModel::train(&x_train, y_train_values, config.params.clone())?;
    let y_pred = model.predict(&x_test)?;

    let rmse = Evaluator::new(config.ndigits).evaluate(y_test_values, &y_pred)?;

    let analysis =
        diagnostics::analyze(y_test_values, &y_pred).map_err(DiagnosticsError::Input)?;
    analysis.summary.report();
    diagnostics::render_error_analysis(
        y_test_values,
        &y_pred,
        &analysis.residuals,
        &config.plot_out,
        config.plot_domain,
    )?;

    save_model(&model, &config.model_out)?;

    Ok(PipelineReport {
        n_predictions: y_pred.len(),
        rmse,
        residual_summary: analysis.summary,
    })
}
