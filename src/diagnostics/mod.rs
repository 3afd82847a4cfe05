//! Residual analysis: numeric summaries and diagnostic plots.
//!
//! Residual = observed − predicted, so positive residuals mean the model
//! guessed too low. On a well-fit model the residuals sit symmetrically
//! around zero with no visible trend against the predicted value; the
//! summary statistics here give the same read-out numerically, while the
//! rendered figure is the operator-facing view.

use std::path::PathBuf;

use crate::eval::{check_paired, EvalError};

mod plot;

pub use plot::{render_error_analysis, PlotDomain};

// =============================================================================
// DiagnosticsError
// =============================================================================

/// Failures while analyzing or rendering residuals.
#[derive(Debug, thiserror::Error)]
pub enum DiagnosticsError {
    /// Labels and predictions are not a valid pair.
    #[error(transparent)]
    Input(#[from] EvalError),

    /// The figure could not be rendered or written.
    #[error("failed to render {path}: {message}")]
    Render { path: PathBuf, message: String },
}

// =============================================================================
// Residuals
// =============================================================================

/// Elementwise residuals: `residual[i] = y_true[i] - y_pred[i]`.
///
/// Inputs must already be in the same row order; alignment is positional.
pub fn residuals(y_true: &[f32], y_pred: &[f32]) -> Result<Vec<f32>, EvalError> {
    check_paired(y_true, y_pred)?;
    Ok(y_true
        .iter()
        .zip(y_pred)
        .map(|(&t, &p)| t - p)
        .collect())
}

/// Numeric read-out of the residual plots.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResidualSummary {
    /// Mean residual; ≈ 0 on an unbiased model.
    pub mean: f64,
    /// Sample skewness; ≈ 0 when residuals are symmetric.
    pub skewness: f64,
    /// Pearson correlation between predicted value and residual;
    /// a clear trend indicates misspecification.
    pub trend_correlation: f64,
}

impl ResidualSummary {
    /// Print the summary to stdout, one line per statistic.
    pub fn report(&self) {
        println!("Mean residual: {:.4}", self.mean);
        println!("Residual skewness: {:.4}", self.skewness);
        println!("Predicted-residual correlation: {:.4}", self.trend_correlation);
    }
}

/// Residuals plus their numeric summary.
#[derive(Debug, Clone, PartialEq)]
pub struct ResidualAnalysis {
    pub residuals: Vec<f32>,
    pub summary: ResidualSummary,
}

/// Compute residuals and their summary statistics.
pub fn analyze(y_true: &[f32], y_pred: &[f32]) -> Result<ResidualAnalysis, EvalError> {
    let residuals = residuals(y_true, y_pred)?;
    let summary = summarize(y_pred, &residuals);
    Ok(ResidualAnalysis { residuals, summary })
}

/// Summary statistics over (predicted, residual) pairs.
///
/// Degenerate inputs (constant residuals or constant predictions) yield
/// zero skewness/correlation rather than NaN.
pub fn summarize(y_pred: &[f32], residuals: &[f32]) -> ResidualSummary {
    debug_assert_eq!(y_pred.len(), residuals.len());
    let n = residuals.len() as f64;

    let mean = residuals.iter().map(|&r| r as f64).sum::<f64>() / n;

    let m2 = residuals
        .iter()
        .map(|&r| (r as f64 - mean).powi(2))
        .sum::<f64>()
        / n;
    let m3 = residuals
        .iter()
        .map(|&r| (r as f64 - mean).powi(3))
        .sum::<f64>()
        / n;
    let skewness = if m2 > 0.0 { m3 / m2.powf(1.5) } else { 0.0 };

    let pred_mean = y_pred.iter().map(|&p| p as f64).sum::<f64>() / n;
    let mut cov = 0.0f64;
    let mut pred_var = 0.0f64;
    for (&p, &r) in y_pred.iter().zip(residuals) {
        let dp = p as f64 - pred_mean;
        cov += dp * (r as f64 - mean);
        pred_var += dp * dp;
    }
    let denom = (pred_var * m2 * n).sqrt();
    let trend_correlation = if denom > 0.0 { cov / denom } else { 0.0 };

    ResidualSummary {
        mean,
        skewness,
        trend_correlation,
    }
}

// =============================================================================
// Tests
// =============================================================================
