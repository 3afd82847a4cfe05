//! Prediction-error evaluation with operator-facing reporting.
//!
//! The evaluator both returns the RMSE and prints a short report to stdout.
//! The printed report is part of the contract: the pipeline is a one-shot
//! batch job and stdout is how the operator sees the result.

use crate::training::Rmse;

// =============================================================================
// EvalError
// =============================================================================

/// Precondition failures for paired label/prediction sequences.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    /// Labels and predictions have different lengths.
    #[error("length mismatch: {expected} labels vs {actual} predictions")]
    LengthMismatch { expected: usize, actual: usize },

    /// Both sequences are empty; there is nothing to evaluate.
    #[error("no predictions to evaluate")]
    Empty,
}

/// Check that two paired sequences are non-empty and equal length.
pub(crate) fn check_paired(y_true: &[f32], y_pred: &[f32]) -> Result<(), EvalError> {
    if y_true.len() != y_pred.len() {
        return Err(EvalError::LengthMismatch {
            expected: y_true.len(),
            actual: y_pred.len(),
        });
    }
    if y_true.is_empty() {
        return Err(EvalError::Empty);
    }
    Ok(())
}

// =============================================================================
// Evaluator
// =============================================================================

/// RMSE evaluation with a stdout report.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator {
    /// Digits kept when displaying the RMSE.
    ndigits: usize,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self { ndigits: 3 }
    }
}

impl Evaluator {
    pub fn new(ndigits: usize) -> Self {
        Self { ndigits }
    }

    /// Compute RMSE over paired labels and predictions.
    ///
    /// Prints the prediction count and the rounded RMSE to stdout, then
    /// returns the unrounded value.
    ///
    /// # Errors
    ///
    /// [`EvalError::LengthMismatch`] if the sequences differ in length;
    /// [`EvalError::Empty`] if there is nothing to evaluate.
    pub fn evaluate(&self, y_true: &[f32], y_pred: &[f32]) -> Result<f64, EvalError> {
        check_paired(y_true, y_pred)?;
        let rmse = Rmse.compute(y_pred, y_true);
        println!("Number of predictions: {}", y_pred.len());
        println!("RMSE: {:.*}", self.ndigits, rmse);
        Ok(rmse)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn exact_predictions_give_zero_rmse() {
        let rmse = Evaluator::default()
            .evaluate(&[10.0, 20.0, 30.0], &[10.0, 20.0, 30.0])
            .unwrap();
        assert_eq!(rmse, 0.0);
    }

    #[test]
    fn known_rmse_value() {
        // sqrt(((0-5)^2 + (10-5)^2) / 2) = 5.0
        let rmse = Evaluator::default().evaluate(&[0.0, 10.0], &[5.0, 5.0]).unwrap();
        assert_abs_diff_eq!(rmse, 5.0, epsilon = 1e-12);
    }

    #[test]
    fn rmse_zero_iff_equal() {
        let rmse = Evaluator::default()
            .evaluate(&[1.0, 2.0], &[1.0, 2.0001])
            .unwrap();
        assert!(rmse > 0.0);
    }

    #[test]
    fn length_mismatch_is_an_error() {
        let y_true: Vec<f32> = (0..100).map(|i| i as f32).collect();
        let y_pred: Vec<f32> = (0..99).map(|i| i as f32).collect();
        assert_eq!(
            Evaluator::default().evaluate(&y_true, &y_pred),
            Err(EvalError::LengthMismatch {
                expected: 100,
                actual: 99
            })
        );
    }

    #[test]
    fn empty_input_is_an_error_not_nan() {
        assert_eq!(Evaluator::default().evaluate(&[], &[]), Err(EvalError::Empty));
    }

    #[test]
    fn paired_permutation_leaves_rmse_unchanged() {
        let a = Evaluator::default()
            .evaluate(&[1.0, 2.0, 3.0], &[3.0, 2.0, 1.0])
            .unwrap();
        let b = Evaluator::default()
            .evaluate(&[3.0, 1.0, 2.0], &[1.0, 3.0, 2.0])
            .unwrap();
        assert_abs_diff_eq!(a, b, epsilon = 1e-12);
    }
}
