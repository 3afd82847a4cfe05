//! Regression metric.

/// Root Mean Squared Error: sqrt(mean((pred - label)²))
///
/// Lower is better. Accumulates in f64 to keep long sums stable.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rmse;

impl Rmse {
    /// Compute RMSE over paired slices.
    ///
    /// Returns 0.0 for empty input; callers that must reject empty input do
    /// so before calling (see `eval::Evaluator`).
    ///
    /// # Panics
    ///
    /// Debug-asserts that both slices have the same length.
    pub fn compute(&self, predictions: &[f32], targets: &[f32]) -> f64 {
        debug_assert_eq!(predictions.len(), targets.len());
        if predictions.is_empty() {
            return 0.0;
        }
        let sum_sq: f64 = predictions
            .iter()
            .zip(targets)
            .map(|(&p, &t)| {
                let diff = p as f64 - t as f64;
                diff * diff
            })
            .sum();
        (sum_sq / predictions.len() as f64).sqrt()
    }

    pub fn name(&self) -> &'static str {
        "rmse"
    }
}

// =============================================================================
// Tests
// =============================================================================
