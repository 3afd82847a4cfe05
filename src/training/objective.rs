//! Regression objective.

/// Squared error loss (L2 loss) for regression.
///
/// - Loss: `0.5 * (pred - target)²`
/// - Gradient: `pred - target`
/// - Hessian: `1.0`
///
/// With a unit hessian, hessian sums in the grower reduce to row counts,
/// which keeps `min_child_weight` interpretable as a minimum leaf size.
#[derive(Debug, Clone, Copy, Default)]
pub struct SquaredLoss;

impl SquaredLoss {
    /// Base score: the (unweighted) target mean, 0 for empty input.
    pub fn base_score(&self, targets: &[f32]) -> f32 {
        if targets.is_empty() {
            return 0.0;
        }
        let sum: f64 = targets.iter().map(|&y| y as f64).sum();
        (sum / targets.len() as f64) as f32
    }

    /// Write first-order gradients into `grads`.
    ///
    /// # Panics
    ///
    /// Debug-asserts that all three slices have the same length.
    pub fn gradients_into(&self, predictions: &[f32], targets: &[f32], grads: &mut [f32]) {
        debug_assert_eq!(predictions.len(), targets.len());
        debug_assert_eq!(predictions.len(), grads.len());
        for ((g, &pred), &target) in grads.iter_mut().zip(predictions).zip(targets) {
            *g = pred - target;
        }
    }

    pub fn name(&self) -> &'static str {
        "squared"
    }
}

// =============================================================================
// Tests
// =============================================================================
