//! Boosting loop: parameters, validation, and the round-by-round trainer.

use rand::Rng;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::data::Table;
use crate::repr::Forest;

use super::grower::{GrowerParams, TreeGrower};
use super::logger::TrainingLogger;
use super::metrics::Rmse;
use super::objective::SquaredLoss;
use super::Verbosity;

// =============================================================================
// GBDTParams
// =============================================================================

/// Invalid parameter values, caught before training starts.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParamsError {
    #[error("learning_rate must be positive, got {0}")]
    InvalidLearningRate(f32),
    #[error("n_trees must be at least 1")]
    InvalidNTrees,
    #[error("subsample must be in (0, 1], got {0}")]
    InvalidSubsample(f32),
    #[error("{field} must be non-negative, got {value}")]
    InvalidRegularization { field: &'static str, value: f32 },
}

/// Parameters for boosted-tree training.
///
/// Defaults mirror common gradient-boosting settings; the pipeline binary
/// overrides them with its fixed configuration. The seed always has a fixed
/// default so identical runs produce identical forests.
#[derive(Debug, Clone)]
pub struct GBDTParams {
    // --- Boosting parameters ---
    /// Number of boosting rounds (trees to train).
    pub n_trees: u32,
    /// Learning rate (shrinkage).
    pub learning_rate: f32,

    // --- Tree structure ---
    /// Maximum tree depth.
    pub max_depth: u32,

    // --- Regularization ---
    /// L2 regularization on leaf values.
    pub reg_lambda: f32,
    /// Minimum hessian sum (row count) per child.
    pub min_child_weight: f32,
    /// Minimum gain for a split to be kept.
    pub min_gain: f64,

    // --- Sampling ---
    /// Fraction of rows drawn per round, in (0, 1]. 1.0 disables sampling.
    pub subsample: f32,

    // --- Reproducibility ---
    /// Random seed for row sampling.
    pub seed: u64,

    // --- Logging ---
    /// Verbosity level for training output.
    pub verbosity: Verbosity,
    /// Progress line cadence (rounds between lines).
    pub log_every: u32,
}

impl Default for GBDTParams {
    fn default() -> Self {
        Self {
            n_trees: 100,
            learning_rate: 0.3,
            max_depth: 6,
            reg_lambda: 1.0,
            min_child_weight: 1.0,
            min_gain: 0.0,
            subsample: 1.0,
            seed: 42,
            verbosity: Verbosity::default(),
            log_every: 100,
        }
    }
}

impl GBDTParams {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.learning_rate <= 0.0 {
            return Err(ParamsError::InvalidLearningRate(self.learning_rate));
        }
        if self.n_trees == 0 {
            return Err(ParamsError::InvalidNTrees);
        }
        if !(self.subsample > 0.0 && self.subsample <= 1.0) {
            return Err(ParamsError::InvalidSubsample(self.subsample));
        }
        if self.reg_lambda < 0.0 {
            return Err(ParamsError::InvalidRegularization {
                field: "reg_lambda",
                value: self.reg_lambda,
            });
        }
        if self.min_child_weight < 0.0 {
            return Err(ParamsError::InvalidRegularization {
                field: "min_child_weight",
                value: self.min_child_weight,
            });
        }
        Ok(())
    }

    fn to_grower_params(&self) -> GrowerParams {
        GrowerParams {
            max_depth: self.max_depth,
            reg_lambda: self.reg_lambda,
            min_child_weight: self.min_child_weight,
            min_gain: self.min_gain,
            learning_rate: self.learning_rate,
        }
    }
}

// =============================================================================
// TrainError
// =============================================================================

/// Fatal training failures. Nothing here is retried.
#[derive(Debug, thiserror::Error)]
pub enum TrainError {
    #[error("invalid training parameters: {0}")]
    InvalidParams(#[from] ParamsError),

    #[error("training set is empty")]
    EmptyDataset,

    #[error("features have {rows} rows but {targets} targets were given")]
    RowMismatch { rows: usize, targets: usize },

    #[error("non-finite target at row {row}")]
    NonFiniteTarget { row: usize },

    #[error("non-finite gradient at round {round}")]
    NonFiniteGradient { round: u32 },
}

// =============================================================================
// GBDTTrainer
// =============================================================================

/// Trains a [`Forest`] by gradient boosting with squared loss.
pub struct GBDTTrainer {
    objective: SquaredLoss,
    params: GBDTParams,
}

impl GBDTTrainer {
    pub fn new(objective: SquaredLoss, params: GBDTParams) -> Self {
        Self { objective, params }
    }

    pub fn params(&self) -> &GBDTParams {
        &self.params
    }

    /// Train a forest on `features` and row-aligned `targets`.
    ///
    /// Deterministic for a fixed `params.seed`: the only randomness is row
    /// subsampling, and split selection uses a total order.
    pub fn train(&self, features: &Table, targets: &[f32]) -> Result<Forest, TrainError> {
        self.params.validate()?;

        let n_rows = features.n_rows();
        if n_rows == 0 {
            return Err(TrainError::EmptyDataset);
        }
        if targets.len() != n_rows {
            return Err(TrainError::RowMismatch {
                rows: n_rows,
                targets: targets.len(),
            });
        }
        if let Some(row) = targets.iter().position(|y| !y.is_finite()) {
            return Err(TrainError::NonFiniteTarget { row });
        }

        let base_score = self.objective.base_score(targets);
        let mut predictions = vec![base_score; n_rows];
        let mut grads = vec![0.0f32; n_rows];
        let mut forest = Forest::new(base_score);

        let grower = TreeGrower::new(features, self.params.to_grower_params());
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(self.params.seed);

        let mut logger = TrainingLogger::new(self.params.verbosity, self.params.log_every);
        logger.start_training(self.params.n_trees);

        for round in 0..self.params.n_trees {
            self.objective
                .gradients_into(&predictions, targets, &mut grads);
            if grads.iter().any(|g| !g.is_finite()) {
                return Err(TrainError::NonFiniteGradient { round });
            }

            let rows = self.sample_rows(n_rows, &mut rng);
            let tree = grower.grow(&grads, rows);

            // The tree may be fit on a subset, but it corrects every row.
            for (row, pred) in predictions.iter_mut().enumerate() {
                *pred += tree.predict(|f| features.value(f, row));
            }
            forest.push_tree(tree);

            logger.log_round(round, Rmse.compute(&predictions, targets));
        }

        logger.finish_training();
        Ok(forest)
    }

    /// Draw this round's rows. With `subsample == 1.0` the RNG is untouched.
    fn sample_rows(&self, n_rows: usize, rng: &mut Xoshiro256PlusPlus) -> Vec<u32> {
        if self.params.subsample >= 1.0 {
            return (0..n_rows as u32).collect();
        }
        let sampled: Vec<u32> = (0..n_rows as u32)
            .filter(|_| rng.gen::<f32>() < self.params.subsample)
            .collect();
        if sampled.is_empty() {
            // Degenerate draw on tiny datasets; fall back to every row.
            (0..n_rows as u32).collect()
        } else {
            sampled
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
