//! Training infrastructure for the boosted regressor.
//!
//! - [`SquaredLoss`]: the regression objective (gradients and base score)
//! - [`Rmse`]: the training/evaluation metric
//! - [`TreeGrower`]: exact-greedy, depth-wise tree growth
//! - [`GBDTTrainer`] / [`GBDTParams`]: the boosting loop and its knobs
//! - [`TrainingLogger`] / [`Verbosity`]: periodic progress on stdout

mod grower;
mod logger;
mod metrics;
mod objective;
mod trainer;

pub use grower::{GrowerParams, TreeGrower};
pub use logger::{TrainingLogger, Verbosity};
pub use metrics::Rmse;
pub use objective::SquaredLoss;
pub use trainer::{GBDTParams, GBDTTrainer, ParamsError, TrainError};
