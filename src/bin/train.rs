//! One-shot training run with the configuration fixed in source.
//!
//! Reads `data/{X,y}_{train,test}.csv`, trains the regressor, reports RMSE
//! and residual diagnostics, and writes the model artifact under `models/`.
//! Exits non-zero on the first failure.

use std::process::ExitCode;

use capboost::pipeline::{run, PipelineConfig};

fn main() -> ExitCode {
    match run(&PipelineConfig::default()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
