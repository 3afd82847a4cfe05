//! Training progress reporting.
//!
//! Progress lines go to stdout so an operator watching the run sees the fit
//! advancing; the cadence is controlled by `GBDTParams::log_every`.

use std::time::Instant;

/// How chatty training should be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Verbosity {
    /// No output during training.
    #[default]
    Silent,
    /// Periodic progress lines plus a start/finish summary.
    Info,
}

/// Prints periodic training progress.
pub struct TrainingLogger {
    verbosity: Verbosity,
    log_every: u32,
    n_rounds: u32,
    started: Option<Instant>,
}

impl TrainingLogger {
    pub fn new(verbosity: Verbosity, log_every: u32) -> Self {
        Self {
            verbosity,
            // Cadence 0 would divide by zero; treat it as "every round".
            log_every: log_every.max(1),
            n_rounds: 0,
            started: None,
        }
    }

    /// Record the round count and emit the opening line.
    pub fn start_training(&mut self, n_rounds: u32) {
        self.n_rounds = n_rounds;
        self.started = Some(Instant::now());
        if self.verbosity >= Verbosity::Info {
            println!("Training: {} rounds", n_rounds);
        }
    }

    /// Emit one progress line if this round falls on the cadence.
    pub fn log_round(&self, round: u32, train_rmse: f64) {
        if self.verbosity < Verbosity::Info {
            return;
        }
        let last = round + 1 == self.n_rounds;
        if round % self.log_every == 0 || last {
            println!("[{}]\ttrain-rmse: {:.6}", round, train_rmse);
        }
    }

    /// Emit the closing line with elapsed wall time.
    pub fn finish_training(&self) {
        if self.verbosity >= Verbosity::Info {
            if let Some(started) = self.started {
                println!("Training finished in {:.2}s", started.elapsed().as_secs_f64());
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_orders() {
        assert!(Verbosity::Info > Verbosity::Silent);
        assert_eq!(Verbosity::default(), Verbosity::Silent);
    }

    #[test]
    fn silent_logger_is_quiet() {
        // Only checks that the calls are safe; silent output is not captured.
        let mut logger = TrainingLogger::new(Verbosity::Silent, 10);
        logger.start_training(5);
        logger.log_round(0, 1.0);
        logger.finish_training();
    }

    #[test]
    fn zero_cadence_does_not_panic() {
        let mut logger = TrainingLogger::new(Verbosity::Info, 0);
        logger.start_training(1);
        logger.log_round(0, 0.5);
        logger.finish_training();
    }
}
