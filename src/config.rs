//! Analyzer configuration from environment variables.

use std::env;

use tracing::warn;

use crate::diff::pool::{MAX_WORKERS, PARALLEL_THRESHOLD};

/// Environment variable overriding the file count above which the worker pool is used.
pub const PARALLEL_THRESHOLD_ENV_VAR: &str = "DIFFLENS_PARALLEL_THRESHOLD";

/// Environment variable capping the number of pool workers.
pub const MAX_WORKERS_ENV_VAR: &str = "DIFFLENS_MAX_WORKERS";

/// Tuning knobs for diff parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyzerConfig {
    /// The pool is used only when the file count is strictly greater than this.
    pub parallel_threshold: usize,
    /// Upper bound on pool workers.
    pub max_workers: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: PARALLEL_THRESHOLD,
            max_workers: MAX_WORKERS,
        }
    }
}

impl AnalyzerConfig {
    /// Load configuration from the environment, falling back to defaults.
    ///
    /// Logs a warning if a variable is set but is not a positive integer.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            parallel_threshold: read_positive(
                PARALLEL_THRESHOLD_ENV_VAR,
                defaults.parallel_threshold,
            ),
            max_workers: read_positive(MAX_WORKERS_ENV_VAR, defaults.max_workers),
        }
    }

    /// Configuration that never uses the worker pool.
    pub fn sequential(self) -> Self {
        Self {
            parallel_threshold: usize::MAX,
            ..self
        }
    }

    pub fn with_max_workers(self, max_workers: usize) -> Self {
        Self {
            max_workers: max_workers.max(1),
            ..self
        }
    }

    /// Whether a diff with `file_count` files should go through the pool.
    pub fn use_pool(&self, file_count: usize) -> bool {
        file_count > self.parallel_threshold
    }
}

fn read_positive(var: &str, default: usize) -> usize {
    match env::var(var) {
        Ok(v) if !v.trim().is_empty() => match v.trim().parse::<usize>() {
            Ok(n) if n > 0 => n,
            _ => {
                warn!("Invalid {} value '{}', using default {}", var, v, default);
                default
            }
        },
        _ => default,
    }
}
