//! Error types for difflens modules using thiserror.

use thiserror::Error;

/// Errors from diff parsing.
///
/// Malformed file headers and empty input are not errors; they produce
/// anonymous records and an empty result respectively.
#[derive(Error, Debug)]
pub enum DiffError {
    #[error("Diff worker terminated abnormally: {0}")]
    WorkerFailed(String),

    #[error("Diff aggregation task failed: {0}")]
    AggregatorFailed(String),

    #[error(
        "Diff parsing incomplete: expected {expected} file(s) but only {received} were processed"
    )]
    IncompleteResults { expected: usize, received: usize },
}

/// Errors from git operations.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Failed to open repository: {0}")]
    OpenRepository(#[source] git2::Error),

    #[error("Failed to collect staged diff: {0}")]
    DiffFailed(#[source] git2::Error),
}
