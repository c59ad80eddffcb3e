//! difflens - classifies staged git changes and recommends a conventional
//! commit type and scope.
//!
//! # Overview
//!
//! difflens splits a unified diff into per-file records, classifies each path
//! as source, test, doc or config, and scores the change set to suggest a
//! commit type (`feat`, `fix`, `build`, ...) and up to two scopes. Large diffs
//! are structured by a small worker pool.

pub mod config;
pub mod diff;
pub mod error;
pub mod git;
pub mod infer;
pub mod report;

// Re-export commonly used types
pub use config::AnalyzerConfig;
pub use diff::{DiffResult, FileCategory, FileRecord, parse_diff, parse_diff_sequential};
pub use error::{DiffError, GitError};
pub use infer::{CommitType, infer_commit_type, infer_scopes};
