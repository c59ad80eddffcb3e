//! Unified diff parsing into a classified per-file change model.

pub mod classify;
pub mod pool;
pub mod segment;
pub mod types;

use tracing::debug;

use crate::config::AnalyzerConfig;
use crate::error::DiffError;
use crate::infer::{infer_commit_type, infer_scopes};

pub use classify::{classify_path, is_dependency_manifest};
pub use pool::{WorkerPool, worker_count_for};
pub use segment::{
    FILE_HEADER_PREFIX, count_file_headers, parse_header_path, split_file_blocks, structure_block,
};
pub use types::{DiffResult, FileBlock, FileCategory, FileRecord};

/// Parse a unified diff and derive the recommended commit type and scopes.
///
/// Large diffs are structured by a [`WorkerPool`]; small ones on the current
/// task. Both paths yield the same records, in input order.
pub async fn parse_diff(raw_diff: &str, config: &AnalyzerConfig) -> Result<DiffResult, DiffError> {
    if raw_diff.trim().is_empty() {
        return Ok(DiffResult::empty(raw_diff));
    }

    let file_count = count_file_headers(raw_diff);
    let blocks = split_file_blocks(raw_diff);

    let files = if config.use_pool(file_count) {
        let workers = worker_count_for(file_count).min(config.max_workers);
        debug!("Parsing {} file(s) with {} worker(s)", file_count, workers);
        WorkerPool::new(workers).run(blocks).await?
    } else {
        debug!("Parsing {} file(s) sequentially", file_count);
        segment::structure_sequential(&blocks)
    };

    Ok(build_result(files, raw_diff))
}

/// Parse a unified diff on the current thread only.
pub fn parse_diff_sequential(raw_diff: &str) -> DiffResult {
    if raw_diff.trim().is_empty() {
        return DiffResult::empty(raw_diff);
    }
    let files = segment::structure_sequential(&split_file_blocks(raw_diff));
    build_result(files, raw_diff)
}

fn build_result(files: Vec<FileRecord>, raw_diff: &str) -> DiffResult {
    if files.is_empty() {
        return DiffResult::empty(raw_diff);
    }

    let commit_type = infer_commit_type(&files);
    let scopes = infer_scopes(&files);
    debug!("Inferred commit type {} with scopes {:?}", commit_type, scopes);

    DiffResult {
        files,
        commit_type: Some(commit_type),
        scopes,
        raw_diff: raw_diff.to_string(),
    }
}
