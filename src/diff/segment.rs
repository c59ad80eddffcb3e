//! Splitting a unified diff into per-file blocks and structuring them.

use crate::diff::classify::classify_path;
use crate::diff::types::{FileBlock, FileRecord};

/// Marker that opens every file block.
pub const FILE_HEADER_PREFIX: &str = "diff --git";

const NEW_FILE_PREFIX: &str = "new file mode";
const DELETED_FILE_PREFIX: &str = "deleted file mode";
const HUNK_PREFIX: &str = "@@";

/// Split raw diff text into one block per `diff --git` header.
///
/// Lines before the first header are discarded. Each body line keeps its
/// `\n` terminator so the blocks account for every input line exactly once.
pub fn split_file_blocks(diff: &str) -> Vec<FileBlock> {
    let mut blocks: Vec<FileBlock> = Vec::new();

    for line in diff.lines() {
        if line.starts_with(FILE_HEADER_PREFIX) {
            blocks.push(FileBlock {
                index: blocks.len(),
                header: line.to_string(),
                body: String::new(),
            });
        } else if let Some(current) = blocks.last_mut() {
            current.body.push_str(line);
            current.body.push('\n');
        }
    }

    blocks
}

/// Count file headers without building blocks.
pub fn count_file_headers(diff: &str) -> usize {
    diff.lines()
        .filter(|line| line.starts_with(FILE_HEADER_PREFIX))
        .count()
}

/// Extract the file path from a `diff --git a/<path> b/<path>` header.
///
/// Returns an empty string when the header has fewer than four fields.
pub fn parse_header_path(header: &str) -> String {
    header
        .split_whitespace()
        .nth(3)
        .map(|field| field.strip_prefix("b/").unwrap_or(field).to_string())
        .unwrap_or_default()
}

/// Turn one block into a classified record.
///
/// Both the sequential path and the worker pool go through this function.
pub fn structure_block(block: &FileBlock) -> FileRecord {
    let path = parse_header_path(&block.header);
    let mut is_new = false;
    let mut is_deleted = false;

    // Mode lines only appear in the extended header, before the first hunk.
    for line in block.body.lines() {
        if line.starts_with(HUNK_PREFIX) {
            break;
        }
        if line.starts_with(NEW_FILE_PREFIX) {
            is_new = true;
        } else if line.starts_with(DELETED_FILE_PREFIX) {
            is_deleted = true;
        }
    }

    FileRecord {
        category: classify_path(&path),
        path,
        is_new,
        is_deleted,
        body: block.body.clone(),
    }
}

/// Structure every block on the current thread, in input order.
pub fn structure_sequential(blocks: &[FileBlock]) -> Vec<FileRecord> {
    blocks.iter().map(structure_block).collect()
}
