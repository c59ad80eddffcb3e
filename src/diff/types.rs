//! Structured change model produced by diff parsing.

use std::fmt;

use serde::Serialize;

use crate::diff::classify::is_dependency_manifest;
use crate::infer::CommitType;

/// Coarse category of a changed file, derived from its path only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileCategory {
    Source,
    Test,
    Doc,
    Config,
}

impl FileCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileCategory::Source => "source",
            FileCategory::Test => "test",
            FileCategory::Doc => "doc",
            FileCategory::Config => "config",
        }
    }
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One contiguous `diff --git` block as cut out of the raw diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileBlock {
    /// Position of the block in the input, starting at 0.
    pub index: usize,
    /// The `diff --git ...` line.
    pub header: String,
    /// Every following line up to the next header, each terminated by `\n`.
    pub body: String,
}

/// A changed file after classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// Repository-relative path without the `b/` prefix. Empty when the
    /// header could not be parsed.
    pub path: String,
    pub category: FileCategory,
    pub is_new: bool,
    pub is_deleted: bool,
    /// Raw diff lines of this file, for light text scanning only.
    pub body: String,
}

impl FileRecord {
    /// Whether this is a Config file that declares dependencies (lockfile or manifest).
    pub fn is_dependency_manifest(&self) -> bool {
        self.category == FileCategory::Config && is_dependency_manifest(&self.path)
    }

    /// Number of added lines in the body's hunks.
    pub fn additions(&self) -> usize {
        count_hunk_lines(&self.body, '+')
    }

    /// Number of removed lines in the body's hunks.
    pub fn deletions(&self) -> usize {
        count_hunk_lines(&self.body, '-')
    }
}

/// Count lines starting with `marker`, ignoring the `---`/`+++` file
/// markers that precede the first hunk.
fn count_hunk_lines(body: &str, marker: char) -> usize {
    body.lines()
        .skip_while(|line| !line.starts_with("@@"))
        .filter(|line| line.starts_with(marker))
        .count()
}

/// Aggregate output of parsing one diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffResult {
    /// Files in the order their headers appear in the input.
    pub files: Vec<FileRecord>,
    /// Recommended commit type; `None` only when the diff has no files.
    pub commit_type: Option<CommitType>,
    /// Zero to two scopes, primary first.
    pub scopes: Vec<String>,
    /// The untouched input text.
    pub raw_diff: String,
}

impl DiffResult {
    /// Result for a diff that contains no file blocks.
    pub fn empty(raw_diff: &str) -> Self {
        Self {
            files: Vec::new(),
            commit_type: None,
            scopes: Vec::new(),
            raw_diff: raw_diff.to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
