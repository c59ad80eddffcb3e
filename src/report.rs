//! Rendering parsed diffs for the user.

use serde::Serialize;

use crate::diff::types::{DiffResult, FileCategory, FileRecord};
use crate::infer::CommitType;

/// Changed lines included in a file summary.
const SUMMARY_MAX_LINES: usize = 3;

/// Maximum characters in a file summary before it is cut.
const SUMMARY_MAX_LENGTH: usize = 100;

/// Per-file view serialized in JSON output.
#[derive(Debug, Serialize)]
pub struct FileReport<'a> {
    pub path: &'a str,
    pub category: FileCategory,
    pub is_new: bool,
    pub is_deleted: bool,
    pub is_dependency_manifest: bool,
    pub additions: usize,
    pub deletions: usize,
}

impl<'a> From<&'a FileRecord> for FileReport<'a> {
    fn from(file: &'a FileRecord) -> Self {
        Self {
            path: &file.path,
            category: file.category,
            is_new: file.is_new,
            is_deleted: file.is_deleted,
            is_dependency_manifest: file.is_dependency_manifest(),
            additions: file.additions(),
            deletions: file.deletions(),
        }
    }
}

/// Whole-diff view serialized in JSON output.
#[derive(Debug, Serialize)]
pub struct DiffReport<'a> {
    pub files: Vec<FileReport<'a>>,
    pub commit_type: Option<CommitType>,
    pub scopes: &'a [String],
}

impl<'a> From<&'a DiffResult> for DiffReport<'a> {
    fn from(result: &'a DiffResult) -> Self {
        Self {
            files: result.files.iter().map(FileReport::from).collect(),
            commit_type: result.commit_type,
            scopes: &result.scopes,
        }
    }
}

/// Render a result as pretty-printed JSON.
pub fn render_json(result: &DiffResult) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&DiffReport::from(result))
}

/// Render a result as human-readable text.
pub fn render_text(result: &DiffResult, with_summary: bool) -> String {
    let count = result.files.len();
    let mut out = format!("{} file{} staged\n", count, if count == 1 { "" } else { "s" });

    for file in &result.files {
        let path = if file.path.is_empty() { "(unknown path)" } else { file.path.as_str() };
        out.push_str(&format!("  - {} ({})", path, file.category));
        if file.is_new {
            out.push_str(" [new]");
        }
        if file.is_deleted {
            out.push_str(" [deleted]");
        }
        out.push_str(&format!(" +{} -{}\n", file.additions(), file.deletions()));

        if with_summary {
            let summary = summarize_changes(&file.body);
            if !summary.is_empty() {
                out.push_str(&format!("      {}\n", summary));
            }
        }
    }

    if let Some(commit_type) = result.commit_type {
        out.push_str(&format!("\nRecommended commit type: {}\n", commit_type));
    }
    if !result.scopes.is_empty() {
        out.push_str(&format!("Recommended scope: {}\n", result.scopes.join(", ")));
    }

    out
}

/// One-line digest of the first few changed lines of a file body.
pub fn summarize_changes(body: &str) -> String {
    let mut picked: Vec<&str> = Vec::new();

    for line in body.lines().map(str::trim) {
        if line.is_empty() || is_metadata(line) {
            continue;
        }
        if !(line.starts_with('+') || line.starts_with('-')) {
            continue;
        }
        if picked.len() == SUMMARY_MAX_LINES {
            picked.push("...");
            break;
        }
        picked.push(line);
    }

    let summary = picked.join(" ");
    if summary.chars().count() > SUMMARY_MAX_LENGTH {
        let cut: String = summary.chars().take(SUMMARY_MAX_LENGTH).collect();
        format!("{cut}...")
    } else {
        summary
    }
}

fn is_metadata(line: &str) -> bool {
    line.starts_with("diff --git")
        || line.starts_with("index ")
        || line.starts_with("---")
        || line.starts_with("+++")
        || line.starts_with("@@")
}
