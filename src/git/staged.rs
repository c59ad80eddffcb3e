//! Staged diff collection using git2.

use std::path::Path;

use git2::{Diff, DiffFormat, ErrorCode, Repository, Tree};
use tracing::{debug, warn};

use crate::error::GitError;

/// Open the repository containing `path`, searching parent directories.
pub fn open_repository(path: &Path) -> Result<Repository, GitError> {
    Repository::discover(path).map_err(GitError::OpenRepository)
}

/// Tree the index is compared against.
///
/// A repository without commits has no base, so every staged path shows up
/// as a new file. A HEAD that exists but cannot be peeled to a tree is an
/// error rather than an empty base, otherwise a corrupt repository would
/// report its whole index as added.
fn staged_base_tree(repo: &Repository) -> Result<Option<Tree<'_>>, GitError> {
    match repo.head() {
        Ok(head) => head.peel_to_tree().map(Some).map_err(GitError::DiffFailed),
        Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => Ok(None),
        Err(e) => Err(GitError::DiffFailed(e)),
    }
}

/// Collect the staged changes (HEAD tree against the index) as unified diff text.
///
/// Every file starts with a `diff --git a/<path> b/<path>` line followed by its
/// extended header, hunk headers and prefixed content lines. Returns an empty
/// string when nothing is staged.
pub fn collect_staged_diff(repo: &Repository) -> Result<String, GitError> {
    let head_tree = staged_base_tree(repo)?;
    if head_tree.is_none() {
        debug!("HEAD is unborn; every staged file is new");
    }

    let staged = repo
        .diff_tree_to_index(head_tree.as_ref(), None, None)
        .map_err(GitError::DiffFailed)?;

    render_patch(&staged)
}

/// Render a diff in patch format.
fn render_patch(diff: &Diff<'_>) -> Result<String, GitError> {
    let mut text = String::new();

    diff.print(DiffFormat::Patch, |_delta, _hunk, line| {
        let content = String::from_utf8_lossy(line.content());

        // File and hunk headers carry their own text; content lines need
        // their origin marker restored.
        let origin = line.origin();
        if origin == '+' || origin == '-' || origin == ' ' {
            text.push(origin);
        }
        text.push_str(&content);

        true
    })
    .map_err(|e| {
        warn!("Failed to render staged diff: {e}");
        GitError::DiffFailed(e)
    })?;

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commit_all(repo: &Repository, message: &str) {
        let mut index = repo.index().unwrap();
        index
            .add_all(["*"].iter(), git2::IndexAddOption::DEFAULT, None)
            .unwrap();
        index.write().unwrap();
        let tree_id = index.write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let sig = git2::Signature::now("Test", "test@test.com").unwrap();
        let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();
        repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .unwrap();
    }

    fn stage(repo: &Repository, path: &str) {
        let mut index = repo.index().unwrap();
        index.add_path(Path::new(path)).unwrap();
        index.write().unwrap();
    }

    #[test]
    fn test_nothing_staged_returns_empty_text() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        std::fs::write(dir.path().join("a.txt"), "a\n").unwrap();
        commit_all(&repo, "init");

        let text = collect_staged_diff(&repo).unwrap();
        assert!(text.is_empty());
    }

    #[test]
    fn test_unborn_head_reports_new_files() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        std::fs::write(dir.path().join("new.txt"), "hello\n").unwrap();
        stage(&repo, "new.txt");

        let text = collect_staged_diff(&repo).unwrap();
        assert!(text.starts_with("diff --git a/new.txt b/new.txt\n"));
        assert!(text.contains("new file mode"));
        assert!(text.contains("+hello"));
    }

    #[test]
    fn test_unstaged_changes_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        std::fs::write(dir.path().join("a.txt"), "a\n").unwrap();
        commit_all(&repo, "init");

        std::fs::write(dir.path().join("a.txt"), "changed\n").unwrap();
        std::fs::write(dir.path().join("untracked.txt"), "u\n").unwrap();

        let text = collect_staged_diff(&repo).unwrap();
        assert!(text.is_empty());
    }

    #[test]
    fn test_staged_modification_and_deletion() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        std::fs::write(dir.path().join("keep.txt"), "original\n").unwrap();
        std::fs::write(dir.path().join("gone.txt"), "bye\n").unwrap();
        commit_all(&repo, "init");

        std::fs::write(dir.path().join("keep.txt"), "modified\n").unwrap();
        stage(&repo, "keep.txt");
        let mut index = repo.index().unwrap();
        index.remove_path(Path::new("gone.txt")).unwrap();
        index.write().unwrap();

        let text = collect_staged_diff(&repo).unwrap();
        assert!(text.contains("diff --git a/gone.txt b/gone.txt\ndeleted file mode"));
        assert!(text.contains("-original\n+modified\n"));
    }

    #[test]
    fn test_corrupt_head_propagates_error() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        std::fs::write(dir.path().join("a.txt"), "a\n").unwrap();
        commit_all(&repo, "init");

        // Corrupt HEAD by pointing it to an invalid ref name
        std::fs::write(dir.path().join(".git/HEAD"), "ref: refs/heads/\0invalid").unwrap();

        let repo = Repository::open(dir.path()).unwrap();
        let result = collect_staged_diff(&repo);
        assert!(
            matches!(result, Err(GitError::DiffFailed(_))),
            "Expected DiffFailed for corrupt HEAD, got: {:?}",
            result
        );
    }

    #[test]
    fn test_open_repository_outside_repo_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = open_repository(dir.path());
        assert!(matches!(result, Err(GitError::OpenRepository(_))));
    }
}
