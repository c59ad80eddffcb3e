//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::path::Path;

use git2::{IndexAddOption, Repository, Signature};

/// Diff block for a newly added file.
pub fn added_file(path: &str, lines: &[&str]) -> String {
    let mut block = format!(
        "diff --git a/{path} b/{path}\nnew file mode 100644\nindex 0000000..1a2b3c4\n--- /dev/null\n+++ b/{path}\n@@ -0,0 +1,{} @@\n",
        lines.len()
    );
    for line in lines {
        block.push_str(&format!("+{line}\n"));
    }
    block
}

/// Diff block for a modified file replacing `old` with `new`.
pub fn modified_file(path: &str, old: &str, new: &str) -> String {
    format!(
        "diff --git a/{path} b/{path}\nindex 1111111..2222222 100644\n--- a/{path}\n+++ b/{path}\n@@ -1,2 +1,2 @@\n context\n-{old}\n+{new}\n"
    )
}

/// Diff block for a deleted file.
pub fn deleted_file(path: &str, lines: &[&str]) -> String {
    let mut block = format!(
        "diff --git a/{path} b/{path}\ndeleted file mode 100644\nindex 3333333..0000000\n--- a/{path}\n+++ /dev/null\n@@ -1,{} +0,0 @@\n",
        lines.len()
    );
    for line in lines {
        block.push_str(&format!("-{line}\n"));
    }
    block
}

/// A mixed diff with `count` files cycling through every category and status.
pub fn mixed_diff(count: usize) -> String {
    (0..count)
        .map(|i| match i % 6 {
            0 => added_file(&format!("src/module{}/handler{i}.rs", i % 4), &["pub fn handle() {}"]),
            1 => modified_file(&format!("src/module{}/service{i}.rs", i % 4), "old()", "new()"),
            2 => added_file(&format!("web/components/view{i}.test.ts"), &["it('works', () => {})"]),
            3 => modified_file(&format!("docs/page{i}.md"), "old text", "new text"),
            4 => modified_file(&format!("deploy/service{i}.yaml"), "replicas: 1", "replicas: 2"),
            _ => deleted_file(&format!("legacy/old{i}.go"), &["package legacy"]),
        })
        .collect()
}

/// A test git repository builder for integration tests.
pub struct TestRepo {
    pub dir: tempfile::TempDir,
    pub repo: Repository,
}

impl TestRepo {
    /// Create a new empty git repository in a temp directory.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let repo = Repository::init(dir.path()).expect("Failed to init git repo");
        Self { dir, repo }
    }

    /// Write a file relative to the repository root, creating parent directories.
    pub fn write(&self, path: &str, content: &str) {
        let full = self.dir.path().join(path);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(full, content).expect("Failed to write test file");
    }

    /// Stage a single path.
    pub fn stage(&self, path: &str) {
        let mut index = self.repo.index().expect("Failed to get index");
        index.add_path(Path::new(path)).expect("Failed to add file");
        index.write().expect("Failed to write index");
    }

    /// Stage removal of a tracked path.
    pub fn stage_removal(&self, path: &str) {
        std::fs::remove_file(self.dir.path().join(path)).expect("Failed to remove file");
        let mut index = self.repo.index().expect("Failed to get index");
        index.remove_path(Path::new(path)).expect("Failed to remove path");
        index.write().expect("Failed to write index");
    }

    /// Stage everything in the working tree and commit it.
    pub fn commit_all(&self, message: &str) {
        let mut index = self.repo.index().expect("Failed to get index");
        index
            .add_all(["*"].iter(), IndexAddOption::DEFAULT, None)
            .expect("Failed to add files");
        index.write().expect("Failed to write index");
        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");

        let sig = Signature::now("Test User", "test@example.com")
            .expect("Failed to create signature");
        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("Failed to create commit");
    }
}
