//! Weighted scoring of conventional commit types over a classified file set.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::diff::types::{FileCategory, FileRecord};

/// Commit types the inferencer can recommend.
///
/// Declaration order doubles as the tie-break priority: when two types share
/// the highest score, the one declared first wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitType {
    Feat,
    Fix,
    Build,
    Docs,
    Test,
    Refactor,
    Chore,
}

impl CommitType {
    /// All types in tie-break priority order.
    pub const ALL: [CommitType; 7] = [
        CommitType::Feat,
        CommitType::Fix,
        CommitType::Build,
        CommitType::Docs,
        CommitType::Test,
        CommitType::Refactor,
        CommitType::Chore,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CommitType::Feat => "feat",
            CommitType::Fix => "fix",
            CommitType::Build => "build",
            CommitType::Docs => "docs",
            CommitType::Test => "test",
            CommitType::Refactor => "refactor",
            CommitType::Chore => "chore",
        }
    }
}

impl fmt::Display for CommitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CommitType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "feat" => Ok(Self::Feat),
            "fix" => Ok(Self::Fix),
            "build" => Ok(Self::Build),
            "docs" => Ok(Self::Docs),
            "test" => Ok(Self::Test),
            "refactor" => Ok(Self::Refactor),
            "chore" => Ok(Self::Chore),
            _ => Err(format!("Unknown commit type: {}", s)),
        }
    }
}

// Per-file weights
const NEW_SOURCE_FEAT: i32 = 15;
const MODIFIED_SOURCE_REFACTOR: i32 = 10;
const MODIFIED_SOURCE_FIX: i32 = 5;
const NEW_TEST: i32 = 8;
const MODIFIED_TEST: i32 = 3;
const DOC: i32 = 3;
const DEPENDENCY_BUILD: i32 = 2;
const REGULAR_CONFIG_CHORE: i32 = 2;

// Whole-change bonuses and penalties
const NEW_DIRECTORIES_FEAT: i32 = 30;
const MANY_NEW_SOURCES_FEAT: i32 = 30;
const ONLY_CONFIG_BONUS: i32 = 15;
const ONLY_CONFIG_PENALTY: i32 = 5;
const ANY_NEW_SOURCE_FEAT: i32 = 50;
const ANY_NEW_SOURCE_PENALTY: i32 = 20;

/// Score table indexed by [`CommitType`].
#[derive(Debug, Default)]
struct Scores([i32; 7]);

impl Scores {
    fn add(&mut self, commit_type: CommitType, points: i32) {
        self.0[commit_type as usize] += points;
    }

    /// Highest positive score, ties broken by [`CommitType::ALL`] order.
    fn best(&self) -> CommitType {
        let mut best = CommitType::Chore;
        let mut best_score = 0;
        for commit_type in CommitType::ALL {
            let score = self.0[commit_type as usize];
            if score > best_score {
                best = commit_type;
                best_score = score;
            }
        }
        best
    }
}

/// Recommend a commit type for a set of changed files.
///
/// Never fails; an empty set yields [`CommitType::Chore`].
pub fn infer_commit_type(files: &[FileRecord]) -> CommitType {
    if files.is_empty() {
        return CommitType::Chore;
    }

    let mut scores = Scores::default();
    let mut source_count = 0usize;
    let mut new_source_count = 0usize;
    let mut new_directories: HashSet<&str> = HashSet::new();
    let mut has_dependency = false;
    let mut has_regular_config = false;

    for file in files {
        if file.is_new {
            if let Some((dir, _)) = file.path.rsplit_once('/') {
                new_directories.insert(dir);
            }
        }

        match file.category {
            FileCategory::Source => {
                source_count += 1;
                if file.is_new {
                    new_source_count += 1;
                    scores.add(CommitType::Feat, NEW_SOURCE_FEAT);
                } else if !file.is_deleted {
                    scores.add(CommitType::Refactor, MODIFIED_SOURCE_REFACTOR);
                    scores.add(CommitType::Fix, MODIFIED_SOURCE_FIX);
                }
            }
            FileCategory::Test => {
                let points = if file.is_new { NEW_TEST } else { MODIFIED_TEST };
                scores.add(CommitType::Test, points);
            }
            FileCategory::Doc => scores.add(CommitType::Docs, DOC),
            FileCategory::Config => {
                if file.is_dependency_manifest() {
                    has_dependency = true;
                    scores.add(CommitType::Build, DEPENDENCY_BUILD);
                } else {
                    has_regular_config = true;
                    scores.add(CommitType::Chore, REGULAR_CONFIG_CHORE);
                }
            }
        }
    }

    if new_directories.len() >= 2 {
        scores.add(CommitType::Feat, NEW_DIRECTORIES_FEAT);
    }

    if new_source_count >= 2 {
        scores.add(CommitType::Feat, MANY_NEW_SOURCES_FEAT);
    }

    if has_dependency && source_count == 0 && !has_regular_config {
        scores.add(CommitType::Build, ONLY_CONFIG_BONUS);
        scores.add(CommitType::Chore, -ONLY_CONFIG_PENALTY);
    }

    if has_regular_config && source_count == 0 && !has_dependency {
        scores.add(CommitType::Chore, ONLY_CONFIG_BONUS);
        scores.add(CommitType::Build, -ONLY_CONFIG_PENALTY);
    }

    // Feature work that also touches manifests is still feature work.
    if new_source_count > 0 {
        scores.add(CommitType::Feat, ANY_NEW_SOURCE_FEAT);
        scores.add(CommitType::Build, -ANY_NEW_SOURCE_PENALTY);
        scores.add(CommitType::Chore, -ANY_NEW_SOURCE_PENALTY);
    }

    scores.best()
}
