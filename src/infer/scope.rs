//! Scope inference from the directory structure of changed paths.
//!
//! Source files decide the scope whenever any are present. The primary scope
//! is the last segment of their longest common directory, or, when that
//! prefix is missing or only made of generic containers like `src`, the
//! directory directly below it holding the most files. A generic prefix with
//! no directories below it is used as is.

use crate::diff::types::{FileCategory, FileRecord};

/// Scope names longer than this are shortened.
pub const MAX_SCOPE_LEN: usize = 20;

pub const MULTIPLE_SCOPE: &str = "multiple";
pub const CONFIG_SCOPE: &str = "config";
pub const DOCS_SCOPE: &str = "docs";
pub const TEST_SCOPE: &str = "test";

/// Files under the primary scope needed before a secondary scope is considered.
const SECONDARY_MIN_FILES: usize = 6;
/// Files the chosen sub-directory must hold to become the secondary scope.
const SECONDARY_MIN_SUBDIR_FILES: usize = 3;

/// Directory names that say nothing about the functional area.
static GENERIC_DIRS: phf::Set<&'static str> = phf::phf_set! {
    "src",
    "lib",
    "internal",
    "pkg",
    "cmd",
    "app",
    "crates",
    "packages",
    "source",
};

/// Derive up to two scopes, primary first.
pub fn infer_scopes(files: &[FileRecord]) -> Vec<String> {
    let mut sources = Vec::new();
    let mut configs = Vec::new();
    let mut has_doc = false;
    let mut has_test = false;

    for file in files {
        match file.category {
            FileCategory::Source => sources.push(file.path.as_str()),
            FileCategory::Config => configs.push(file.path.as_str()),
            FileCategory::Doc => has_doc = true,
            FileCategory::Test => has_test = true,
        }
    }

    if !sources.is_empty() {
        return scopes_from_sources(&sources);
    }
    if !configs.is_empty() {
        return scopes_from_configs(&configs);
    }
    if has_doc {
        return vec![DOCS_SCOPE.to_string()];
    }
    if has_test {
        return vec![TEST_SCOPE.to_string()];
    }
    Vec::new()
}

fn scopes_from_sources(paths: &[&str]) -> Vec<String> {
    let dirs: Vec<Vec<&str>> = paths.iter().map(|p| directory_segments(p)).collect();
    let prefix = common_prefix(&dirs);

    let primary: Vec<&str> = if !is_trivial(&prefix) {
        prefix
    } else {
        let groups = vote(&dirs, &prefix);
        let voters: usize = groups.iter().map(|(_, count)| count).sum();
        let Some((top, top_count)) = largest(&groups) else {
            // Every file sits directly in the generic prefix.
            return prefix
                .last()
                .map(|last| vec![simplify_scope_name(last)])
                .unwrap_or_default();
        };

        if groups.len() >= 3 && top_count * 2 <= voters {
            return vec![MULTIPLE_SCOPE.to_string()];
        }

        let mut primary = prefix;
        primary.push(top);
        primary
    };

    let Some(last) = primary.last() else {
        return Vec::new();
    };
    let mut scopes = vec![simplify_scope_name(last)];

    if let Some(secondary) = secondary_scope(&dirs, &primary) {
        scopes.push(simplify_scope_name(secondary));
    }

    scopes
}

fn scopes_from_configs(paths: &[&str]) -> Vec<String> {
    let dirs: Vec<Vec<&str>> = paths.iter().map(|p| directory_segments(p)).collect();
    let prefix = common_prefix(&dirs);

    // A single directory below a trivial prefix would already be part of
    // the prefix, so anything else spans several directories.
    match prefix.last() {
        Some(last) if !is_trivial(&prefix) => vec![simplify_scope_name(last)],
        _ => vec![CONFIG_SCOPE.to_string()],
    }
}

/// A notable sub-directory of the primary scope, for large and varied changes.
fn secondary_scope<'a>(dirs: &[Vec<&'a str>], primary: &[&str]) -> Option<&'a str> {
    let under: Vec<Vec<&'a str>> = dirs
        .iter()
        .filter(|d| d.starts_with(primary))
        .cloned()
        .collect();
    if under.len() < SECONDARY_MIN_FILES {
        return None;
    }

    let groups = vote(&under, primary);
    if groups.len() < 2 {
        return None;
    }

    match largest(&groups) {
        Some((sub, count)) if count >= SECONDARY_MIN_SUBDIR_FILES => Some(sub),
        _ => None,
    }
}

/// Count files per directory directly below `prefix`, in first-seen order.
fn vote<'a>(dirs: &[Vec<&'a str>], prefix: &[&str]) -> Vec<(&'a str, usize)> {
    let mut groups: Vec<(&'a str, usize)> = Vec::new();
    for dir in dirs {
        let Some(&segment) = dir.get(prefix.len()) else {
            continue;
        };
        match groups.iter_mut().find(|(name, _)| *name == segment) {
            Some((_, count)) => *count += 1,
            None => groups.push((segment, 1)),
        }
    }
    groups
}

/// The group with the most files; the earliest one wins ties.
fn largest<'a>(groups: &[(&'a str, usize)]) -> Option<(&'a str, usize)> {
    groups
        .iter()
        .copied()
        .fold(None, |best, (name, count)| match best {
            Some((_, best_count)) if best_count >= count => best,
            _ => Some((name, count)),
        })
}

/// Directory segments of a path, without the file name.
fn directory_segments(path: &str) -> Vec<&str> {
    let mut segments: Vec<&str> = path
        .split('/')
        .filter(|s| !s.is_empty() && *s != ".")
        .collect();
    segments.pop();
    segments
}

fn common_prefix<'a>(dirs: &[Vec<&'a str>]) -> Vec<&'a str> {
    let Some((first, rest)) = dirs.split_first() else {
        return Vec::new();
    };

    let mut len = first.len();
    for dir in rest {
        len = first
            .iter()
            .zip(dir.iter())
            .take(len)
            .take_while(|(a, b)| a == b)
            .count();
        if len == 0 {
            break;
        }
    }
    first[..len].to_vec()
}

fn is_trivial(prefix: &[&str]) -> bool {
    prefix.iter().all(|segment| GENERIC_DIRS.contains(*segment))
}

/// Shorten an over-long scope to its last path segment, then hard-truncate.
pub fn simplify_scope_name(scope: &str) -> String {
    if scope.chars().count() <= MAX_SCOPE_LEN {
        return scope.to_string();
    }

    let last = scope.rsplit('/').next().unwrap_or(scope);
    if scope.contains('/') && last.chars().count() <= MAX_SCOPE_LEN {
        return last.to_string();
    }

    last.chars().take(MAX_SCOPE_LEN).collect()
}
