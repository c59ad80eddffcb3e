//! Commit type and scope recommendations derived from classified files.

pub mod commit_type;
pub mod scope;

pub use commit_type::{CommitType, infer_commit_type};
pub use scope::{infer_scopes, simplify_scope_name};
