//! Application-wide constants.
//!
//! Centralized naming conventions and fixed values used across the CLI.

/// Prefix for branch names derived from a version token.
pub const RELEASE_BRANCH_PREFIX: &str = "release-branch-";

/// Base branch offered as the default when cutting a new release branch.
pub const DEFAULT_BASE_BRANCH: &str = "master";

/// The remote every operation targets.
pub const DEFAULT_REMOTE: &str = "origin";

/// Commit message used when publishing the working tree onto a built branch.
pub const PUBLISH_COMMIT_MESSAGE: &str = "Update built branch";

/// Git directory name, excluded from working-tree copies and preserved in
/// staged clones.
pub const GIT_DIR: &str = ".git";

/// Directory names never copied into the staged working tree, matched at
/// any depth.
pub const COPY_EXCLUDES: &[&str] = &[GIT_DIR, "node_modules"];

/// Progress spinner tick interval in milliseconds.
pub const PROGRESS_TICK_MS: u64 = 80;
