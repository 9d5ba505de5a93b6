// Per-run staging directories for the branch updater.

use anyhow::{Context, Result};
use std::path::Path;
use tempfile::TempDir;

/// The two scratch locations an update run works in: a clean copy of the
/// working tree, and a clone of the target branch.
///
/// Each run gets its own uniquely named directories, so concurrent runs on
/// one host cannot collide. Dropping the area removes both directories,
/// on success and on every failure path alike.
#[derive(Debug)]
pub struct StagingArea {
    worktree: TempDir,
    clone: TempDir,
}

impl StagingArea {
    pub fn new() -> Result<Self> {
        let worktree = tempfile::Builder::new()
            .prefix("release-branch-worktree-")
            .tempdir()
            .context("Failed to create working-tree staging directory")?;
        let clone = tempfile::Builder::new()
            .prefix("release-branch-clone-")
            .tempdir()
            .context("Failed to create clone staging directory")?;
        Ok(Self { worktree, clone })
    }

    /// Where the working-tree copy is staged.
    pub fn worktree(&self) -> &Path {
        self.worktree.path()
    }

    /// Where the target branch is cloned.
    pub fn clone_dir(&self) -> &Path {
        self.clone.path()
    }
}
