//! Publishing the working tree onto a built branch.
//!
//! The updater never switches the operator's checked-out branch: the
//! working tree is copied into a staging directory, the target branch is
//! cloned next to it, the copy is mirrored onto the clone, and the result
//! is committed and pushed from there. Any failure leaves the operator's
//! repository exactly as it was.

use crate::constants::{COPY_EXCLUDES, DEFAULT_REMOTE, GIT_DIR, PUBLISH_COMMIT_MESSAGE};
use crate::git;
use crate::prompt::Prompter;
use crate::staging::StagingArea;
use crate::sync;
use anyhow::bail;
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone)]
pub enum BuildStep {
    StagingWorktree,
    CloningTarget { branch: String },
    Mirroring,
    Committing,
    Pushing { branch: String },
}

impl fmt::Display for BuildStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildStep::StagingWorktree => write!(f, "Staging working tree"),
            BuildStep::CloningTarget { branch } => write!(f, "Cloning {branch}"),
            BuildStep::Mirroring => write!(f, "Mirroring working tree onto clone"),
            BuildStep::Committing => write!(f, "Committing"),
            BuildStep::Pushing { branch } => write!(f, "Pushing {branch}"),
        }
    }
}

#[derive(Debug)]
pub struct BuildSummary {
    pub branch: String,
    /// The publish commit created on the target branch.
    pub commit: String,
    pub files_copied: usize,
    pub files_deleted: usize,
}

/// Publishes the current working tree onto the existing remote branch
/// `target` as one new commit.
///
/// Preconditions are checked before anything is staged: the working tree
/// must be clean, the target must exist on the remote, and the operator
/// must confirm.
pub fn run<F>(
    repo: &Path,
    target: &str,
    prompter: &dyn Prompter,
    on_step: F,
) -> anyhow::Result<BuildSummary>
where
    F: Fn(&BuildStep),
{
    if git::has_uncommitted_changes(repo)? {
        bail!("the working tree has uncommitted changes; commit or stash them first");
    }

    let target = target.trim();
    if target.is_empty() {
        bail!("no target branch was resolved");
    }

    let existing = git::remote_branches(repo)?;
    if !existing.iter().any(|name| name == target) {
        bail!("branch '{target}' does not exist on {DEFAULT_REMOTE}");
    }

    if !prompter.confirm(&format!("Publish the current working tree onto '{target}'?"))? {
        bail!("update declined");
    }

    let staging = StagingArea::new()?;

    on_step(&BuildStep::StagingWorktree);
    sync::copy_tree(repo, staging.worktree(), COPY_EXCLUDES)?;

    on_step(&BuildStep::CloningTarget {
        branch: target.to_string(),
    });
    let url = git::remote_url(repo)?;
    git::shallow_clone(repo, &url, target, staging.clone_dir())?;

    on_step(&BuildStep::Mirroring);
    let stats = sync::mirror_tree(staging.worktree(), staging.clone_dir(), &[GIT_DIR])?;

    on_step(&BuildStep::Committing);
    propagate_identity(repo, staging.clone_dir())?;
    git::stage_all(staging.clone_dir())?;
    git::commit(staging.clone_dir(), PUBLISH_COMMIT_MESSAGE)?;
    let commit = git::current_commit(staging.clone_dir())?;

    on_step(&BuildStep::Pushing {
        branch: target.to_string(),
    });
    git::push(staging.clone_dir(), target)?;

    Ok(BuildSummary {
        branch: target.to_string(),
        commit,
        files_copied: stats.copied,
        files_deleted: stats.deleted,
    })
}

/// The publish commit should carry the operator's identity even when it is
/// only configured locally in the source repository.
fn propagate_identity(repo: &Path, clone: &Path) -> anyhow::Result<()> {
    for key in ["user.name", "user.email"] {
        if let Ok(value) = git::config_value(repo, key) {
            git::set_config(clone, key, &value)?;
        }
    }
    Ok(())
}
