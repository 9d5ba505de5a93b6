//! Git command wrappers.
//!
//! This module provides a thin wrapper around git CLI commands,
//! handling command execution and error formatting. Failure is always
//! decided by the command's exit status, never by scanning its output.

use crate::constants::DEFAULT_REMOTE;
use anyhow::Context;
use std::path::Path;

/// Runs a git command in `workdir` and returns its trimmed stdout.
pub fn run_git(workdir: &Path, args: &[&str]) -> anyhow::Result<String> {
    let output = std::process::Command::new("git")
        .current_dir(workdir)
        .args(args)
        .output()
        .context("Failed to spawn git command")?;

    if output.status.success() {
        let result = String::from_utf8_lossy(&output.stdout);
        Ok(result.as_ref().trim().to_string())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        anyhow::bail!("git {} failed: {}", args.join(" "), stderr.trim())
    }
}

/// Rejects names that could be misread as options or refer outside a
/// single ref. Slashes are allowed so remote-tracking refs like
/// `origin/master` pass through.
fn validate_branch_name(branch: &str) -> anyhow::Result<()> {
    if branch.is_empty()
        || branch.starts_with('-')
        || branch.contains("..")
        || branch.contains(['\0', '\n', ' '])
    {
        anyhow::bail!("Invalid branch name: {:?}", branch);
    }
    Ok(())
}

pub fn current_branch(repo: &Path) -> anyhow::Result<String> {
    run_git(repo, &["rev-parse", "--abbrev-ref", "HEAD"]).context("Failed to get current branch")
}

pub fn current_commit(repo: &Path) -> anyhow::Result<String> {
    run_git(repo, &["rev-parse", "HEAD"]).context("Failed to get current commit")
}

/// Any staged, unstaged, or untracked entry counts as uncommitted.
pub fn has_uncommitted_changes(repo: &Path) -> anyhow::Result<bool> {
    run_git(repo, &["status", "--porcelain"])
        .map(|output| !output.is_empty())
        .context("Failed to check for uncommitted changes")
}

/// Lists branch names on the default remote, without the `refs/heads/`
/// prefix.
pub fn remote_branches(repo: &Path) -> anyhow::Result<Vec<String>> {
    let output = run_git(repo, &["ls-remote", "--heads", DEFAULT_REMOTE])
        .context("Failed to list remote branches")?;
    Ok(output
        .lines()
        .filter_map(|line| line.split('\t').nth(1))
        .filter_map(|refname| refname.strip_prefix("refs/heads/"))
        .map(str::to_string)
        .collect())
}

pub fn fetch_prune(repo: &Path) -> anyhow::Result<()> {
    run_git(repo, &["fetch", "--prune"]).context("Failed to fetch from remote")?;
    Ok(())
}

/// Checks out a local branch or a remote-tracking ref such as
/// `origin/master` (the latter detaches HEAD).
pub fn checkout(repo: &Path, refname: &str) -> anyhow::Result<()> {
    validate_branch_name(refname)?;
    run_git(repo, &["checkout", refname])
        .with_context(|| format!("Failed to checkout '{}'", refname))?;
    Ok(())
}

/// Creates `branch` at HEAD and switches to it.
pub fn create_branch(repo: &Path, branch: &str) -> anyhow::Result<()> {
    validate_branch_name(branch)?;
    run_git(repo, &["checkout", "-b", branch])
        .with_context(|| format!("Failed to create branch '{}'", branch))?;
    Ok(())
}

pub fn status(repo: &Path) -> anyhow::Result<String> {
    run_git(repo, &["status"]).context("Failed to get repository status")
}

/// Pushes `branch` to the default remote with upstream tracking.
pub fn push_upstream(repo: &Path, branch: &str) -> anyhow::Result<()> {
    validate_branch_name(branch)?;
    run_git(repo, &["push", "--set-upstream", DEFAULT_REMOTE, branch])
        .with_context(|| format!("Failed to push '{}' with upstream tracking", branch))?;
    Ok(())
}

pub fn push(repo: &Path, branch: &str) -> anyhow::Result<()> {
    validate_branch_name(branch)?;
    run_git(repo, &["push", DEFAULT_REMOTE, branch])
        .with_context(|| format!("Failed to push '{}'", branch))?;
    Ok(())
}

pub fn remote_url(repo: &Path) -> anyhow::Result<String> {
    run_git(repo, &["remote", "get-url", DEFAULT_REMOTE])
        .context("Failed to read the remote URL")
}

/// Clones a single branch at depth 1 from `url` into `dest`. `workdir`
/// only anchors the subprocess; the clone lands in `dest`.
pub fn shallow_clone(workdir: &Path, url: &str, branch: &str, dest: &Path) -> anyhow::Result<()> {
    validate_branch_name(branch)?;
    let dest = dest
        .to_str()
        .context("Staging path is not valid UTF-8")?;
    run_git(
        workdir,
        &[
            "clone",
            "--depth",
            "1",
            "--branch",
            branch,
            "--single-branch",
            url,
            dest,
        ],
    )
    .with_context(|| format!("Failed to clone branch '{}'", branch))?;
    Ok(())
}

pub fn stage_all(repo: &Path) -> anyhow::Result<()> {
    run_git(repo, &["add", "-A"]).context("Failed to stage changes")?;
    Ok(())
}

/// Records a commit even when the tree is unchanged, so a publish run with
/// no content changes still produces one commit.
pub fn commit(repo: &Path, message: &str) -> anyhow::Result<()> {
    run_git(repo, &["commit", "--allow-empty", "-m", message]).context("Failed to commit")?;
    Ok(())
}

/// Reads a config value as git resolves it for `repo`, local and global
/// scopes included. Errors when the key is unset.
pub fn config_value(repo: &Path, key: &str) -> anyhow::Result<String> {
    run_git(repo, &["config", "--get", key])
        .with_context(|| format!("Failed to read git config '{}'", key))
}

/// Sets a config value in `repo`'s local scope.
pub fn set_config(repo: &Path, key: &str, value: &str) -> anyhow::Result<()> {
    run_git(repo, &["config", key, value])
        .with_context(|| format!("Failed to set git config '{}'", key))?;
    Ok(())
}
