//! Cutting new release branches.
//!
//! The creator derives `release-branch-<version>` from an operator-entered
//! version token, refuses names that collide with existing remote branches,
//! creates the branch from the base branch's remote-tracking ref, and
//! pushes it with upstream tracking after the operator has reviewed the
//! local status output.

use crate::config::Config;
use crate::constants::{DEFAULT_BASE_BRANCH, DEFAULT_REMOTE, RELEASE_BRANCH_PREFIX};
use crate::git;
use crate::prompt::Prompter;
use anyhow::bail;
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone)]
pub enum CutStep {
    Fetching,
    CheckingOutBase { base: String },
    CreatingBranch { branch: String },
    Pushing { branch: String },
}

impl fmt::Display for CutStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CutStep::Fetching => write!(f, "Fetching {DEFAULT_REMOTE}"),
            CutStep::CheckingOutBase { base } => {
                write!(f, "Checking out {DEFAULT_REMOTE}/{base}")
            }
            CutStep::CreatingBranch { branch } => write!(f, "Creating branch {branch}"),
            CutStep::Pushing { branch } => write!(f, "Pushing {branch}"),
        }
    }
}

#[derive(Debug)]
pub struct CutSummary {
    pub branch: String,
    pub base: String,
}

/// Branch name derived from a version token. The token is free-form; the
/// convention is `major.minor`.
#[must_use]
pub fn derive_branch_name(version: &str) -> String {
    format!("{RELEASE_BRANCH_PREFIX}{}", version.trim())
}

/// Interactive driver: collects the version token and base branch, then
/// cuts the branch.
pub fn run<F>(
    repo: &Path,
    config: &Config,
    prompter: &dyn Prompter,
    on_step: F,
) -> anyhow::Result<CutSummary>
where
    F: Fn(&CutStep),
{
    let version = prompter.input("Version for the new release branch (x.x)", None)?;
    let base = prompter.input("Base branch", Some(DEFAULT_BASE_BRANCH))?;
    let branch = derive_branch_name(&version);
    cut(repo, config, &base, &branch, prompter, on_step)
}

/// Creates `branch` from `origin/<base>` and pushes it after confirmation.
///
/// The collision check runs before anything is mutated; a declined push
/// aborts but leaves the created local branch in place.
pub fn cut<F>(
    repo: &Path,
    config: &Config,
    base: &str,
    branch: &str,
    prompter: &dyn Prompter,
    on_step: F,
) -> anyhow::Result<CutSummary>
where
    F: Fn(&CutStep),
{
    let existing = git::remote_branches(repo)?;
    if let Some(hit) = existing
        .iter()
        .find(|name| config.match_policy.collides(name.as_str(), branch))
    {
        bail!(
            "branch '{branch}' collides with remote branch '{hit}' ({} match)",
            config.match_policy
        );
    }

    on_step(&CutStep::Fetching);
    git::fetch_prune(repo)?;

    on_step(&CutStep::CheckingOutBase {
        base: base.to_string(),
    });
    git::checkout(repo, &format!("{DEFAULT_REMOTE}/{base}"))?;

    on_step(&CutStep::CreatingBranch {
        branch: branch.to_string(),
    });
    git::create_branch(repo, branch)?;

    prompter.show(&git::status(repo)?);
    if !prompter.confirm(&format!("Push '{branch}' to {DEFAULT_REMOTE}?"))? {
        bail!("push declined; '{branch}' was created locally but not pushed");
    }

    on_step(&CutStep::Pushing {
        branch: branch.to_string(),
    });
    git::push_upstream(repo, branch)?;

    if prompter.confirm("Create a beta tag for this release?")? {
        bail!("beta tags are not implemented; '{branch}' was pushed without one");
    }

    Ok(CutSummary {
        branch: branch.to_string(),
        base: base.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_branch_name_prefixes_version() {
        assert_eq!(derive_branch_name("1.2"), "release-branch-1.2");
    }

    #[test]
    fn test_derive_branch_name_trims_whitespace() {
        assert_eq!(derive_branch_name(" 2.0 "), "release-branch-2.0");
    }
}
