//! Test infrastructure for release-branch-rust integration tests.

#![allow(dead_code)]

use anyhow::{Context, Result};
use release_branch_rust::git::run_git;
use release_branch_rust::prompt::Prompter;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary git repository for testing.
/// Automatically cleaned up when dropped.
pub struct TestRepo {
    _temp_dir: TempDir,
    path: PathBuf,
}

impl TestRepo {
    /// Creates a new test repository with an initial commit on the master
    /// branch.
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().to_path_buf();

        run_git(&path, &["init", "-b", "master"])?;

        run_git(&path, &["config", "user.email", "test@example.com"])?;
        run_git(&path, &["config", "user.name", "Test User"])?;

        std::fs::write(path.join("README.md"), "# Test Repo\n")?;
        std::fs::create_dir_all(path.join("src"))?;
        std::fs::write(path.join("src/app.js"), "console.log('v1');\n")?;
        run_git(&path, &["add", "-A"])?;
        run_git(&path, &["commit", "-m", "Initial commit"])?;

        Ok(Self {
            _temp_dir: temp_dir,
            path,
        })
    }

    /// Creates a test repository with a configured bare remote.
    /// Returns the repo and the remote TempDir (must be kept alive).
    pub fn with_remote() -> Result<(Self, TempDir)> {
        let remote_dir = TempDir::new()?;
        run_git(remote_dir.path(), &["init", "--bare"])?;

        let local = Self::new()?;

        run_git(
            &local.path,
            &["remote", "add", "origin", remote_dir.path().to_str().unwrap()],
        )?;
        run_git(&local.path, &["push", "-u", "origin", "master"])?;

        Ok((local, remote_dir))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn make_dirty(&self) -> Result<()> {
        std::fs::write(self.path.join("README.md"), "# Dirty\n")?;
        Ok(())
    }

    pub fn make_untracked(&self) -> Result<()> {
        std::fs::write(self.path.join("untracked.txt"), "untracked\n")?;
        Ok(())
    }

    pub fn file_exists(&self, rel: &str) -> bool {
        self.path.join(rel).exists()
    }

    /// Writes `rel` without committing it.
    pub fn write_file(&self, rel: &str, contents: &str) -> Result<()> {
        let path = self.path.join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Writes `rel` and commits it.
    pub fn commit_file(&self, rel: &str, contents: &str) -> Result<()> {
        let path = self.path.join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)?;
        run_git(&self.path, &["add", "-A"])?;
        run_git(&self.path, &["commit", "-m", &format!("Add {rel}")])?;
        Ok(())
    }

    /// Removes a tracked file and commits the removal.
    pub fn remove_committed(&self, rel: &str) -> Result<()> {
        run_git(&self.path, &["rm", rel])?;
        run_git(&self.path, &["commit", "-m", &format!("Remove {rel}")])?;
        Ok(())
    }

    /// Creates `name` on the remote from master without creating a local
    /// branch.
    pub fn push_branch(&self, name: &str) -> Result<()> {
        run_git(&self.path, &["push", "origin", &format!("master:{name}")])?;
        Ok(())
    }
}

/// Branch names present in a bare remote repository.
pub fn remote_branches(remote: &Path) -> Result<Vec<String>> {
    let output = run_git(
        remote,
        &["for-each-ref", "--format=%(refname:short)", "refs/heads"],
    )?;
    Ok(output.lines().map(str::to_string).collect())
}

/// Contents of `file` at the tip of `branch` in a bare remote.
pub fn remote_file(remote: &Path, branch: &str, file: &str) -> Result<String> {
    run_git(remote, &["show", &format!("{branch}:{file}")])
}

/// Number of commits reachable from `branch` in a bare remote.
pub fn remote_commit_count(remote: &Path, branch: &str) -> Result<usize> {
    let count = run_git(remote, &["rev-list", "--count", branch])?;
    count.parse().context("unparsable rev-list count")
}

/// Tip commit id of `branch` in a bare remote.
pub fn remote_tip(remote: &Path, branch: &str) -> Result<String> {
    run_git(remote, &["rev-parse", branch])
}

/// Scripted prompt answers for driving the interactive procedures.
///
/// An empty scripted input means "accept the offered default". Text passed
/// to `show` is recorded for assertions.
pub struct ScriptedPrompter {
    inputs: RefCell<VecDeque<String>>,
    confirms: RefCell<VecDeque<bool>>,
    pub shown: RefCell<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new(inputs: &[&str], confirms: &[bool]) -> Self {
        Self {
            inputs: RefCell::new(inputs.iter().map(|s| s.to_string()).collect()),
            confirms: RefCell::new(confirms.iter().copied().collect()),
            shown: RefCell::new(Vec::new()),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn input(&self, _prompt: &str, default: Option<&str>) -> Result<String> {
        let answer = self
            .inputs
            .borrow_mut()
            .pop_front()
            .context("prompter ran out of scripted inputs")?;
        if answer.is_empty() {
            if let Some(default) = default {
                return Ok(default.to_string());
            }
        }
        Ok(answer)
    }

    fn confirm(&self, _prompt: &str) -> Result<bool> {
        self.confirms
            .borrow_mut()
            .pop_front()
            .context("prompter ran out of scripted confirmations")
    }

    fn show(&self, text: &str) {
        self.shown.borrow_mut().push(text.to_string());
    }
}
