//! Command-line interface definition and dispatch helpers.

use crate::config::{Config, MatchPolicy, Verbosity};
use crate::prompt::Prompter;
use crate::release;
use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "release-branch",
    version,
    about = "Cut and update release branches for a git repository"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Suppress progress output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Show each step as it runs
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Cut a new release branch from a base branch and push it
    #[command(visible_alias = "n")]
    New {
        /// How the candidate name is matched against existing remote branches
        #[arg(long, value_enum, default_value_t = MatchPolicy::Substring)]
        match_policy: MatchPolicy,
    },
    /// Publish the current working tree onto an existing built branch
    #[command(visible_alias = "u")]
    Update {
        /// Target branch; prompts for a version and derives
        /// release-branch-<version> when omitted
        branch: Option<String>,
    },
}

impl Cli {
    #[must_use]
    pub fn config(&self) -> Config {
        let verbosity = if self.quiet {
            Verbosity::Quiet
        } else if self.verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        };
        let match_policy = match self.command {
            Command::New { match_policy } => match_policy,
            Command::Update { .. } => MatchPolicy::default(),
        };
        Config {
            verbosity,
            match_policy,
        }
    }
}

/// Accepts `-n` and `-u` as command spellings by rewriting the first
/// argument to the subcommand name; clap would otherwise read them as
/// unknown flags.
pub fn normalize_args<I>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    args.into_iter()
        .enumerate()
        .map(|(position, arg)| match (position, arg.as_str()) {
            (1, "-n") => "new".to_string(),
            (1, "-u") => "update".to_string(),
            _ => arg,
        })
        .collect()
}

/// Resolves the updater's target branch: an explicit name is taken
/// verbatim, otherwise the operator is asked for a version token and the
/// conventional name is derived from it.
pub fn resolve_update_target(
    branch: Option<String>,
    prompter: &dyn Prompter,
) -> Result<String> {
    match branch {
        Some(branch) => Ok(branch),
        None => {
            let version = prompter.input("Version of the built branch to update (x.x)", None)?;
            Ok(release::derive_branch_name(&version))
        }
    }
}
