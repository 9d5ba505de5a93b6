//! Configuration types for CLI verbosity and options.

use clap::ValueEnum;
use std::fmt;

/// Runtime configuration derived from CLI arguments.
#[derive(Debug, Clone, Copy, Default)]
pub struct Config {
    /// Controls the verbosity level of CLI output.
    pub verbosity: Verbosity,
    /// How candidate branch names are matched against the remote branch
    /// list when cutting a new release branch.
    pub match_policy: MatchPolicy,
}

impl Config {
    #[must_use]
    pub fn is_quiet(&self) -> bool {
        self.verbosity == Verbosity::Quiet
    }

    #[must_use]
    pub fn is_verbose(&self) -> bool {
        self.verbosity == Verbosity::Verbose
    }
}

/// Verbosity level for CLI output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
}

/// Collision-matching policy for new branch names.
///
/// `Substring` refuses a candidate when any remote branch merely contains
/// it, so pre-existing derived names such as `release-branch-1.2-built`
/// also block `release-branch-1.2`. `Exact` refuses only an identical name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum MatchPolicy {
    #[default]
    Substring,
    Exact,
}

impl MatchPolicy {
    /// Returns true when `existing` blocks the creation of `candidate`.
    #[must_use]
    pub fn collides(self, existing: &str, candidate: &str) -> bool {
        match self {
            MatchPolicy::Substring => existing.contains(candidate),
            MatchPolicy::Exact => existing == candidate,
        }
    }
}

impl fmt::Display for MatchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchPolicy::Substring => write!(f, "substring"),
            MatchPolicy::Exact => write!(f, "exact"),
        }
    }
}
