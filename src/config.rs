use crate::utils::{Result, SweepError};

pub const DEFAULT_TRUNK_BRANCH: &str = "master";
pub const DEFAULT_AGE_CUTOFF_DAYS: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchScope {
    Local,
    Remote,
    Both,
}

impl BranchScope {
    pub fn includes_local(self) -> bool {
        matches!(self, BranchScope::Local | BranchScope::Both)
    }

    pub fn includes_remote(self) -> bool {
        matches!(self, BranchScope::Remote | BranchScope::Both)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// List stale branches, construct nothing.
    Report,
    /// Print the exact delete commands without running them.
    DryRun,
    /// Run the delete commands.
    Execute,
}

/// Immutable per-run configuration. Constructed once, validated up front,
/// passed by reference into each pipeline stage. No component mutates it.
#[derive(Debug, Clone)]
pub struct Config {
    pub trunk_branch: String,
    pub age_cutoff_days: i64,
    pub keep_patterns: Vec<String>,
    pub scope: BranchScope,
    pub mode: Mode,
    pub verbosity: u8,
}

impl Config {
    pub fn new(
        trunk_branch: String,
        age_cutoff_days: i64,
        keep_patterns: Vec<String>,
        scope: BranchScope,
        dry_run: bool,
        delete: bool,
        verbosity: u8,
    ) -> Result<Self> {
        if age_cutoff_days < 1 {
            return Err(SweepError::config_error(format!(
                "age cutoff must be at least 1 day, got {}",
                age_cutoff_days
            )));
        }

        let mode = match (dry_run, delete) {
            (true, true) => {
                return Err(SweepError::config_error(
                    "--dry-run and --delete cannot be combined",
                ))
            }
            (true, false) => Mode::DryRun,
            (false, true) => Mode::Execute,
            (false, false) => Mode::Report,
        };

        Ok(Self {
            trunk_branch,
            age_cutoff_days,
            keep_patterns,
            scope,
            mode,
            verbosity,
        })
    }
}
