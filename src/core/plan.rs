use crate::config::{Config, Mode};
use crate::core::branch::{BranchRef, StaleBranchSet};
use crate::core::git::VersionControl;
use crate::utils::Result;

/// One delete operation. Local and remote deletion are distinct git
/// operations with distinct argument shapes and are never mixed in one
/// command: local deletion takes full branch names, remote deletion takes
/// short names addressed to a single remote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannedAction {
    DeleteLocal { names: Vec<String> },
    DeleteRemote { remote: String, names: Vec<String> },
}

impl PlannedAction {
    pub fn delete_local(branches: &[BranchRef]) -> Self {
        Self::DeleteLocal {
            names: branches.iter().map(|b| b.full_name.clone()).collect(),
        }
    }

    pub fn delete_remote(remote: &str, branches: &[BranchRef]) -> Self {
        Self::DeleteRemote {
            remote: remote.to_string(),
            names: branches.iter().map(|b| b.short_name().to_string()).collect(),
        }
    }

    /// Single source of the argument list. Dry-run printing and execution
    /// both go through here, so they cannot drift apart.
    pub fn git_args(&self) -> Vec<String> {
        match self {
            Self::DeleteLocal { names } => {
                let mut args = vec!["branch".to_string(), "-d".to_string()];
                args.extend(names.iter().cloned());
                args
            }
            Self::DeleteRemote { remote, names } => {
                let mut args = vec!["push".to_string(), remote.clone(), "--delete".to_string()];
                args.extend(names.iter().cloned());
                args
            }
        }
    }

    pub fn render(&self) -> String {
        format!("git {}", self.git_args().join(" "))
    }
}

/// Builds the delete actions for a stale set: one batch command for all
/// local branches, then one command per remote. The stable sort keeps each
/// remote's branches in enumeration order while making the groups
/// contiguous.
pub fn plan(stale: &StaleBranchSet) -> Vec<PlannedAction> {
    let mut actions = Vec::new();

    if !stale.local.is_empty() {
        actions.push(PlannedAction::delete_local(&stale.local));
    }

    let mut remote = stale.remote.clone();
    remote.sort_by(|a, b| a.remote_name().unwrap_or("").cmp(b.remote_name().unwrap_or("")));

    let mut start = 0;
    while start < remote.len() {
        let remote_name = remote[start].remote_name().unwrap_or("").to_string();
        let mut end = start + 1;
        while end < remote.len() && remote[end].remote_name().unwrap_or("") == remote_name {
            end += 1;
        }
        actions.push(PlannedAction::delete_remote(
            &remote_name,
            &remote[start..end],
        ));
        start = end;
    }

    actions
}

/// Mode dispatch over a stale set. An empty set is a successful no-op in
/// every mode; Execute stops at the first failing command.
pub fn run(vcs: &dyn VersionControl, stale: &StaleBranchSet, config: &Config) -> Result<()> {
    if stale.is_empty() {
        println!("No stale branches. Nothing to do.");
        return Ok(());
    }

    match config.mode {
        Mode::Report => {
            for branch in stale.local.iter().chain(stale.remote.iter()) {
                println!("{}", branch.full_name);
            }
        }
        Mode::DryRun => {
            for action in plan(stale) {
                println!("{}", action.render());
            }
        }
        Mode::Execute => {
            for action in plan(stale) {
                if config.verbosity >= 1 {
                    eprintln!("running: {}", action.render());
                }
                vcs.run_delete(&action)?;
            }
            println!("Deleted {} stale branch(es).", stale.len());
        }
    }

    Ok(())
}
