use crate::config::Config;
use crate::core::branch::{BranchRef, StaleBranchSet};
use crate::core::git::VersionControl;
use crate::utils::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Staleness {
    Stale,
    NotStale,
}

/// Decides staleness for one branch. Checks run in cost order and
/// short-circuit: the timestamp lookups are skipped once the ahead count
/// already rules a branch out.
///
/// Age is measured against trunk's last-commit time rather than the wall
/// clock, so every branch in a run is judged against the same reference
/// point and reruns over an unchanged repository agree.
pub fn classify(
    vcs: &dyn VersionControl,
    branch: &BranchRef,
    config: &Config,
) -> Result<Staleness> {
    let counts = vcs.ahead_behind(&branch.full_name, &config.trunk_branch)?;
    if counts.ahead > 0 {
        if config.verbosity >= 2 {
            eprintln!(
                "skipping {}: {} unmerged commit(s)",
                branch.full_name, counts.ahead
            );
        }
        return Ok(Staleness::NotStale);
    }

    let trunk_time = vcs.last_commit_time(&config.trunk_branch)?;
    let branch_time = vcs.last_commit_time(&branch.full_name)?;
    let age_days = trunk_time.signed_duration_since(branch_time).num_days();

    if age_days < config.age_cutoff_days {
        if config.verbosity >= 2 {
            eprintln!(
                "skipping {}: merged but only {} day(s) old",
                branch.full_name, age_days
            );
        }
        return Ok(Staleness::NotStale);
    }

    if config.verbosity >= 1 {
        eprintln!(
            "stale: {} ({} day(s) old, {} commit(s) behind)",
            branch.full_name, age_days, counts.behind
        );
    }
    Ok(Staleness::Stale)
}

/// Runs the classifier over every candidate in enumeration order and
/// partitions the stale ones by locality.
pub fn classify_all(
    vcs: &dyn VersionControl,
    candidates: Vec<BranchRef>,
    config: &Config,
) -> Result<StaleBranchSet> {
    let mut stale = StaleBranchSet::default();
    for branch in candidates {
        if classify(vcs, &branch, config)? == Staleness::Stale {
            stale.push(branch);
        }
    }
    Ok(stale)
}
