use crate::config::BranchScope;
use crate::core::branch::BranchRef;
use crate::core::git::VersionControl;
use crate::utils::{Result, SweepError};
use regex::Regex;

/// Keep patterns, compiled before any collaborator call is issued so a
/// malformed pattern fails fast without side effects.
#[derive(Debug)]
pub struct KeepPatterns {
    patterns: Vec<Regex>,
}

impl KeepPatterns {
    pub fn compile(raw: &[String]) -> Result<Self> {
        let mut patterns = Vec::with_capacity(raw.len());
        for pattern in raw {
            let compiled = Regex::new(pattern)
                .map_err(|e| SweepError::keep_pattern(pattern.clone(), e))?;
            patterns.push(compiled);
        }
        Ok(Self { patterns })
    }

    pub fn matches(&self, branch_name: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(branch_name))
    }
}

/// Collects deletion candidates in the collaborator's order. Drops the
/// checked-out branch, the trunk itself (local or on any remote), and every
/// branch matching a keep pattern. For remote branches keep-matching applies
/// to the branch portion after the remote prefix, not `remote/branch`.
pub fn enumerate(
    vcs: &dyn VersionControl,
    scope: BranchScope,
    trunk_branch: &str,
    keep: &KeepPatterns,
) -> Result<Vec<BranchRef>> {
    let mut candidates = Vec::new();

    if scope.includes_local() {
        for branch in vcs.list_local_branches()? {
            if branch.is_current || branch.name == trunk_branch || keep.matches(&branch.name) {
                continue;
            }
            candidates.push(BranchRef::local(branch.name));
        }
    }

    if scope.includes_remote() {
        for full_name in vcs.list_remote_branches()? {
            let branch = BranchRef::remote(full_name);
            let short = branch.short_name();
            if short == trunk_branch || keep.matches(short) {
                continue;
            }
            candidates.push(branch);
        }
    }

    Ok(candidates)
}
