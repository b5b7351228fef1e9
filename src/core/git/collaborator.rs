use super::repository::{execute_git_command, execute_git_command_with_status, GitRepository};
use crate::core::branch::AheadBehind;
use crate::core::plan::PlannedAction;
use crate::utils::{Result, SweepError};
use chrono::{DateTime, FixedOffset};

/// A local branch as reported by the listing call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalBranch {
    pub name: String,
    /// Checked out here or in a linked worktree. Never a deletion candidate.
    pub is_current: bool,
}

/// Narrow seam to the version-control system. The production implementation
/// shells out to the `git` binary; tests substitute canned responses so the
/// pipeline runs without a repository present.
///
/// All raw-line parsing happens behind this trait. Callers only ever see
/// typed values.
pub trait VersionControl {
    /// Validates a ref name before any other work begins.
    fn ref_exists(&self, name: &str) -> Result<bool>;

    fn list_local_branches(&self) -> Result<Vec<LocalBranch>>;

    /// Full `<remote>/<branch>` names. Symbolic-reference entries such as
    /// `origin/HEAD -> origin/main` are not branches and never surface.
    fn list_remote_branches(&self) -> Result<Vec<String>>;

    fn last_commit_time(&self, ref_name: &str) -> Result<DateTime<FixedOffset>>;

    /// Commits unique to `branch` (ahead) and unique to `trunk` (behind).
    fn ahead_behind(&self, branch: &str, trunk: &str) -> Result<AheadBehind>;

    fn run_delete(&self, action: &PlannedAction) -> Result<()>;
}

/// Production collaborator: one child process per query.
pub struct ShellGit {
    repo: GitRepository,
}

impl ShellGit {
    pub fn new(repo: GitRepository) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &GitRepository {
        &self.repo
    }
}

impl VersionControl for ShellGit {
    fn ref_exists(&self, name: &str) -> Result<bool> {
        let result = execute_git_command(&self.repo, &["rev-parse", "--verify", "--quiet", name]);
        Ok(result.is_ok())
    }

    fn list_local_branches(&self) -> Result<Vec<LocalBranch>> {
        let output = execute_git_command(&self.repo, &["branch"])?;

        let mut branches = Vec::new();
        for line in output.lines() {
            if let Some(branch) = parse_local_branch_line(line) {
                branches.push(branch);
            }
        }

        Ok(branches)
    }

    fn list_remote_branches(&self) -> Result<Vec<String>> {
        let output = execute_git_command(&self.repo, &["branch", "-r"])?;

        let mut branches = Vec::new();
        for line in output.lines() {
            if let Some(name) = parse_remote_branch_line(line) {
                branches.push(name);
            }
        }

        Ok(branches)
    }

    fn last_commit_time(&self, ref_name: &str) -> Result<DateTime<FixedOffset>> {
        let output =
            execute_git_command(&self.repo, &["log", "-1", "--format=%ci", ref_name, "--"])?;
        parse_commit_time(ref_name, &output)
    }

    fn ahead_behind(&self, branch: &str, trunk: &str) -> Result<AheadBehind> {
        let range = format!("{}...{}", branch, trunk);
        let output = execute_git_command(
            &self.repo,
            &["rev-list", "--left-right", "--count", &range],
        )?;
        parse_ahead_behind(&range, &output)
    }

    fn run_delete(&self, action: &PlannedAction) -> Result<()> {
        let args = action.git_args();
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        execute_git_command_with_status(&self.repo, &args)
    }
}

/// Parses one line of plain `git branch` output. The current branch carries
/// a `*` marker, branches checked out in linked worktrees a `+` marker, and
/// a detached HEAD renders as `(HEAD detached at ...)` which is not a branch.
pub fn parse_local_branch_line(line: &str) -> Option<LocalBranch> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('(') {
        return None;
    }

    let (is_current, rest) = match trimmed.strip_prefix('*').or_else(|| trimmed.strip_prefix('+')) {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };

    let name = rest.split_whitespace().next()?;

    Some(LocalBranch {
        name: name.to_string(),
        is_current,
    })
}

/// Parses one line of `git branch -r` output. Entries containing `->` are
/// symbolic references (e.g. `origin/HEAD -> origin/main`), not branches.
pub fn parse_remote_branch_line(line: &str) -> Option<String> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.contains("->") {
        return None;
    }

    trimmed.split_whitespace().next().map(str::to_string)
}

/// Parses `git rev-list --left-right --count` output: exactly two integer
/// fields, left = commits unique to the branch, right = unique to trunk.
pub fn parse_ahead_behind(range: &str, output: &str) -> Result<AheadBehind> {
    let fields: Vec<&str> = output.split_whitespace().collect();
    if fields.len() != 2 {
        return Err(SweepError::unexpected_output(
            format!("rev-list --count {}", range),
            output,
        ));
    }

    let parse = |field: &str| -> Result<u32> {
        field.parse().map_err(|_| {
            SweepError::unexpected_output(format!("rev-list --count {}", range), output)
        })
    };

    Ok(AheadBehind {
        ahead: parse(fields[0])?,
        behind: parse(fields[1])?,
    })
}

/// Parses a `%ci` timestamp (`2024-01-15 10:30:00 +0100`).
pub fn parse_commit_time(ref_name: &str, output: &str) -> Result<DateTime<FixedOffset>> {
    DateTime::parse_from_str(output.trim(), "%Y-%m-%d %H:%M:%S %z").map_err(|_| {
        SweepError::unexpected_output(format!("commit time of '{}'", ref_name), output)
    })
}
