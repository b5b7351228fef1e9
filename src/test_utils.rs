use crate::core::branch::AheadBehind;
use crate::core::git::collaborator::{parse_commit_time, LocalBranch, VersionControl};
use crate::core::git::GitRepository;
use crate::core::plan::PlannedAction;
use crate::utils::{Result, SweepError};
use chrono::{DateTime, FixedOffset};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::process::Command;
use tempfile::TempDir;

const INITIAL_COMMIT_DATE: &str = "2024-01-01 12:00:00 +0000";

fn git(repo_path: &std::path::Path, args: &[&str], date: Option<&str>) {
    let mut cmd = Command::new("git");
    cmd.current_dir(repo_path).args(args);
    if let Some(date) = date {
        cmd.env("GIT_AUTHOR_DATE", date).env("GIT_COMMITTER_DATE", date);
    }
    let status = cmd.status().expect("Failed to run git");
    assert!(status.success(), "git {:?} failed", args);
}

/// Throwaway repository on branch `main` with one commit dated
/// 2024-01-01, discovered as a `GitRepository`.
pub fn setup_test_repo() -> (TempDir, GitRepository) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let repo_path = temp_dir.path();

    git(repo_path, &["init", "--initial-branch=main"], None);
    git(repo_path, &["config", "user.name", "Test User"], None);
    git(repo_path, &["config", "user.email", "test@example.com"], None);

    fs::write(repo_path.join("README.md"), "# Test Repository").expect("Failed to write README");
    git(repo_path, &["add", "README.md"], None);
    git(
        repo_path,
        &["commit", "-m", "Initial commit"],
        Some(INITIAL_COMMIT_DATE),
    );

    let repo = GitRepository::discover_from(repo_path).expect("Failed to discover repo");
    (temp_dir, repo)
}

/// Creates a branch at `base` without switching to it.
pub fn create_branch_at(repo: &GitRepository, name: &str, base: &str) {
    git(&repo.root, &["branch", name, base], None);
}

/// Checks out `branch` and commits a new file with a fixed commit date.
/// The branch stays checked out.
pub fn commit_file_at(repo: &GitRepository, branch: &str, file: &str, date: &str) {
    git(&repo.root, &["checkout", "-q", branch], None);
    fs::write(repo.root.join(file), file).expect("Failed to write file");
    git(&repo.root, &["add", file], None);
    git(
        &repo.root,
        &["commit", "-m", &format!("add {}", file)],
        Some(date),
    );
}

/// Canned-response collaborator. Queries answer from fixed tables; any ref
/// without an entry fails the way a missing ref would. Delete actions are
/// recorded rather than executed.
#[derive(Default)]
pub struct MockGit {
    local_branches: Vec<LocalBranch>,
    remote_branches: Vec<String>,
    commit_times: HashMap<String, DateTime<FixedOffset>>,
    ahead_behind: HashMap<String, AheadBehind>,
    fail_listings: bool,
    fail_deletes: bool,
    deletes: RefCell<Vec<PlannedAction>>,
}

impl MockGit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_current_branch(mut self, name: &str) -> Self {
        self.local_branches.push(LocalBranch {
            name: name.to_string(),
            is_current: true,
        });
        self
    }

    pub fn with_local_branch(mut self, name: &str) -> Self {
        self.local_branches.push(LocalBranch {
            name: name.to_string(),
            is_current: false,
        });
        self
    }

    pub fn with_remote_branch(mut self, full_name: &str) -> Self {
        self.remote_branches.push(full_name.to_string());
        self
    }

    /// Registers a `%ci`-formatted commit time for a ref.
    pub fn with_commit_time(mut self, ref_name: &str, time: &str) -> Self {
        let parsed = parse_commit_time(ref_name, time).expect("invalid test timestamp");
        self.commit_times.insert(ref_name.to_string(), parsed);
        self
    }

    pub fn with_ahead_behind(mut self, branch: &str, ahead: u32, behind: u32) -> Self {
        self.ahead_behind
            .insert(branch.to_string(), AheadBehind { ahead, behind });
        self
    }

    pub fn with_failing_listings(mut self) -> Self {
        self.fail_listings = true;
        self
    }

    pub fn with_failing_deletes(mut self) -> Self {
        self.fail_deletes = true;
        self
    }

    pub fn recorded_deletes(&self) -> Vec<PlannedAction> {
        self.deletes.borrow().clone()
    }

    fn known_ref(&self, name: &str) -> bool {
        self.commit_times.contains_key(name)
            || self.local_branches.iter().any(|b| b.name == name)
            || self.remote_branches.iter().any(|b| b == name)
    }
}

impl VersionControl for MockGit {
    fn ref_exists(&self, name: &str) -> Result<bool> {
        Ok(self.known_ref(name))
    }

    fn list_local_branches(&self) -> Result<Vec<LocalBranch>> {
        if self.fail_listings {
            return Err(SweepError::git_operation("branch listing failed"));
        }
        Ok(self.local_branches.clone())
    }

    fn list_remote_branches(&self) -> Result<Vec<String>> {
        if self.fail_listings {
            return Err(SweepError::git_operation("remote branch listing failed"));
        }
        Ok(self.remote_branches.clone())
    }

    fn last_commit_time(&self, ref_name: &str) -> Result<DateTime<FixedOffset>> {
        self.commit_times.get(ref_name).copied().ok_or_else(|| {
            SweepError::git_operation(format!("no commit time for '{}'", ref_name))
        })
    }

    fn ahead_behind(&self, branch: &str, _trunk: &str) -> Result<AheadBehind> {
        self.ahead_behind.get(branch).copied().ok_or_else(|| {
            SweepError::git_operation(format!("no ahead/behind counts for '{}'", branch))
        })
    }

    fn run_delete(&self, action: &PlannedAction) -> Result<()> {
        self.deletes.borrow_mut().push(action.clone());
        if self.fail_deletes {
            return Err(SweepError::git_operation(format!(
                "delete failed: {}",
                action.render()
            )));
        }
        Ok(())
    }
}
