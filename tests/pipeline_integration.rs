//! End-to-end run of the sweep pipeline against a real repository with a
//! file-based remote.

use std::fs;
use std::path::Path;
use std::process::Command;
use sweep::cli::run_pipeline;
use sweep::core::enumerate::KeepPatterns;
use sweep::{BranchScope, Config, GitRepository, ShellGit, VersionControl};
use tempfile::TempDir;

fn git(repo_path: &Path, args: &[&str], date: Option<&str>) {
    let mut cmd = Command::new("git");
    cmd.current_dir(repo_path).args(args);
    if let Some(date) = date {
        cmd.env("GIT_AUTHOR_DATE", date).env("GIT_COMMITTER_DATE", date);
    }
    let output = cmd.output().expect("Failed to run git");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
}

fn commit_file(repo_path: &Path, file: &str, date: &str) {
    fs::write(repo_path.join(file), file).expect("Failed to write file");
    git(repo_path, &["add", file], None);
    git(repo_path, &["commit", "-m", &format!("add {}", file)], Some(date));
}

/// Work repo on `main` plus a bare `origin`:
/// - `stale-merged`: merged, 60 days older than trunk, local and on origin
/// - `keep-me`: same merge/age state, protected by pattern
/// - `fresh-merged`: merged but at the trunk tip (age 0)
/// - `unmerged`: old but carries its own commit
fn setup_repos() -> (TempDir, TempDir, GitRepository) {
    let work_dir = TempDir::new().expect("Failed to create work dir");
    let origin_dir = TempDir::new().expect("Failed to create origin dir");
    let work = work_dir.path();

    git(origin_dir.path(), &["init", "--bare", "--initial-branch=main"], None);

    git(work, &["init", "--initial-branch=main"], None);
    git(work, &["config", "user.name", "Test User"], None);
    git(work, &["config", "user.email", "test@example.com"], None);

    commit_file(work, "base.txt", "2024-01-01 12:00:00 +0000");
    git(work, &["branch", "stale-merged"], None);
    git(work, &["branch", "keep-me"], None);

    git(work, &["checkout", "-q", "-b", "unmerged"], None);
    commit_file(work, "wip.txt", "2024-01-02 12:00:00 +0000");
    git(work, &["checkout", "-q", "main"], None);

    commit_file(work, "trunk.txt", "2024-03-01 12:00:00 +0000");
    git(work, &["branch", "fresh-merged"], None);

    let origin_path = origin_dir.path().to_str().expect("utf-8 path").to_string();
    git(work, &["remote", "add", "origin", &origin_path], None);
    git(
        work,
        &["push", "-q", "origin", "main", "stale-merged", "keep-me", "fresh-merged"],
        None,
    );

    let repo = GitRepository::discover_from(work).expect("Failed to discover repo");
    (work_dir, origin_dir, repo)
}

fn config(dry_run: bool, delete: bool) -> Config {
    Config::new(
        "main".to_string(),
        30,
        vec!["^keep-me$".to_string()],
        BranchScope::Both,
        dry_run,
        delete,
        0,
    )
    .unwrap()
}

fn remote_has_branch(origin: &Path, name: &str) -> bool {
    let output = Command::new("git")
        .current_dir(origin)
        .args(["show-ref", "--verify", "--quiet", &format!("refs/heads/{}", name)])
        .status()
        .expect("Failed to run git");
    output.success()
}

#[test]
fn execute_deletes_stale_branches_locally_and_on_the_remote() {
    let (_work_dir, origin_dir, repo) = setup_repos();
    let vcs = ShellGit::new(repo);
    let cfg = config(false, true);
    let keep = KeepPatterns::compile(&cfg.keep_patterns).unwrap();

    run_pipeline(&vcs, &cfg, &keep).expect("pipeline should succeed");

    assert!(!vcs.ref_exists("refs/heads/stale-merged").unwrap());
    assert!(!remote_has_branch(origin_dir.path(), "stale-merged"));

    // Protected, fresh, and unmerged branches survive on both sides.
    assert!(vcs.ref_exists("refs/heads/keep-me").unwrap());
    assert!(vcs.ref_exists("refs/heads/fresh-merged").unwrap());
    assert!(vcs.ref_exists("refs/heads/unmerged").unwrap());
    assert!(remote_has_branch(origin_dir.path(), "keep-me"));
    assert!(remote_has_branch(origin_dir.path(), "fresh-merged"));
    assert!(remote_has_branch(origin_dir.path(), "main"));
}

#[test]
fn dry_run_touches_nothing() {
    let (_work_dir, origin_dir, repo) = setup_repos();
    let vcs = ShellGit::new(repo);
    let cfg = config(true, false);
    let keep = KeepPatterns::compile(&cfg.keep_patterns).unwrap();

    run_pipeline(&vcs, &cfg, &keep).expect("pipeline should succeed");

    assert!(vcs.ref_exists("refs/heads/stale-merged").unwrap());
    assert!(remote_has_branch(origin_dir.path(), "stale-merged"));
}

#[test]
fn unknown_trunk_fails_before_any_work() {
    let (_work_dir, _origin_dir, repo) = setup_repos();
    let vcs = ShellGit::new(repo);
    let cfg = Config::new(
        "no-such-trunk".to_string(),
        30,
        vec![],
        BranchScope::Both,
        false,
        false,
        0,
    )
    .unwrap();
    let keep = KeepPatterns::compile(&cfg.keep_patterns).unwrap();

    let err = run_pipeline(&vcs, &cfg, &keep).unwrap_err();
    assert!(err.to_string().contains("no-such-trunk"));
}
