pub mod parser;

pub use parser::Cli;

use crate::config::Config;
use crate::core::classify::classify_all;
use crate::core::enumerate::{enumerate, KeepPatterns};
use crate::core::git::{GitRepository, ShellGit, VersionControl};
use crate::core::plan;
use crate::utils::{Result, SweepError};

pub fn execute_command(cli: Cli) -> Result<()> {
    let config = cli.into_config()?;
    // Compiled before the repository is even discovered: a bad pattern
    // must fail without side effects.
    let keep = KeepPatterns::compile(&config.keep_patterns)?;

    let repo = GitRepository::discover()?;
    let vcs = ShellGit::new(repo);

    run_pipeline(&vcs, &config, &keep)
}

/// Enumerate, classify, plan. Separated from `execute_command` so the whole
/// pipeline runs against any collaborator.
pub fn run_pipeline(
    vcs: &dyn VersionControl,
    config: &Config,
    keep: &KeepPatterns,
) -> Result<()> {
    if !vcs.ref_exists(&config.trunk_branch)? {
        return Err(SweepError::config_error(format!(
            "trunk branch '{}' does not exist",
            config.trunk_branch
        )));
    }

    let candidates = enumerate(vcs, config.scope, &config.trunk_branch, keep)?;
    let stale = classify_all(vcs, candidates, config)?;
    plan::run(vcs, &stale, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BranchScope;
    use crate::test_utils::MockGit;

    fn config(dry_run: bool, delete: bool) -> Config {
        Config::new(
            "master".to_string(),
            30,
            vec!["^keep-me$".to_string()],
            BranchScope::Both,
            dry_run,
            delete,
            0,
        )
        .unwrap()
    }

    fn populated_mock() -> MockGit {
        MockGit::new()
            .with_current_branch("master")
            .with_local_branch("keep-me")
            .with_local_branch("merged-old")
            .with_local_branch("merged-new")
            .with_local_branch("unmerged-old")
            .with_remote_branch("origin/merged-old")
            .with_commit_time("master", "2024-03-01 12:00:00 +0000")
            .with_commit_time("merged-old", "2024-01-01 12:00:00 +0000")
            .with_commit_time("merged-new", "2024-02-25 12:00:00 +0000")
            .with_commit_time("origin/merged-old", "2023-12-15 12:00:00 +0000")
            .with_ahead_behind("merged-old", 0, 10)
            .with_ahead_behind("merged-new", 0, 2)
            .with_ahead_behind("unmerged-old", 3, 10)
            .with_ahead_behind("origin/merged-old", 0, 12)
    }

    #[test]
    fn test_missing_trunk_is_a_config_error_before_enumeration() {
        let vcs = MockGit::new().with_failing_listings();
        let err = run_pipeline(&vcs, &config(false, false), &KeepPatterns::compile(&[]).unwrap())
            .unwrap_err();
        // The trunk check fires first; the failing listings are never reached.
        assert!(matches!(err, SweepError::Config { .. }));
    }

    #[test]
    fn test_pipeline_deletes_only_merged_old_unprotected_branches() {
        let vcs = populated_mock();
        let cfg = config(false, true);
        let keep = KeepPatterns::compile(&cfg.keep_patterns).unwrap();

        run_pipeline(&vcs, &cfg, &keep).unwrap();

        let recorded = vcs.recorded_deletes();
        assert_eq!(recorded.len(), 2);
        assert_eq!(recorded[0].git_args(), vec!["branch", "-d", "merged-old"]);
        assert_eq!(
            recorded[1].git_args(),
            vec!["push", "origin", "--delete", "merged-old"]
        );
    }

    #[test]
    fn test_pipeline_report_mode_never_deletes() {
        let vcs = populated_mock();
        let cfg = config(false, false);
        let keep = KeepPatterns::compile(&cfg.keep_patterns).unwrap();

        run_pipeline(&vcs, &cfg, &keep).unwrap();
        assert!(vcs.recorded_deletes().is_empty());
    }

    #[test]
    fn test_pipeline_with_nothing_stale_succeeds() {
        let vcs = MockGit::new()
            .with_current_branch("master")
            .with_commit_time("master", "2024-03-01 12:00:00 +0000");
        let cfg = config(false, true);
        let keep = KeepPatterns::compile(&cfg.keep_patterns).unwrap();

        run_pipeline(&vcs, &cfg, &keep).unwrap();
        assert!(vcs.recorded_deletes().is_empty());
    }
}
