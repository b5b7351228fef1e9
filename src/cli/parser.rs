use crate::config::{BranchScope, Config, DEFAULT_AGE_CUTOFF_DAYS, DEFAULT_TRUNK_BRANCH};
use crate::utils::Result;
use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "sweep")]
#[command(about = "Delete branches merged into trunk and untouched past a cutoff")]
#[command(
    version,
    long_about = "Finds branches that are fully merged into the trunk branch and older \
than the age cutoff. Without --dry-run or --delete it only lists them."
)]
pub struct Cli {
    /// Trunk branch that candidates are measured against
    #[arg(long, default_value = DEFAULT_TRUNK_BRANCH, value_name = "BRANCH")]
    pub trunk: String,

    /// Minimum age in whole days before a merged branch counts as stale
    #[arg(long, default_value_t = DEFAULT_AGE_CUTOFF_DAYS, value_name = "DAYS")]
    pub age: i64,

    /// Never touch branches matching this regex (repeatable)
    #[arg(short = 'k', long = "keep", value_name = "REGEX")]
    pub keep: Vec<String>,

    /// Which branches to consider
    #[arg(long, value_enum, default_value_t = ScopeArg::Both)]
    pub scope: ScopeArg,

    /// Print the delete commands without running them
    #[arg(long)]
    pub dry_run: bool,

    /// Run the delete commands
    #[arg(long)]
    pub delete: bool,

    /// Explain classification decisions (-v stale only, -vv everything)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeArg {
    Local,
    Remote,
    Both,
}

impl From<ScopeArg> for BranchScope {
    fn from(scope: ScopeArg) -> Self {
        match scope {
            ScopeArg::Local => BranchScope::Local,
            ScopeArg::Remote => BranchScope::Remote,
            ScopeArg::Both => BranchScope::Both,
        }
    }
}

impl Cli {
    pub fn into_config(self) -> Result<Config> {
        Config::new(
            self.trunk,
            self.age,
            self.keep,
            self.scope.into(),
            self.dry_run,
            self.delete,
            self.verbose,
        )
    }
}
