pub mod cli;
pub mod config;
pub mod core;
pub mod utils;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use crate::config::{BranchScope, Config, Mode};
pub use crate::core::git::{GitRepository, ShellGit, VersionControl};
pub use crate::utils::{Result, SweepError};
