pub mod collaborator;
pub mod repository;

pub use collaborator::{LocalBranch, ShellGit, VersionControl};
pub use repository::GitRepository;
