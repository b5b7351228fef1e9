/// Where a branch lives. Remote branches are always reported as
/// `<remote>/<branch>`; local branches are just `<branch>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locality {
    Local,
    Remote,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchRef {
    pub full_name: String,
    pub locality: Locality,
}

impl BranchRef {
    pub fn local(name: impl Into<String>) -> Self {
        Self {
            full_name: name.into(),
            locality: Locality::Local,
        }
    }

    pub fn remote(full_name: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            locality: Locality::Remote,
        }
    }

    /// Remote name and short branch name, split at the FIRST `/`.
    /// Remote names never contain `/`, branch names may, so splitting once
    /// from the left is correct (`origin/feature/x` -> `origin`, `feature/x`).
    pub fn split_remote(&self) -> Option<(&str, &str)> {
        match self.locality {
            Locality::Local => None,
            Locality::Remote => self.full_name.split_once('/'),
        }
    }

    pub fn remote_name(&self) -> Option<&str> {
        self.split_remote().map(|(remote, _)| remote)
    }

    pub fn short_name(&self) -> &str {
        self.split_remote()
            .map(|(_, short)| short)
            .unwrap_or(&self.full_name)
    }
}

/// Commit counts unique to each side of a branch/trunk comparison.
/// Computed fresh per branch; never cached across branches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AheadBehind {
    pub ahead: u32,
    pub behind: u32,
}

/// Working set for a single run: stale branches partitioned by locality,
/// in enumeration order. Built by the classifier, consumed by the planner.
#[derive(Debug, Default, Clone)]
pub struct StaleBranchSet {
    pub local: Vec<BranchRef>,
    pub remote: Vec<BranchRef>,
}

impl StaleBranchSet {
    pub fn push(&mut self, branch: BranchRef) {
        match branch.locality {
            Locality::Local => self.local.push(branch),
            Locality::Remote => self.remote.push(branch),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.local.is_empty() && self.remote.is_empty()
    }

    pub fn len(&self) -> usize {
        self.local.len() + self.remote.len()
    }
}
