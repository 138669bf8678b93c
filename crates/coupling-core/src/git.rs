//! Thin wrappers over the git CLI for building change sets.

use crate::changeset::{normalize_path, ChangeSet};
use crate::error::{CouplingError, Result};
use std::collections::BTreeSet;
use std::path::Path;
use std::process::Command;

pub const DEFAULT_BASE: &str = "origin/main";

/// Where the change set comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeSource {
    /// Files staged in the index (pre-commit).
    Staged,
    /// Files changed on `HEAD` since it diverged from `base` (CI).
    Base(String),
}

impl Default for ChangeSource {
    fn default() -> Self {
        ChangeSource::Base(DEFAULT_BASE.to_string())
    }
}

/// Collect the change set for `source` from the repository at `root`.
///
/// Renames are listed as a deletion of the old path plus an addition of the
/// new one, so moving a coupled source out of its glob still counts.
pub fn changed_files(root: &Path, source: &ChangeSource) -> Result<ChangeSet> {
    let output = match source {
        ChangeSource::Staged => run_git(
            root,
            &["diff", "--cached", "--name-only", "--no-renames", "-z"],
        )?,
        ChangeSource::Base(base) => {
            let range = format!("{base}...HEAD");
            run_git(root, &["diff", "--name-only", "--no-renames", "-z", &range])?
        }
    };
    let set: ChangeSet = split_nul(&output).collect();
    tracing::debug!(?source, files = set.len(), "collected change set");
    Ok(set)
}

/// Every file tracked by git under `root`.
pub fn tracked_files(root: &Path) -> Result<BTreeSet<String>> {
    let output = run_git(root, &["ls-files", "-z"])?;
    Ok(split_nul(&output).filter_map(normalize_path).collect())
}

fn split_nul(output: &str) -> impl Iterator<Item = &str> {
    output.split('\0').filter(|s| !s.is_empty())
}

fn run_git(root: &Path, args: &[&str]) -> Result<String> {
    let git = which::which("git").map_err(|_| CouplingError::GitNotFound)?;
    tracing::debug!(?args, root = %root.display(), "running git");
    let output = Command::new(git).args(args).current_dir(root).output()?;
    if !output.status.success() {
        return Err(CouplingError::Git {
            command: args.first().copied().unwrap_or_default().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
