use coupling_core::paths;
use std::path::{Path, PathBuf};

/// Resolve the project root.
///
/// Priority:
/// 1. `--root` flag / `DOC_COUPLING_ROOT` env var (passed in as `explicit`)
/// 2. Walk upward from `cwd` looking for `meta-process.yaml`
/// 3. Walk upward from `cwd` looking for `.git`
/// 4. Fall back to `cwd`
pub fn resolve_root(explicit: Option<&Path>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    find_upward(&cwd, paths::SETTINGS_FILE)
        .or_else(|| find_upward(&cwd, paths::GIT_DIR))
        .unwrap_or(cwd)
}

/// Anchor a `--config` path given on the command line to the working
/// directory, so it means the same thing from any subdirectory.
pub fn resolve_config_flag(config: &Path) -> PathBuf {
    if config.is_absolute() {
        return config.to_path_buf();
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(config),
        Err(_) => config.to_path_buf(),
    }
}

/// Nearest ancestor of `start` (inclusive) that contains `marker`.
fn find_upward(start: &Path, marker: &str) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(marker).exists())
        .map(Path::to_path_buf)
}
