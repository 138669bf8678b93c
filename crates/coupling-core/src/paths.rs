use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// File constants
// ---------------------------------------------------------------------------

pub const SETTINGS_FILE: &str = "meta-process.yaml";
pub const DEFAULT_CONFIG_FILE: &str = "scripts/doc_coupling.yaml";
pub const GIT_DIR: &str = ".git";

/// Directories never descended into when scanning the working tree.
pub const SKIPPED_DIRS: &[&str] = &[".git", "target", "node_modules"];

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn settings_path(root: &Path) -> PathBuf {
    root.join(SETTINGS_FILE)
}

/// Resolve a configured path against the project root. Absolute paths are kept.
pub fn resolve(root: &Path, configured: &Path) -> PathBuf {
    if configured.is_absolute() {
        configured.to_path_buf()
    } else {
        root.join(configured)
    }
}

/// Render a path relative to `root` with forward slashes.
pub fn display_relative(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.to_string_lossy().replace('\\', "/")
}
