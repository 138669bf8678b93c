//! Relative-link checker for markdown documentation.
//!
//! Coupled docs are only useful if their cross-references resolve. This walks
//! every `*.md` file under a root and reports `[text](target)` links whose
//! target does not exist.

use crate::error::Result;
use crate::paths;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use std::path::{Component, Path, PathBuf};
use std::sync::OnceLock;
use walkdir::WalkDir;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrokenLink {
    /// Markdown file containing the link, relative to the scanned root.
    pub file: String,
    /// 1-based line number of the link.
    pub line: usize,
    pub text: String,
    pub target: String,
}

static LINK_RE: OnceLock<Regex> = OnceLock::new();
static FENCE_RE: OnceLock<Regex> = OnceLock::new();

fn link_re() -> &'static Regex {
    LINK_RE.get_or_init(|| Regex::new(r"\[([^\]]*)\]\(([^)]+)\)").expect("valid regex"))
}

fn fence_re() -> &'static Regex {
    FENCE_RE.get_or_init(|| Regex::new(r"(?s)```.*?```").expect("valid regex"))
}

const EXTERNAL_SCHEMES: &[&str] = &["http:", "https:", "mailto:"];

/// Scan every markdown file under `root` and return links that do not resolve.
///
/// Sorted by file, then line.
pub fn check_links(root: &Path) -> Result<Vec<BrokenLink>> {
    let root = root.canonicalize()?;
    let mut broken = Vec::new();

    let walker = WalkDir::new(&root).into_iter().filter_entry(|e| {
        !(e.file_type().is_dir()
            && e.depth() > 0
            && e.file_name()
                .to_str()
                .is_some_and(|n| paths::SKIPPED_DIRS.contains(&n)))
    });
    for entry in walker {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_file() || entry.path().extension().and_then(|e| e.to_str()) != Some("md") {
            continue;
        }
        let content = String::from_utf8_lossy(&std::fs::read(entry.path())?).into_owned();
        broken.extend(check_file(&root, entry.path(), &content));
    }

    broken.sort_by(|a, b| a.file.cmp(&b.file).then(a.line.cmp(&b.line)));
    tracing::debug!(root = %root.display(), broken = broken.len(), "checked markdown links");
    Ok(broken)
}

/// Check the links of one markdown file. `root` and `file` must be absolute.
fn check_file(root: &Path, file: &Path, content: &str) -> Vec<BrokenLink> {
    let fences: Vec<Range<usize>> = fence_re().find_iter(content).map(|m| m.range()).collect();
    let base = file.parent().unwrap_or(root);
    let mut broken = Vec::new();

    for caps in link_re().captures_iter(content) {
        let (Some(whole), Some(text), Some(target)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            continue;
        };
        let target = target.as_str().trim();
        if is_external(target) || target.starts_with('#') {
            continue;
        }
        if fences.iter().any(|r| r.contains(&whole.start())) {
            continue;
        }
        let path_part = target.split('#').next().unwrap_or_default();
        if path_part.is_empty() {
            continue;
        }

        let resolved = lexical_normalize(&base.join(path_part));
        // Links that leave the root can't be validated from here.
        if !resolved.starts_with(root) {
            continue;
        }
        if !resolved.exists() {
            broken.push(BrokenLink {
                file: paths::display_relative(root, file),
                line: content[..whole.start()].matches('\n').count() + 1,
                text: text.as_str().to_string(),
                target: target.to_string(),
            });
        }
    }
    broken
}

fn is_external(target: &str) -> bool {
    let lower = target.to_ascii_lowercase();
    EXTERNAL_SCHEMES.iter().any(|s| lower.starts_with(s))
}

/// Resolve `.` and `..` without touching the filesystem.
fn lexical_normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
