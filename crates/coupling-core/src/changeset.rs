use serde::Serialize;
use std::collections::BTreeSet;

/// The set of root-relative paths modified in one unit of work.
///
/// Paths are normalised on insertion (forward slashes, no leading `./`) and
/// kept sorted, so iteration order is lexicographic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ChangeSet {
    paths: BTreeSet<String>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: &str) -> bool {
        match normalize_path(path) {
            Some(p) => self.paths.insert(p),
            None => false,
        }
    }

    pub fn contains(&self, path: &str) -> bool {
        match normalize_path(path) {
            Some(p) => self.paths.contains(&p),
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for ChangeSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = ChangeSet::new();
        for p in iter {
            set.insert(p.as_ref());
        }
        set
    }
}

/// Normalise a user- or git-supplied path. Returns `None` for blank input.
pub fn normalize_path(path: &str) -> Option<String> {
    let mut p = path.trim().replace('\\', "/");
    while let Some(rest) = p.strip_prefix("./") {
        p = rest.to_string();
    }
    if p.is_empty() {
        None
    } else {
        Some(p)
    }
}
