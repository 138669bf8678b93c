use crate::changeset::normalize_path;
use crate::error::{CouplingError, Result};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Strength
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strength {
    /// A mismatch always blocks.
    #[default]
    Hard,
    /// A mismatch blocks only in strict mode; otherwise it is advisory.
    Soft,
}

impl Strength {
    pub fn as_str(self) -> &'static str {
        match self {
            Strength::Hard => "hard",
            Strength::Soft => "soft",
        }
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Strength {
    type Err = CouplingError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "hard" => Ok(Strength::Hard),
            "soft" => Ok(Strength::Soft),
            _ => Err(CouplingError::InvalidStrength(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// RawRule (as written in the config file)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawRule {
    pub sources: Vec<String>,
    pub docs: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub strength: Strength,
}

// ---------------------------------------------------------------------------
// CouplingRule
// ---------------------------------------------------------------------------

/// A validated coupling between source globs and the docs that must change
/// alongside them. Immutable once compiled.
#[derive(Debug, Clone, Serialize)]
pub struct CouplingRule {
    pub name: String,
    pub sources: Vec<String>,
    pub docs: Vec<String>,
    pub description: String,
    pub strength: Strength,
    #[serde(skip_serializing)]
    matcher: GlobSet,
}

impl CouplingRule {
    /// Validate a raw rule and compile its source globs.
    ///
    /// Doc paths are stored normalised, the same way change sets are.
    /// `*` does not cross `/`; `**` spans any number of directories.
    /// Matching is case-sensitive.
    pub fn compile(name: impl Into<String>, raw: RawRule) -> Result<Self> {
        let name = name.into();
        if raw.sources.is_empty() {
            return Err(CouplingError::InvalidRule {
                rule: name,
                reason: "'sources' must list at least one glob".to_string(),
            });
        }
        if raw.docs.is_empty() {
            return Err(CouplingError::InvalidRule {
                rule: name,
                reason: "'docs' must list at least one file".to_string(),
            });
        }
        let mut docs = Vec::with_capacity(raw.docs.len());
        for doc in &raw.docs {
            match normalize_path(doc) {
                Some(p) if p != "." && !p.ends_with('/') => docs.push(p),
                _ => {
                    return Err(CouplingError::InvalidRule {
                        rule: name,
                        reason: format!("'docs' entry {doc:?} does not name a file"),
                    });
                }
            }
        }

        let mut builder = GlobSetBuilder::new();
        for pattern in &raw.sources {
            if pattern.trim().is_empty() {
                return Err(CouplingError::InvalidRule {
                    rule: name,
                    reason: "'sources' contains an empty pattern".to_string(),
                });
            }
            let glob = GlobBuilder::new(pattern)
                .literal_separator(true)
                .build()
                .map_err(|source| CouplingError::InvalidGlob {
                    rule: name.clone(),
                    pattern: pattern.clone(),
                    source,
                })?;
            builder.add(glob);
        }
        let matcher = builder
            .build()
            .map_err(|source| CouplingError::InvalidGlob {
                rule: name.clone(),
                pattern: raw.sources.join(", "),
                source,
            })?;

        Ok(Self {
            name,
            sources: raw.sources,
            docs,
            description: raw.description,
            strength: raw.strength,
            matcher,
        })
    }

    /// True if `path` (root-relative, `/`-separated) matches any source glob.
    pub fn matches(&self, path: &str) -> bool {
        self.matcher.is_match(path)
    }

    pub fn is_soft(&self) -> bool {
        self.strength == Strength::Soft
    }

    /// Human label: the description when present, else the rule name.
    pub fn label(&self) -> &str {
        if self.description.is_empty() {
            &self.name
        } else {
            &self.description
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
