use crate::error::{CouplingError, Result};
use crate::rule::{CouplingRule, RawRule};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::path::Path;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

/// A configuration finding reported by `validate`. Never blocks a check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub rule: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

impl WarnLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            WarnLevel::Warning => "warning",
            WarnLevel::Error => "error",
        }
    }
}

impl ConfigWarning {
    fn warning(rule: &CouplingRule, message: String) -> Self {
        Self {
            level: WarnLevel::Warning,
            rule: rule.name.clone(),
            message,
        }
    }
}

// ---------------------------------------------------------------------------
// File shape
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default)]
    couplings: Option<RawCouplings>,
}

/// Rules may be declared as a name-keyed mapping or as a plain list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawCouplings {
    Named(serde_yaml::Mapping),
    List(Vec<serde_yaml::Value>),
}

// ---------------------------------------------------------------------------
// CouplingConfig
// ---------------------------------------------------------------------------

/// The validated rule set, in declaration order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CouplingConfig {
    pub rules: Vec<CouplingRule>,
}

impl CouplingConfig {
    /// Load and validate the coupling file at `path`.
    ///
    /// Any malformed rule aborts the whole load.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CouplingError::ConfigNotFound(path.display().to_string()));
        }
        let data = std::fs::read_to_string(path)?;
        let config = Self::parse(&data)?;
        tracing::debug!(path = %path.display(), rules = config.rules.len(), "loaded coupling config");
        Ok(config)
    }

    pub fn parse(data: &str) -> Result<Self> {
        if data.trim().is_empty() {
            return Ok(Self::default());
        }
        let raw: RawConfig = serde_yaml::from_str(data)?;
        let rules = match raw.couplings {
            None => Vec::new(),
            Some(RawCouplings::Named(map)) => {
                let mut rules = Vec::with_capacity(map.len());
                for (key, value) in map {
                    let name = key.as_str().map(str::to_string).ok_or_else(|| {
                        CouplingError::InvalidConfig(format!(
                            "coupling names must be strings, found {key:?}"
                        ))
                    })?;
                    rules.push(compile_value(name, value)?);
                }
                rules
            }
            Some(RawCouplings::List(items)) => items
                .into_iter()
                .enumerate()
                .map(|(i, value)| compile_value(format!("#{}", i + 1), value))
                .collect::<Result<Vec<_>>>()?,
        };
        Ok(Self { rules })
    }

    pub fn rule(&self, name: &str) -> Option<&CouplingRule> {
        self.rules.iter().find(|r| r.name == name)
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    /// Report suspicious but legal configuration.
    ///
    /// `tracked` is the repository's file list; when supplied, rules whose
    /// sources match none of it are reported.
    pub fn validate(&self, root: &Path, tracked: Option<&BTreeSet<String>>) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        for rule in &self.rules {
            // 1. Docs that do not exist yet (may be about to be created)
            for doc in &rule.docs {
                if !root.join(doc).exists() {
                    warnings.push(ConfigWarning::warning(
                        rule,
                        format!("doc '{doc}' does not exist"),
                    ));
                }
            }

            // 2. Same doc listed twice
            let mut seen = HashSet::new();
            for doc in &rule.docs {
                if !seen.insert(doc.as_str()) {
                    warnings.push(ConfigWarning::warning(
                        rule,
                        format!("doc '{doc}' is listed more than once"),
                    ));
                }
            }

            // 3. Sources that match nothing in the repository
            if let Some(files) = tracked {
                if !files.iter().any(|f| rule.matches(f)) {
                    warnings.push(ConfigWarning::warning(
                        rule,
                        format!("sources [{}] match no tracked file", rule.sources.join(", ")),
                    ));
                }
            }
        }

        warnings
    }
}

fn compile_value(name: String, value: serde_yaml::Value) -> Result<CouplingRule> {
    let raw: RawRule = serde_yaml::from_value(value).map_err(|e| CouplingError::InvalidRule {
        rule: name.clone(),
        reason: e.to_string(),
    })?;
    CouplingRule::compile(name, raw)
}

/// Starter coupling file written by `doc-coupling init`.
pub const EXAMPLE_CONFIG: &str = r#"# Doc-code couplings: when a source matching `sources` changes, every file in
# `docs` must change in the same commit.
#
#   strength: hard  - always blocks (default)
#   strength: soft  - blocks only when enforcement.strict_doc_coupling is true
couplings:
  readme:
    sources:
      - "src/**/*.rs"
    docs:
      - "README.md"
    description: "Top-level usage documentation"
    strength: soft
"#;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
