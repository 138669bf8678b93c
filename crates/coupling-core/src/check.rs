use crate::changeset::{normalize_path, ChangeSet};
use crate::rule::{CouplingRule, Strength};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Severity
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Fails the gate: hard couplings, and soft couplings in strict mode.
    Blocking,
    /// Reported as a warning only: soft couplings outside strict mode.
    Advisory,
}

impl Severity {
    pub fn for_strength(strength: Strength, strict: bool) -> Self {
        match (strength, strict) {
            (Strength::Hard, _) | (Strength::Soft, true) => Severity::Blocking,
            (Strength::Soft, false) => Severity::Advisory,
        }
    }
}

// ---------------------------------------------------------------------------
// Violation
// ---------------------------------------------------------------------------

/// Changed sources whose coupled docs were not changed with them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub rule: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub description: String,
    pub strength: Strength,
    pub severity: Severity,
    /// Sorted lexicographically.
    pub matched_sources: Vec<String>,
    /// Sorted lexicographically.
    pub missing_docs: Vec<String>,
}

/// Evaluate one rule against the change set. `None` when the rule does not
/// apply or is satisfied.
fn evaluate(changes: &ChangeSet, rule: &CouplingRule, strict: bool) -> Option<Violation> {
    // ChangeSet iterates in sorted order, so matched_sources is already sorted.
    let matched_sources: Vec<String> = changes
        .iter()
        .filter(|p| rule.matches(p))
        .map(str::to_string)
        .collect();
    if matched_sources.is_empty() {
        return None;
    }

    let mut missing_docs: Vec<String> = rule
        .docs
        .iter()
        .filter(|d| !changes.contains(d))
        .cloned()
        .collect();
    missing_docs.sort();
    missing_docs.dedup();

    tracing::debug!(
        rule = %rule.name,
        matched = matched_sources.len(),
        missing = missing_docs.len(),
        "evaluated coupling"
    );

    if missing_docs.is_empty() {
        return None;
    }

    Some(Violation {
        rule: rule.name.clone(),
        description: rule.description.clone(),
        strength: rule.strength,
        severity: Severity::for_strength(rule.strength, strict),
        matched_sources,
        missing_docs,
    })
}

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

/// Return the blocking violations for `changes`, in rule declaration order.
///
/// Soft mismatches are only included when `strict` is set. Pure: the same
/// inputs always produce the same, identically ordered, output.
pub fn check(changes: &ChangeSet, rules: &[CouplingRule], strict: bool) -> Vec<Violation> {
    CheckReport::build(changes, rules, strict).violations
}

// ---------------------------------------------------------------------------
// CheckReport
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckReport {
    pub strict: bool,
    pub checked_files: usize,
    pub violations: Vec<Violation>,
    /// Soft mismatches that did not block because strict mode is off.
    pub advisories: Vec<Violation>,
}

impl CheckReport {
    pub fn build(changes: &ChangeSet, rules: &[CouplingRule], strict: bool) -> Self {
        let mut violations = Vec::new();
        let mut advisories = Vec::new();

        for rule in rules {
            let Some(v) = evaluate(changes, rule, strict) else {
                continue;
            };
            match v.severity {
                Severity::Blocking => violations.push(v),
                Severity::Advisory => advisories.push(v),
            }
        }

        Self {
            strict,
            checked_files: changes.len(),
            violations,
            advisories,
        }
    }

    pub fn is_blocking(&self) -> bool {
        !self.violations.is_empty()
    }
}

// ---------------------------------------------------------------------------
// suggest
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedCoupling {
    pub rule: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub description: String,
    pub strength: Strength,
    pub docs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub file: String,
    pub couplings: Vec<SuggestedCoupling>,
}

/// For each file, list the docs that would need to change alongside it.
///
/// Files are reported in input order (after normalisation, first occurrence
/// wins); files no rule covers are omitted.
pub fn suggest<S: AsRef<str>>(files: &[S], rules: &[CouplingRule]) -> Vec<Suggestion> {
    let mut out: Vec<Suggestion> = Vec::new();
    for file in files {
        let Some(file) = normalize_path(file.as_ref()) else {
            continue;
        };
        if out.iter().any(|s| s.file == file) {
            continue;
        }
        let couplings: Vec<SuggestedCoupling> = rules
            .iter()
            .filter(|r| r.matches(&file))
            .map(|r| SuggestedCoupling {
                rule: r.name.clone(),
                description: r.description.clone(),
                strength: r.strength,
                docs: r.docs.clone(),
            })
            .collect();
        if !couplings.is_empty() {
            out.push(Suggestion { file, couplings });
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
