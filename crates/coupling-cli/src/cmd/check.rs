use super::Status;
use crate::output::{print_json, print_list};
use anyhow::Context;
use clap::Args;
use coupling_core::{
    changeset::ChangeSet,
    check::{CheckReport, Violation},
    git::{self, ChangeSource},
};
use std::path::Path;

#[derive(Args)]
pub struct CheckArgs {
    /// Treat soft couplings as blocking (overrides enforcement.strict_doc_coupling)
    #[arg(long)]
    pub strict: bool,

    /// Check files staged in the git index (pre-commit)
    #[arg(long, conflicts_with_all = ["base", "files"])]
    pub staged: bool,

    /// Check changes on HEAD since BASE (default: origin/main)
    #[arg(long, value_name = "BASE", conflicts_with = "files")]
    pub base: Option<String>,

    /// Check an explicit list of changed files instead of asking git
    #[arg(long, num_args = 1.., value_name = "FILE")]
    pub files: Vec<String>,
}

impl CheckArgs {
    fn source(&self) -> Option<ChangeSource> {
        if !self.files.is_empty() {
            None
        } else if self.staged {
            Some(ChangeSource::Staged)
        } else {
            Some(
                self.base
                    .clone()
                    .map(ChangeSource::Base)
                    .unwrap_or_default(),
            )
        }
    }
}

pub fn run(
    root: &Path,
    config_override: Option<&Path>,
    args: CheckArgs,
    json: bool,
) -> anyhow::Result<Status> {
    let loaded = super::load(root, config_override)?;
    let strict = args.strict || loaded.settings.enforcement.strict_doc_coupling;

    for w in loaded.config.validate(root, None) {
        tracing::warn!(rule = %w.rule, "{}", w.message);
    }

    let changes = match args.source() {
        None => args.files.iter().collect::<ChangeSet>(),
        Some(source) => git::changed_files(root, &source)
            .with_context(|| format!("failed to collect changed files ({source:?})"))?,
    };

    let report = CheckReport::build(&changes, &loaded.config.rules, strict);

    if json {
        print_json(&report)?;
    } else {
        print_report(&report);
    }

    Ok(if report.is_blocking() {
        Status::Failed
    } else {
        Status::Clean
    })
}

fn print_report(report: &CheckReport) {
    for a in &report.advisories {
        eprintln!(
            "warning: soft coupling '{}' not satisfied: {} changed without {} \
             (blocks when enforcement.strict_doc_coupling is true)",
            a.rule,
            a.matched_sources.join(", "),
            a.missing_docs.join(", ")
        );
    }

    if !report.is_blocking() {
        println!(
            "Doc coupling OK: {} changed file(s), no blocking violations.",
            report.checked_files
        );
        return;
    }

    println!("Doc-coupling violations ({}):", report.violations.len());
    for v in &report.violations {
        print_violation(v);
    }
    println!();
    println!(
        "FAILED: {} blocking violation(s){}. Update the listed docs in the same change.",
        report.violations.len(),
        if report.strict { " (strict mode)" } else { "" }
    );
}

fn print_violation(v: &Violation) {
    println!();
    if v.description.is_empty() {
        println!("  [{}] ({})", v.rule, v.strength);
    } else {
        println!("  [{}] {} ({})", v.rule, v.description, v.strength);
    }
    print_list("changed", &v.matched_sources);
    print_list("missing", &v.missing_docs);
}
