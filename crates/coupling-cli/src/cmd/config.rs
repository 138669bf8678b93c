use super::Status;
use crate::output::{print_json, print_table};
use clap::Subcommand;
use coupling_core::{git, paths};
use std::path::Path;

// ---------------------------------------------------------------------------
// Subcommand types
// ---------------------------------------------------------------------------

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Validate the coupling file and report suspicious rules
    Validate,

    /// List the configured couplings
    Show,
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub fn run(
    root: &Path,
    config_override: Option<&Path>,
    subcmd: ConfigSubcommand,
    json: bool,
) -> anyhow::Result<Status> {
    match subcmd {
        ConfigSubcommand::Validate => validate(root, config_override, json),
        ConfigSubcommand::Show => show(root, config_override, json),
    }
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

fn validate(root: &Path, config_override: Option<&Path>, json: bool) -> anyhow::Result<Status> {
    let loaded = super::load(root, config_override)?;

    // Unused-glob detection needs git; skip it outside a repository.
    let tracked = match git::tracked_files(root) {
        Ok(files) => Some(files),
        Err(e) => {
            tracing::debug!("skipping tracked-file checks: {e}");
            None
        }
    };
    let warnings = loaded.config.validate(root, tracked.as_ref());

    if json {
        let value = serde_json::json!({
            "config": paths::display_relative(root, &loaded.config_path),
            "rules": loaded.config.rules.len(),
            "warnings": warnings,
        });
        print_json(&value)?;
    } else {
        println!(
            "{}: {} coupling(s)",
            paths::display_relative(root, &loaded.config_path),
            loaded.config.rules.len()
        );
        if warnings.is_empty() {
            println!("Config is valid. No warnings.");
        }
        for w in &warnings {
            println!("[{}] {}: {}", w.level.as_str(), w.rule, w.message);
        }
    }

    Ok(Status::Clean)
}

// ---------------------------------------------------------------------------
// show
// ---------------------------------------------------------------------------

fn show(root: &Path, config_override: Option<&Path>, json: bool) -> anyhow::Result<Status> {
    let loaded = super::load(root, config_override)?;

    if json {
        print_json(&serde_json::json!({
            "strict": loaded.settings.enforcement.strict_doc_coupling,
            "couplings": loaded.config.rules,
        }))?;
        return Ok(Status::Clean);
    }

    if loaded.config.rules.is_empty() {
        println!("No couplings configured.");
        return Ok(Status::Clean);
    }

    let rows: Vec<[String; 4]> = loaded
        .config
        .rules
        .iter()
        .map(|r| {
            [
                r.name.clone(),
                r.strength.to_string(),
                r.sources.join(", "),
                r.docs.join(", "),
            ]
        })
        .collect();
    print_table(["NAME", "STRENGTH", "SOURCES", "DOCS"], &rows);
    println!(
        "\nstrict_doc_coupling: {}",
        loaded.settings.enforcement.strict_doc_coupling
    );
    Ok(Status::Clean)
}
