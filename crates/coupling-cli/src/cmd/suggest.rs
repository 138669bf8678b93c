use super::Status;
use crate::output::print_json;
use coupling_core::check::suggest;
use std::path::Path;

pub fn run(
    root: &Path,
    config_override: Option<&Path>,
    files: &[String],
    json: bool,
) -> anyhow::Result<Status> {
    let loaded = super::load(root, config_override)?;
    let suggestions = suggest(files, &loaded.config.rules);

    if json {
        print_json(&suggestions)?;
        return Ok(Status::Clean);
    }

    if suggestions.is_empty() {
        println!("No couplings apply to the given files.");
        return Ok(Status::Clean);
    }
    for s in &suggestions {
        println!("{}", s.file);
        for c in &s.couplings {
            for doc in &c.docs {
                println!("  -> {doc}  ({}, {})", c.rule, c.strength);
            }
        }
    }
    Ok(Status::Clean)
}
