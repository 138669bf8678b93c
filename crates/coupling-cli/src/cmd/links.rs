use super::Status;
use crate::output::print_json;
use anyhow::Context;
use coupling_core::{links::check_links, paths};
use std::path::Path;

pub fn run(root: &Path, dir: Option<&Path>, json: bool) -> anyhow::Result<Status> {
    let scan_root = match dir {
        Some(d) => paths::resolve(root, d),
        None => root.to_path_buf(),
    };
    let broken = check_links(&scan_root)
        .with_context(|| format!("failed to scan {}", scan_root.display()))?;

    if json {
        print_json(&serde_json::json!({ "broken_links": broken }))?;
    } else if broken.is_empty() {
        println!("All markdown links resolve.");
    } else {
        for b in &broken {
            println!("{}:{}: broken link [{}]({})", b.file, b.line, b.text, b.target);
        }
        println!();
        println!("FAILED: {} broken link(s)", broken.len());
    }

    Ok(if broken.is_empty() {
        Status::Clean
    } else {
        Status::Failed
    })
}
