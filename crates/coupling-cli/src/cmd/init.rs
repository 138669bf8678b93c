use super::Status;
use anyhow::Context;
use coupling_core::{
    config::EXAMPLE_CONFIG,
    io, paths,
    settings::{Settings, EXAMPLE_SETTINGS},
};
use std::path::Path;

pub fn run(root: &Path) -> anyhow::Result<Status> {
    println!("Initializing doc coupling in: {}", root.display());

    // 1. Settings file
    let settings_path = paths::settings_path(root);
    let created = io::write_if_missing(&settings_path, EXAMPLE_SETTINGS.as_bytes())
        .with_context(|| format!("failed to write {}", settings_path.display()))?;
    report(created, paths::SETTINGS_FILE);

    // 2. Coupling file, wherever the (possibly pre-existing) settings point
    let settings = Settings::load(root).context("failed to load meta-process.yaml")?;
    let config_path = settings.coupling_config_path(root);
    let created = io::write_if_missing(&config_path, EXAMPLE_CONFIG.as_bytes())
        .with_context(|| format!("failed to write {}", config_path.display()))?;
    report(created, &paths::display_relative(root, &config_path));

    println!("\nNext: edit the couplings, then run 'doc-coupling check --staged'");
    Ok(Status::Clean)
}

fn report(created: bool, rel: &str) {
    if created {
        println!("  created: {rel}");
    } else {
        println!("  exists:  {rel}");
    }
}
