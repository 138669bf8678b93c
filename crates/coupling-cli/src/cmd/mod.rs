pub mod check;
pub mod config;
pub mod init;
pub mod links;
pub mod suggest;

use anyhow::Context;
use coupling_core::{config::CouplingConfig, paths, settings::Settings};
use std::path::{Path, PathBuf};

/// Result of a command that ran to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Nothing blocking was found.
    Clean,
    /// The command found blocking problems (violations, broken links).
    Failed,
}

/// Project settings plus the coupling file they point at.
pub struct Loaded {
    pub settings: Settings,
    pub config_path: PathBuf,
    pub config: CouplingConfig,
}

/// Load settings, then the coupling file (`--config` overrides the settings path).
pub fn load(root: &Path, config_override: Option<&Path>) -> anyhow::Result<Loaded> {
    let settings = Settings::load(root).context("failed to load meta-process.yaml")?;
    let config_path = match config_override {
        Some(p) => paths::resolve(root, p),
        None => settings.coupling_config_path(root),
    };
    let config = CouplingConfig::load(&config_path)
        .with_context(|| format!("failed to load {}", paths::display_relative(root, &config_path)))?;
    Ok(Loaded {
        settings,
        config_path,
        config,
    })
}
