//! Project-wide settings shared with the rest of the meta-process tooling.
//!
//! Only the keys this tool reads are modelled; everything else in the file
//! is ignored.

use crate::error::Result;
use crate::{io, paths};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnforcementSettings {
    /// When true, soft couplings block like hard ones.
    #[serde(default)]
    pub strict_doc_coupling: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocCouplingSettings {
    /// Path of the coupling file, relative to the project root.
    #[serde(default = "default_config_path")]
    pub config: PathBuf,
}

fn default_config_path() -> PathBuf {
    PathBuf::from(paths::DEFAULT_CONFIG_FILE)
}

impl Default for DocCouplingSettings {
    fn default() -> Self {
        Self {
            config: default_config_path(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub enforcement: EnforcementSettings,
    #[serde(default)]
    pub doc_coupling: DocCouplingSettings,
}

impl Settings {
    /// Load `meta-process.yaml`. Returns defaults if the file is absent or empty.
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::settings_path(root);
        let Some(data) = io::read_optional(&path)? else {
            return Ok(Self::default());
        };
        Self::parse(&data)
    }

    pub fn parse(data: &str) -> Result<Self> {
        if data.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(data)?)
    }

    /// Absolute location of the coupling file for this project.
    pub fn coupling_config_path(&self, root: &Path) -> PathBuf {
        paths::resolve(root, &self.doc_coupling.config)
    }
}

/// Starter settings file written by `doc-coupling init`.
pub const EXAMPLE_SETTINGS: &str = "\
enforcement:
  # true: soft couplings also block commits
  strict_doc_coupling: false
doc_coupling:
  config: scripts/doc_coupling.yaml
";
