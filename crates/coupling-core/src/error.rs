use thiserror::Error;

#[derive(Debug, Error)]
pub enum CouplingError {
    #[error("coupling config not found: {0} (run 'doc-coupling init' or pass --config)")]
    ConfigNotFound(String),

    #[error("invalid coupling config: {0}")]
    InvalidConfig(String),

    #[error("rule '{rule}': {reason}")]
    InvalidRule { rule: String, reason: String },

    #[error("rule '{rule}': invalid glob '{pattern}': {source}")]
    InvalidGlob {
        rule: String,
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("invalid strength '{0}': expected 'hard' or 'soft'")]
    InvalidStrength(String),

    #[error("git not found on PATH")]
    GitNotFound,

    #[error("git {command} failed: {stderr}")]
    Git { command: String, stderr: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

impl CouplingError {
    /// True for errors caused by a malformed or missing coupling configuration.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            CouplingError::ConfigNotFound(_)
                | CouplingError::InvalidConfig(_)
                | CouplingError::InvalidRule { .. }
                | CouplingError::InvalidGlob { .. }
                | CouplingError::InvalidStrength(_)
                | CouplingError::Yaml(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, CouplingError>;
