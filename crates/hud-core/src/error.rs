use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HudError {
    #[error("state file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("state file already exists: {} (use --force to overwrite)", .0.display())]
    ConfigExists(PathBuf),

    #[error("invalid state file: {0}")]
    InvalidConfig(String),

    #[error("no states to render")]
    NoStates,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, HudError>;
