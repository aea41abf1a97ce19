use std::path::PathBuf;
use thiserror::Error;

use crate::dispatch::ActionId;

#[derive(Error, Debug)]
pub enum YoovaError {
    #[error("Terminal error: {0}")]
    Terminal(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Actions registered without a config: {0:?}")]
    UnregisteredActions(Vec<ActionId>),
}

pub type Result<T> = std::result::Result<T, YoovaError>;
