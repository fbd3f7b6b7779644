//! CLI error types.

use sitenav_config::ConfigError;
use sitenav_tree::NotFound;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    NotFound(#[from] NotFound),

    #[error("{0}")]
    Validation(String),
}
