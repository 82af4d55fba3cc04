//! @acp:module "Errors"
//! @acp:summary "Error types shared by the briefing library"
//! @acp:domain cli
//! @acp:layer utility

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while composing a briefing
#[derive(Debug, Error)]
pub enum BriefingError {
    /// The weekday queries file does not exist
    #[error("Queries file not found: {}", .0.display())]
    QueriesNotFound(PathBuf),

    /// The query engine binary could not be launched
    #[error("Failed to start query engine `{program}`: {source}")]
    EngineSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The query engine did not finish within the configured timeout
    #[error("Query timed out after {0}s")]
    QueryTimeout(u64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

/// Result alias used across the library
pub type Result<T> = std::result::Result<T, BriefingError>;
