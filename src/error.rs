//! Error types for minpress

use crate::solver::SolveError;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// minpress errors
#[derive(Error, Debug)]
pub enum Error {
    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Config error: {0}")]
    Config(String),

    /// First machine of a batch that could not be solved
    #[error("Machine {machine}: {source}")]
    Machine {
        machine: usize,
        #[source]
        source: SolveError,
    },

    /// Running batch total no longer fits in `u64`
    #[error("Total presses overflow at machine {machine}")]
    TotalOverflow { machine: usize },

    #[error("Logging setup error: {0}")]
    Logging(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_norway::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(s.to_string())
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}
