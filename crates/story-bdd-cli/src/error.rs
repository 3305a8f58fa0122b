//! Semantic error types for the command line front end.
//!
//! Story problems are reported as data by the pipeline; these errors cover
//! the things that stop an invocation outright.

use thiserror::Error;

/// Errors that end a `story-bdd` invocation.
#[derive(Debug, Error)]
pub enum CliError {
    /// An invalid configuration value was provided.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
