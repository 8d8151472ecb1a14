// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum JobdagError {
    /// The job list violates one of the `JobSet` invariants (empty set,
    /// nameless job, duplicate name, unknown dependency) or the `[config]`
    /// section holds an out-of-range value.
    #[error("{0}")]
    Validation(String),

    #[error("Cycle detected in job graph: {0}")]
    DagCycle(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, JobdagError>;
