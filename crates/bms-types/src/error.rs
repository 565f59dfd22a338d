use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("credential must not be empty")]
    EmptyCredential,

    #[error("unknown role: {0}")]
    UnknownRole(String),
}
