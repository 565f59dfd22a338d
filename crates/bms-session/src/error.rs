use thiserror::Error;

/// Errors from the durable session slot.
#[derive(Debug, Error)]
pub enum SlotError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("slot lock poisoned: {0}")]
    LockPoisoned(String),
}

/// Errors from session operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Identifier and secret did not match a known principal.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// A required login field was empty.
    #[error("missing {0}")]
    MissingField(&'static str),

    #[error("session slot error: {0}")]
    Slot(#[from] SlotError),

    #[error("session lock poisoned: {0}")]
    LockPoisoned(String),
}

pub type SlotResult<T> = Result<T, SlotError>;
pub type AuthResult<T> = Result<T, AuthError>;
