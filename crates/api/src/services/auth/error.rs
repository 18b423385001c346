//! Authentication error types.

use shopcart_core::{EmailError, UsernameError};

use crate::db::RepositoryError;

/// Errors produced by the authentication service.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The email format is invalid.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// The username format is invalid.
    #[error("invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    /// The password doesn't meet requirements.
    #[error("{0}")]
    WeakPassword(String),

    /// The username or email is already registered; the message names
    /// which.
    #[error("{0}")]
    AlreadyExists(String),

    /// Wrong email or password. Deliberately a single variant so login
    /// failures don't reveal whether the email is registered.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Password hashing failed.
    #[error("password hashing failed")]
    PasswordHash,

    /// Underlying repository failure.
    #[error(transparent)]
    Repository(RepositoryError),
}

impl From<RepositoryError> for AuthError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::Conflict(message) => Self::AlreadyExists(message),
            other => Self::Repository(other),
        }
    }
}
