use thiserror::Error;

/// Errors surfaced by the authentication flows.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown email, deleted account or wrong password. Never more specific.
    #[error("Invalid credentials, check your email or password.")]
    InvalidCredentials,

    /// The request carries no resolved identity but the operation needs one.
    #[error("Authentication required")]
    Unauthenticated,

    #[error("Authentication failed: {0}")]
    Internal(String),
}
