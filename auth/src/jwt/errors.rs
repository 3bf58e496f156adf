use thiserror::Error;

/// Error type for JWT operations.
///
/// Decoding failures are deliberately collapsed into one variant: a forged
/// signature, a truncated token and an expired one are indistinguishable to
/// the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is invalid")]
    TokenInvalid,
}
