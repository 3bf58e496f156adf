use std::sync::Arc;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::SigningKey;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Default lifetime of an issued session token, in minutes.
pub const DEFAULT_TOKEN_LIFETIME_MINUTES: i64 = 60;

/// Authentication coordinator combining credential verification and session
/// token issuance/validation.
///
/// Holds no mutable state; one instance is shared across all requests.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    token_lifetime: Duration,
}

/// Result of successful authentication.
#[derive(Debug)]
pub struct AuthenticationResult {
    /// Signed session token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `signing_key` - Process-wide key shared with every other holder
    /// * `token_lifetime` - How long issued tokens stay valid
    pub fn new(signing_key: Arc<SigningKey>, token_lifetime: Duration) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(&signing_key),
            token_lifetime,
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a plaintext password against a stored hash.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> bool {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Verify credentials and issue a token for `subject`.
    ///
    /// # Arguments
    /// * `password` - Plaintext password supplied at login
    /// * `stored_hash` - PHC hash of the account being logged into
    /// * `subject` - Identity to embed in the token (the user's email)
    ///
    /// # Returns
    /// AuthenticationResult carrying the signed token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: &str,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.verify_password(password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.issue_token(subject)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Issue a token for `subject` valid from now.
    pub fn issue_token(&self, subject: &str) -> Result<String, JwtError> {
        self.issue_token_at(subject, Utc::now())
    }

    /// Issue a token for `subject` as if the current time were `now`.
    pub fn issue_token_at(&self, subject: &str, now: DateTime<Utc>) -> Result<String, JwtError> {
        let claims = Claims::for_subject(subject, self.token_lifetime, now);
        self.jwt_handler.encode(&claims)
    }

    /// Validate a token and return its subject.
    ///
    /// # Errors
    /// * `TokenInvalid` - Any signature, structure or expiry failure
    pub fn validate_token(&self, token: &str) -> Result<String, JwtError> {
        self.validate_token_at(token, Utc::now())
    }

    /// Validate a token against an explicit clock value.
    pub fn validate_token_at(&self, token: &str, now: DateTime<Utc>) -> Result<String, JwtError> {
        self.jwt_handler.decode(token, now).map(|claims| claims.sub)
    }
}
