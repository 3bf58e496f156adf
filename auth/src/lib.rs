//! Authentication primitives for the user service.
//!
//! - Password hashing and verification (Argon2id)
//! - Stateless session tokens (HS256 JWT) signed with a process-wide key
//! - Authentication coordination
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use std::sync::Arc;
//!
//! use auth::{Authenticator, SigningKey, DEFAULT_TOKEN_LIFETIME_MINUTES};
//! use chrono::Duration;
//!
//! let key = Arc::new(SigningKey::generate());
//! let auth = Authenticator::new(key, Duration::minutes(DEFAULT_TOKEN_LIFETIME_MINUTES));
//!
//! // Register: hash password
//! let hash = auth.hash_password("secret123").unwrap();
//!
//! // Login: verify and issue token
//! let result = auth.authenticate("secret123", &hash, "alice@example.com").unwrap();
//!
//! // Validate token on a later request
//! let subject = auth.validate_token(&result.access_token).unwrap();
//! assert_eq!(subject, "alice@example.com");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use authenticator::DEFAULT_TOKEN_LIFETIME_MINUTES;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::SigningKey;
pub use password::PasswordError;
pub use password::PasswordHasher;
