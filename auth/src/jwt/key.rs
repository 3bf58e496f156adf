use std::fmt;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::rand_core::RngCore;

/// Symmetric secret used to sign and verify session tokens.
///
/// Generated once when the process starts and never persisted, so tokens do
/// not outlive a restart. Immutable after construction; share it with `Arc`.
#[derive(Clone)]
pub struct SigningKey(Vec<u8>);

impl SigningKey {
    /// Key length in bytes, matching the HS256 block of 256 bits.
    pub const LENGTH: usize = 32;

    /// Generate a fresh key from the operating system RNG.
    pub fn generate() -> Self {
        let mut bytes = vec![0u8; Self::LENGTH];
        OsRng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Build a key from known bytes.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SigningKey").field(&"<redacted>").finish()
    }
}
