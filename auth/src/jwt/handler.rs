use chrono::DateTime;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::JwtError;
use super::key::SigningKey;

/// JWT token handler for encoding and decoding session tokens.
///
/// Tokens are compact HS256 JWS strings: `header.payload.signature`, each part
/// base64url without padding.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl JwtHandler {
    /// Create a handler signing and verifying with `key`.
    ///
    /// # Arguments
    /// * `key` - Process-wide signing key; its bytes are copied into the
    ///   encoding and decoding keys
    pub fn new(key: &SigningKey) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(key.as_bytes()),
            decoding_key: DecodingKey::from_secret(key.as_bytes()),
            algorithm: Algorithm::HS256,
        }
    }

    /// Sign claims into a token.
    ///
    /// # Arguments
    /// * `claims` - Subject and timestamps to sign
    ///
    /// # Returns
    /// Compact JWS string
    ///
    /// # Errors
    /// * `EncodingFailed` - Claims could not be serialized or signed
    pub fn encode(&self, claims: &Claims) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Verify a token and return its claims if it is still valid at `now`.
    ///
    /// Only HS256 is accepted. Expiry is checked here against the supplied
    /// clock with no leeway rather than by `jsonwebtoken`, so `now >= exp`
    /// is always rejected.
    ///
    /// # Arguments
    /// * `token` - Compact JWS string as presented by the client
    /// * `now` - Clock value the expiry is checked against
    ///
    /// # Returns
    /// Decoded claims of a token that is still valid at `now`
    ///
    /// # Errors
    /// * `TokenInvalid` - Malformed, wrongly signed, wrong algorithm, missing
    ///   claims, or expired
    pub fn decode(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|_| JwtError::TokenInvalid)?;

        if token_data.claims.is_expired(now.timestamp()) {
            return Err(JwtError::TokenInvalid);
        }

        Ok(token_data.claims)
    }
}
