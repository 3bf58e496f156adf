use async_trait::async_trait;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::LoginCommand;
use crate::domain::user::models::User;

/// Port for the authentication core.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Check credentials and issue a session token whose subject is the email.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email, deleted account or wrong password
    /// * `Internal` - Token signing or storage failed
    async fn login(&self, command: LoginCommand) -> Result<String, AuthError>;

    /// Map a bearer token to the live user it names.
    ///
    /// Returns `None` for invalid or expired tokens and for subjects that no
    /// longer resolve to a live user. Liveness is re-read on every call.
    async fn resolve_token(&self, token: &str) -> Option<User>;
}
