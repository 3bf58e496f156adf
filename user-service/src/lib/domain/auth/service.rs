use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::LoginCommand;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::user::models::User;
use crate::user::ports::UserRepository;

/// Login flow and identity resolver over a user repository.
pub struct AuthService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> AuthService<UR>
where
    UR: UserRepository,
{
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<UR> AuthServicePort for AuthService<UR>
where
    UR: UserRepository,
{
    async fn login(&self, command: LoginCommand) -> Result<String, AuthError> {
        let user = self
            .repository
            .find_by_email(&command.email)
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))?
            .filter(User::is_live)
            .ok_or(AuthError::InvalidCredentials)?;

        let result = self
            .authenticator
            .authenticate(&command.password, &user.password_hash, user.email.as_str())
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => AuthError::InvalidCredentials,
                AuthenticationError::JwtError(err) => AuthError::Internal(err.to_string()),
            })?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(result.access_token)
    }

    async fn resolve_token(&self, token: &str) -> Option<User> {
        let subject = match self.authenticator.validate_token(token) {
            Ok(subject) => subject,
            Err(_) => {
                tracing::debug!("Bearer token rejected");
                return None;
            }
        };

        match self.repository.find_live_by_email(&subject).await {
            Ok(user) => {
                if user.is_none() {
                    tracing::debug!("Token subject no longer resolves to a live user");
                }
                user
            }
            Err(e) => {
                tracing::error!(error = %e, "Identity lookup failed");
                None
            }
        }
    }
}
