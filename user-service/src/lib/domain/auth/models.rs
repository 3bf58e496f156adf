use crate::domain::auth::errors::AuthError;
use crate::domain::user::models::User;

/// Identity attached to a single in-flight request.
///
/// Built by the authentication middleware and handed to handlers explicitly;
/// dropped with the request.
#[derive(Debug, Clone, Default)]
pub struct AuthContext {
    user: Option<User>,
}

impl AuthContext {
    pub fn anonymous() -> Self {
        Self { user: None }
    }

    pub fn authenticated(user: User) -> Self {
        Self { user: Some(user) }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// The resolved user, or `Unauthenticated` for anonymous requests.
    pub fn require_user(&self) -> Result<&User, AuthError> {
        self.user.as_ref().ok_or(AuthError::Unauthenticated)
    }
}

/// Login credentials as received from the client.
#[derive(Clone)]
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for LoginCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginCommand")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::user::models::DisplayName;
    use crate::domain::user::models::EmailAddress;

    #[test]
    fn test_anonymous_context_requires_user() {
        assert_eq!(
            AuthContext::anonymous().require_user().err(),
            Some(AuthError::Unauthenticated)
        );
        assert!(AuthContext::default().user().is_none());
    }

    #[test]
    fn test_authenticated_context_exposes_user() {
        let user = User::new(
            DisplayName::new("Alice".to_string()).unwrap(),
            EmailAddress::new("alice@example.com".to_string()).unwrap(),
            "$argon2id$test_hash".to_string(),
            Utc::now(),
        );

        let context = AuthContext::authenticated(user.clone());
        assert_eq!(context.require_user(), Ok(&user));
    }

    #[test]
    fn test_login_command_debug_hides_password() {
        let command = LoginCommand {
            email: "alice@example.com".to_string(),
            password: "secret123".to_string(),
        };

        let rendered = format!("{:?}", command);
        assert!(rendered.contains("alice@example.com"));
        assert!(!rendered.contains("secret123"));
    }
}
