use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::check_field;
use super::ApiError;
use super::ApiSuccess;
use super::FieldErrors;
use super::UserData;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::DisplayName;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::inbound::http::router::AppState;

/// `POST /api/users` (public registration)
///
/// # Returns
/// 201 with the created user, 422 listing every invalid field, 409 when the
/// email is already taken
pub async fn create_user(
    State(state): State<AppState>,
    body: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    let Json(body) = body?;
    let command = body
        .try_into_command()
        .map_err(ApiError::ValidationFailed)?;

    state
        .user_service
        .create_user(command)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::CREATED, user.into()))
}

/// HTTP request body for creating a user (raw JSON)
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct CreateUserRequest {
    name: String,
    email: String,
    password: String,
}

impl CreateUserRequest {
    /// Validate every field, reporting all failures at once.
    fn try_into_command(self) -> Result<CreateUserCommand, FieldErrors> {
        let mut errors = FieldErrors::new();

        let name = check_field(&mut errors, "name", DisplayName::new(self.name));
        let email = check_field(&mut errors, "email", EmailAddress::new(self.email));
        let password = check_field(&mut errors, "password", Password::new(self.password));

        match (name, email, password) {
            (Some(name), Some(email), Some(password)) => {
                Ok(CreateUserCommand::new(name, email, password))
            }
            _ => Err(errors),
        }
    }
}
