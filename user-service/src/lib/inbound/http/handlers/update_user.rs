use axum::extract::rejection::JsonRejection;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::check_field;
use super::FieldErrors;
use super::UserData;
use crate::domain::auth::models::AuthContext;
use crate::domain::user::models::DisplayName;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

/// HTTP request body for updating a user (raw JSON)
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub name: String,
}

impl UpdateUserRequest {
    fn try_into_command(self) -> Result<UpdateUserCommand, FieldErrors> {
        let mut errors = FieldErrors::new();

        match check_field(&mut errors, "name", DisplayName::new(self.name)) {
            Some(name) => Ok(UpdateUserCommand { name }),
            None => Err(errors),
        }
    }
}

/// `PUT /api/users/:user_id`
pub async fn update_user(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Path(id): Path<String>,
    body: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    context.require_user()?;
    let user_id = UserId::from_string(&id).map_err(UserError::from)?;
    let Json(req) = body?;
    let command = req
        .try_into_command()
        .map_err(ApiError::ValidationFailed)?;

    state
        .user_service
        .update_user(&user_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}
