use std::collections::BTreeMap;
use std::fmt::Display;

use axum::extract::rejection::JsonRejection;
use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::auth::errors::AuthError;
use crate::domain::user::models::Page;
use crate::domain::user::models::User;
use crate::user::errors::UserError;

pub mod authenticate;
pub mod create_user;
pub mod delete_user;
pub mod get_user;
pub mod health;
pub mod list_users;
pub mod update_user;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<T>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// Validation messages keyed by request field name.
pub type FieldErrors = BTreeMap<String, String>;

/// Record the error of `result` under `field`, if any.
///
/// # Arguments
/// * `errors` - Accumulator shared by every field of one request
/// * `field` - Request field name as the client sent it
/// * `result` - Outcome of parsing that field into its domain type
///
/// # Returns
/// The parsed value, or `None` once the failure has been recorded
pub fn check_field<T, E: Display>(
    errors: &mut FieldErrors,
    field: &str,
    result: Result<T, E>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            errors.insert(field.to_string(), e.to_string());
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    /// Request body parsed but one or more fields are invalid.
    ValidationFailed(FieldErrors),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
}

const INTERNAL_ERROR_MESSAGE: &str = "An unexpected error occurred.";

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self {
            ApiError::InternalServerError(detail) => {
                tracing::error!(error = %detail, "Request failed");
                ApiErrorBody::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_MESSAGE.to_string(),
                )
            }
            ApiError::UnprocessableEntity(msg) => {
                ApiErrorBody::new(StatusCode::UNPROCESSABLE_ENTITY, msg)
            }
            ApiError::ValidationFailed(field_errors) => ApiErrorBody::validation(field_errors),
            ApiError::BadRequest(msg) => ApiErrorBody::new(StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => ApiErrorBody::new(StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => ApiErrorBody::new(StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => ApiErrorBody::new(StatusCode::UNAUTHORIZED, msg),
        };

        let status =
            StatusCode::from_u16(body.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(body)).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) => ApiError::NotFound(err.to_string()),
            UserError::EmailAlreadyExists(_) => ApiError::Conflict(err.to_string()),
            UserError::InvalidUserId(_) | UserError::InvalidPageRequest(_) => {
                ApiError::BadRequest(err.to_string())
            }
            UserError::InvalidName(_)
            | UserError::InvalidEmail(_)
            | UserError::InvalidPassword(_) => ApiError::UnprocessableEntity(err.to_string()),
            UserError::DatabaseError(_) | UserError::Unknown(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials | AuthError::Unauthenticated => {
                ApiError::Unauthorized(err.to_string())
            }
            AuthError::Internal(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// Uniform error payload: `{timestamp, status, error, message}`, plus
/// `fieldErrors` for validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorBody {
    pub timestamp: DateTime<Utc>,
    pub status: u16,
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_errors: Option<FieldErrors>,
}

const VALIDATION_ERROR: &str = "Validation Error";
const VALIDATION_MESSAGE: &str = "Invalid input data";

impl ApiErrorBody {
    /// Build a body whose `error` is the status reason phrase.
    ///
    /// # Arguments
    /// * `status` - Response status
    /// * `message` - Client-facing description, never internal detail
    pub fn new(status: StatusCode, message: String) -> Self {
        Self {
            timestamp: Utc::now(),
            status: status.as_u16(),
            error: status.canonical_reason().unwrap_or("Error").to_string(),
            message,
            field_errors: None,
        }
    }

    /// Build a 422 body listing every invalid field.
    pub fn validation(field_errors: FieldErrors) -> Self {
        Self {
            timestamp: Utc::now(),
            status: StatusCode::UNPROCESSABLE_ENTITY.as_u16(),
            error: VALIDATION_ERROR.to_string(),
            message: VALIDATION_MESSAGE.to_string(),
            field_errors: Some(field_errors),
        }
    }
}

/// Outward shape of a user. Hash and deletion flag are never exposed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.as_str().to_string(),
            email: user.email.as_str().to_string(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Paginated listing payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedData<T: Serialize + PartialEq> {
    pub data: Vec<T>,
    pub current_page: u32,
    pub total_pages: u32,
    pub total_items: u64,
    pub page_size: u32,
    pub is_last_page: bool,
}

impl<T: Serialize + PartialEq> From<Page<T>> for PaginatedData<T> {
    fn from(page: Page<T>) -> Self {
        Self {
            data: page.items,
            current_page: page.current_page,
            total_pages: page.total_pages,
            total_items: page.total_items,
            page_size: page.page_size,
            is_last_page: page.is_last_page,
        }
    }
}
