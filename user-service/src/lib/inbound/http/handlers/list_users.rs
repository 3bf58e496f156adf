use axum::extract::rejection::QueryRejection;
use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::PaginatedData;
use super::UserData;
use crate::domain::auth::models::AuthContext;
use crate::domain::user::models::PageRequest;
use crate::domain::user::models::UserOrdering;
use crate::inbound::http::router::AppState;
use crate::user::errors::PageRequestError;
use crate::user::errors::UserError;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListUsersParams {
    page: Option<u32>,
    size: Option<u32>,
    order_by: Option<String>,
}

impl ListUsersParams {
    fn try_into_request(self) -> Result<PageRequest, PageRequestError> {
        let order = match self.order_by.as_deref() {
            Some(order_by) => order_by.parse()?,
            None => UserOrdering::default(),
        };

        PageRequest::new(
            self.page.unwrap_or(PageRequest::DEFAULT_PAGE),
            self.size.unwrap_or(PageRequest::DEFAULT_SIZE),
            order,
        )
    }
}

/// `GET /api/users?page=&size=&orderBy=`
pub async fn list_users(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    params: Result<Query<ListUsersParams>, QueryRejection>,
) -> Result<ApiSuccess<PaginatedData<UserData>>, ApiError> {
    context.require_user()?;
    let Query(params) = params?;
    let request = params.try_into_request().map_err(UserError::from)?;

    state
        .user_service
        .list_users(request)
        .await
        .map_err(ApiError::from)
        .map(|page| {
            let page = page.map(|ref user| UserData::from(user));
            ApiSuccess::new(StatusCode::OK, page.into())
        })
}
