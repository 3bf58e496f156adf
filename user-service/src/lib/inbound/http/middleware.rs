use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::auth::models::AuthContext;
use crate::inbound::http::router::AppState;

const BEARER_PREFIX: &str = "Bearer ";

/// Resolves the caller's identity and stores it in request extensions as an
/// [`AuthContext`].
///
/// Never rejects: a missing header, another scheme, a bad or expired token
/// and a subject that is no longer a live user all leave the request
/// anonymous. Handlers decide what anonymous callers may do.
pub async fn authenticate(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let context = match extract_bearer_token(req.headers()) {
        Some(token) => match state.auth_service.resolve_token(&token).await {
            Some(user) => {
                tracing::debug!(user_id = %user.id, "Request authenticated");
                AuthContext::authenticated(user)
            }
            None => AuthContext::anonymous(),
        },
        None => AuthContext::anonymous(),
    };

    req.extensions_mut().insert(context);

    next.run(req).await
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix(BEARER_PREFIX)?.trim();

    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}
