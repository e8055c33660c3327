use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};

use dojo_auth::Caller;

use crate::app::errors;
use crate::app::services::AppServices;

/// Resolve `Authorization: Bearer <token>` into a [`Caller`] extension.
///
/// A missing header passes the request through anonymously; the access policy
/// decides later whether the route tolerates that. A header that is present
/// but malformed, signed with the wrong key, expired, or naming a user that
/// no longer exists is rejected here, even on routes open to anonymous
/// callers.
pub async fn auth_middleware(
    State(services): State<Arc<AppServices>>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    if req.headers().get(axum::http::header::AUTHORIZATION).is_none() {
        return next.run(req).await;
    }

    let token = match extract_bearer(req.headers()) {
        Ok(t) => t,
        Err(resp) => return resp,
    };

    let claims = match services.auth.verify_token(token) {
        Ok(c) => c,
        Err(_) => return unauthenticated("invalid or expired token"),
    };

    // Role and username come from the live record, not the token snapshot.
    let Some(user) = services.store.get_user(claims.user_id) else {
        return unauthenticated("user not found");
    };

    req.extensions_mut().insert(Caller {
        user_id: user.id,
        username: user.username,
        role: user.role,
    });

    next.run(req).await
}

fn extract_bearer(headers: &HeaderMap) -> Result<&str, Response> {
    let header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or_else(|| unauthenticated("missing authorization header"))?;

    let header = header
        .to_str()
        .map_err(|_| unauthenticated("invalid authorization header"))?;

    let header = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| unauthenticated("authorization scheme must be Bearer"))?;

    let token = header.trim();
    if token.is_empty() {
        return Err(unauthenticated("empty bearer token"));
    }

    Ok(token)
}

fn unauthenticated(message: &'static str) -> Response {
    errors::json_error(StatusCode::UNAUTHORIZED, "unauthenticated", message)
}
