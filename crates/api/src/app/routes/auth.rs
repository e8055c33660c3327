use std::sync::Arc;

use axum::{
    Json, Router,
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};

use dojo_auth::{Action, Caller, Role};
use dojo_domain::NewUser;

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::authz;

pub fn router() -> Router {
    Router::new()
        .route("/auth/register", post(register))
        .route("/token", post(token))
}

/// POST /auth/register - Create an account
///
/// The requested role is accepted as given, defaulting to student.
pub async fn register(
    Extension(services): Extension<Arc<AppServices>>,
    caller: Option<Extension<Caller>>,
    Json(body): Json<dto::RegisterRequest>,
) -> axum::response::Response {
    let caller = caller.map(|Extension(c)| c);
    if let Err(resp) = authz::authorize(caller.as_ref(), Action::RegisterUser) {
        return resp;
    }

    if body.password.trim().is_empty() {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "password cannot be empty",
        );
    }

    let role = match body.role.as_deref() {
        Some(s) => match errors::parse_role(s) {
            Ok(r) => r,
            Err(resp) => return resp,
        },
        None => Role::default(),
    };

    let password_hash = match services.auth.hash_password(&body.password).await {
        Ok(h) => h,
        Err(e) => return errors::password_error_to_response(e),
    };

    let user = match services.store.create_user(NewUser {
        username: body.username,
        email: body.email.unwrap_or_default(),
        password_hash,
        first_name: body.first_name.unwrap_or_default(),
        last_name: body.last_name.unwrap_or_default(),
        role,
    }) {
        Ok(u) => u,
        Err(e) => return errors::domain_error_to_response(e),
    };

    (StatusCode::CREATED, Json(dto::user_to_json(&user))).into_response()
}

/// POST /token - Exchange credentials for an access token
pub async fn token(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::TokenRequest>,
) -> axum::response::Response {
    // One refusal covers both unknown usernames and wrong passwords.
    let Some(user) = services.store.get_user_by_username(&body.username) else {
        return invalid_credentials();
    };

    match services
        .auth
        .verify_password(&body.password, &user.password_hash)
        .await
    {
        Ok(true) => {}
        Ok(false) => return invalid_credentials(),
        Err(e) => return errors::password_error_to_response(e),
    }

    let access = match services.auth.issue_token(&user) {
        Ok(t) => t,
        Err(e) => return errors::token_error_to_response(e),
    };

    (StatusCode::OK, Json(serde_json::json!({ "access": access }))).into_response()
}

fn invalid_credentials() -> axum::response::Response {
    errors::json_error(
        StatusCode::UNAUTHORIZED,
        "unauthenticated",
        "invalid username or password",
    )
}
