use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use dojo_auth::{Action, Caller, Role};
use dojo_core::UserId;
use dojo_domain::UserPatch;

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::authz;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_users))
        .route(
            "/:id",
            get(get_user)
                .put(update_user)
                .patch(update_user)
                .delete(delete_user),
        )
}

/// GET /users?role=... - Optional role equality filter
pub async fn list_users(
    Extension(services): Extension<Arc<AppServices>>,
    caller: Option<Extension<Caller>>,
    Query(query): Query<dto::ListUsersQuery>,
) -> axum::response::Response {
    let caller = caller.map(|Extension(c)| c);
    if let Err(resp) = authz::authorize(caller.as_ref(), Action::ListUsers) {
        return resp;
    }

    let role = match query.role.as_deref().map(errors::parse_role).transpose() {
        Ok(r) => r,
        Err(resp) => return resp,
    };

    let items = services
        .store
        .list_users(role)
        .iter()
        .map(dto::user_to_json)
        .collect::<Vec<_>>();
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

/// GET /users/:id
pub async fn get_user(
    Extension(services): Extension<Arc<AppServices>>,
    caller: Option<Extension<Caller>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let caller = caller.map(|Extension(c)| c);
    if let Err(resp) = authz::authorize(caller.as_ref(), Action::GetUser) {
        return resp;
    }

    let id = match id.parse::<i64>() {
        Ok(v) => UserId::from_i64(v),
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid user id");
        }
    };

    match services.store.get_user(id) {
        Some(user) => (StatusCode::OK, Json(dto::user_to_json(&user))).into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "user not found"),
    }
}

/// PUT/PATCH /users/:id - Partial update either way; a new password is
/// re-hashed before it is stored
pub async fn update_user(
    Extension(services): Extension<Arc<AppServices>>,
    caller: Option<Extension<Caller>>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateUserRequest>,
) -> axum::response::Response {
    let caller = caller.map(|Extension(c)| c);
    if let Err(resp) = authz::authorize(caller.as_ref(), Action::UpdateUser) {
        return resp;
    }

    let id = match id.parse::<i64>() {
        Ok(v) => UserId::from_i64(v),
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid user id");
        }
    };

    let role = match body.role.as_deref().map(errors::parse_role).transpose() {
        Ok(r) => r,
        Err(resp) => return resp,
    };

    let password_hash = match body.password.as_deref() {
        Some(p) if p.trim().is_empty() => {
            return errors::json_error(
                StatusCode::BAD_REQUEST,
                "validation_error",
                "password cannot be empty",
            );
        }
        Some(p) => match services.auth.hash_password(p).await {
            Ok(h) => Some(h),
            Err(e) => return errors::password_error_to_response(e),
        },
        None => None,
    };

    let patch = UserPatch {
        username: body.username,
        email: body.email,
        password_hash,
        first_name: body.first_name,
        last_name: body.last_name,
        role,
    };

    match services.store.update_user(id, patch) {
        Ok(user) => (StatusCode::OK, Json(dto::user_to_json(&user))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// DELETE /users/:id - Cascades through taught classes and held enrollments
pub async fn delete_user(
    Extension(services): Extension<Arc<AppServices>>,
    caller: Option<Extension<Caller>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let caller = caller.map(|Extension(c)| c);
    if let Err(resp) = authz::authorize(caller.as_ref(), Action::DeleteUser) {
        return resp;
    }

    let id = match id.parse::<i64>() {
        Ok(v) => UserId::from_i64(v),
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid user id");
        }
    };

    match services.store.delete_user(id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// GET /instructors - Public instructor directory
pub async fn list_instructors(
    Extension(services): Extension<Arc<AppServices>>,
    caller: Option<Extension<Caller>>,
) -> axum::response::Response {
    let caller = caller.map(|Extension(c)| c);
    if let Err(resp) = authz::authorize(caller.as_ref(), Action::ListInstructors) {
        return resp;
    }

    let items = services
        .store
        .list_users(Some(Role::Instructor))
        .iter()
        .map(dto::user_to_json)
        .collect::<Vec<_>>();
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}
