use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use dojo_auth::{Action, Caller};
use dojo_core::{ClassId, UserId};
use dojo_domain::{ClassPatch, DEFAULT_CAPACITY, NewDojoClass};

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::authz;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_classes).post(create_class))
        .route(
            "/:id",
            get(get_class)
                .put(update_class)
                .patch(update_class)
                .delete(delete_class),
        )
}

/// GET /classes - Public class catalogue
pub async fn list_classes(
    Extension(services): Extension<Arc<AppServices>>,
    caller: Option<Extension<Caller>>,
) -> axum::response::Response {
    let caller = caller.map(|Extension(c)| c);
    if let Err(resp) = authz::authorize(caller.as_ref(), Action::ListClasses) {
        return resp;
    }

    let items = services
        .store
        .list_classes()
        .iter()
        .map(|c| dto::class_to_json(services.store.as_ref(), c))
        .collect::<Vec<_>>();
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

/// POST /classes - Staff only
pub async fn create_class(
    Extension(services): Extension<Arc<AppServices>>,
    caller: Option<Extension<Caller>>,
    Json(body): Json<dto::CreateClassRequest>,
) -> axum::response::Response {
    let caller = caller.map(|Extension(c)| c);
    if let Err(resp) = authz::authorize(caller.as_ref(), Action::CreateClass) {
        return resp;
    }

    let class = match services.store.create_class(NewDojoClass {
        name: body.name,
        description: body.description.unwrap_or_default(),
        instructor_id: UserId::from_i64(body.instructor_id),
        schedule: body.schedule.unwrap_or_default(),
        capacity: body.capacity.unwrap_or(DEFAULT_CAPACITY),
    }) {
        Ok(c) => c,
        Err(e) => return errors::domain_error_to_response(e),
    };

    (
        StatusCode::CREATED,
        Json(dto::class_to_json(services.store.as_ref(), &class)),
    )
        .into_response()
}

/// GET /classes/:id
pub async fn get_class(
    Extension(services): Extension<Arc<AppServices>>,
    caller: Option<Extension<Caller>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let caller = caller.map(|Extension(c)| c);
    if let Err(resp) = authz::authorize(caller.as_ref(), Action::GetClass) {
        return resp;
    }

    let id = match id.parse::<i64>() {
        Ok(v) => ClassId::from_i64(v),
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid class id");
        }
    };

    match services.store.get_class(id) {
        Some(class) => (
            StatusCode::OK,
            Json(dto::class_to_json(services.store.as_ref(), &class)),
        )
            .into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "class not found"),
    }
}

/// PUT/PATCH /classes/:id - Partial update either way
pub async fn update_class(
    Extension(services): Extension<Arc<AppServices>>,
    caller: Option<Extension<Caller>>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateClassRequest>,
) -> axum::response::Response {
    let caller = caller.map(|Extension(c)| c);
    if let Err(resp) = authz::authorize(caller.as_ref(), Action::UpdateClass) {
        return resp;
    }

    let id = match id.parse::<i64>() {
        Ok(v) => ClassId::from_i64(v),
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid class id");
        }
    };

    let patch = ClassPatch {
        name: body.name,
        description: body.description,
        instructor_id: body.instructor_id.map(UserId::from_i64),
        schedule: body.schedule,
        capacity: body.capacity,
    };

    match services.store.update_class(id, patch) {
        Ok(class) => (
            StatusCode::OK,
            Json(dto::class_to_json(services.store.as_ref(), &class)),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// DELETE /classes/:id - Cascades to schedules, enrollments, and payments
pub async fn delete_class(
    Extension(services): Extension<Arc<AppServices>>,
    caller: Option<Extension<Caller>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let caller = caller.map(|Extension(c)| c);
    if let Err(resp) = authz::authorize(caller.as_ref(), Action::DeleteClass) {
        return resp;
    }

    let id = match id.parse::<i64>() {
        Ok(v) => ClassId::from_i64(v),
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid class id");
        }
    };

    match services.store.delete_class(id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
