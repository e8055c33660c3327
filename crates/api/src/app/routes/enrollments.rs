use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use dojo_auth::{Action, Caller, Scope};
use dojo_core::{ClassId, EnrollmentId};
use dojo_domain::NewEnrollment;

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::authz;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_enrollments).post(create_enrollment))
        .route("/:id", get(get_enrollment).delete(delete_enrollment))
}

/// GET /enrollments
pub async fn list_enrollments(
    Extension(services): Extension<Arc<AppServices>>,
    caller: Option<Extension<Caller>>,
) -> axum::response::Response {
    let caller = caller.map(|Extension(c)| c);
    if let Err(resp) = authz::authorize(caller.as_ref(), Action::ListEnrollments) {
        return resp;
    }

    let items = services
        .store
        .list_enrollments()
        .iter()
        .map(|e| dto::enrollment_to_json(services.store.as_ref(), e))
        .collect::<Vec<_>>();
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

/// POST /enrollments - The student is always the caller
pub async fn create_enrollment(
    Extension(services): Extension<Arc<AppServices>>,
    caller: Option<Extension<Caller>>,
    Json(body): Json<dto::CreateEnrollmentRequest>,
) -> axum::response::Response {
    let caller = caller.map(|Extension(c)| c);
    let scope = match authz::authorize(caller.as_ref(), Action::CreateEnrollment) {
        Ok(scope) => scope,
        Err(resp) => return resp,
    };
    let Some(Scope::StudentIs(student_id)) = scope else {
        return errors::json_error(
            StatusCode::FORBIDDEN,
            "forbidden",
            "a signed-in student is required",
        );
    };

    let enrollment = match services.store.create_enrollment(NewEnrollment {
        student_id,
        class_id: ClassId::from_i64(body.martial_class_id),
    }) {
        Ok(e) => e,
        Err(e) => return errors::domain_error_to_response(e),
    };

    (
        StatusCode::CREATED,
        Json(dto::enrollment_to_json(services.store.as_ref(), &enrollment)),
    )
        .into_response()
}

/// GET /enrollments/:id
pub async fn get_enrollment(
    Extension(services): Extension<Arc<AppServices>>,
    caller: Option<Extension<Caller>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let caller = caller.map(|Extension(c)| c);
    if let Err(resp) = authz::authorize(caller.as_ref(), Action::GetEnrollment) {
        return resp;
    }

    let id = match id.parse::<i64>() {
        Ok(v) => EnrollmentId::from_i64(v),
        Err(_) => {
            return errors::json_error(
                StatusCode::BAD_REQUEST,
                "invalid_id",
                "invalid enrollment id",
            );
        }
    };

    match services.store.get_enrollment(id) {
        Some(enrollment) => (
            StatusCode::OK,
            Json(dto::enrollment_to_json(services.store.as_ref(), &enrollment)),
        )
            .into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "enrollment not found"),
    }
}

/// DELETE /enrollments/:id - Removes the enrollment's payments as well
pub async fn delete_enrollment(
    Extension(services): Extension<Arc<AppServices>>,
    caller: Option<Extension<Caller>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let caller = caller.map(|Extension(c)| c);
    if let Err(resp) = authz::authorize(caller.as_ref(), Action::DeleteEnrollment) {
        return resp;
    }

    let id = match id.parse::<i64>() {
        Ok(v) => EnrollmentId::from_i64(v),
        Err(_) => {
            return errors::json_error(
                StatusCode::BAD_REQUEST,
                "invalid_id",
                "invalid enrollment id",
            );
        }
    };

    match services.store.delete_enrollment(id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
