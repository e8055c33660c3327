use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use dojo_auth::{Action, Caller, Scope};
use dojo_core::{ClassId, ScheduleId};
use dojo_domain::{NewSchedule, SchedulePatch};

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::authz;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_schedules).post(create_schedule))
        .route(
            "/:id",
            get(get_schedule)
                .put(update_schedule)
                .patch(update_schedule)
                .delete(delete_schedule),
        )
}

/// GET /schedules - Public timetable
pub async fn list_schedules(
    Extension(services): Extension<Arc<AppServices>>,
    caller: Option<Extension<Caller>>,
) -> axum::response::Response {
    let caller = caller.map(|Extension(c)| c);
    if let Err(resp) = authz::authorize(caller.as_ref(), Action::ListSchedules) {
        return resp;
    }

    let items = services
        .store
        .list_schedules()
        .iter()
        .map(|s| dto::schedule_to_json(services.store.as_ref(), s))
        .collect::<Vec<_>>();
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

/// POST /schedules
pub async fn create_schedule(
    Extension(services): Extension<Arc<AppServices>>,
    caller: Option<Extension<Caller>>,
    Json(body): Json<dto::CreateScheduleRequest>,
) -> axum::response::Response {
    let caller = caller.map(|Extension(c)| c);
    if let Err(resp) = authz::authorize(caller.as_ref(), Action::CreateSchedule) {
        return resp;
    }

    let weekday = match errors::parse_weekday(&body.weekday) {
        Ok(w) => w,
        Err(resp) => return resp,
    };
    let start_time = match errors::parse_time(&body.start_time) {
        Ok(t) => t,
        Err(resp) => return resp,
    };
    let end_time = match errors::parse_time(&body.end_time) {
        Ok(t) => t,
        Err(resp) => return resp,
    };

    let schedule = match services.store.create_schedule(NewSchedule {
        class_id: ClassId::from_i64(body.martial_class_id),
        weekday,
        start_time,
        end_time,
        location: body.location.unwrap_or_default(),
    }) {
        Ok(s) => s,
        Err(e) => return errors::domain_error_to_response(e),
    };

    (
        StatusCode::CREATED,
        Json(dto::schedule_to_json(services.store.as_ref(), &schedule)),
    )
        .into_response()
}

/// GET /schedules/:id - Unlike the listing, the detail view requires auth
pub async fn get_schedule(
    Extension(services): Extension<Arc<AppServices>>,
    caller: Option<Extension<Caller>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let caller = caller.map(|Extension(c)| c);
    if let Err(resp) = authz::authorize(caller.as_ref(), Action::GetSchedule) {
        return resp;
    }

    let id = match id.parse::<i64>() {
        Ok(v) => ScheduleId::from_i64(v),
        Err(_) => {
            return errors::json_error(
                StatusCode::BAD_REQUEST,
                "invalid_id",
                "invalid schedule id",
            );
        }
    };

    match services.store.get_schedule(id) {
        Some(schedule) => (
            StatusCode::OK,
            Json(dto::schedule_to_json(services.store.as_ref(), &schedule)),
        )
            .into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "schedule not found"),
    }
}

/// PUT/PATCH /schedules/:id - Partial update either way
pub async fn update_schedule(
    Extension(services): Extension<Arc<AppServices>>,
    caller: Option<Extension<Caller>>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateScheduleRequest>,
) -> axum::response::Response {
    let caller = caller.map(|Extension(c)| c);
    if let Err(resp) = authz::authorize(caller.as_ref(), Action::UpdateSchedule) {
        return resp;
    }

    let id = match id.parse::<i64>() {
        Ok(v) => ScheduleId::from_i64(v),
        Err(_) => {
            return errors::json_error(
                StatusCode::BAD_REQUEST,
                "invalid_id",
                "invalid schedule id",
            );
        }
    };

    let weekday = match body.weekday.as_deref().map(errors::parse_weekday).transpose() {
        Ok(w) => w,
        Err(resp) => return resp,
    };
    let start_time = match body.start_time.as_deref().map(errors::parse_time).transpose() {
        Ok(t) => t,
        Err(resp) => return resp,
    };
    let end_time = match body.end_time.as_deref().map(errors::parse_time).transpose() {
        Ok(t) => t,
        Err(resp) => return resp,
    };

    let patch = SchedulePatch {
        class_id: body.martial_class_id.map(ClassId::from_i64),
        weekday,
        start_time,
        end_time,
        location: body.location,
    };

    match services.store.update_schedule(id, patch) {
        Ok(schedule) => (
            StatusCode::OK,
            Json(dto::schedule_to_json(services.store.as_ref(), &schedule)),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// DELETE /schedules/:id
pub async fn delete_schedule(
    Extension(services): Extension<Arc<AppServices>>,
    caller: Option<Extension<Caller>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let caller = caller.map(|Extension(c)| c);
    if let Err(resp) = authz::authorize(caller.as_ref(), Action::DeleteSchedule) {
        return resp;
    }

    let id = match id.parse::<i64>() {
        Ok(v) => ScheduleId::from_i64(v),
        Err(_) => {
            return errors::json_error(
                StatusCode::BAD_REQUEST,
                "invalid_id",
                "invalid schedule id",
            );
        }
    };

    match services.store.delete_schedule(id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// GET /schedule/mine - Every slot of every class the caller is enrolled in
pub async fn my_schedule(
    Extension(services): Extension<Arc<AppServices>>,
    caller: Option<Extension<Caller>>,
) -> axum::response::Response {
    let caller = caller.map(|Extension(c)| c);
    let scope = match authz::authorize(caller.as_ref(), Action::MySchedule) {
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

    let items = dojo_infra::student_schedule(services.store.as_ref(), student_id)
        .iter()
        .map(|s| dto::schedule_to_json(services.store.as_ref(), s))
        .collect::<Vec<_>>();
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}
