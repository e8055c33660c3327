//! Admin-only aggregate views.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use dojo_auth::{Action, Caller};

use crate::app::services::AppServices;
use crate::authz;

pub fn router() -> Router {
    Router::new().route("/stats", get(stats))
}

/// GET /admin/stats - Headline counts for the dashboard
pub async fn stats(
    Extension(services): Extension<Arc<AppServices>>,
    caller: Option<Extension<Caller>>,
) -> axum::response::Response {
    let caller = caller.map(|Extension(c)| c);
    if let Err(resp) = authz::authorize(caller.as_ref(), Action::AdminStats) {
        return resp;
    }

    (
        StatusCode::OK,
        Json(dojo_infra::dojo_stats(services.store.as_ref())),
    )
        .into_response()
}

/// GET /reports/enrollments - Enrollment counts per class, busiest first
pub async fn enrollment_report(
    Extension(services): Extension<Arc<AppServices>>,
    caller: Option<Extension<Caller>>,
) -> axum::response::Response {
    let caller = caller.map(|Extension(c)| c);
    if let Err(resp) = authz::authorize(caller.as_ref(), Action::EnrollmentReport) {
        return resp;
    }

    (
        StatusCode::OK,
        Json(dojo_infra::enrollment_report(services.store.as_ref())),
    )
        .into_response()
}
