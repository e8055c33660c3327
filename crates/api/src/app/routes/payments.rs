use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use dojo_auth::{Action, Caller};
use dojo_core::{EnrollmentId, PaymentId};
use dojo_domain::{NewPayment, PaymentStatus};

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::authz;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_payments).post(create_payment))
        .route("/:id", get(get_payment))
}

/// GET /payments
pub async fn list_payments(
    Extension(services): Extension<Arc<AppServices>>,
    caller: Option<Extension<Caller>>,
) -> axum::response::Response {
    let caller = caller.map(|Extension(c)| c);
    if let Err(resp) = authz::authorize(caller.as_ref(), Action::ListPayments) {
        return resp;
    }

    let items = services
        .store
        .list_payments()
        .iter()
        .map(|p| dto::payment_to_json(services.store.as_ref(), p))
        .collect::<Vec<_>>();
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

/// POST /payments
pub async fn create_payment(
    Extension(services): Extension<Arc<AppServices>>,
    caller: Option<Extension<Caller>>,
    Json(body): Json<dto::CreatePaymentRequest>,
) -> axum::response::Response {
    let caller = caller.map(|Extension(c)| c);
    if let Err(resp) = authz::authorize(caller.as_ref(), Action::CreatePayment) {
        return resp;
    }

    let status = match body.status.as_deref() {
        Some(s) => match errors::parse_payment_status(s) {
            Ok(st) => st,
            Err(resp) => return resp,
        },
        None => PaymentStatus::Pending,
    };

    let payment = match services.store.create_payment(NewPayment {
        enrollment_id: EnrollmentId::from_i64(body.enrollment_id),
        amount: body.amount,
        status,
    }) {
        Ok(p) => p,
        Err(e) => return errors::domain_error_to_response(e),
    };

    (
        StatusCode::CREATED,
        Json(dto::payment_to_json(services.store.as_ref(), &payment)),
    )
        .into_response()
}

/// GET /payments/:id
pub async fn get_payment(
    Extension(services): Extension<Arc<AppServices>>,
    caller: Option<Extension<Caller>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let caller = caller.map(|Extension(c)| c);
    if let Err(resp) = authz::authorize(caller.as_ref(), Action::GetPayment) {
        return resp;
    }

    let id = match id.parse::<i64>() {
        Ok(v) => PaymentId::from_i64(v),
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid payment id");
        }
    };

    match services.store.get_payment(id) {
        Some(payment) => (
            StatusCode::OK,
            Json(dto::payment_to_json(services.store.as_ref(), &payment)),
        )
            .into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "payment not found"),
    }
}
