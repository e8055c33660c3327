use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::NaiveTime;
use serde_json::json;

use dojo_auth::{PasswordError, Role, TokenError};
use dojo_core::DomainError;
use dojo_domain::{PaymentStatus, Weekday};

/// Map a [`DomainError`] onto the wire: status code plus `{error, message}`.
pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => {
            json_error(StatusCode::BAD_REQUEST, "validation_error", msg)
        }
        DomainError::Unauthenticated => json_error(
            StatusCode::UNAUTHORIZED,
            "unauthenticated",
            "authentication required",
        ),
        DomainError::Forbidden(msg) => json_error(StatusCode::FORBIDDEN, "forbidden", msg),
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
        DomainError::Conflict(msg) => json_error(StatusCode::CONFLICT, "conflict", msg),
    }
}

pub fn token_error_to_response(err: TokenError) -> axum::response::Response {
    match err {
        TokenError::Invalid => json_error(
            StatusCode::UNAUTHORIZED,
            "unauthenticated",
            "invalid or expired token",
        ),
        TokenError::Encoding(msg) => {
            tracing::error!("token encoding failed: {msg}");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "token issuance failed",
            )
        }
    }
}

pub fn password_error_to_response(err: PasswordError) -> axum::response::Response {
    tracing::error!("password hashing failed: {err}");
    json_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        "internal_error",
        "password processing failed",
    )
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

pub fn parse_role(s: &str) -> Result<Role, axum::response::Response> {
    s.parse().map_err(domain_error_to_response)
}

pub fn parse_weekday(s: &str) -> Result<Weekday, axum::response::Response> {
    s.parse().map_err(domain_error_to_response)
}

pub fn parse_time(s: &str) -> Result<NaiveTime, axum::response::Response> {
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .map_err(|_| {
            json_error(
                StatusCode::BAD_REQUEST,
                "validation_error",
                format!("invalid time '{s}', expected HH:MM or HH:MM:SS"),
            )
        })
}

pub fn parse_payment_status(s: &str) -> Result<PaymentStatus, axum::response::Response> {
    match s.to_lowercase().as_str() {
        "paid" => Ok(PaymentStatus::Paid),
        "pending" => Ok(PaymentStatus::Pending),
        _ => Err(json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "status must be one of: paid, pending",
        )),
    }
}
