//! Policy enforcement at the HTTP boundary.
//!
//! Handlers name the [`Action`] they perform; the access policy decides, and
//! denials are rendered here so every endpoint refuses in the same shape.

use axum::http::StatusCode;
use axum::response::Response;

use dojo_auth::{Action, Caller, Decision, DenyReason, Scope, decide};

use crate::app::errors;

/// Run the access policy for `action`, returning any granted scope.
///
/// `Err` carries the ready-to-send refusal: 401 when no credentials were
/// presented, 403 with the policy's explanation otherwise.
pub fn authorize(caller: Option<&Caller>, action: Action) -> Result<Option<Scope>, Response> {
    match decide(caller, action) {
        Decision::Allow => Ok(None),
        Decision::AllowWithScope(scope) => Ok(Some(scope)),
        Decision::Deny(DenyReason::Unauthenticated) => Err(errors::json_error(
            StatusCode::UNAUTHORIZED,
            "unauthenticated",
            "authentication required",
        )),
        Decision::Deny(DenyReason::Forbidden(reason)) => {
            Err(errors::json_error(StatusCode::FORBIDDEN, "forbidden", reason))
        }
    }
}
