pub mod leave_application;
pub mod leave_balance;
pub mod leave_type;
pub mod review;

use actix_web::HttpResponse;

use crate::leave::error::LeaveError;

/// Maps a lifecycle failure onto an HTTP response. Validation failures carry
/// their specific message; persistence failures only the generic retry text
/// (the cause is already in the logs).
pub(crate) fn leave_error_response(err: &LeaveError) -> HttpResponse {
    let body = serde_json::json!({ "message": err.to_string() });
    match err {
        LeaveError::NotAuthenticated => HttpResponse::Unauthorized().json(body),
        LeaveError::Unauthorized => HttpResponse::Forbidden().json(body),
        LeaveError::InvalidInput { .. }
        | LeaveError::InvalidRange
        | LeaveError::InsufficientBalance { .. }
        | LeaveError::InvalidState { .. } => HttpResponse::BadRequest().json(body),
        LeaveError::NotFound => HttpResponse::NotFound().json(body),
        LeaveError::PersistenceFailure { .. } => HttpResponse::InternalServerError().json(body),
    }
}
