use crate::auth::auth::AuthUser;
use crate::leave::dates::{calculate_leave_days, validate_date_range};
use crate::leave::error::LeaveError;
use crate::leave::lifecycle::{check_balance, ensure_editable, ensure_owner, validate_reason};
use crate::model::leave_application::LeaveApplication;
use crate::model::leave_balance::LeaveBalance;
use crate::utils::leave_type_cache;
use actix_web::{HttpResponse, Responder, web};
use chrono::{Datelike, Utc};
use serde::Deserialize;
use sqlx::MySqlPool;
use utoipa::ToSchema;

use super::leave_error_response;

#[derive(Deserialize, ToSchema)]
pub struct CreateLeaveApplication {
    #[schema(example = 1)]
    pub leave_type_id: u64,
    #[schema(example = "2026-01-01", format = "date", value_type = String)]
    pub start_date: chrono::NaiveDate,
    #[schema(example = "2026-01-03", format = "date", value_type = String)]
    pub end_date: chrono::NaiveDate,
    #[schema(example = "Medical appointment")]
    pub reason: String,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateLeaveApplication {
    #[schema(example = "2026-01-02", format = "date", value_type = String)]
    pub start_date: chrono::NaiveDate,
    #[schema(example = "2026-01-04", format = "date", value_type = String)]
    pub end_date: chrono::NaiveDate,
    #[schema(example = "Medical appointment (rescheduled)")]
    pub reason: String,
}

/// The balance year is derived once per operation and passed down, so a
/// request running across midnight on Dec 31 can't read two different years.
fn current_year() -> i32 {
    Utc::now().date_naive().year()
}

pub(crate) async fn fetch_balance(
    pool: &MySqlPool,
    student_id: u64,
    leave_type_id: u64,
    year: i32,
) -> Result<Option<LeaveBalance>, sqlx::Error> {
    sqlx::query_as::<_, LeaveBalance>(
        r#"
        SELECT id, student_id, leave_type_id, year, total_days, used_days, remaining_days
        FROM leave_balance
        WHERE student_id = ? AND leave_type_id = ? AND year = ?
        "#,
    )
    .bind(student_id)
    .bind(leave_type_id)
    .bind(year)
    .fetch_optional(pool)
    .await
}

async fn fetch_application(
    pool: &MySqlPool,
    id: u64,
) -> Result<Option<LeaveApplication>, sqlx::Error> {
    sqlx::query_as::<_, LeaveApplication>(
        r#"
        SELECT id, student_id, leave_type_id, start_date, end_date, reason, status,
               admin_comments, approved_by, approved_at, created_at
        FROM leave_applications
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/* =========================
Submit leave application
========================= */
/// Swagger doc for submit_leave endpoint
#[utoipa::path(
    post,
    path = "/api/v1/leave",
    request_body(
        content = CreateLeaveApplication,
        description = "Leave application payload",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Leave application submitted",
         body = Object,
         example = json!({
            "message": "Leave application submitted",
            "status": "pending"
         })
        ),
        (status = 400, description = "Invalid dates, reason, or insufficient balance"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn submit_leave(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    payload: web::Json<CreateLeaveApplication>,
) -> actix_web::Result<impl Responder> {
    auth.require_student()?;

    let year = current_year();

    if let Err(e) = validate_date_range(payload.start_date, payload.end_date) {
        return Ok(leave_error_response(&e));
    }
    if let Err(e) = validate_reason(&payload.reason) {
        return Ok(leave_error_response(&e));
    }

    let leave_days = calculate_leave_days(payload.start_date, payload.end_date);

    match leave_type_cache::find(pool.get_ref(), payload.leave_type_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(leave_error_response(&LeaveError::invalid_input(
                "Unknown leave type",
            )));
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to load leave types");
            return Err(actix_web::error::ErrorInternalServerError(
                "Internal Server Error",
            ));
        }
    }

    let balance = fetch_balance(pool.get_ref(), auth.user_id, payload.leave_type_id, year)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, student_id = auth.user_id, "Failed to fetch leave balance");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    // A student with no provisioned balance row is not capped.
    if let Err(e) = check_balance(leave_days, balance.as_ref()) {
        return Ok(leave_error_response(&e));
    }

    let result = sqlx::query(
        r#"
        INSERT INTO leave_applications
            (student_id, leave_type_id, start_date, end_date, reason, status)
        VALUES (?, ?, ?, ?, ?, 'pending')
        "#,
    )
    .bind(auth.user_id)
    .bind(payload.leave_type_id)
    .bind(payload.start_date)
    .bind(payload.end_date)
    .bind(payload.reason.trim())
    .execute(pool.get_ref())
    .await;

    if let Err(e) = result {
        tracing::error!(error = %e, student_id = auth.user_id, "Failed to submit leave application");
        return Ok(leave_error_response(&LeaveError::PersistenceFailure {
            message: "Failed to submit leave application. Please try again.".into(),
        }));
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Leave application submitted",
        "status": "pending"
    })))
}

/* =========================
Update leave application (owner, pending only)
========================= */
/// Swagger doc for update_leave endpoint
#[utoipa::path(
    put,
    path = "/api/v1/leave/{leave_id}",
    params(
        ("leave_id" = u64, Path, description = "ID of the leave application to update")
    ),
    request_body = UpdateLeaveApplication,
    responses(
        (status = 200, description = "Leave application updated", body = Object, example = json!({
            "message": "Leave application updated"
        })),
        (status = 400, description = "Invalid payload or not pending", body = Object, example = json!({
            "message": "Only pending applications can be edited"
        })),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Leave application not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn update_leave(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
    payload: web::Json<UpdateLeaveApplication>,
) -> actix_web::Result<impl Responder> {
    let leave_id = path.into_inner();
    let year = current_year();

    let application = fetch_application(pool.get_ref(), leave_id)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, leave_id, "Failed to fetch leave application");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    let application = match application {
        Some(app) => app,
        None => return Ok(leave_error_response(&LeaveError::NotFound)),
    };

    if let Err(e) = ensure_owner(&application, auth.user_id) {
        return Ok(leave_error_response(&e));
    }
    if let Err(e) = ensure_editable(&application) {
        return Ok(leave_error_response(&e));
    }

    if let Err(e) = validate_date_range(payload.start_date, payload.end_date) {
        return Ok(leave_error_response(&e));
    }
    if let Err(e) = validate_reason(&payload.reason) {
        return Ok(leave_error_response(&e));
    }

    let leave_days = calculate_leave_days(payload.start_date, payload.end_date);

    // The leave type is fixed at creation; the re-check runs against it.
    let balance = fetch_balance(
        pool.get_ref(),
        auth.user_id,
        application.leave_type_id,
        year,
    )
    .await
    .map_err(|e| {
        tracing::error!(error = %e, student_id = auth.user_id, "Failed to fetch leave balance");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    if let Err(e) = check_balance(leave_days, balance.as_ref()) {
        return Ok(leave_error_response(&e));
    }

    let result = sqlx::query(
        r#"
        UPDATE leave_applications
        SET start_date = ?, end_date = ?, reason = ?
        WHERE id = ?
        "#,
    )
    .bind(payload.start_date)
    .bind(payload.end_date)
    .bind(payload.reason.trim())
    .bind(leave_id)
    .execute(pool.get_ref())
    .await;

    if let Err(e) = result {
        tracing::error!(error = %e, leave_id, "Failed to update leave application");
        return Ok(leave_error_response(&LeaveError::PersistenceFailure {
            message: "Failed to update leave application. Please try again.".into(),
        }));
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Leave application updated"
    })))
}

/* =========================
Cancel leave application (owner, pending only)
========================= */
/// Swagger doc for cancel_leave endpoint
#[utoipa::path(
    post,
    path = "/api/v1/leave/{leave_id}/cancel",
    params(
        ("leave_id" = u64, Path, description = "ID of the leave application to cancel")
    ),
    responses(
        (status = 200, description = "Leave application cancelled", body = Object, example = json!({
            "message": "Leave application cancelled"
        })),
        (status = 400, description = "Not pending", body = Object, example = json!({
            "message": "Only pending applications can be edited"
        })),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Leave application not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn cancel_leave(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    let leave_id = path.into_inner();

    let application = fetch_application(pool.get_ref(), leave_id)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, leave_id, "Failed to fetch leave application");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    let application = match application {
        Some(app) => app,
        None => return Ok(leave_error_response(&LeaveError::NotFound)),
    };

    if let Err(e) = ensure_owner(&application, auth.user_id) {
        return Ok(leave_error_response(&e));
    }
    if let Err(e) = ensure_editable(&application) {
        return Ok(leave_error_response(&e));
    }

    let result = sqlx::query(
        r#"
        UPDATE leave_applications
        SET status = 'cancelled'
        WHERE id = ?
        AND status = 'pending'
        "#,
    )
    .bind(leave_id)
    .execute(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!(error = %e, leave_id, "Failed to cancel leave application");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    if result.rows_affected() == 0 {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "message": "Leave application not found or already processed"
        })));
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Leave application cancelled"
    })))
}

/* =========================
Own applications (student)
========================= */
/// Swagger doc for my_leave_list endpoint
#[utoipa::path(
    get,
    path = "/api/v1/leave",
    responses(
        (status = 200, description = "The caller's leave applications, newest first"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn my_leave_list(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> actix_web::Result<impl Responder> {
    auth.require_student()?;

    let applications = sqlx::query_as::<_, LeaveApplication>(
        r#"
        SELECT id, student_id, leave_type_id, start_date, end_date, reason, status,
               admin_comments, approved_by, approved_at, created_at
        FROM leave_applications
        WHERE student_id = ?
        ORDER BY created_at DESC
        "#,
    )
    .bind(auth.user_id)
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!(error = %e, student_id = auth.user_id, "Failed to fetch leave applications");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(applications))
}

/* =========================
Single application (owner or admin)
========================= */
/// Swagger doc for get_leave endpoint
#[utoipa::path(
    get,
    path = "/api/v1/leave/{leave_id}",
    params(
        ("leave_id" = u64, Path, description = "ID of the leave application to fetch")
    ),
    responses(
        (status = 200, description = "Leave application found"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Leave application not found", body = Object, example = json!({
            "message": "Leave application not found"
        }))
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn get_leave(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    let leave_id = path.into_inner();

    let application = fetch_application(pool.get_ref(), leave_id)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, leave_id, "Failed to fetch leave application");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    let application = match application {
        Some(app) => app,
        None => return Ok(leave_error_response(&LeaveError::NotFound)),
    };

    if !auth.is_admin() {
        if let Err(e) = ensure_owner(&application, auth.user_id) {
            return Ok(leave_error_response(&e));
        }
    }

    Ok(HttpResponse::Ok().json(application))
}
