use crate::auth::auth::AuthUser;
use crate::leave::error::LeaveError;
use crate::utils::leave_type_cache;
use actix_web::{HttpResponse, Responder, web};
use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{MySqlPool, prelude::FromRow};
use utoipa::ToSchema;

use super::leave_error_response;

#[derive(Serialize, FromRow, ToSchema)]
#[schema(example = json!({
    "leave_type": "Sick Leave",
    "total_days": 10,
    "used_days": 3,
    "remaining_days": 7
}))]
pub struct BalanceOverview {
    #[schema(example = "Sick Leave")]
    pub leave_type: String,
    #[schema(example = 10)]
    pub total_days: i64,
    #[schema(example = 3)]
    pub used_days: i64,
    #[schema(example = 7)]
    pub remaining_days: i64,
}

#[derive(Deserialize, ToSchema)]
pub struct ProvisionBalance {
    #[schema(example = 1000)]
    pub student_id: u64,
    #[schema(example = 1)]
    pub leave_type_id: u64,
    #[schema(example = 2026)]
    pub year: i32,
    #[schema(example = 10)]
    pub total_days: i64,
    #[schema(example = 0, nullable = true)]
    pub used_days: Option<i64>,
}

/* =========================
Balance overview (student dashboard)
========================= */
/// Swagger doc for my_balances endpoint
#[utoipa::path(
    get,
    path = "/api/v1/balance",
    responses(
        (status = 200, description = "The caller's balances for the current year", body = [BalanceOverview]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Balance"
)]
pub async fn my_balances(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> actix_web::Result<impl Responder> {
    auth.require_student()?;

    let year = Utc::now().date_naive().year();

    let balances = sqlx::query_as::<_, BalanceOverview>(
        r#"
        SELECT lt.name AS leave_type, lb.total_days, lb.used_days, lb.remaining_days
        FROM leave_balance lb
        JOIN leave_types lt ON lt.id = lb.leave_type_id
        WHERE lb.student_id = ? AND lb.year = ?
        ORDER BY lt.id
        "#,
    )
    .bind(auth.user_id)
    .bind(year)
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!(error = %e, student_id = auth.user_id, "Failed to fetch balances");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(balances))
}

/* =========================
Provision balance (Admin)
========================= */
/// Swagger doc for provision_balance endpoint
#[utoipa::path(
    post,
    path = "/api/v1/admin/balance",
    request_body = ProvisionBalance,
    responses(
        (status = 200, description = "Balance provisioned", body = Object, example = json!({
            "message": "Leave balance provisioned"
        })),
        (status = 400, description = "Invalid counters or unknown leave type"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Balance"
)]
pub async fn provision_balance(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    payload: web::Json<ProvisionBalance>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    let used_days = payload.used_days.unwrap_or(0);

    if payload.total_days < 0 || used_days < 0 || used_days > payload.total_days {
        return Ok(leave_error_response(&LeaveError::invalid_input(
            "Day counters must be non-negative and used_days cannot exceed total_days",
        )));
    }

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

    let remaining_days = payload.total_days - used_days;

    let result = sqlx::query(
        r#"
        INSERT INTO leave_balance
            (student_id, leave_type_id, year, total_days, used_days, remaining_days)
        VALUES (?, ?, ?, ?, ?, ?)
        ON DUPLICATE KEY UPDATE
            total_days = VALUES(total_days),
            used_days = VALUES(used_days),
            remaining_days = VALUES(remaining_days)
        "#,
    )
    .bind(payload.student_id)
    .bind(payload.leave_type_id)
    .bind(payload.year)
    .bind(payload.total_days)
    .bind(used_days)
    .bind(remaining_days)
    .execute(pool.get_ref())
    .await;

    if let Err(e) = result {
        tracing::error!(error = %e, student_id = payload.student_id, "Failed to provision balance");
        return Ok(leave_error_response(&LeaveError::PersistenceFailure {
            message: "Failed to save leave balance. Please try again.".into(),
        }));
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Leave balance provisioned"
    })))
}
