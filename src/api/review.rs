use crate::auth::auth::AuthUser;
use crate::leave::dates::calculate_leave_days;
use crate::model::leave_application::LeaveApplication;
use actix_web::{HttpResponse, Responder, web};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{MySqlPool, prelude::FromRow};
use utoipa::{IntoParams, ToSchema};

#[derive(Deserialize, ToSchema)]
pub struct ReviewDecision {
    #[schema(example = "Approved. Get well soon.", nullable = true)]
    pub admin_comments: Option<String>,
}

#[derive(Serialize, FromRow, ToSchema)]
pub struct ApplicationRow {
    #[schema(example = 1)]
    /// leave application id
    pub id: u64,
    /// student who applied
    #[schema(example = 1000)]
    pub student_id: u64,
    #[schema(example = "Priya Sharma")]
    pub student_name: String,
    #[schema(example = "priya@vitc.ac.in")]
    pub student_email: String,
    #[schema(example = "Sick Leave")]
    pub leave_type: String,
    #[schema(example = "2026-01-01", format = "date", value_type = String)]
    pub start_date: NaiveDate,
    #[schema(example = "2026-01-03", format = "date", value_type = String)]
    pub end_date: NaiveDate,
    #[schema(example = "Fever")]
    pub reason: String,
    #[schema(example = "pending", value_type = String)]
    pub status: Option<String>,
    #[schema(example = "2026-01-01T00:00:00Z", format = "date-time", value_type = String)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, ToSchema)]
#[schema(example = json!({
    "data": [
        {
            "id": 1,
            "student_id": 1000,
            "student_name": "Priya Sharma",
            "student_email": "priya@vitc.ac.in",
            "leave_type": "Sick Leave",
            "start_date": "2026-01-01",
            "end_date": "2026-01-03",
            "reason": "Fever",
            "status": "pending",
            "created_at": "2026-01-01T00:00:00Z"
        }
    ],
    "page": 1,
    "per_page": 10,
    "total": 1
}))]
pub struct ApplicationListResponse {
    pub data: Vec<ApplicationRow>,
    #[schema(example = 1)]
    pub page: u32,
    #[schema(example = 10)]
    pub per_page: u32,
    #[schema(example = 1)]
    pub total: i64,
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct ApplicationFilter {
    #[schema(example = 123)]
    /// Filter by student ID
    pub student_id: Option<u64>,
    #[schema(example = "pending")]
    /// Filter by application status
    pub status: Option<String>,
    #[schema(example = 1)]
    /// Pagination page number (start with 1)
    pub page: Option<u64>, // 1-based
    #[schema(example = 10)]
    /// Pagination per page number
    pub per_page: Option<u64>, // items per page
}

// Helper enum for typed SQLx binding
enum FilterValue<'a> {
    U64(u64),
    Str(&'a str),
}

/* =========================
Approve application (Admin)
========================= */
/// Swagger doc for approve_leave endpoint
#[utoipa::path(
    put,
    path = "/api/v1/leave/{leave_id}/approve",
    params(
        ("leave_id" = u64, Path, description = "ID of the leave application to approve")
    ),
    request_body = ReviewDecision,
    responses(
        (status = 200, description = "Leave application approved", body = Object, example = json!({
            "message": "Leave application approved"
        })),
        (status = 400, description = "Not found or already processed", body = Object, example = json!({
            "message": "Leave application not found or already processed"
        })),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Review"
)]
pub async fn approve_leave(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
    payload: web::Json<ReviewDecision>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    let leave_id = path.into_inner();
    let year = Utc::now().date_naive().year();

    // Status write and ledger decrement happen in one transaction. The
    // balance row is locked FOR UPDATE, so two admins approving overlapping
    // applications for the same student/type/year are serialized instead of
    // both decrementing against a stale read.
    let mut tx = pool.begin().await.map_err(|e| {
        tracing::error!(error = %e, leave_id, "Failed to open transaction");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    let application = sqlx::query_as::<_, LeaveApplication>(
        r#"
        SELECT id, student_id, leave_type_id, start_date, end_date, reason, status,
               admin_comments, approved_by, approved_at, created_at
        FROM leave_applications
        WHERE id = ?
        AND status = 'pending'
        FOR UPDATE
        "#,
    )
    .bind(leave_id)
    .fetch_optional(&mut *tx)
    .await
    .map_err(|e| {
        tracing::error!(error = %e, leave_id, "Approve leave failed");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    let application = match application {
        Some(app) => app,
        None => {
            return Ok(HttpResponse::BadRequest().json(serde_json::json!({
                "message": "Leave application not found or already processed"
            })));
        }
    };

    // Day count is recomputed from the record's own dates, not the request.
    let leave_days = calculate_leave_days(application.start_date, application.end_date);

    let balance_id = sqlx::query_scalar::<_, u64>(
        r#"
        SELECT id FROM leave_balance
        WHERE student_id = ? AND leave_type_id = ? AND year = ?
        FOR UPDATE
        "#,
    )
    .bind(application.student_id)
    .bind(application.leave_type_id)
    .bind(year)
    .fetch_optional(&mut *tx)
    .await
    .map_err(|e| {
        tracing::error!(error = %e, leave_id, "Failed to lock leave balance");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    sqlx::query(
        r#"
        UPDATE leave_applications
        SET status = 'approved', admin_comments = ?, approved_by = ?, approved_at = NOW()
        WHERE id = ?
        AND status = 'pending'
        "#,
    )
    .bind(payload.admin_comments.as_deref())
    .bind(auth.user_id)
    .bind(leave_id)
    .execute(&mut *tx)
    .await
    .map_err(|e| {
        tracing::error!(error = %e, leave_id, "Approve leave failed");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    match balance_id {
        Some(balance_id) => {
            sqlx::query(
                r#"
                UPDATE leave_balance
                SET remaining_days = remaining_days - ?
                WHERE id = ?
                "#,
            )
            .bind(leave_days)
            .bind(balance_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, leave_id, "Balance decrement failed");
                actix_web::error::ErrorInternalServerError("Internal Server Error")
            })?;
        }
        None => {
            // No provisioned balance row: nothing is decremented and nothing
            // is created, so the ledger drifts from the approved record.
            tracing::warn!(
                leave_id,
                student_id = application.student_id,
                leave_type_id = application.leave_type_id,
                year,
                "Approved application has no balance row; ledger not decremented"
            );
        }
    }

    tx.commit().await.map_err(|e| {
        tracing::error!(error = %e, leave_id, "Failed to commit approval");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Leave application approved"
    })))
}

/* =========================
Reject application (Admin)
========================= */
/// Swagger doc for reject_leave endpoint
#[utoipa::path(
    put,
    path = "/api/v1/leave/{leave_id}/reject",
    params(
        ("leave_id" = u64, Path, description = "ID of the leave application to reject")
    ),
    request_body = ReviewDecision,
    responses(
        (status = 200, description = "Leave application rejected", body = Object, example = json!({
            "message": "Leave application rejected"
        })),
        (status = 400, description = "Not found or already processed", body = Object, example = json!({
            "message": "Leave application not found or already processed"
        })),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Review"
)]
pub async fn reject_leave(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
    payload: web::Json<ReviewDecision>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    let leave_id = path.into_inner();

    // Rejection never touches the ledger.
    let result = sqlx::query(
        r#"
        UPDATE leave_applications
        SET status = 'rejected', admin_comments = ?, approved_by = ?, approved_at = NOW()
        WHERE id = ?
        AND status = 'pending'
        "#,
    )
    .bind(payload.admin_comments.as_deref())
    .bind(auth.user_id)
    .bind(leave_id)
    .execute(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!(error = %e, leave_id, "Reject leave failed");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    if result.rows_affected() == 0 {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "message": "Leave application not found or already processed"
        })));
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Leave application rejected"
    })))
}

/* =========================
Pending queue (Admin)
========================= */
/// Swagger doc for pending_applications endpoint
#[utoipa::path(
    get,
    path = "/api/v1/admin/applications/pending",
    responses(
        (status = 200, description = "Pending applications, oldest first", body = [ApplicationRow]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Review"
)]
pub async fn pending_applications(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    let applications = sqlx::query_as::<_, ApplicationRow>(
        r#"
        SELECT la.id, la.student_id, p.full_name AS student_name, p.email AS student_email,
               lt.name AS leave_type, la.start_date, la.end_date, la.reason, la.status,
               la.created_at
        FROM leave_applications la
        JOIN profiles p ON p.id = la.student_id
        JOIN leave_types lt ON lt.id = la.leave_type_id
        WHERE la.status = 'pending'
        ORDER BY la.created_at ASC
        "#,
    )
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "Failed to fetch pending applications");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(applications))
}

/* =========================
All applications (Admin)
========================= */
/// Swagger doc for application_list endpoint
#[utoipa::path(
    get,
    path = "/api/v1/admin/applications",
    params(ApplicationFilter),
    responses(
        (status = 200, description = "Paginated application list", body = ApplicationListResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Review"
)]
pub async fn application_list(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    query: web::Query<ApplicationFilter>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    // -------------------------
    // Pagination
    // -------------------------
    let per_page = query.per_page.unwrap_or(10).min(100);
    let page = query.page.unwrap_or(1).max(1);
    let offset = (page - 1) * per_page;

    // -------------------------
    // WHERE clause
    // -------------------------
    let mut where_sql = String::from(" WHERE 1=1");
    let mut args: Vec<FilterValue> = Vec::new();

    if let Some(student_id) = query.student_id {
        where_sql.push_str(" AND la.student_id = ?");
        args.push(FilterValue::U64(student_id));
    }

    if let Some(status) = query.status.as_deref() {
        where_sql.push_str(" AND la.status = ?");
        args.push(FilterValue::Str(status));
    }

    // -------------------------
    // COUNT query
    // -------------------------
    let count_sql = format!(
        "SELECT COUNT(*) FROM leave_applications la{}",
        where_sql
    );

    let mut count_q = sqlx::query_scalar::<_, i64>(&count_sql);
    for arg in &args {
        count_q = match arg {
            FilterValue::U64(v) => count_q.bind(*v),
            FilterValue::Str(s) => count_q.bind(*s),
        };
    }

    let total = count_q.fetch_one(pool.get_ref()).await.map_err(|e| {
        tracing::error!(error = %e, "Failed to count leave applications");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    // -------------------------
    // DATA query
    // -------------------------
    let data_sql = format!(
        r#"
        SELECT la.id, la.student_id, p.full_name AS student_name, p.email AS student_email,
               lt.name AS leave_type, la.start_date, la.end_date, la.reason, la.status,
               la.created_at
        FROM leave_applications la
        JOIN profiles p ON p.id = la.student_id
        JOIN leave_types lt ON lt.id = la.leave_type_id
        {}
        ORDER BY la.created_at DESC
        LIMIT ? OFFSET ?
        "#,
        where_sql
    );

    let mut data_q = sqlx::query_as::<_, ApplicationRow>(&data_sql);
    for arg in args {
        data_q = match arg {
            FilterValue::U64(v) => data_q.bind(v),
            FilterValue::Str(s) => data_q.bind(s),
        };
    }

    let applications = data_q
        .bind(per_page)
        .bind(offset)
        .fetch_all(pool.get_ref())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to fetch application list");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    // -------------------------
    // Response
    // -------------------------
    let response = ApplicationListResponse {
        data: applications,
        page: page as u32,
        per_page: per_page as u32,
        total,
    };

    Ok(HttpResponse::Ok().json(response))
}
