use crate::auth::auth::AuthUser;
use crate::model::leave_type::LeaveType;
use crate::utils::leave_type_cache;
use actix_web::{HttpResponse, Responder, web};
use sqlx::MySqlPool;

/// Swagger doc for list_leave_types endpoint
#[utoipa::path(
    get,
    path = "/api/v1/leave-types",
    responses(
        (status = 200, description = "Leave type catalog", body = [LeaveType]),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn list_leave_types(
    _auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> actix_web::Result<impl Responder> {
    let types = leave_type_cache::all(pool.get_ref()).await.map_err(|e| {
        tracing::error!(error = %e, "Failed to load leave types");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(types.as_ref()))
}
