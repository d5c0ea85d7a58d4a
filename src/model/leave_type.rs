use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Immutable reference data: a named category of leave with an annual cap.
/// Seeded out of band; the service only ever reads it.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "name": "Sick Leave",
        "description": "Medical leave with certificate",
        "max_days_per_year": 10
    })
)]
pub struct LeaveType {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = "Sick Leave")]
    pub name: String,

    #[schema(example = "Medical leave with certificate", nullable = true)]
    pub description: Option<String>,

    #[schema(example = 10)]
    pub max_days_per_year: i64,
}
