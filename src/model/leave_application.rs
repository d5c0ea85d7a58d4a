use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A student's request for time off against a specific leave type and date
/// range. `student_id` and `leave_type_id` are fixed at creation; only a
/// pending application may be edited, and only by its owner.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct LeaveApplication {
    pub id: u64,
    pub student_id: u64,
    pub leave_type_id: u64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
    pub status: String,
    pub admin_comments: Option<String>,
    pub approved_by: Option<u64>,
    pub approved_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
}
