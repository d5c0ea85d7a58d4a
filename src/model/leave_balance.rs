use serde::{Deserialize, Serialize};

/// Per (student, leave type, year) entitlement counters. Provisioned by an
/// admin; the lifecycle only ever decrements `remaining_days` on approval.
/// Invariant: remaining_days = total_days - used_days at provisioning time.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct LeaveBalance {
    pub id: u64,
    pub student_id: u64,
    pub leave_type_id: u64,
    pub year: i32,
    pub total_days: i64,
    pub used_days: i64,
    pub remaining_days: i64,
}
