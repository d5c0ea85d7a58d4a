use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Application states. `pending` is the only state a student can still act
/// on; `approved` and `rejected` are set by an admin decision; `cancelled`
/// is set by the owning student withdrawing a pending application.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_stored_status_strings() {
        assert_eq!("pending".parse::<LeaveStatus>(), Ok(LeaveStatus::Pending));
        assert_eq!("approved".parse::<LeaveStatus>(), Ok(LeaveStatus::Approved));
        assert_eq!("rejected".parse::<LeaveStatus>(), Ok(LeaveStatus::Rejected));
        assert_eq!(
            "cancelled".parse::<LeaveStatus>(),
            Ok(LeaveStatus::Cancelled)
        );
    }

    #[test]
    fn unknown_status_does_not_parse() {
        assert!("archived".parse::<LeaveStatus>().is_err());
    }

    #[test]
    fn renders_lowercase_for_storage() {
        assert_eq!(LeaveStatus::Pending.to_string(), "pending");
        assert_eq!(LeaveStatus::Cancelled.to_string(), "cancelled");
    }
}
