use derive_more::{Display, Error};

/// Failure taxonomy for the leave lifecycle. Every operation reports one of
/// these instead of raising; the API layer maps each variant onto an HTTP
/// status and surfaces the message verbatim, except `PersistenceFailure`
/// which carries a generic retry message (the underlying cause goes to the
/// logs only).
#[derive(Debug, Display, Error, PartialEq, Eq)]
pub enum LeaveError {
    #[display(fmt = "Not authenticated")]
    NotAuthenticated,

    #[display(fmt = "Unauthorized")]
    Unauthorized,

    #[display(fmt = "{}", message)]
    InvalidInput { message: String },

    #[display(fmt = "Start date must be before end date")]
    InvalidRange,

    #[display(fmt = "You only have {} days available for this leave type", remaining)]
    InsufficientBalance { remaining: i64 },

    #[display(fmt = "{}", message)]
    InvalidState { message: String },

    #[display(fmt = "Leave application not found")]
    NotFound,

    #[display(fmt = "{}", message)]
    PersistenceFailure { message: String },
}

impl LeaveError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        LeaveError::InvalidInput {
            message: message.into(),
        }
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        LeaveError::InvalidState {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_balance_reports_exact_remaining_count() {
        let err = LeaveError::InsufficientBalance { remaining: 3 };
        assert_eq!(
            err.to_string(),
            "You only have 3 days available for this leave type"
        );
    }

    #[test]
    fn invalid_range_message_is_user_actionable() {
        assert_eq!(
            LeaveError::InvalidRange.to_string(),
            "Start date must be before end date"
        );
    }
}
