use chrono::NaiveDate;

use crate::leave::error::LeaveError;

/// Rejects a range whose start falls strictly after its end. Missing or
/// malformed dates never reach this point: the JSON layer rejects them
/// before deserialization completes.
pub fn validate_date_range(start: NaiveDate, end: NaiveDate) -> Result<(), LeaveError> {
    if start > end {
        return Err(LeaveError::InvalidRange);
    }
    Ok(())
}

/// Inclusive day count: both endpoints are leave days, so a single-day
/// application counts as 1, not 0.
pub fn calculate_leave_days(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days().abs() + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn single_day_counts_as_one() {
        assert_eq!(calculate_leave_days(d("2024-06-10"), d("2024-06-10")), 1);
    }

    #[test]
    fn five_day_range_counts_inclusively() {
        assert_eq!(calculate_leave_days(d("2024-01-01"), d("2024-01-05")), 5);
    }

    #[test]
    fn reversed_range_still_counts_absolute_days() {
        assert_eq!(calculate_leave_days(d("2024-01-05"), d("2024-01-01")), 5);
    }

    #[test]
    fn range_spanning_month_boundary() {
        assert_eq!(calculate_leave_days(d("2024-01-30"), d("2024-02-02")), 4);
    }

    #[test]
    fn ordered_range_is_valid() {
        assert!(validate_date_range(d("2024-01-01"), d("2024-01-05")).is_ok());
        assert!(validate_date_range(d("2024-01-01"), d("2024-01-01")).is_ok());
    }

    #[test]
    fn reversed_range_is_rejected() {
        assert_eq!(
            validate_date_range(d("2024-01-05"), d("2024-01-01")),
            Err(LeaveError::InvalidRange)
        );
    }
}
