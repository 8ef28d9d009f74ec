//! Date arithmetic for time-bound access.

use chrono::{Duration, NaiveDateTime};

use crate::server::error::{resource::ValidationError, Error};

/// Adds `days` to `from`, rejecting non-positive or overflowing durations.
///
/// # Returns
/// - `Ok(NaiveDateTime)` - `from + days`
/// - `Err(Error::Validation)` - `days` is zero, negative or too large to represent
pub fn add_days(from: NaiveDateTime, days: i64) -> Result<NaiveDateTime, Error> {
    if days <= 0 {
        return Err(ValidationError::InvalidDuration(days).into());
    }

    Duration::try_days(days)
        .and_then(|duration| from.checked_add_signed(duration))
        .ok_or_else(|| ValidationError::InvalidDuration(days).into())
}

/// Calculates a visitor's expiry after an extension of `additional_days`.
///
/// An expiry that has already passed restarts from `now` rather than stacking onto the
/// stale value, so a visitor extended long after expiring receives the full extension.
///
/// # Logic
/// - `current_expiry < now` - `now + additional_days`
/// - otherwise - `current_expiry + additional_days`
///
/// # Example
/// ```ignore
/// // Expired on day 30, extended on day 31 by 10 days: new expiry is day 41, not day 40
/// let expiry = extended_expiry(day_30, day_31, 10)?;
/// assert_eq!(expiry, day_41);
/// ```
pub fn extended_expiry(
    current_expiry: NaiveDateTime,
    now: NaiveDateTime,
    additional_days: i64,
) -> Result<NaiveDateTime, Error> {
    let base = if current_expiry < now {
        now
    } else {
        current_expiry
    };

    add_days(base, additional_days)
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate, NaiveDateTime};

    use super::*;

    fn day(offset: i64) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
            + Duration::days(offset)
    }

    mod extended_expiry {
        use super::*;

        /// Expect an expired visitor to be extended from now instead of the stale expiry
        #[test]
        fn restarts_from_now_when_expired() {
            let result = extended_expiry(day(30), day(31), 10);

            assert_eq!(result.unwrap(), day(41));
        }

        /// Expect an active visitor's extension to stack onto the current expiry
        #[test]
        fn stacks_when_still_active() {
            let result = extended_expiry(day(30), day(29), 10);

            assert_eq!(result.unwrap(), day(40));
        }

        /// Expect a validation error for a non-positive extension
        #[test]
        fn rejects_non_positive_days() {
            let result = extended_expiry(day(30), day(1), 0);

            assert!(matches!(
                result,
                Err(Error::Validation(ValidationError::InvalidDuration(0)))
            ));
        }
    }

    mod add_days {
        use super::*;

        /// Expect a validation error instead of a panic on overflow
        #[test]
        fn rejects_overflowing_duration() {
            let result = add_days(day(0), i64::MAX);

            assert!(result.is_err());
        }
    }
}
