//! Payment timeout for Pending orders.
//!
//! An order created at `created_at` expires at `created_at + timeout` and counts as
//! expired only once `now` is strictly past that instant. Orders without a creation
//! time never expire, and neither do orders whose deadline lies past the end of the
//! representable calendar.

use chrono::{DateTime, Duration, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpiryPolicy {
    timeout: Duration,
}

impl ExpiryPolicy {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn from_minutes(minutes: u32) -> Self {
        Self::new(Duration::minutes(i64::from(minutes)))
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// `None` if the deadline overflows the calendar.
    pub fn expires_at(&self, created_at: DateTime<Utc>) -> Option<DateTime<Utc>> {
        created_at.checked_add_signed(self.timeout)
    }

    pub fn is_expired(&self, created_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
        created_at
            .and_then(|created| self.expires_at(created))
            .is_some_and(|deadline| now > deadline)
    }

    /// Whole seconds until expiry, floored at zero. `None` when the order never expires.
    pub fn remaining(&self, created_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Option<i64> {
        created_at
            .and_then(|created| self.expires_at(created))
            .map(|deadline| (deadline - now).num_seconds().max(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifteen_minute_window() {
        let policy = ExpiryPolicy::from_minutes(15);
        let t0 = Utc::now();

        assert!(!policy.is_expired(Some(t0), t0 + Duration::minutes(10)));
        assert!(policy.is_expired(Some(t0), t0 + Duration::minutes(16)));
    }

    #[test]
    fn test_boundary_is_not_expired() {
        let policy = ExpiryPolicy::from_minutes(15);
        let t0 = Utc::now();
        let deadline = policy.expires_at(t0).unwrap();

        assert!(!policy.is_expired(Some(t0), deadline));
        assert!(policy.is_expired(Some(t0), deadline + Duration::milliseconds(1)));
    }

    #[test]
    fn test_missing_created_at_never_expires() {
        let policy = ExpiryPolicy::from_minutes(0);
        let far_future = Utc::now() + Duration::days(365);

        assert!(!policy.is_expired(None, far_future));
        assert_eq!(policy.remaining(None, far_future), None);
    }

    #[test]
    fn test_overflowing_deadline_never_expires() {
        let policy = ExpiryPolicy::from_minutes(15);
        let last = DateTime::<Utc>::MAX_UTC;

        assert_eq!(policy.expires_at(last), None);
        assert!(!policy.is_expired(Some(last), last));
        assert_eq!(policy.remaining(Some(last), Utc::now()), None);
    }

    #[test]
    fn test_zero_timeout_expires_immediately_after_creation() {
        let policy = ExpiryPolicy::from_minutes(0);
        let t0 = Utc::now();

        assert!(!policy.is_expired(Some(t0), t0));
        assert!(policy.is_expired(Some(t0), t0 + Duration::seconds(1)));
    }

    #[test]
    fn test_remaining_is_clamped() {
        let policy = ExpiryPolicy::from_minutes(15);
        let t0 = Utc::now();

        assert_eq!(policy.remaining(Some(t0), t0), Some(900));
        assert_eq!(policy.remaining(Some(t0), t0 + Duration::minutes(10)), Some(300));
        assert_eq!(policy.remaining(Some(t0), t0 + Duration::minutes(20)), Some(0));
    }
}
