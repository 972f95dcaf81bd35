use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Trailing window, in days, used to select recent reviews.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct ReviewWindow(u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum WindowError {
    #[error("days must be between {min} and {max}, got {value}", min = ReviewWindow::MIN_DAYS, max = ReviewWindow::MAX_DAYS)]
    OutOfRange { value: i64 },
}

impl ReviewWindow {
    pub const MIN_DAYS: u32 = 1;
    pub const MAX_DAYS: u32 = 30;
    pub const DEFAULT_DAYS: u32 = 7;

    pub fn new(days: i64) -> Result<Self, WindowError> {
        if days < i64::from(Self::MIN_DAYS) || days > i64::from(Self::MAX_DAYS) {
            return Err(WindowError::OutOfRange { value: days });
        }
        Ok(Self(days as u32))
    }

    pub fn days(self) -> u32 {
        self.0
    }

    pub fn cutoff(self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - Duration::days(i64::from(self.0))
    }
}

impl Default for ReviewWindow {
    fn default() -> Self {
        Self(Self::DEFAULT_DAYS)
    }
}

impl TryFrom<u32> for ReviewWindow {
    type Error = WindowError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(i64::from(value))
    }
}

impl From<ReviewWindow> for u32 {
    fn from(value: ReviewWindow) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn accepts_inclusive_bounds() {
        assert_eq!(ReviewWindow::new(1).expect("lower bound").days(), 1);
        assert_eq!(ReviewWindow::new(30).expect("upper bound").days(), 30);
        assert_eq!(ReviewWindow::default().days(), 7);
    }

    #[test]
    fn rejects_values_outside_range() {
        assert_eq!(
            ReviewWindow::new(0),
            Err(WindowError::OutOfRange { value: 0 })
        );
        assert!(ReviewWindow::new(31).is_err());
        assert!(ReviewWindow::new(-3).is_err());
    }

    #[test]
    fn cutoff_subtracts_whole_days() {
        let now = Utc.with_ymd_and_hms(2025, 3, 10, 15, 0, 0).unwrap();
        let window = ReviewWindow::new(7).expect("valid window");
        assert_eq!(
            window.cutoff(now),
            Utc.with_ymd_and_hms(2025, 3, 3, 15, 0, 0).unwrap()
        );
    }
}
