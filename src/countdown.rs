//! Countdown
//!
//! Time remaining until a flash deal ends.

use std::fmt;

use jiff::Timestamp;

const SECS_PER_MINUTE: i64 = 60;
const SECS_PER_HOUR: i64 = 60 * SECS_PER_MINUTE;
const SECS_PER_DAY: i64 = 24 * SECS_PER_HOUR;

/// Whole days, hours, minutes and seconds left before a deadline.
///
/// A deadline in the past yields a zero countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Countdown {
    days: i64,
    hours: i64,
    minutes: i64,
    seconds: i64,
}

impl Countdown {
    /// Time remaining from `now` until `deadline`.
    pub fn until(deadline: Timestamp, now: Timestamp) -> Self {
        let remaining = deadline.duration_since(now).as_secs().max(0);

        Self {
            days: remaining / SECS_PER_DAY,
            hours: remaining % SECS_PER_DAY / SECS_PER_HOUR,
            minutes: remaining % SECS_PER_HOUR / SECS_PER_MINUTE,
            seconds: remaining % SECS_PER_MINUTE,
        }
    }

    /// Time remaining from the current system time.
    pub fn until_now(deadline: Timestamp) -> Self {
        Self::until(deadline, Timestamp::now())
    }

    /// Whole days left
    pub fn days(&self) -> i64 {
        self.days
    }

    /// Hours left within the current day
    pub fn hours(&self) -> i64 {
        self.hours
    }

    /// Minutes left within the current hour
    pub fn minutes(&self) -> i64 {
        self.minutes
    }

    /// Seconds left within the current minute
    pub fn seconds(&self) -> i64 {
        self.seconds
    }

    /// Total seconds left
    pub fn total_seconds(&self) -> i64 {
        self.days * SECS_PER_DAY
            + self.hours * SECS_PER_HOUR
            + self.minutes * SECS_PER_MINUTE
            + self.seconds
    }

    /// Whether the deadline has passed
    pub fn is_expired(&self) -> bool {
        self.total_seconds() == 0
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_expired() {
            return f.write_str("Deal ended");
        }

        write!(
            f,
            "{}d {:02}h {:02}m {:02}s",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}
