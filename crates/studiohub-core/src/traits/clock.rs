//! Time source injected into services.
//!
//! Business code never reads the system clock directly; it asks a [`Clock`]
//! so tests can pin "now" to any instant.

use std::sync::RwLock;

use chrono::{DateTime, Duration, Local, NaiveDate, Utc};

/// A source of the current instant and the current calendar date.
pub trait Clock: Send + Sync + 'static {
    /// The current instant.
    fn now(&self) -> DateTime<Utc>;

    /// The current calendar date as seen by the studio.
    fn today(&self) -> NaiveDate;
}

/// Wall clock of the host. `today()` uses the server's local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A settable clock for tests and replays. `today()` is the UTC date of `now()`.
#[derive(Debug)]
pub struct FixedClock {
    instant: RwLock<DateTime<Utc>>,
}

impl FixedClock {
    /// Creates a clock frozen at the given instant.
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self {
            instant: RwLock::new(instant),
        }
    }

    /// Creates a clock frozen at midday (UTC) of the given date.
    pub fn at_date(date: NaiveDate) -> Self {
        let instant = date
            .and_hms_opt(12, 0, 0)
            .map(|dt| dt.and_utc())
            .unwrap_or_else(|| DateTime::<Utc>::UNIX_EPOCH);
        Self::new(instant)
    }

    /// Moves the clock to a new instant.
    pub fn set(&self, instant: DateTime<Utc>) {
        match self.instant.write() {
            Ok(mut guard) => *guard = instant,
            Err(poisoned) => *poisoned.into_inner() = instant,
        }
    }

    /// Moves the clock forward by `by`.
    pub fn advance(&self, by: Duration) {
        let next = self.now() + by;
        self.set(next);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        match self.instant.read() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_today() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let clock = FixedClock::at_date(date);
        assert_eq!(clock.today(), date);
    }

    #[test]
    fn test_fixed_clock_advance_crosses_midnight() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let clock = FixedClock::at_date(date);
        clock.advance(Duration::hours(13));
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2025, 3, 11).unwrap());
    }
}
