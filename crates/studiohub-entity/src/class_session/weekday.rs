//! Weekday numbering shared by schedules and bookings.

use chrono::{Datelike, NaiveDate};

/// Number of the weekday of `date`, 0 = Monday through 6 = Sunday.
pub fn weekday_index(date: NaiveDate) -> i16 {
    date.weekday().num_days_from_monday() as i16
}

/// Whether `weekday` is a valid weekday number.
pub fn is_valid_weekday(weekday: i16) -> bool {
    (0..=6).contains(&weekday)
}
