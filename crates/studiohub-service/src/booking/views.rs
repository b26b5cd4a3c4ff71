//! Read models returned by the booking service.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use studiohub_entity::attendance::{Attendance, AttendanceDetail, AttendanceStatus};

/// One booked occurrence as the client sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookedClass {
    pub attendance_id: i64,
    pub class_session_id: i64,
    pub class_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub status: AttendanceStatus,
}

impl BookedClass {
    /// Builds the view from an attendance and its session window.
    pub fn new(attendance: &Attendance, start_time: NaiveTime, end_time: NaiveTime) -> Self {
        Self {
            attendance_id: attendance.id,
            class_session_id: attendance.class_session_id,
            class_date: attendance.class_date,
            start_time,
            end_time,
            status: attendance.status,
        }
    }
}

impl From<&AttendanceDetail> for BookedClass {
    fn from(detail: &AttendanceDetail) -> Self {
        Self::new(&detail.attendance, detail.start_time, detail.end_time)
    }
}

/// A client's bookings split around today.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MyClasses {
    /// `PLANNED` bookings dated today or later.
    pub upcoming: Vec<BookedClass>,
    /// Everything else.
    pub history: Vec<BookedClass>,
}

/// Bookings of a single date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub classes: Vec<BookedClass>,
}

/// A client's bookings grouped by date over an inclusive range.
///
/// Only dates with at least one booking appear in `days`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MyCalendar {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub days: Vec<CalendarDay>,
}

impl MyCalendar {
    /// Groups bookings already ordered by date into days.
    pub fn group(start_date: NaiveDate, end_date: NaiveDate, classes: Vec<BookedClass>) -> Self {
        let mut days: Vec<CalendarDay> = Vec::new();
        for class in classes {
            match days.last_mut() {
                Some(day) if day.date == class.class_date => day.classes.push(class),
                _ => days.push(CalendarDay {
                    date: class.class_date,
                    classes: vec![class],
                }),
            }
        }
        Self {
            start_date,
            end_date,
            days,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class(id: i64, date: NaiveDate) -> BookedClass {
        BookedClass {
            attendance_id: id,
            class_session_id: 1,
            class_date: date,
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            status: AttendanceStatus::Planned,
        }
    }

    #[test]
    fn test_group_keeps_one_entry_per_date() {
        let d1 = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2025, 3, 12).unwrap();
        let calendar = MyCalendar::group(d1, d2, vec![class(1, d1), class(2, d1), class(3, d2)]);

        assert_eq!(calendar.days.len(), 2);
        assert_eq!(calendar.days[0].date, d1);
        assert_eq!(calendar.days[0].classes.len(), 2);
        assert_eq!(calendar.days[1].classes[0].attendance_id, 3);
    }

    #[test]
    fn test_group_of_nothing_has_no_days() {
        let d = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        assert!(MyCalendar::group(d, d, Vec::new()).days.is_empty());
    }
}
