// Date utility functions

use chrono::{NaiveDate, NaiveDateTime};

pub fn is_same_day(a: NaiveDateTime, b: NaiveDateTime) -> bool {
    a.date() == b.date()
}

pub fn start_of_day(dt: NaiveDateTime) -> NaiveDateTime {
    dt.date().and_hms_opt(0, 0, 0).unwrap()
}

/// The rendered origin of a day: midnight plus the first visible hour
pub fn day_origin(date: NaiveDate, min_hour: u32) -> NaiveDateTime {
    date.and_hms_opt(min_hour.min(23), 0, 0).unwrap()
}

/// Whole minutes from `from` to `to`; negative when `to` is earlier
pub fn minutes_between(to: NaiveDateTime, from: NaiveDateTime) -> i64 {
    (to - from).num_minutes()
}
