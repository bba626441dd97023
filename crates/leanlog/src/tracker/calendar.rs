//! Date-only arithmetic. Every calendar date is pinned to noon before two
//! dates are differenced, so a day is always 24 hours apart from the next.

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime, Weekday};

const ANCHOR_HOUR: u32 = 12;

pub fn at_anchor(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_opt(ANCHOR_HOUR, 0, 0)
        .unwrap_or_else(|| date.and_time(NaiveTime::default()))
}

/// Whole calendar days from `earlier` to `later` (negative when reversed).
pub fn days_between(later: NaiveDate, earlier: NaiveDate) -> i64 {
    (at_anchor(later) - at_anchor(earlier)).num_days()
}

/// First date on or after `from` that falls on `weekday`. Never moves backward.
/// `None` when that date lies past the last representable day.
pub fn next_on_or_after(from: NaiveDate, weekday: Weekday) -> Option<NaiveDate> {
    let current = from.weekday().num_days_from_monday();
    let target = weekday.num_days_from_monday();
    from.checked_add_days(Days::new(u64::from((target + 7 - current) % 7)))
}

/// `dd/mm/yyyy`, the format shown to the user.
pub fn display(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}
