//! Upcoming-birthday arithmetic.
//!
//! A birthday is compared by month/day only: its year is replaced by the
//! current year, or the following one when this year's anniversary has
//! already passed. Feb 29 birthdays are observed on Feb 28 in common years.

use chrono::{Datelike, NaiveDate};

/// Window used by the `/bdays` query.
pub const DEFAULT_BIRTHDAY_WINDOW_DAYS: u32 = 7;

/// Returns the first anniversary of `birthday` on or after `today`.
///
/// Returns `None` only at the upper edge of the supported calendar range.
pub fn next_anniversary(birthday: NaiveDate, today: NaiveDate) -> Option<NaiveDate> {
    let this_year = anniversary_in(birthday, today.year())?;
    if this_year >= today {
        return Some(this_year);
    }
    anniversary_in(birthday, today.year() + 1)
}

/// Days from `today` until the next anniversary of `birthday`; `0` on the day.
pub fn days_until_birthday(birthday: NaiveDate, today: NaiveDate) -> Option<i64> {
    next_anniversary(birthday, today).map(|next| (next - today).num_days())
}

/// Whether the next anniversary falls within `[today, today + window_days]`.
pub fn is_birthday_within(birthday: NaiveDate, today: NaiveDate, window_days: u32) -> bool {
    days_until_birthday(birthday, today).is_some_and(|days| days <= i64::from(window_days))
}

fn anniversary_in(birthday: NaiveDate, year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, birthday.month(), birthday.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, 2, 28))
}
