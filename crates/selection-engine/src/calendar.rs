//! Calendar arithmetic -- stepping, week numbering and granularity-aware comparison.
//!
//! Every function here is pure and operates on naive local dates. Month and year
//! steps clamp the day-of-month to the length of the target month, so
//! `2026-01-31 + 1 month` lands on `2026-02-28` instead of spilling into March.
//! Steps that would leave chrono's representable range saturate at
//! [`NaiveDate::MIN`] / [`NaiveDate::MAX`].

use std::cmp::Ordering;

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::granularity::Granularity;

/// A week number together with the week-year it belongs to.
///
/// Field order matters: the derived `Ord` compares the year first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WeekOfYear {
    pub year: i32,
    pub week: u32,
}

fn saturate(n: i64) -> NaiveDate {
    if n > 0 {
        NaiveDate::MAX
    } else {
        NaiveDate::MIN
    }
}

/// Step a date by `n` days.
pub fn step_day(date: NaiveDate, n: i64) -> NaiveDate {
    let days = Days::new(n.unsigned_abs());
    let stepped = if n >= 0 {
        date.checked_add_days(days)
    } else {
        date.checked_sub_days(days)
    };
    stepped.unwrap_or_else(|| saturate(n))
}

/// Step a date by `n` months, clamping the day to the target month's length.
pub fn step_month(date: NaiveDate, n: i64) -> NaiveDate {
    let Ok(months) = u32::try_from(n.unsigned_abs()) else {
        return saturate(n);
    };
    let stepped = if n >= 0 {
        date.checked_add_months(Months::new(months))
    } else {
        date.checked_sub_months(Months::new(months))
    };
    stepped.unwrap_or_else(|| saturate(n))
}

/// Step a date by `n` years. Feb 29 clamps to Feb 28 in non-leap targets.
pub fn step_year(date: NaiveDate, n: i64) -> NaiveDate {
    match n.checked_mul(12) {
        Some(months) => step_month(date, months),
        None => saturate(n),
    }
}

/// Step a date by `n` units of `granularity` (a week is seven days).
pub fn step(granularity: Granularity, date: NaiveDate, n: i64) -> NaiveDate {
    match granularity {
        Granularity::Day => step_day(date, n),
        Granularity::Week => step_day(date, n.saturating_mul(7)),
        Granularity::Month => step_month(date, n),
        Granularity::Year => step_year(date, n),
    }
}

pub fn day_of_week(date: NaiveDate) -> Weekday {
    date.weekday()
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` (1-12) of `year`. Returns 0 for an out-of-range month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn last_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(days_in_month(date.year(), date.month())).unwrap_or(date)
}

/// Build a date from parts, clamping the day into the month.
pub fn clamped_date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    let month = month.clamp(1, 12);
    let day = day.clamp(1, days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day)
}

/// First year of the decade containing `year` (2026 -> 2020, -5 -> -10).
pub fn decade_start(year: i32) -> i32 {
    year - year.rem_euclid(10)
}

/// Position of `date` inside a week that starts on `week_start` (0..=6).
pub fn weekday_offset(date: NaiveDate, week_start: Weekday) -> u32 {
    (date.weekday().num_days_from_monday() + 7 - week_start.num_days_from_monday()) % 7
}

/// The first day of the week containing `date`.
pub fn start_of_week(date: NaiveDate, week_start: Weekday) -> NaiveDate {
    step_day(date, -i64::from(weekday_offset(date, week_start)))
}

/// The week-aligned first cell of the month page containing `date`.
pub fn first_of_page_week(date: NaiveDate, week_start: Weekday) -> NaiveDate {
    start_of_week(first_of_month(date), week_start)
}

/// Week number of `date` for weeks starting on `week_start`.
///
/// Week 1 of a week-year is the first week with at least four days in that
/// year, so with a Monday start this matches ISO 8601. The fourth day of each
/// week decides which year the week belongs to.
pub fn week_of_year(date: NaiveDate, week_start: Weekday) -> WeekOfYear {
    let pivot = step_day(start_of_week(date, week_start), 3);
    WeekOfYear {
        year: pivot.year(),
        week: pivot.ordinal0() / 7 + 1,
    }
}

/// Start of week 1 of `year`: the week whose fourth day falls in Jan 1..=7,
/// which is always the week containing Jan 4.
fn week_one_start(year: i32, week_start: Weekday) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, 1, 4).map(|jan4| start_of_week(jan4, week_start))
}

/// Week index of `date` counted from week 1 of `pivot_year`.
///
/// Unlike [`week_of_year`] the count does not restart at year boundaries, so it
/// can be zero, negative, or exceed 53 for dates outside the pivot week-year.
pub fn week_number_in(date: NaiveDate, week_start: Weekday, pivot_year: i32) -> i64 {
    let Some(anchor) = week_one_start(pivot_year, week_start) else {
        return 0;
    };
    let days = (start_of_week(date, week_start) - anchor).num_days();
    days.div_euclid(7) + 1
}

/// Compare two dates at the given granularity.
///
/// - `Year` compares the year only.
/// - `Month` compares (year, month).
/// - `Day` compares (year, month, day).
/// - `Week` compares the containing weeks, so two days of the same week are equal.
pub fn compare(granularity: Granularity, a: NaiveDate, b: NaiveDate, week_start: Weekday) -> Ordering {
    match granularity {
        Granularity::Year => a.year().cmp(&b.year()),
        Granularity::Month => (a.year(), a.month()).cmp(&(b.year(), b.month())),
        Granularity::Day => a.cmp(&b),
        Granularity::Week => week_of_year(a, week_start).cmp(&week_of_year(b, week_start)),
    }
}

/// Equality at the given granularity.
pub fn same(granularity: Granularity, a: NaiveDate, b: NaiveDate, week_start: Weekday) -> bool {
    compare(granularity, a, b, week_start) == Ordering::Equal
}

/// Inclusive length of `[start, end]` measured in `granularity` units.
///
/// `[Jan 5, Jan 20]` spans 1 month and 16 days. A reversed range yields a
/// length of zero or less.
pub fn span(granularity: Granularity, start: NaiveDate, end: NaiveDate, week_start: Weekday) -> i64 {
    match granularity {
        Granularity::Year => i64::from(end.year()) - i64::from(start.year()) + 1,
        Granularity::Month => {
            let index = |d: NaiveDate| i64::from(d.year()) * 12 + i64::from(d.month0());
            index(end) - index(start) + 1
        }
        Granularity::Week => {
            let pivot = week_of_year(start, week_start).year;
            week_number_in(end, week_start, pivot) - week_number_in(start, week_start, pivot) + 1
        }
        Granularity::Day => (end - start).num_days() + 1,
    }
}

/// Normalize `date` to the first day of its unit (week start, month start, Jan 1).
pub fn start_of_unit(granularity: Granularity, date: NaiveDate, week_start: Weekday) -> NaiveDate {
    match granularity {
        Granularity::Day => date,
        Granularity::Week => start_of_week(date, week_start),
        Granularity::Month => first_of_month(date),
        Granularity::Year => date.with_ordinal(1).unwrap_or(date),
    }
}
