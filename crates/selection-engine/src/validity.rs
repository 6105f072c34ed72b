//! Validity scan -- walks a candidate range unit by unit against a disabled predicate.
//!
//! Two policies share one walk:
//!
//! - **strict** (`need_range_valid = true`): any disabled unit rejects the range.
//! - **lenient** (`need_range_valid = false`): any enabled unit accepts the range.
//!
//! A walk that finishes without tripping either rule returns the policy flag
//! itself, so an all-enabled range passes the strict policy and an all-disabled
//! range fails the lenient one.

use std::cmp::Ordering;

use chrono::{NaiveDate, Weekday};

use crate::calendar;
use crate::granularity::Granularity;

/// Run the validity scan over `[start, end]` (inclusive, `start <= end`).
pub fn scan_range<F>(
    granularity: Granularity,
    start: NaiveDate,
    end: NaiveDate,
    need_range_valid: bool,
    week_start: Weekday,
    is_disabled: F,
) -> bool
where
    F: Fn(NaiveDate) -> bool,
{
    let mut cursor = start;
    while calendar::compare(granularity, cursor, end, week_start) != Ordering::Greater {
        let disabled = is_disabled(cursor);
        if need_range_valid && disabled {
            return false;
        }
        if !need_range_valid && !disabled {
            return true;
        }
        let next = calendar::step(granularity, cursor, 1);
        if next == cursor {
            // Saturated at the edge of the representable range.
            break;
        }
        cursor = next;
    }
    need_range_valid
}

/// Validate a selection made of zero, one or two sorted dates.
///
/// An empty selection is always valid; a single date is checked as a
/// one-unit range.
pub fn validate_selection<F>(
    granularity: Granularity,
    dates: &[NaiveDate],
    need_range_valid: bool,
    week_start: Weekday,
    is_disabled: F,
) -> bool
where
    F: Fn(NaiveDate) -> bool,
{
    match dates {
        [] => true,
        [only] => scan_range(granularity, *only, *only, need_range_valid, week_start, is_disabled),
        [start, .., end] => scan_range(granularity, *start, *end, need_range_valid, week_start, is_disabled),
    }
}
