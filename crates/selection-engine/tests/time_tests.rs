//! Tests for the time-of-day columns.

use chrono::{NaiveDate, NaiveTime};
use selection_engine::time::{combine, snap_time, step_time, time_columns, TimeOptions, TimeUnit};
use selection_engine::SelectionError;

fn hms(h: u32, m: u32, s: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, s).unwrap()
}

fn quarter_hours() -> TimeOptions {
    TimeOptions {
        minute_step: 15,
        ..TimeOptions::default()
    }
}

#[test]
fn default_columns_list_every_value() {
    let columns = time_columns(&TimeOptions::default()).unwrap();
    assert_eq!(columns.hours.len(), 24);
    assert_eq!(columns.minutes.len(), 60);
    assert_eq!(columns.seconds.last(), Some(&59));
}

#[test]
fn stepped_columns_skip_values() {
    let columns = time_columns(&quarter_hours()).unwrap();
    assert_eq!(columns.minutes, vec![0, 15, 30, 45]);
    assert_eq!(columns.hours.len(), 24);
}

#[test]
fn zero_step_is_rejected() {
    let options = TimeOptions {
        second_step: 0,
        ..TimeOptions::default()
    };
    assert_eq!(
        time_columns(&options),
        Err(SelectionError::InvalidStep {
            unit: "second",
            step: 0,
        })
    );
}

#[test]
fn oversized_step_is_rejected() {
    let options = TimeOptions {
        hour_step: 25,
        ..TimeOptions::default()
    };
    assert!(options.validate().is_err());
}

#[test]
fn snap_rounds_down_onto_the_grid() {
    assert_eq!(snap_time(hms(10, 52, 7), &quarter_hours()).unwrap(), hms(10, 45, 7));
}

#[test]
fn step_wraps_within_the_column() {
    let defaults = TimeOptions::default();
    assert_eq!(step_time(hms(23, 59, 0), TimeUnit::Minute, 1, &defaults).unwrap(), hms(23, 0, 0));
    assert_eq!(step_time(hms(0, 0, 0), TimeUnit::Hour, -1, &defaults).unwrap(), hms(23, 0, 0));
    assert_eq!(step_time(hms(10, 50, 0), TimeUnit::Minute, 1, &quarter_hours()).unwrap(), hms(10, 0, 0));
    assert_eq!(step_time(hms(10, 5, 0), TimeUnit::Minute, -1, &quarter_hours()).unwrap(), hms(10, 45, 0));
}

#[test]
fn step_of_seven_wraps_on_its_own_grid() {
    let options = TimeOptions {
        minute_step: 7,
        ..TimeOptions::default()
    };
    // Slots are 0, 7, .., 56, so one step past 56 lands on 0.
    assert_eq!(step_time(hms(1, 56, 0), TimeUnit::Minute, 1, &options).unwrap(), hms(1, 0, 0));
}

#[test]
fn options_deserialize_with_defaults() {
    let options: TimeOptions = serde_json::from_str(r#"{"minute_step": 5}"#).unwrap();
    assert_eq!(options.hour_step, 1);
    assert_eq!(options.minute_step, 5);
}

#[test]
fn combine_joins_date_and_time() {
    let date = NaiveDate::from_ymd_opt(2026, 3, 4).unwrap();
    assert_eq!(combine(date, hms(9, 30, 0)).to_string(), "2026-03-04 09:30:00");
}
