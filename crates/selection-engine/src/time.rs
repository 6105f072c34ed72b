//! Time-of-day columns for date-time pickers.
//!
//! The date engine ignores the time of day. A picker that also edits a time
//! shows three columns (hours, minutes, seconds), each with its own step.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SelectionError};

/// One column of a time panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Hour,
    Minute,
    Second,
}

impl TimeUnit {
    fn modulus(self) -> u32 {
        match self {
            TimeUnit::Hour => 24,
            TimeUnit::Minute | TimeUnit::Second => 60,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            TimeUnit::Hour => "hour",
            TimeUnit::Minute => "minute",
            TimeUnit::Second => "second",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeOptions {
    pub hour_step: u32,
    pub minute_step: u32,
    pub second_step: u32,
}

impl Default for TimeOptions {
    fn default() -> Self {
        Self {
            hour_step: 1,
            minute_step: 1,
            second_step: 1,
        }
    }
}

impl TimeOptions {
    pub fn step(&self, unit: TimeUnit) -> u32 {
        match unit {
            TimeUnit::Hour => self.hour_step,
            TimeUnit::Minute => self.minute_step,
            TimeUnit::Second => self.second_step,
        }
    }

    /// Reject a zero step or one larger than its column.
    pub fn validate(&self) -> Result<()> {
        for unit in [TimeUnit::Hour, TimeUnit::Minute, TimeUnit::Second] {
            let step = self.step(unit);
            if step == 0 || step > unit.modulus() {
                return Err(SelectionError::InvalidStep {
                    unit: unit.as_str(),
                    step,
                });
            }
        }
        Ok(())
    }
}

/// The selectable values of each column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeColumns {
    pub hours: Vec<u32>,
    pub minutes: Vec<u32>,
    pub seconds: Vec<u32>,
}

pub fn time_columns(options: &TimeOptions) -> Result<TimeColumns> {
    options.validate()?;
    let column = |unit: TimeUnit| -> Vec<u32> {
        let step = options.step(unit) as usize;
        (0..unit.modulus()).step_by(step).collect()
    };
    Ok(TimeColumns {
        hours: column(TimeUnit::Hour),
        minutes: column(TimeUnit::Minute),
        seconds: column(TimeUnit::Second),
    })
}

/// Round every component down onto its column's step.
pub fn snap_time(time: NaiveTime, options: &TimeOptions) -> Result<NaiveTime> {
    options.validate()?;
    let snap = |value: u32, unit: TimeUnit| value - value % options.step(unit);
    Ok(NaiveTime::from_hms_opt(
        snap(time.hour(), TimeUnit::Hour),
        snap(time.minute(), TimeUnit::Minute),
        snap(time.second(), TimeUnit::Second),
    )
    .unwrap_or(time))
}

/// Move one column by `n` steps, wrapping inside the column. Other columns
/// are left alone, so 23:59 plus one minute is 23:00.
pub fn step_time(time: NaiveTime, unit: TimeUnit, n: i64, options: &TimeOptions) -> Result<NaiveTime> {
    let snapped = snap_time(time, options)?;
    let modulus = i64::from(unit.modulus());
    let step = i64::from(options.step(unit));
    let current = i64::from(match unit {
        TimeUnit::Hour => snapped.hour(),
        TimeUnit::Minute => snapped.minute(),
        TimeUnit::Second => snapped.second(),
    });
    // Wrap on the step grid so a stepped column never lands between options.
    let slots = (modulus + step - 1) / step;
    let slot = (current / step + n.rem_euclid(slots)).rem_euclid(slots);
    let next = u32::try_from(slot * step).unwrap_or(0);
    let (h, m, s) = match unit {
        TimeUnit::Hour => (next, snapped.minute(), snapped.second()),
        TimeUnit::Minute => (snapped.hour(), next, snapped.second()),
        TimeUnit::Second => (snapped.hour(), snapped.minute(), next),
    };
    Ok(NaiveTime::from_hms_opt(h, m, s).unwrap_or(snapped))
}

pub fn combine(date: NaiveDate, time: NaiveTime) -> NaiveDateTime {
    date.and_time(time)
}
