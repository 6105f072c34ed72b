//! Picker configuration.
//!
//! [`PickerOptions`] is rebuilt in full every time a host calls
//! `update_options`: keys the host leaves out fall back to their defaults
//! instead of keeping a previous value.
//!
//! | field | default |
//! |---|---|
//! | `out_range_disabled` | `false` |
//! | `need_range_valid` | `false` |
//! | `is_date_disabled` | none, every day enabled |
//! | `is_week_disabled` | derived from the day predicate with the validity scan |
//! | `is_month_disabled` | derived, disabled when every day of the month is |
//! | `is_year_disabled` | derived, disabled when every month of the year is |
//! | `disabled` | `false` |
//! | `start_day` | `Weekday::Sun` |

use std::fmt;
use std::rc::Rc;

use chrono::{Datelike, NaiveDate, Weekday};

use crate::calendar;
use crate::granularity::Granularity;
use crate::validity;

/// A host-supplied disabled-date check.
pub type DatePredicate = Rc<dyn Fn(NaiveDate) -> bool>;

#[derive(Clone)]
pub struct PickerOptions {
    /// Force cells outside the active page (leading/trailing days) disabled.
    pub out_range_disabled: bool,
    /// Strict range validity: every unit of a range must be enabled.
    pub need_range_valid: bool,
    pub is_date_disabled: Option<DatePredicate>,
    pub is_week_disabled: Option<DatePredicate>,
    pub is_month_disabled: Option<DatePredicate>,
    pub is_year_disabled: Option<DatePredicate>,
    /// Disable the whole picker.
    pub disabled: bool,
    /// First day of the week for day grids and week numbering.
    pub start_day: Weekday,
}

impl Default for PickerOptions {
    fn default() -> Self {
        Self {
            out_range_disabled: false,
            need_range_valid: false,
            is_date_disabled: None,
            is_week_disabled: None,
            is_month_disabled: None,
            is_year_disabled: None,
            disabled: false,
            start_day: Weekday::Sun,
        }
    }
}

impl fmt::Debug for PickerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PickerOptions")
            .field("out_range_disabled", &self.out_range_disabled)
            .field("need_range_valid", &self.need_range_valid)
            .field("is_date_disabled", &self.is_date_disabled.is_some())
            .field("is_week_disabled", &self.is_week_disabled.is_some())
            .field("is_month_disabled", &self.is_month_disabled.is_some())
            .field("is_year_disabled", &self.is_year_disabled.is_some())
            .field("disabled", &self.disabled)
            .field("start_day", &self.start_day)
            .finish()
    }
}

impl PickerOptions {
    pub fn builder() -> PickerOptionsBuilder {
        PickerOptionsBuilder::default()
    }

    /// Whether the `granularity` unit containing `date` is disabled.
    pub fn is_disabled(&self, granularity: Granularity, date: NaiveDate) -> bool {
        if self.disabled {
            return true;
        }
        match granularity {
            Granularity::Day => self.day_disabled(date),
            Granularity::Week => match &self.is_week_disabled {
                Some(check) => check(date),
                None => self.derived_week_disabled(date),
            },
            Granularity::Month => match &self.is_month_disabled {
                Some(check) => check(date),
                None => self.derived_month_disabled(date),
            },
            Granularity::Year => match &self.is_year_disabled {
                Some(check) => check(date),
                None => self.derived_year_disabled(date),
            },
        }
    }

    fn day_disabled(&self, date: NaiveDate) -> bool {
        self.is_date_disabled.as_ref().is_some_and(|check| check(date))
    }

    fn derived_week_disabled(&self, date: NaiveDate) -> bool {
        if self.is_date_disabled.is_none() {
            return false;
        }
        let first = calendar::start_of_week(date, self.start_day);
        let last = calendar::step_day(first, 6);
        !validity::scan_range(
            Granularity::Day,
            first,
            last,
            self.need_range_valid,
            self.start_day,
            |d| self.day_disabled(d),
        )
    }

    fn derived_month_disabled(&self, date: NaiveDate) -> bool {
        if self.is_date_disabled.is_none() {
            return false;
        }
        !validity::scan_range(
            Granularity::Day,
            calendar::first_of_month(date),
            calendar::last_of_month(date),
            false,
            self.start_day,
            |d| self.day_disabled(d),
        )
    }

    fn derived_year_disabled(&self, date: NaiveDate) -> bool {
        if self.is_date_disabled.is_none() && self.is_month_disabled.is_none() {
            return false;
        }
        let (Some(first), Some(last)) = (
            NaiveDate::from_ymd_opt(date.year(), 1, 1),
            NaiveDate::from_ymd_opt(date.year(), 12, 31),
        ) else {
            return false;
        };
        !validity::scan_range(
            Granularity::Month,
            first,
            last,
            false,
            self.start_day,
            |d| self.is_disabled(Granularity::Month, d),
        )
    }
}

/// Builder for [`PickerOptions`]. Every unset field keeps its documented default.
#[derive(Default)]
pub struct PickerOptionsBuilder {
    options: PickerOptions,
}

impl PickerOptionsBuilder {
    pub fn out_range_disabled(mut self, value: bool) -> Self {
        self.options.out_range_disabled = value;
        self
    }

    pub fn need_range_valid(mut self, value: bool) -> Self {
        self.options.need_range_valid = value;
        self
    }

    pub fn is_date_disabled(mut self, check: impl Fn(NaiveDate) -> bool + 'static) -> Self {
        self.options.is_date_disabled = Some(Rc::new(check));
        self
    }

    pub fn is_week_disabled(mut self, check: impl Fn(NaiveDate) -> bool + 'static) -> Self {
        self.options.is_week_disabled = Some(Rc::new(check));
        self
    }

    pub fn is_month_disabled(mut self, check: impl Fn(NaiveDate) -> bool + 'static) -> Self {
        self.options.is_month_disabled = Some(Rc::new(check));
        self
    }

    pub fn is_year_disabled(mut self, check: impl Fn(NaiveDate) -> bool + 'static) -> Self {
        self.options.is_year_disabled = Some(Rc::new(check));
        self
    }

    pub fn disabled(mut self, value: bool) -> Self {
        self.options.disabled = value;
        self
    }

    pub fn start_day(mut self, day: Weekday) -> Self {
        self.options.start_day = day;
        self
    }

    /// Week start as a number, 0 = Sunday through 6 = Saturday. Larger values wrap.
    pub fn start_day_index(self, index: u8) -> Self {
        let day = (0..index % 7).fold(Weekday::Sun, |day, _| day.succ());
        self.start_day(day)
    }

    pub fn build(self) -> PickerOptions {
        self.options
    }
}
