//! Selection roots -- the sole owners of a picker's committed and preview values.
//!
//! Each variant implements [`SelectionModel`]; the generic
//! [`Picker`](crate::picker::Picker) drives it, owns the panels and fans out
//! notifications.
//!
//! - [`simple`] -- one date or nothing
//! - [`range`] -- two sorted endpoints, two-click or fixed-length
//! - [`multiple`] -- an unordered set of dates

pub mod multiple;
pub mod range;
pub mod simple;

use std::cmp::Ordering;
use std::fmt;

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::calendar;
use crate::granularity::Granularity;
use crate::options::PickerOptions;
use crate::validity;

pub use multiple::{FrameMode, MultipleSelection};
pub use range::{DateRange, RangeSelection};
pub use simple::SimpleSelection;

/// How a cell relates to the selection it is painted against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectedState {
    #[default]
    None,
    Single,
    Start,
    In,
    End,
}

impl SelectedState {
    pub fn is_selected(self) -> bool {
        self != SelectedState::None
    }
}

/// The picker-wide facts a selection model needs to judge a pick.
#[derive(Debug, Clone, Copy)]
pub struct SelectionContext<'a> {
    pub granularity: Granularity,
    pub options: &'a PickerOptions,
}

impl<'a> SelectionContext<'a> {
    pub fn new(granularity: Granularity, options: &'a PickerOptions) -> Self {
        Self {
            granularity,
            options,
        }
    }

    pub fn week_start(&self) -> Weekday {
        self.options.start_day
    }

    pub fn is_disabled(&self, date: NaiveDate) -> bool {
        self.options.is_disabled(self.granularity, date)
    }

    pub fn compare(&self, a: NaiveDate, b: NaiveDate) -> Ordering {
        calendar::compare(self.granularity, a, b, self.week_start())
    }

    pub fn same(&self, a: NaiveDate, b: NaiveDate) -> bool {
        self.compare(a, b) == Ordering::Equal
    }

    pub fn step(&self, date: NaiveDate, n: i64) -> NaiveDate {
        calendar::step(self.granularity, date, n)
    }

    /// Run the validity scan over a sorted candidate of zero to two dates.
    pub fn is_valid_range(&self, dates: &[NaiveDate]) -> bool {
        validity::validate_selection(
            self.granularity,
            dates,
            self.options.need_range_valid,
            self.week_start(),
            |d| self.is_disabled(d),
        )
    }

    /// Selected state of `date` against a sorted list of one or two endpoints.
    pub fn range_state(&self, endpoints: &[NaiveDate], date: NaiveDate) -> SelectedState {
        let (start, end) = match endpoints {
            [] => return SelectedState::None,
            [only] => (*only, *only),
            [start, .., end] => (*start, *end),
        };
        let after_start = self.compare(date, start);
        let before_end = self.compare(date, end);
        if after_start == Ordering::Less || before_end == Ordering::Greater {
            return SelectedState::None;
        }
        match (after_start, before_end) {
            (Ordering::Equal, Ordering::Equal) => SelectedState::Single,
            (Ordering::Equal, _) => SelectedState::Start,
            (_, Ordering::Equal) => SelectedState::End,
            _ => SelectedState::In,
        }
    }
}

/// What a single pick did to the committed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PickEffect {
    /// The committed value changed and a `ValueChange` must be announced.
    pub committed: bool,
    /// A range's first anchor was placed.
    pub start_added: Option<NaiveDate>,
}

impl PickEffect {
    pub fn committed(committed: bool) -> Self {
        Self {
            committed,
            start_added: None,
        }
    }
}

/// The behavior that distinguishes one selection root from another.
pub trait SelectionModel {
    type Value: Clone + PartialEq + fmt::Debug;

    fn value(&self) -> &Self::Value;

    /// Replace the committed value from outside. Returns whether it changed.
    fn replace_value(&mut self, ctx: &SelectionContext<'_>, value: Self::Value) -> bool;

    /// Commit entry point for a user pick.
    fn select(&mut self, ctx: &SelectionContext<'_>, date: NaiveDate, is_virtual: bool) -> PickEffect;

    /// Hover or drag preview. Never touches the committed value.
    fn preview(&mut self, ctx: &SelectionContext<'_>, date: NaiveDate);

    /// Drop the preview value.
    fn reset_trying(&mut self);

    /// Whether a preview is currently showing.
    fn has_trying(&self) -> bool;

    /// State of `date` against the preview, `None` when no preview is active.
    fn trying_state(&self, ctx: &SelectionContext<'_>, date: NaiveDate) -> Option<SelectedState>;

    /// State of `date` against an arbitrary value of this model.
    fn state_in(ctx: &SelectionContext<'_>, value: &Self::Value, date: NaiveDate) -> SelectedState;

    /// The dates a value is made of, for plain equality checks.
    fn members(value: &Self::Value) -> Vec<NaiveDate>;

    /// Answer to an `AddStartValue` announcement. A returned date is applied
    /// as the next non-virtual pick.
    fn start_value_response(&mut self, _start: NaiveDate) -> Option<NaiveDate> {
        None
    }

    /// The date a panel registered as `part` should centre on for `value`.
    fn anchor_for_part(value: &Self::Value, _part: &str) -> Option<NaiveDate> {
        Self::members(value).last().copied()
    }
}
