//! Two-endpoint range selection.
//!
//! The range runs in one of two modes, chosen by `offset`:
//!
//! - **Two-click** (`offset == 0`): the first pick places an anchor in the
//!   pending list and previews it; the second pick sorts the pair and runs the
//!   validity scan. A valid pair commits. An invalid pair keeps the original
//!   anchor, discards the second pick and shows the attempted window as the
//!   preview instead, which [`RangeSelection::is_invalid_trying_date`] reports.
//! - **Fixed-length** (`offset != 0`): one pick derives the other endpoint
//!   `|offset| - 1` units forward (positive offset) or backward (negative) and
//!   commits the window directly when it is valid and the pick is not virtual.

use std::fmt;

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::{PickEffect, SelectedState, SelectionContext, SelectionModel};
use crate::calendar;
use crate::granularity::Granularity;

/// A committed range. Construction always sorts the endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(a: NaiveDate, b: NaiveDate) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    pub fn endpoints(&self) -> [NaiveDate; 2] {
        [self.start, self.end]
    }

    /// Inclusive length of the range in `granularity` units.
    pub fn span(&self, granularity: Granularity, week_start: Weekday) -> i64 {
        calendar::span(granularity, self.start, self.end, week_start)
    }
}

/// Hook invoked after a first anchor is placed. Returning a date applies it
/// as the second pick.
pub type AddStartHook = Box<dyn FnMut(NaiveDate) -> Option<NaiveDate>>;

#[derive(Default)]
pub struct RangeSelection {
    value: Option<DateRange>,
    trying: Vec<NaiveDate>,
    inner_value: Vec<NaiveDate>,
    offset: i64,
    start_hook: Option<AddStartHook>,
}

impl fmt::Debug for RangeSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RangeSelection")
            .field("value", &self.value)
            .field("trying", &self.trying)
            .field("inner_value", &self.inner_value)
            .field("offset", &self.offset)
            .field("start_hook", &self.start_hook.is_some())
            .finish()
    }
}

impl RangeSelection {
    pub fn new(value: Option<DateRange>) -> Self {
        Self {
            value,
            ..Self::default()
        }
    }

    /// A fixed-length range: every pick derives a window of `offset` units.
    pub fn with_offset(offset: i64) -> Self {
        Self {
            offset,
            ..Self::default()
        }
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }

    /// Switch between two-click (`0`) and fixed-length mode. Drops any
    /// pending anchor and preview when the offset actually changes.
    pub fn set_offset(&mut self, offset: i64) {
        if self.offset != offset {
            self.offset = offset;
            self.inner_value.clear();
            self.trying.clear();
        }
    }

    /// The pending anchor list of a two-click selection in progress.
    pub fn inner_value(&self) -> &[NaiveDate] {
        &self.inner_value
    }

    /// The preview: empty, a pending single anchor, or a sorted pair.
    pub fn trying(&self) -> &[NaiveDate] {
        &self.trying
    }

    /// True only when a two-date preview exists and fails the validity scan.
    pub fn is_invalid_trying_date(&self, ctx: &SelectionContext<'_>) -> bool {
        self.trying.len() == 2 && !ctx.is_valid_range(&self.trying)
    }

    /// Abandon a first click: drop the anchor and its preview.
    pub fn cancel_pending(&mut self) {
        self.inner_value.clear();
        self.trying.clear();
    }

    pub fn set_start_hook(&mut self, hook: Option<AddStartHook>) {
        self.start_hook = hook;
    }

    fn commit(&mut self, range: DateRange) -> PickEffect {
        self.inner_value.clear();
        self.trying.clear();
        let changed = self.value != Some(range);
        self.value = Some(range);
        debug!(start = %range.start, end = %range.end, changed, "committed range");
        PickEffect::committed(changed)
    }

    fn select_fixed(&mut self, ctx: &SelectionContext<'_>, date: NaiveDate, is_virtual: bool) -> PickEffect {
        let distance = i64::try_from(self.offset.unsigned_abs() - 1).unwrap_or(i64::MAX);
        let other = ctx.step(date, distance * self.offset.signum());
        let window = DateRange::new(date, other);
        self.inner_value.clear();

        if is_virtual || !ctx.is_valid_range(&window.endpoints()) {
            trace!(start = %window.start, end = %window.end, is_virtual, "fixed-length window kept as preview");
            self.trying = window.endpoints().to_vec();
            return PickEffect::default();
        }
        self.commit(window)
    }

    /// Place the anchor unconditionally. Validity is only judged once the
    /// pair exists, so a disabled endpoint may be picked first.
    fn first_click(&mut self, date: NaiveDate) -> PickEffect {
        self.inner_value = vec![date];
        self.trying = vec![date];
        trace!(%date, "placed range anchor");
        PickEffect {
            committed: false,
            start_added: Some(date),
        }
    }

    fn second_click(&mut self, ctx: &SelectionContext<'_>, anchor: NaiveDate, date: NaiveDate) -> PickEffect {
        self.inner_value.push(date);
        self.inner_value.sort();

        if ctx.is_valid_range(&self.inner_value) {
            let range = DateRange::new(anchor, date);
            return self.commit(range);
        }

        debug!(%anchor, %date, "range failed validity scan, kept as preview");
        self.inner_value = vec![anchor];
        self.trying = DateRange::new(anchor, date).endpoints().to_vec();
        PickEffect::default()
    }
}

impl SelectionModel for RangeSelection {
    type Value = Option<DateRange>;

    fn value(&self) -> &Self::Value {
        &self.value
    }

    fn replace_value(&mut self, _ctx: &SelectionContext<'_>, value: Self::Value) -> bool {
        let value = value.map(|r| DateRange::new(r.start, r.end));
        self.inner_value.clear();
        self.trying.clear();
        let changed = self.value != value;
        self.value = value;
        changed
    }

    fn select(&mut self, ctx: &SelectionContext<'_>, date: NaiveDate, is_virtual: bool) -> PickEffect {
        if self.offset != 0 {
            return self.select_fixed(ctx, date, is_virtual);
        }
        if is_virtual {
            self.preview(ctx, date);
            return PickEffect::default();
        }
        match self.inner_value.as_slice() {
            [anchor] => {
                let anchor = *anchor;
                self.second_click(ctx, anchor, date)
            }
            _ => self.first_click(date),
        }
    }

    fn preview(&mut self, ctx: &SelectionContext<'_>, date: NaiveDate) {
        if self.offset != 0 {
            self.select_fixed(ctx, date, true);
            return;
        }
        if let [anchor] = self.inner_value.as_slice() {
            self.trying = DateRange::new(*anchor, date).endpoints().to_vec();
            trace!(trying = ?self.trying, "range preview");
        }
    }

    fn reset_trying(&mut self) {
        self.trying = self.inner_value.clone();
    }

    fn has_trying(&self) -> bool {
        !self.trying.is_empty()
    }

    fn trying_state(&self, ctx: &SelectionContext<'_>, date: NaiveDate) -> Option<SelectedState> {
        if self.trying.is_empty() {
            return None;
        }
        Some(ctx.range_state(&self.trying, date))
    }

    fn state_in(ctx: &SelectionContext<'_>, value: &Self::Value, date: NaiveDate) -> SelectedState {
        match value {
            Some(range) => ctx.range_state(&range.endpoints(), date),
            None => SelectedState::None,
        }
    }

    fn members(value: &Self::Value) -> Vec<NaiveDate> {
        value.map(|r| r.endpoints().to_vec()).unwrap_or_default()
    }

    fn start_value_response(&mut self, start: NaiveDate) -> Option<NaiveDate> {
        self.start_hook.as_mut().and_then(|hook| hook(start))
    }

    fn anchor_for_part(value: &Self::Value, part: &str) -> Option<NaiveDate> {
        let range = value.as_ref()?;
        match part {
            END_PART => Some(range.end),
            _ => Some(range.start),
        }
    }
}

/// Part name of the panel showing a range's start endpoint.
pub const START_PART: &str = "start";
/// Part name of the panel showing a range's end endpoint.
pub const END_PART: &str = "end";
