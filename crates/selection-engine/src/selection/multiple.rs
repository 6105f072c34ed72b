//! Multi-date selection.
//!
//! Membership is decided by exact day equality and the list keeps insertion
//! order. Change detection compares sorted copies, so reordering alone never
//! announces a new value.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::{PickEffect, SelectedState, SelectionContext, SelectionModel};

/// Policy applied to every date of a frame (drag-box) selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameMode {
    /// Add each date; already-selected dates stay selected.
    Select,
    /// Remove each date; unselected dates stay unselected.
    Unselect,
    /// Toggle each date, like a single pick.
    Reverse,
}

#[derive(Debug, Clone, Default)]
pub struct MultipleSelection {
    value: Vec<NaiveDate>,
    trying: Option<Vec<NaiveDate>>,
}

fn toggle(list: &mut Vec<NaiveDate>, date: NaiveDate) {
    match list.iter().position(|d| *d == date) {
        Some(index) => {
            list.remove(index);
        }
        None => list.push(date),
    }
}

fn sorted(list: &[NaiveDate]) -> Vec<NaiveDate> {
    let mut copy = list.to_vec();
    copy.sort();
    copy
}

impl MultipleSelection {
    pub fn new(value: Vec<NaiveDate>) -> Self {
        Self {
            value,
            trying: None,
        }
    }

    pub fn trying(&self) -> Option<&[NaiveDate]> {
        self.trying.as_deref()
    }

    /// Apply `mode` to every enabled date of `dates`. Disabled dates are
    /// skipped, neither added nor removed.
    pub fn select_frame(
        &mut self,
        ctx: &SelectionContext<'_>,
        dates: &[NaiveDate],
        mode: FrameMode,
        is_virtual: bool,
    ) -> PickEffect {
        let mut next = self.value.clone();
        for &date in dates {
            if ctx.is_disabled(date) {
                continue;
            }
            match mode {
                FrameMode::Select => {
                    if !next.contains(&date) {
                        next.push(date);
                    }
                }
                FrameMode::Unselect => next.retain(|d| *d != date),
                FrameMode::Reverse => toggle(&mut next, date),
            }
        }
        if is_virtual {
            trace!(count = next.len(), ?mode, "frame selection preview");
            self.trying = Some(next);
            return PickEffect::default();
        }
        self.apply(next)
    }

    fn apply(&mut self, next: Vec<NaiveDate>) -> PickEffect {
        self.trying = None;
        let changed = sorted(&self.value) != sorted(&next);
        self.value = next;
        debug!(count = self.value.len(), changed, "committed multiple selection");
        PickEffect::committed(changed)
    }
}

impl SelectionModel for MultipleSelection {
    type Value = Vec<NaiveDate>;

    fn value(&self) -> &Self::Value {
        &self.value
    }

    fn replace_value(&mut self, _ctx: &SelectionContext<'_>, value: Self::Value) -> bool {
        let changed = sorted(&self.value) != sorted(&value);
        self.value = value;
        self.trying = None;
        changed
    }

    fn select(&mut self, ctx: &SelectionContext<'_>, date: NaiveDate, is_virtual: bool) -> PickEffect {
        if ctx.is_disabled(date) {
            debug!(%date, "rejected disabled pick");
            return PickEffect::default();
        }
        let mut next = self.value.clone();
        toggle(&mut next, date);
        if is_virtual {
            self.trying = Some(next);
            return PickEffect::default();
        }
        self.apply(next)
    }

    fn preview(&mut self, ctx: &SelectionContext<'_>, date: NaiveDate) {
        self.select(ctx, date, true);
    }

    fn reset_trying(&mut self) {
        self.trying = None;
    }

    fn has_trying(&self) -> bool {
        self.trying.is_some()
    }

    fn trying_state(&self, ctx: &SelectionContext<'_>, date: NaiveDate) -> Option<SelectedState> {
        self.trying.as_ref().map(|trying| Self::state_in(ctx, trying, date))
    }

    fn state_in(ctx: &SelectionContext<'_>, value: &Self::Value, date: NaiveDate) -> SelectedState {
        if value.iter().any(|selected| ctx.same(*selected, date)) {
            SelectedState::Single
        } else {
            SelectedState::None
        }
    }

    fn members(value: &Self::Value) -> Vec<NaiveDate> {
        value.clone()
    }
}
