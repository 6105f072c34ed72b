//! Single-date selection.
//!
//! A single-pick widget has no preview semantics at its commit entry point:
//! [`SelectionModel::select`] ignores the virtual flag and commits any enabled
//! date. Hover previews reach the model only through
//! [`SelectionModel::preview`], which panels call for virtual picks.

use chrono::NaiveDate;
use tracing::{debug, trace};

use super::{PickEffect, SelectedState, SelectionContext, SelectionModel};

#[derive(Debug, Clone, Default)]
pub struct SimpleSelection {
    value: Option<NaiveDate>,
    trying: Option<NaiveDate>,
}

impl SimpleSelection {
    pub fn new(value: Option<NaiveDate>) -> Self {
        Self {
            value,
            trying: None,
        }
    }

    pub fn trying(&self) -> Option<NaiveDate> {
        self.trying
    }
}

impl SelectionModel for SimpleSelection {
    type Value = Option<NaiveDate>;

    fn value(&self) -> &Self::Value {
        &self.value
    }

    fn replace_value(&mut self, _ctx: &SelectionContext<'_>, value: Self::Value) -> bool {
        let changed = self.value != value;
        self.value = value;
        changed
    }

    fn select(&mut self, ctx: &SelectionContext<'_>, date: NaiveDate, _is_virtual: bool) -> PickEffect {
        if ctx.is_disabled(date) {
            debug!(%date, granularity = %ctx.granularity, "rejected disabled pick");
            return PickEffect::default();
        }
        self.trying = None;
        let changed = self.value != Some(date);
        self.value = Some(date);
        debug!(%date, changed, "committed single date");
        PickEffect::committed(changed)
    }

    fn preview(&mut self, ctx: &SelectionContext<'_>, date: NaiveDate) {
        self.trying = (!ctx.is_disabled(date)).then_some(date);
        trace!(trying = ?self.trying, "single date preview");
    }

    fn reset_trying(&mut self) {
        self.trying = None;
    }

    fn has_trying(&self) -> bool {
        self.trying.is_some()
    }

    fn trying_state(&self, ctx: &SelectionContext<'_>, date: NaiveDate) -> Option<SelectedState> {
        self.trying.map(|trying| {
            if ctx.same(trying, date) {
                SelectedState::Single
            } else {
                SelectedState::None
            }
        })
    }

    fn state_in(ctx: &SelectionContext<'_>, value: &Self::Value, date: NaiveDate) -> SelectedState {
        match value {
            Some(selected) if ctx.same(*selected, date) => SelectedState::Single,
            _ => SelectedState::None,
        }
    }

    fn members(value: &Self::Value) -> Vec<NaiveDate> {
        value.iter().copied().collect()
    }
}
