//! Grid read-model -- what a rendering layer paints for one panel.
//!
//! A [`GridView`] is a cheap, copyable view over a picker and one of its
//! panels. Cells are computed on demand, so iterating is lazy and calling
//! [`GridView::cells`] or [`GridView::rows`] again restarts from the first cell
//! against the picker's current state.
//!
//! Layouts:
//!
//! - day and week panels: 6 rows x 7 columns starting at the week-aligned
//!   first cell of the cursor's month, with adjacent-month days flagged
//!   `Prev` / `Next`
//! - month panels: 4 rows x 3 columns, January to December
//! - year panels: 4 rows x 3 columns covering the cursor's decade plus one
//!   year on each side

use std::cmp::Ordering;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::calendar;
use crate::granularity::Granularity;
use crate::panel::Panel;
use crate::picker::Picker;
use crate::selection::{SelectedState, SelectionModel};

/// Where a cell sits relative to the page it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridPosition {
    /// Before the page (previous month's days, the year before the decade).
    Prev,
    /// First unit of the page.
    Start,
    In,
    /// Last unit of the page.
    End,
    /// After the page.
    Next,
}

impl GridPosition {
    pub fn is_outside(self) -> bool {
        matches!(self, GridPosition::Prev | GridPosition::Next)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridCell {
    pub date: NaiveDate,
    pub is_today: bool,
    pub position: GridPosition,
    pub selected_state: SelectedState,
    pub trying_selected_state: SelectedState,
    pub disabled: bool,
}

pub struct GridView<'a, S: SelectionModel> {
    picker: &'a Picker<S>,
    owner: &'a Panel,
    panel: &'a Panel,
}

impl<S: SelectionModel> Clone for GridView<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: SelectionModel> Copy for GridView<'_, S> {}

const DAY_ROWS: usize = 6;
const DAY_COLUMNS: usize = 7;
const UNIT_ROWS: usize = 4;
const UNIT_COLUMNS: usize = 3;

impl<'a, S: SelectionModel> GridView<'a, S> {
    pub(crate) fn new(picker: &'a Picker<S>, owner: &'a Panel, panel: &'a Panel) -> Self {
        Self {
            picker,
            owner,
            panel,
        }
    }

    pub fn panel(&self) -> &'a Panel {
        self.panel
    }

    pub fn granularity(&self) -> Granularity {
        self.panel.granularity()
    }

    pub fn cursor(&self) -> NaiveDate {
        self.panel.cursor()
    }

    /// Navigation affordances follow the part's owner panel.
    pub fn hide_prev(&self) -> bool {
        self.owner.hide_prev()
    }

    pub fn hide_next(&self) -> bool {
        self.owner.hide_next()
    }

    pub fn row_count(&self) -> usize {
        if self.granularity().is_day_grid() {
            DAY_ROWS
        } else {
            UNIT_ROWS
        }
    }

    pub fn column_count(&self) -> usize {
        if self.granularity().is_day_grid() {
            DAY_COLUMNS
        } else {
            UNIT_COLUMNS
        }
    }

    pub fn len(&self) -> usize {
        self.row_count() * self.column_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All cells, row-major.
    pub fn cells(&self) -> impl Iterator<Item = GridCell> + 'a {
        let view = *self;
        (0..view.len()).filter_map(move |index| view.cell(index))
    }

    /// Cells grouped by row.
    pub fn rows(&self) -> impl Iterator<Item = impl Iterator<Item = GridCell> + 'a> + 'a {
        let view = *self;
        let columns = view.column_count();
        (0..view.row_count()).map(move |row| (0..columns).filter_map(move |column| view.cell(row * columns + column)))
    }

    /// The cell at a row-major index, `None` past the end of the grid.
    pub fn cell(&self, index: usize) -> Option<GridCell> {
        if index >= self.len() {
            return None;
        }
        let (date, position) = self.layout(index)?;
        let start_day = self.picker.options().start_day;
        let today_granularity = if self.granularity().is_day_grid() {
            Granularity::Day
        } else {
            self.granularity()
        };

        let (selected_state, trying_selected_state) = if self.panel.is_owner() {
            (
                self.picker.selected_state(date),
                self.picker.trying_selected_state(date),
            )
        } else if self.picker.matches_value(self.granularity(), date) {
            (SelectedState::Single, SelectedState::None)
        } else {
            (SelectedState::None, SelectedState::None)
        };

        let disabled_granularity = if self.panel.is_owner() {
            self.picker.granularity()
        } else {
            self.granularity()
        };
        let out_of_page = self.picker.options().out_range_disabled && position.is_outside();
        let disabled = out_of_page || self.picker.options().is_disabled(disabled_granularity, date);

        Some(GridCell {
            date,
            is_today: calendar::same(today_granularity, date, self.picker.today(), start_day),
            position,
            selected_state,
            trying_selected_state,
            disabled,
        })
    }

    fn layout(&self, index: usize) -> Option<(NaiveDate, GridPosition)> {
        let cursor = self.cursor();
        let index_i64 = i64::try_from(index).ok()?;
        match self.granularity() {
            Granularity::Day | Granularity::Week => {
                let first = calendar::first_of_page_week(cursor, self.picker.options().start_day);
                let date = calendar::step_day(first, index_i64);
                let position = match calendar::compare(Granularity::Month, date, cursor, self.picker.options().start_day) {
                    Ordering::Less => GridPosition::Prev,
                    Ordering::Greater => GridPosition::Next,
                    Ordering::Equal if date.day() == 1 => GridPosition::Start,
                    Ordering::Equal if date == calendar::last_of_month(date) => GridPosition::End,
                    Ordering::Equal => GridPosition::In,
                };
                Some((date, position))
            }
            Granularity::Month => {
                let month = u32::try_from(index).ok()? + 1;
                let date = calendar::clamped_date(cursor.year(), month, cursor.day())?;
                let position = match month {
                    1 => GridPosition::Start,
                    12 => GridPosition::End,
                    _ => GridPosition::In,
                };
                Some((date, position))
            }
            Granularity::Year => {
                let offset = i32::try_from(index).ok()?;
                let year = calendar::decade_start(cursor.year()) - 1 + offset;
                let date = calendar::clamped_date(year, cursor.month(), cursor.day())?;
                let position = match offset {
                    0 => GridPosition::Prev,
                    1 => GridPosition::Start,
                    10 => GridPosition::End,
                    11 => GridPosition::Next,
                    _ => GridPosition::In,
                };
                Some((date, position))
            }
        }
    }
}
