//! Comparison root -- a source range and a target range locked to equal length.
//!
//! Whenever the source's committed or previewed window changes, its inclusive
//! span is pushed to the target as a fixed-length offset, so a single pick on
//! the target derives a window of the same length. An explicit target offset
//! overrides the computed span.
//!
//! The target only accepts edits while comparison is switched on; editing it
//! otherwise is a programming error and is returned as
//! [`SelectionError::CompareInactive`].

use chrono::NaiveDate;
use tracing::debug;

use crate::calendar;
use crate::error::{Result, SelectionError};
use crate::event::{ListenerId, Listeners};
use crate::granularity::Granularity;
use crate::picker::RangePicker;
use crate::selection::DateRange;

/// Notifications emitted by a [`ComparePicker`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareEvent {
    /// The target's offset was recomputed; carries the new offset.
    OffsetUpdate(i64),
}

#[derive(Debug)]
pub struct ComparePicker {
    source: RangePicker,
    target: RangePicker,
    is_compare: bool,
    target_offset: Option<i64>,
    listeners: Listeners<CompareEvent>,
}

impl ComparePicker {
    pub fn new(granularity: Granularity) -> Self {
        Self::from_parts(RangePicker::range(granularity), RangePicker::range(granularity))
    }

    /// Build from preconfigured source and target pickers.
    pub fn from_parts(source: RangePicker, target: RangePicker) -> Self {
        let mut compare = Self {
            source,
            target,
            is_compare: false,
            target_offset: None,
            listeners: Listeners::default(),
        };
        compare.sync_offset();
        compare
    }

    pub fn source(&self) -> &RangePicker {
        &self.source
    }

    pub fn target(&self) -> &RangePicker {
        &self.target
    }

    pub fn is_compare(&self) -> bool {
        self.is_compare
    }

    pub fn set_compare(&mut self, is_compare: bool) {
        self.is_compare = is_compare;
    }

    pub fn target_offset(&self) -> Option<i64> {
        self.target_offset
    }

    /// Pin the target offset instead of following the source span. `None`
    /// goes back to following the source.
    pub fn set_target_offset(&mut self, offset: Option<i64>) {
        self.target_offset = offset;
        self.sync_offset();
    }

    /// The inclusive length of the source's visible window, preferring a
    /// two-date preview over the committed value.
    pub fn span(&self) -> Option<i64> {
        let window = match self.source.trying() {
            [start, end] => Some(DateRange::new(*start, *end)),
            _ => *self.source.value(),
        }?;
        let start_day = self.source.options().start_day;
        Some(calendar::span(self.source.granularity(), window.start, window.end, start_day))
    }

    /// Mutate the source, then resync the target's offset.
    pub fn update_source<R>(&mut self, edit: impl FnOnce(&mut RangePicker) -> R) -> R {
        let result = edit(&mut self.source);
        self.sync_offset();
        result
    }

    /// Mutate the target. Only allowed while comparison is on.
    pub fn update_target<R>(&mut self, edit: impl FnOnce(&mut RangePicker) -> R) -> Result<R> {
        if !self.is_compare {
            return Err(SelectionError::CompareInactive);
        }
        Ok(edit(&mut self.target))
    }

    pub fn set_source_selected(&mut self, date: NaiveDate, is_virtual: bool) {
        self.update_source(|source| source.set_selected(date, is_virtual));
    }

    pub fn set_target_selected(&mut self, date: NaiveDate, is_virtual: bool) -> Result<()> {
        self.update_target(|target| target.set_selected(date, is_virtual))
    }

    pub fn update_source_value(&mut self, value: Option<DateRange>) -> bool {
        self.update_source(|source| source.update_value(value))
    }

    pub fn update_target_value(&mut self, value: Option<DateRange>) -> Result<bool> {
        self.update_target(|target| target.update_value(value))
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&CompareEvent) + 'static) -> ListenerId {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    fn sync_offset(&mut self) {
        let offset = self.target_offset.or_else(|| self.span()).unwrap_or(0);
        if self.target.offset() == offset {
            return;
        }
        debug!(offset, "target offset follows source span");
        self.target.set_offset(offset);
        self.listeners.emit(&CompareEvent::OffsetUpdate(offset));
    }
}
