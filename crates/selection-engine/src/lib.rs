//! # selection-engine
//!
//! Selection state and navigation panels for calendar date pickers.
//!
//! The engine owns the truth of "which dates are selected" for single-date,
//! range, multi-date and source/target comparison pickers, and computes the
//! read-only grids (days, months, decades) a rendering layer paints. It keeps
//! committed values apart from hover previews, compares and steps dates at a
//! chosen granularity, and scans candidate ranges against disabled-date rules.
//!
//! ```rust
//! use chrono::NaiveDate;
//! use selection_engine::{Granularity, RangePicker, SelectedState};
//!
//! let day = |d| NaiveDate::from_ymd_opt(2026, 3, d).unwrap();
//! let mut picker = RangePicker::range(Granularity::Day);
//! picker.set_selected(day(2), false);
//! picker.set_selected(day(4), false);
//!
//! assert_eq!(picker.selected_state(day(3)), SelectedState::In);
//! assert_eq!(picker.value().map(|r| r.end), Some(day(4)));
//! ```
//!
//! ## Modules
//!
//! - [`calendar`] — stepping, week numbering, granularity-aware comparison
//! - [`validity`] — strict/lenient scan of a range against disabled units
//! - [`options`] — picker configuration rebuilt in full on every update
//! - [`selection`] — simple, range and multiple selection models
//! - [`panel`] — panel registry, drill-down chains, navigation
//! - [`grid`] — lazy grid read-model for one panel
//! - [`picker`] — the selection root tying models, panels and listeners together
//! - [`compare`] — source/target ranges locked to equal length
//! - [`time`] — time-of-day columns with independent steps
//! - [`event`] — change notifications
//! - [`error`] — error types

pub mod calendar;
pub mod compare;
pub mod error;
pub mod event;
pub mod granularity;
pub mod grid;
pub mod options;
pub mod panel;
pub mod picker;
pub mod selection;
pub mod time;
pub mod validity;

pub use compare::{CompareEvent, ComparePicker};
pub use error::SelectionError;
pub use event::{ListenerId, PickerEvent};
pub use granularity::Granularity;
pub use grid::{GridCell, GridPosition, GridView};
pub use options::PickerOptions;
pub use panel::{Navigation, Panel, PanelId};
pub use picker::{MultiplePicker, Picker, RangePicker, SimplePicker};
pub use selection::{DateRange, FrameMode, SelectedState, SelectionModel};
