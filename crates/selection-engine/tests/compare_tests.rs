//! Tests for the comparison root.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::NaiveDate;
use selection_engine::{CompareEvent, ComparePicker, DateRange, Granularity, SelectionError};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn january_range() -> Option<DateRange> {
    Some(DateRange::new(date(2026, 1, 5), date(2026, 1, 20)))
}

fn record(compare: &mut ComparePicker) -> Rc<RefCell<Vec<CompareEvent>>> {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    compare.subscribe(move |event| sink.borrow_mut().push(*event));
    events
}

#[test]
fn span_depends_on_granularity() {
    let mut by_month = ComparePicker::new(Granularity::Month);
    by_month.update_source_value(january_range());
    assert_eq!(by_month.span(), Some(1));
    assert_eq!(by_month.target().offset(), 1);

    let mut by_day = ComparePicker::new(Granularity::Day);
    by_day.update_source_value(january_range());
    assert_eq!(by_day.span(), Some(16));
    assert_eq!(by_day.target().offset(), 16);
}

#[test]
fn empty_source_leaves_target_in_two_click_mode() {
    let compare = ComparePicker::new(Granularity::Day);
    assert_eq!(compare.span(), None);
    assert_eq!(compare.target().offset(), 0);
}

#[test]
fn offset_change_is_announced_once() {
    let mut compare = ComparePicker::new(Granularity::Day);
    let events = record(&mut compare);

    compare.update_source_value(january_range());
    compare.update_source_value(january_range());

    assert_eq!(events.borrow().as_slice(), &[CompareEvent::OffsetUpdate(16)]);
}

#[test]
fn target_is_locked_while_comparison_is_off() {
    let mut compare = ComparePicker::new(Granularity::Day);
    assert_eq!(
        compare.set_target_selected(date(2026, 2, 1), false),
        Err(SelectionError::CompareInactive)
    );
    assert_eq!(compare.update_target_value(None), Err(SelectionError::CompareInactive));
    assert_eq!(*compare.target().value(), None);
}

#[test]
fn target_pick_derives_window_of_equal_length() {
    let mut compare = ComparePicker::new(Granularity::Day);
    compare.update_source_value(january_range());
    compare.set_compare(true);

    compare.set_target_selected(date(2026, 2, 1), false).unwrap();

    assert_eq!(
        *compare.target().value(),
        Some(DateRange::new(date(2026, 2, 1), date(2026, 2, 16)))
    );
}

#[test]
fn source_preview_drives_the_offset() {
    let mut compare = ComparePicker::new(Granularity::Day);
    compare.set_source_selected(date(2026, 1, 5), false);
    assert_eq!(compare.target().offset(), 0, "a single anchor has no span");

    compare.set_source_selected(date(2026, 1, 9), true);
    assert_eq!(compare.span(), Some(5));
    assert_eq!(compare.target().offset(), 5);
}

#[test]
fn explicit_offset_overrides_source_span() {
    let mut compare = ComparePicker::new(Granularity::Day);
    let events = record(&mut compare);
    compare.set_target_offset(Some(7));
    compare.update_source_value(january_range());

    assert_eq!(compare.target_offset(), Some(7));
    assert_eq!(compare.target().offset(), 7);
    assert_eq!(events.borrow().as_slice(), &[CompareEvent::OffsetUpdate(7)]);

    compare.set_target_offset(None);
    assert_eq!(compare.target().offset(), 16);
}

#[test]
fn update_target_runs_arbitrary_edits_when_active() {
    let mut compare = ComparePicker::new(Granularity::Day);
    compare.set_compare(true);
    assert!(compare.is_compare());
    let changed = compare
        .update_target_value(Some(DateRange::new(date(2026, 4, 1), date(2026, 4, 3))))
        .unwrap();
    assert!(changed);
    let offset = compare.update_target(|target| target.offset()).unwrap();
    assert_eq!(offset, 0);
}
