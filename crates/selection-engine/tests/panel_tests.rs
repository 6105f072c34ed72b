//! Tests for panel registration, navigation, drill-down and the grid read-model.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{NaiveDate, Weekday};
use selection_engine::selection::range::{END_PART, START_PART};
use selection_engine::{
    DateRange, GridPosition, Granularity, PickerEvent, PickerOptions, RangePicker, SelectedState, SelectionError,
    SimplePicker,
};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

const MAIN: &str = "main";

/// A day picker opened on 2026-03-20 with "today" pinned to 2026-03-10.
fn day_picker() -> SimplePicker {
    let mut picker = SimplePicker::simple(Granularity::Day).with_today(|| date(2026, 3, 10));
    picker.register_part(MAIN, Some(date(2026, 3, 20))).unwrap();
    picker
}

// ── Registration ────────────────────────────────────────────────────────────

#[test]
fn registering_a_part_twice_fails() {
    let mut picker = day_picker();
    assert_eq!(
        picker.register_part(MAIN, None),
        Err(SelectionError::DuplicatePart(MAIN.to_string()))
    );
}

#[test]
fn unknown_part_is_an_error() {
    let picker = day_picker();
    assert_eq!(
        picker.panel("missing").map(|p| p.id()),
        Err(SelectionError::UnknownPart("missing".to_string()))
    );
}

#[test]
fn day_part_owns_month_and_decade_panels() {
    let picker = day_picker();
    let owner = picker.panel(MAIN).unwrap();
    assert!(owner.is_owner());
    assert_eq!(owner.drill_downs().len(), 2);

    let month = picker.grid_view_at(MAIN, Granularity::Month).unwrap();
    assert!(!month.panel().is_owner());
    assert_eq!(month.panel().owner(), owner.id());
    assert_eq!(picker.panel_by_id(owner.drill_downs()[1]).unwrap().granularity(), Granularity::Year);
}

#[test]
fn month_part_has_no_day_grid() {
    let mut picker = SimplePicker::simple(Granularity::Month);
    picker.register_part(MAIN, Some(date(2026, 3, 1))).unwrap();
    assert_eq!(
        picker.grid_view_at(MAIN, Granularity::Day).map(|v| v.len()),
        Err(SelectionError::UnsupportedDisplay {
            part: MAIN.to_string(),
            granularity: Granularity::Day,
        })
    );
    assert!(picker.grid_view_at(MAIN, Granularity::Year).is_ok());
}

#[test]
fn cursor_defaults_to_value_then_today() {
    let mut picker = SimplePicker::simple(Granularity::Day).with_today(|| date(2026, 10, 17));
    picker.register_part("a", None).unwrap();
    assert_eq!(picker.panel("a").unwrap().cursor(), date(2026, 10, 17));

    picker.update_value(Some(date(2025, 1, 9)));
    picker.register_part("b", None).unwrap();
    assert_eq!(picker.panel("b").unwrap().cursor(), date(2025, 1, 9));
}

#[test]
fn unregister_drops_the_chain() {
    let mut picker = day_picker();
    picker.unregister_part(MAIN).unwrap();
    assert!(picker.panels().is_empty());
    assert!(picker.grid_view(MAIN).is_err());
    assert_eq!(
        picker.unregister_part(MAIN),
        Err(SelectionError::UnknownPart(MAIN.to_string()))
    );
}

// ── Day grid ────────────────────────────────────────────────────────────────

#[test]
fn day_grid_has_six_full_weeks() {
    let picker = day_picker();
    let view = picker.grid_view(MAIN).unwrap();
    assert_eq!(view.len(), 42);
    assert_eq!(view.cells().count(), 42);
    assert_eq!(view.rows().count(), 6);
    assert!(view.rows().all(|row| row.count() == 7));
    assert!(view.cell(42).is_none());
}

#[test]
fn day_grid_positions_follow_the_cursor_month() {
    let picker = day_picker();
    let view = picker.grid_view(MAIN).unwrap();

    // March 2026 opens on a Sunday, the default week start.
    let first = view.cell(0).unwrap();
    assert_eq!(first.date, date(2026, 3, 1));
    assert_eq!(first.position, GridPosition::Start);
    assert_eq!(view.cell(1).unwrap().position, GridPosition::In);
    assert_eq!(view.cell(30).unwrap().date, date(2026, 3, 31));
    assert_eq!(view.cell(30).unwrap().position, GridPosition::End);
    assert_eq!(view.cell(31).unwrap().position, GridPosition::Next);
}

#[test]
fn monday_start_shifts_the_grid() {
    let mut picker = SimplePicker::simple(Granularity::Day)
        .with_options(PickerOptions::builder().start_day(Weekday::Mon).build());
    picker.register_part(MAIN, Some(date(2026, 3, 20))).unwrap();
    let view = picker.grid_view(MAIN).unwrap();
    let first = view.cell(0).unwrap();
    assert_eq!(first.date, date(2026, 2, 23));
    assert_eq!(first.position, GridPosition::Prev);
    assert_eq!(view.cell(6).unwrap().date, date(2026, 3, 1));
}

#[test]
fn today_and_selection_are_flagged() {
    let mut picker = day_picker();
    picker.set_selected(date(2026, 3, 4), false);
    let view = picker.grid_view(MAIN).unwrap();

    let today: Vec<_> = view.cells().filter(|c| c.is_today).map(|c| c.date).collect();
    assert_eq!(today, vec![date(2026, 3, 10)]);

    let selected: Vec<_> = view
        .cells()
        .filter(|c| c.selected_state.is_selected())
        .map(|c| c.date)
        .collect();
    assert_eq!(selected, vec![date(2026, 3, 4)]);
}

#[test]
fn out_range_disabled_disables_adjacent_month_cells() {
    let mut picker = SimplePicker::simple(Granularity::Day)
        .with_options(PickerOptions::builder().out_range_disabled(true).build());
    picker.register_part(MAIN, Some(date(2026, 3, 20))).unwrap();
    let view = picker.grid_view(MAIN).unwrap();
    assert!(view.cells().filter(|c| c.position.is_outside()).all(|c| c.disabled));
    assert!(view.cells().filter(|c| !c.position.is_outside()).all(|c| !c.disabled));
}

#[test]
fn range_grid_shades_the_committed_range() {
    let mut picker = RangePicker::range(Granularity::Day);
    picker.register_part(START_PART, Some(date(2026, 3, 1))).unwrap();
    picker.update_value(Some(DateRange::new(date(2026, 3, 3), date(2026, 3, 5))));
    let view = picker.grid_view(START_PART).unwrap();

    let states: Vec<_> = view
        .cells()
        .filter(|c| c.selected_state.is_selected())
        .map(|c| (c.date.format("%d").to_string(), c.selected_state))
        .collect();
    assert_eq!(
        states,
        vec![
            ("03".to_string(), SelectedState::Start),
            ("04".to_string(), SelectedState::In),
            ("05".to_string(), SelectedState::End),
        ]
    );
}

#[test]
fn grid_cell_serializes_with_lowercase_enums() {
    let picker = day_picker();
    let cell = picker.grid_view(MAIN).unwrap().cell(0).unwrap();
    assert_eq!(
        serde_json::to_value(cell).unwrap(),
        serde_json::json!({
            "date": "2026-03-01",
            "is_today": false,
            "position": "start",
            "selected_state": "none",
            "trying_selected_state": "none",
            "disabled": false,
        })
    );
}

// ── Month and decade grids ──────────────────────────────────────────────────

#[test]
fn month_grid_lists_the_cursor_year() {
    let picker = day_picker();
    let view = picker.grid_view_at(MAIN, Granularity::Month).unwrap();
    assert_eq!((view.row_count(), view.column_count()), (4, 3));
    let cells: Vec<_> = view.cells().collect();
    assert_eq!(cells[0].date, date(2026, 1, 20));
    assert_eq!(cells[0].position, GridPosition::Start);
    assert_eq!(cells[1].date, date(2026, 2, 20));
    assert_eq!(cells[11].position, GridPosition::End);
}

#[test]
fn decade_grid_pads_one_year_each_side() {
    let picker = day_picker();
    let view = picker.grid_view_at(MAIN, Granularity::Year).unwrap();
    let cells: Vec<_> = view.cells().collect();
    assert_eq!(cells.len(), 12);
    assert_eq!(cells[0].date, date(2019, 3, 20));
    assert_eq!(cells[0].position, GridPosition::Prev);
    assert_eq!(cells[1].date, date(2020, 3, 20));
    assert_eq!(cells[1].position, GridPosition::Start);
    assert_eq!(cells[10].position, GridPosition::End);
    assert_eq!(cells[11].date, date(2030, 3, 20));
    assert_eq!(cells[11].position, GridPosition::Next);
}

#[test]
fn drill_down_panels_show_plain_membership() {
    let mut picker = RangePicker::range(Granularity::Day);
    picker.register_part(START_PART, Some(date(2026, 3, 1))).unwrap();
    picker.update_value(Some(DateRange::new(date(2026, 3, 3), date(2026, 5, 5))));

    let months: Vec<_> = picker
        .grid_view_at(START_PART, Granularity::Month)
        .unwrap()
        .cells()
        .map(|c| c.selected_state)
        .collect();
    // Only the endpoint months match; drill-down panels never shade ranges.
    assert_eq!(months[2], SelectedState::Single);
    assert_eq!(months[3], SelectedState::None);
    assert_eq!(months[4], SelectedState::Single);
}

// ── Picking through panels ──────────────────────────────────────────────────

#[test]
fn drill_down_pick_narrows_without_committing() {
    let mut picker = day_picker();
    picker.set_display(MAIN, Granularity::Year).unwrap();
    assert_eq!(picker.grid_view(MAIN).unwrap().granularity(), Granularity::Year);

    picker.pick(MAIN, date(2024, 1, 1), false).unwrap();
    assert_eq!(*picker.value(), None);
    assert_eq!(picker.panel(MAIN).unwrap().display(), Granularity::Month);
    assert_eq!(picker.panel(MAIN).unwrap().cursor(), date(2024, 3, 20));

    picker.pick(MAIN, date(2024, 2, 1), false).unwrap();
    assert_eq!(*picker.value(), None);
    assert_eq!(picker.panel(MAIN).unwrap().display(), Granularity::Day);
    assert_eq!(picker.panel(MAIN).unwrap().cursor(), date(2024, 2, 20));

    picker.pick(MAIN, date(2024, 2, 11), false).unwrap();
    assert_eq!(*picker.value(), Some(date(2024, 2, 11)));
}

#[test]
fn virtual_pick_previews_only_through_the_owner() {
    let mut picker = day_picker();
    picker.pick_at(MAIN, Granularity::Month, date(2026, 7, 1), true).unwrap();
    assert!(!picker.has_trying());

    picker.pick(MAIN, date(2026, 3, 12), true).unwrap();
    assert_eq!(picker.trying(), Some(date(2026, 3, 12)));
    assert_eq!(*picker.value(), None);
}

#[test]
fn month_picker_commits_with_clamped_cursor_day() {
    let mut picker = SimplePicker::simple(Granularity::Month);
    picker.register_part(MAIN, Some(date(2026, 1, 31))).unwrap();
    picker.pick(MAIN, date(2026, 2, 1), false).unwrap();
    assert_eq!(*picker.value(), Some(date(2026, 2, 28)));
}

// ── Navigation ──────────────────────────────────────────────────────────────

#[test]
fn navigation_moves_the_chain_and_announces_it() {
    let mut picker = day_picker();
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    picker.subscribe(move |event| sink.borrow_mut().push(event.clone()));

    picker.next_month(MAIN).unwrap();
    picker.next_decade(MAIN).unwrap();
    picker.prev_year(MAIN).unwrap();

    let expected = date(2035, 4, 20);
    assert_eq!(picker.panel(MAIN).unwrap().cursor(), expected);
    assert_eq!(picker.grid_view_at(MAIN, Granularity::Year).unwrap().cursor(), expected);
    assert_eq!(
        events.borrow().last(),
        Some(&PickerEvent::SetPanelDate {
            part: MAIN.to_string(),
            date: expected,
        })
    );
    assert_eq!(*picker.value(), None, "navigation never commits");
}

#[test]
fn hidden_navigation_is_reported_by_every_grid_of_the_part() {
    let mut picker = day_picker();
    picker.set_navigation_hidden(MAIN, false, true).unwrap();
    let decade = picker.grid_view_at(MAIN, Granularity::Year).unwrap();
    assert!(!decade.hide_prev());
    assert!(decade.hide_next());
}

#[test]
fn update_value_recentres_each_range_part() {
    let mut picker = RangePicker::range(Granularity::Day);
    picker.register_part(START_PART, Some(date(2026, 1, 1))).unwrap();
    picker.register_part(END_PART, Some(date(2026, 1, 1))).unwrap();
    picker.update_value(Some(DateRange::new(date(2026, 3, 3), date(2026, 5, 9))));
    assert_eq!(picker.panel(START_PART).unwrap().cursor(), date(2026, 3, 3));
    assert_eq!(picker.panel(END_PART).unwrap().cursor(), date(2026, 5, 9));
}

#[test]
fn dispose_detaches_panels_and_listeners() {
    let mut picker = day_picker();
    let count = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&count);
    picker.subscribe(move |_| *sink.borrow_mut() += 1);

    picker.dispose();
    picker.set_selected(date(2026, 3, 4), false);

    assert!(picker.panels().is_empty());
    assert_eq!(*count.borrow(), 0);
}

#[test]
fn update_value_moves_whole_chains_and_skips_unresolved_parts() {
    let mut picker = day_picker();
    picker.update_value(Some(date(2027, 8, 15)));
    assert_eq!(picker.panel(MAIN).unwrap().cursor(), date(2027, 8, 15));
    assert_eq!(picker.grid_view_at(MAIN, Granularity::Month).unwrap().cursor(), date(2027, 8, 15));
    assert_eq!(picker.grid_view_at(MAIN, Granularity::Year).unwrap().cursor(), date(2027, 8, 15));

    // Clearing the value leaves nothing to centre on.
    picker.update_value(None);
    assert_eq!(picker.panel(MAIN).unwrap().cursor(), date(2027, 8, 15));
}
