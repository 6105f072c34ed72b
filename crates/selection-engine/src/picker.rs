//! The selection root: one committed value, its previews, its panels and its listeners.
//!
//! [`Picker`] is generic over a [`SelectionModel`], so a single-date, range and
//! multi-date picker share panel management, navigation and notification while
//! each model keeps its own commit rules. Panels never mutate the model; every
//! write goes through [`Picker::set_selected`] or one of the variant-specific
//! entry points below.

use std::fmt;
use std::rc::Rc;

use chrono::{Datelike, Local, NaiveDate};
use tracing::{debug, trace};

use crate::calendar;
use crate::error::Result;
use crate::event::{ListenerId, Listeners, PickerEvent};
use crate::grid::GridView;
use crate::granularity::Granularity;
use crate::options::PickerOptions;
use crate::panel::{Navigation, Panel, PanelId, PanelRegistry};
use crate::selection::range::AddStartHook;
use crate::selection::{
    FrameMode, MultipleSelection, RangeSelection, SelectedState, SelectionContext, SelectionModel,
    SimpleSelection,
};

/// Source of "today" for `is_today` flags.
pub type Clock = Rc<dyn Fn() -> NaiveDate>;

pub type SimplePicker = Picker<SimpleSelection>;
pub type RangePicker = Picker<RangeSelection>;
pub type MultiplePicker = Picker<MultipleSelection>;

pub struct Picker<S: SelectionModel> {
    granularity: Granularity,
    model: S,
    options: PickerOptions,
    panels: PanelRegistry,
    preset_trying: Option<S::Value>,
    listeners: Listeners<PickerEvent<S::Value>>,
    clock: Clock,
}

impl<S: SelectionModel + fmt::Debug> fmt::Debug for Picker<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Picker")
            .field("granularity", &self.granularity)
            .field("model", &self.model)
            .field("options", &self.options)
            .field("panels", &self.panels)
            .field("preset_trying", &self.preset_trying)
            .field("listeners", &self.listeners)
            .finish()
    }
}

impl<S: SelectionModel> Picker<S> {
    pub fn new(granularity: Granularity, model: S) -> Self {
        Self {
            granularity,
            model,
            options: PickerOptions::default(),
            panels: PanelRegistry::default(),
            preset_trying: None,
            listeners: Listeners::default(),
            clock: Rc::new(|| Local::now().date_naive()),
        }
    }

    pub fn with_options(mut self, options: PickerOptions) -> Self {
        self.options = options;
        self
    }

    /// Replace the clock used for `is_today`, mostly for deterministic hosts and tests.
    pub fn with_today(mut self, today: impl Fn() -> NaiveDate + 'static) -> Self {
        self.clock = Rc::new(today);
        self
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    pub fn options(&self) -> &PickerOptions {
        &self.options
    }

    pub fn model(&self) -> &S {
        &self.model
    }

    pub fn value(&self) -> &S::Value {
        self.model.value()
    }

    pub fn today(&self) -> NaiveDate {
        (self.clock)()
    }

    pub fn panels(&self) -> &PanelRegistry {
        &self.panels
    }

    pub fn context(&self) -> SelectionContext<'_> {
        SelectionContext::new(self.granularity, &self.options)
    }

    /// Replace every option at once. Keys missing from `options` are at their
    /// defaults, they do not inherit the previous configuration.
    pub fn update_options(&mut self, options: PickerOptions) {
        debug!(?options, "replaced picker options");
        self.options = options;
    }

    // ── Panels ──────────────────────────────────────────────────────────────

    /// Register a part and its drill-down chain. Without an explicit cursor the
    /// panel opens on the part's committed date, or today.
    pub fn register_part(&mut self, part: &str, cursor: Option<NaiveDate>) -> Result<PanelId> {
        let cursor = cursor
            .or_else(|| S::anchor_for_part(self.model.value(), part))
            .unwrap_or_else(|| self.today());
        self.panels.register(part, self.granularity, cursor)
    }

    pub fn unregister_part(&mut self, part: &str) -> Result<()> {
        self.panels.unregister(part)
    }

    /// The owner panel of `part`.
    pub fn panel(&self, part: &str) -> Result<&Panel> {
        self.panels.owner(part)
    }

    pub fn panel_by_id(&self, id: PanelId) -> Option<&Panel> {
        self.panels.get(id)
    }

    pub fn set_display(&mut self, part: &str, granularity: Granularity) -> Result<()> {
        self.panels.set_display(part, granularity)
    }

    pub fn set_navigation_hidden(&mut self, part: &str, hide_prev: bool, hide_next: bool) -> Result<()> {
        self.panels.set_navigation_hidden(part, hide_prev, hide_next)
    }

    /// Grid read-model of whatever `part` is currently displaying.
    pub fn grid_view(&self, part: &str) -> Result<GridView<'_, S>> {
        let owner = self.panels.owner(part)?;
        let panel = self.panels.displayed(part)?;
        Ok(GridView::new(self, owner, panel))
    }

    /// Grid read-model of one specific panel of `part`'s chain.
    pub fn grid_view_at(&self, part: &str, granularity: Granularity) -> Result<GridView<'_, S>> {
        let owner = self.panels.owner(part)?;
        let panel = self.panels.panel_at(part, granularity)?;
        Ok(GridView::new(self, owner, panel))
    }

    /// Move the shared cursor of `part`'s chain and announce it.
    pub fn sync_cursor_date(&mut self, part: &str, date: NaiveDate) -> Result<()> {
        self.panels.sync_cursor(part, date)?;
        self.emit(PickerEvent::SetPanelDate {
            part: part.to_string(),
            date,
        });
        Ok(())
    }

    pub fn navigate(&mut self, part: &str, navigation: Navigation) -> Result<()> {
        let cursor = self.panels.owner(part)?.cursor();
        self.sync_cursor_date(part, navigation.apply(cursor))
    }

    pub fn prev_month(&mut self, part: &str) -> Result<()> {
        self.navigate(part, Navigation::PrevMonth)
    }

    pub fn next_month(&mut self, part: &str) -> Result<()> {
        self.navigate(part, Navigation::NextMonth)
    }

    pub fn prev_year(&mut self, part: &str) -> Result<()> {
        self.navigate(part, Navigation::PrevYear)
    }

    pub fn next_year(&mut self, part: &str) -> Result<()> {
        self.navigate(part, Navigation::NextYear)
    }

    pub fn prev_decade(&mut self, part: &str) -> Result<()> {
        self.navigate(part, Navigation::PrevDecade)
    }

    pub fn next_decade(&mut self, part: &str) -> Result<()> {
        self.navigate(part, Navigation::NextDecade)
    }

    /// A user pick on the grid `part` is currently displaying.
    pub fn pick(&mut self, part: &str, cell: NaiveDate, is_virtual: bool) -> Result<()> {
        let granularity = self.panels.displayed(part)?.granularity();
        self.pick_at(part, granularity, cell, is_virtual)
    }

    /// A user pick on the `granularity` panel of `part`'s chain.
    ///
    /// Virtual picks only preview, and only through the owner panel. A real
    /// pick on the owner commits through [`Picker::set_selected`]; a real pick
    /// on a drill-down panel drills one level finer instead. Either way the
    /// resolved date becomes the chain's cursor.
    pub fn pick_at(&mut self, part: &str, granularity: Granularity, cell: NaiveDate, is_virtual: bool) -> Result<()> {
        let panel = self.panels.panel_at(part, granularity)?;
        let is_owner = panel.is_owner();
        let resolved = resolve_cell(granularity, cell, panel.cursor());

        if is_virtual {
            if is_owner {
                let ctx = SelectionContext::new(self.granularity, &self.options);
                self.model.preview(&ctx, resolved);
            }
            return Ok(());
        }

        if is_owner {
            self.set_selected(resolved, false);
        } else if let Some(finer) = self.panels.finer_than(part, granularity)? {
            trace!(part, from = %granularity, to = %finer, "drilled down");
            self.panels.set_display(part, finer)?;
        }
        self.sync_cursor_date(part, resolved)
    }

    // ── Selection ───────────────────────────────────────────────────────────

    /// The commit entry point. Announces `ValueChange` only when the committed
    /// value actually changed.
    pub fn set_selected(&mut self, date: NaiveDate, is_virtual: bool) {
        let ctx = SelectionContext::new(self.granularity, &self.options);
        let effect = self.model.select(&ctx, date, is_virtual);
        if effect.committed {
            self.emit_value_change();
        }
        if let Some(start) = effect.start_added {
            self.emit(PickerEvent::AddStartValue(start));
            if let Some(end) = self.model.start_value_response(start) {
                debug!(%start, %end, "add-start hook supplied the end value");
                self.set_selected(end, false);
            }
        }
    }

    /// Hover or drag preview through the model, without a panel.
    pub fn preview(&mut self, date: NaiveDate) {
        let ctx = SelectionContext::new(self.granularity, &self.options);
        self.model.preview(&ctx, date);
    }

    /// Replace the committed value from outside and recentre every part whose
    /// value resolves. Parts that are not registered are simply not painted.
    /// Returns whether the value changed; external updates are not announced.
    pub fn update_value(&mut self, value: S::Value) -> bool {
        let ctx = SelectionContext::new(self.granularity, &self.options);
        let changed = self.model.replace_value(&ctx, value);
        let model = &self.model;
        self.panels.sync_cursors(|part| S::anchor_for_part(model.value(), part));
        changed
    }

    pub fn reset_trying(&mut self) {
        self.model.reset_trying();
    }

    pub fn has_trying(&self) -> bool {
        self.model.has_trying()
    }

    /// Show a quick-pick shortcut's value as a preview. Takes precedence over
    /// the regular preview until reset.
    pub fn set_preset_trying(&mut self, value: S::Value) {
        self.preset_trying = Some(value);
    }

    pub fn reset_preset_trying(&mut self) {
        self.preset_trying = None;
    }

    pub fn preset_trying(&self) -> Option<&S::Value> {
        self.preset_trying.as_ref()
    }

    pub fn is_disabled(&self, date: NaiveDate) -> bool {
        self.options.is_disabled(self.granularity, date)
    }

    /// State against the committed value only.
    pub fn committed_state(&self, date: NaiveDate) -> SelectedState {
        S::state_in(&self.context(), self.model.value(), date)
    }

    /// State against whichever value is showing: the preset preview, then the
    /// regular preview, then the committed value.
    pub fn selected_state(&self, date: NaiveDate) -> SelectedState {
        self.trying_selected_state_opt(date)
            .unwrap_or_else(|| self.committed_state(date))
    }

    /// State against the preview channels only, `None` without a preview.
    pub fn trying_selected_state(&self, date: NaiveDate) -> SelectedState {
        self.trying_selected_state_opt(date).unwrap_or_default()
    }

    fn trying_selected_state_opt(&self, date: NaiveDate) -> Option<SelectedState> {
        let ctx = self.context();
        match &self.preset_trying {
            Some(preset) => Some(S::state_in(&ctx, preset, date)),
            None => self.model.trying_state(&ctx, date),
        }
    }

    /// Plain equality against the committed value at `granularity`, used by
    /// drill-down panels that never show range shading.
    pub fn matches_value(&self, granularity: Granularity, date: NaiveDate) -> bool {
        S::members(self.model.value())
            .into_iter()
            .any(|selected| calendar::same(granularity, selected, date, self.options.start_day))
    }

    // ── Notifications ───────────────────────────────────────────────────────

    pub fn subscribe(&mut self, listener: impl FnMut(&PickerEvent<S::Value>) + 'static) -> ListenerId {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    /// Detach every panel and listener and drop all previews.
    pub fn dispose(&mut self) {
        self.listeners.clear();
        self.panels = PanelRegistry::default();
        self.preset_trying = None;
        self.model.reset_trying();
    }

    fn emit(&mut self, event: PickerEvent<S::Value>) {
        self.listeners.emit(&event);
    }

    fn emit_value_change(&mut self) {
        let value = self.model.value().clone();
        self.emit(PickerEvent::ValueChange(value));
    }
}

/// The full date a cell stands for. Month and decade cells only carry part of
/// a date, the rest comes from the panel cursor with the day clamped.
fn resolve_cell(granularity: Granularity, cell: NaiveDate, cursor: NaiveDate) -> NaiveDate {
    let resolved = match granularity {
        Granularity::Day | Granularity::Week => return cell,
        Granularity::Month => calendar::clamped_date(cell.year(), cell.month(), cursor.day()),
        Granularity::Year => calendar::clamped_date(cell.year(), cursor.month(), cursor.day()),
    };
    resolved.unwrap_or(cell)
}

impl Picker<SimpleSelection> {
    pub fn simple(granularity: Granularity) -> Self {
        Self::new(granularity, SimpleSelection::default())
    }

    pub fn trying(&self) -> Option<NaiveDate> {
        self.model.trying()
    }
}

impl Picker<RangeSelection> {
    pub fn range(granularity: Granularity) -> Self {
        Self::new(granularity, RangeSelection::default())
    }

    pub fn offset(&self) -> i64 {
        self.model.offset()
    }

    /// Non-zero switches to fixed-length windows of `offset` units.
    pub fn set_offset(&mut self, offset: i64) {
        self.model.set_offset(offset);
    }

    pub fn inner_value(&self) -> &[NaiveDate] {
        self.model.inner_value()
    }

    pub fn trying(&self) -> &[NaiveDate] {
        self.model.trying()
    }

    pub fn is_invalid_trying_date(&self) -> bool {
        self.model.is_invalid_trying_date(&self.context())
    }

    pub fn cancel_pending(&mut self) {
        self.model.cancel_pending();
    }

    /// Install the hook consulted after each first anchor.
    pub fn on_add_start_value(&mut self, hook: impl FnMut(NaiveDate) -> Option<NaiveDate> + 'static) {
        let hook: AddStartHook = Box::new(hook);
        self.model.set_start_hook(Some(hook));
    }

    pub fn clear_add_start_value(&mut self) {
        self.model.set_start_hook(None);
    }
}

impl Picker<MultipleSelection> {
    pub fn multiple(granularity: Granularity) -> Self {
        Self::new(granularity, MultipleSelection::default())
    }

    pub fn trying(&self) -> Option<&[NaiveDate]> {
        self.model.trying()
    }

    /// Apply a frame (drag-box) selection. See [`FrameMode`].
    pub fn set_frame_selected(&mut self, dates: &[NaiveDate], mode: FrameMode, is_virtual: bool) {
        let ctx = SelectionContext::new(self.granularity, &self.options);
        let effect = self.model.select_frame(&ctx, dates, mode, is_virtual);
        if effect.committed {
            self.emit_value_change();
        }
    }
}
