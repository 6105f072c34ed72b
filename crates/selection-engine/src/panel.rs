//! Navigation panels and the registry that ties them to picker parts.
//!
//! A host registers one *part* per visible calendar (`"start"` and `"end"` for
//! a two-calendar range input, a single part for a plain picker). Registration
//! creates the part's owner panel plus its drill-down chain: a day panel embeds
//! a month panel and a decade panel, a month panel embeds a decade panel. The
//! drill-down panels record the creator as their owner, so whether a panel may
//! commit is an explicit `owner == id` lookup rather than object identity.
//!
//! Every panel of a chain shares one cursor. Moving it through
//! [`PanelRegistry::sync_cursor`] moves the whole chain.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::calendar;
use crate::error::{Result, SelectionError};
use crate::granularity::Granularity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PanelId(u32);

/// Page navigation on a panel. None of these commit anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Navigation {
    PrevMonth,
    NextMonth,
    PrevYear,
    NextYear,
    PrevDecade,
    NextDecade,
}

impl Navigation {
    /// The cursor after this navigation step.
    pub fn apply(self, cursor: NaiveDate) -> NaiveDate {
        match self {
            Navigation::PrevMonth => calendar::step_month(cursor, -1),
            Navigation::NextMonth => calendar::step_month(cursor, 1),
            Navigation::PrevYear => calendar::step_year(cursor, -1),
            Navigation::NextYear => calendar::step_year(cursor, 1),
            Navigation::PrevDecade => calendar::step_year(cursor, -10),
            Navigation::NextDecade => calendar::step_year(cursor, 10),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Panel {
    id: PanelId,
    owner: PanelId,
    part: String,
    granularity: Granularity,
    cursor: NaiveDate,
    hide_prev: bool,
    hide_next: bool,
    display: Granularity,
    drill_downs: Vec<PanelId>,
}

impl Panel {
    pub fn id(&self) -> PanelId {
        self.id
    }

    /// The panel through which commits for this part are allowed.
    pub fn owner(&self) -> PanelId {
        self.owner
    }

    pub fn is_owner(&self) -> bool {
        self.id == self.owner
    }

    pub fn part(&self) -> &str {
        &self.part
    }

    /// The unit of this panel's grid cells.
    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// The page anchor currently displayed.
    pub fn cursor(&self) -> NaiveDate {
        self.cursor
    }

    pub fn hide_prev(&self) -> bool {
        self.hide_prev
    }

    pub fn hide_next(&self) -> bool {
        self.hide_next
    }

    /// Which grid of the chain is showing. Only meaningful on the owner.
    pub fn display(&self) -> Granularity {
        self.display
    }

    pub fn drill_downs(&self) -> &[PanelId] {
        &self.drill_downs
    }
}

#[derive(Debug, Default)]
pub struct PanelRegistry {
    next_id: u32,
    panels: BTreeMap<PanelId, Panel>,
    parts: BTreeMap<String, PanelId>,
}

impl PanelRegistry {
    fn allocate(&mut self) -> PanelId {
        let id = PanelId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Create the owner panel for `part` and its drill-down chain.
    pub fn register(&mut self, part: &str, granularity: Granularity, cursor: NaiveDate) -> Result<PanelId> {
        if self.parts.contains_key(part) {
            return Err(SelectionError::DuplicatePart(part.to_string()));
        }
        let owner = self.allocate();
        let mut drill_downs = Vec::new();
        for &level in granularity.drill_chain() {
            let id = self.allocate();
            drill_downs.push(id);
            self.panels.insert(
                id,
                Panel {
                    id,
                    owner,
                    part: part.to_string(),
                    granularity: level,
                    cursor,
                    hide_prev: false,
                    hide_next: false,
                    display: level,
                    drill_downs: Vec::new(),
                },
            );
        }
        self.panels.insert(
            owner,
            Panel {
                id: owner,
                owner,
                part: part.to_string(),
                granularity,
                cursor,
                hide_prev: false,
                hide_next: false,
                display: granularity,
                drill_downs,
            },
        );
        self.parts.insert(part.to_string(), owner);
        trace!(part, %granularity, %cursor, "registered panel chain");
        Ok(owner)
    }

    /// Drop `part`'s owner panel together with its drill-down chain.
    pub fn unregister(&mut self, part: &str) -> Result<()> {
        let owner = self
            .parts
            .remove(part)
            .ok_or_else(|| SelectionError::UnknownPart(part.to_string()))?;
        if let Some(panel) = self.panels.remove(&owner) {
            for id in panel.drill_downs {
                self.panels.remove(&id);
            }
        }
        Ok(())
    }

    pub fn get(&self, id: PanelId) -> Option<&Panel> {
        self.panels.get(&id)
    }

    pub fn owner_id(&self, part: &str) -> Result<PanelId> {
        self.parts
            .get(part)
            .copied()
            .ok_or_else(|| SelectionError::UnknownPart(part.to_string()))
    }

    pub fn owner(&self, part: &str) -> Result<&Panel> {
        let id = self.owner_id(part)?;
        self.panels
            .get(&id)
            .ok_or_else(|| SelectionError::UnknownPart(part.to_string()))
    }

    fn owner_mut(&mut self, part: &str) -> Result<&mut Panel> {
        let id = self.owner_id(part)?;
        self.panels
            .get_mut(&id)
            .ok_or_else(|| SelectionError::UnknownPart(part.to_string()))
    }

    /// Registered parts with their owner panels, in part-name order.
    pub fn parts(&self) -> impl Iterator<Item = &Panel> + '_ {
        self.parts.values().filter_map(|id| self.panels.get(id))
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// The panel of `part`'s chain whose cells have `granularity`.
    pub fn panel_at(&self, part: &str, granularity: Granularity) -> Result<&Panel> {
        let owner = self.owner(part)?;
        if owner.granularity == granularity {
            return Ok(owner);
        }
        owner
            .drill_downs
            .iter()
            .filter_map(|id| self.panels.get(id))
            .find(|panel| panel.granularity == granularity)
            .ok_or_else(|| SelectionError::UnsupportedDisplay {
                part: part.to_string(),
                granularity,
            })
    }

    /// The panel whose grid `part` is currently showing.
    pub fn displayed(&self, part: &str) -> Result<&Panel> {
        let display = self.owner(part)?.display;
        self.panel_at(part, display)
    }

    pub fn set_display(&mut self, part: &str, granularity: Granularity) -> Result<()> {
        self.panel_at(part, granularity)?;
        self.owner_mut(part)?.display = granularity;
        Ok(())
    }

    /// The next finer grid of `part`'s chain below `granularity`, if any.
    pub fn finer_than(&self, part: &str, granularity: Granularity) -> Result<Option<Granularity>> {
        let owner = self.owner(part)?;
        let chain = std::iter::once(owner.granularity).chain(
            owner
                .drill_downs
                .iter()
                .filter_map(|id| self.panels.get(id))
                .map(|panel| panel.granularity),
        );
        Ok(chain.take_while(|level| *level != granularity).last())
    }

    pub fn set_navigation_hidden(&mut self, part: &str, hide_prev: bool, hide_next: bool) -> Result<()> {
        let owner = self.owner_mut(part)?;
        owner.hide_prev = hide_prev;
        owner.hide_next = hide_next;
        Ok(())
    }

    /// Move the shared cursor of `part`'s whole chain.
    pub fn sync_cursor(&mut self, part: &str, date: NaiveDate) -> Result<()> {
        let owner = self.owner_id(part)?;
        move_chain(&mut self.panels, owner, date);
        trace!(part, %date, "synced panel cursor");
        Ok(())
    }

    /// Move every registered chain to the date `anchor` resolves for its
    /// part. Parts without an anchor keep their cursor.
    pub fn sync_cursors(&mut self, mut anchor: impl FnMut(&str) -> Option<NaiveDate>) {
        for (part, &owner) in &self.parts {
            if let Some(date) = anchor(part) {
                move_chain(&mut self.panels, owner, date);
                trace!(part = part.as_str(), %date, "synced panel cursor");
            }
        }
    }
}

fn move_chain(panels: &mut BTreeMap<PanelId, Panel>, owner: PanelId, date: NaiveDate) {
    let Some(panel) = panels.get_mut(&owner) else {
        return;
    };
    panel.cursor = date;
    let chain = panel.drill_downs.clone();
    for id in chain {
        if let Some(panel) = panels.get_mut(&id) {
            panel.cursor = date;
        }
    }
}
