//! Change notifications.
//!
//! Each root keeps an ordered observer list and dispatches synchronously inside
//! the mutating call. A listener only sees the event, never the root, so it
//! cannot re-enter the root while a mutation is in progress.

use std::fmt;

use chrono::NaiveDate;

/// Notifications emitted by a [`Picker`](crate::picker::Picker).
#[derive(Debug, Clone, PartialEq)]
pub enum PickerEvent<V> {
    /// The committed value changed; carries the new value.
    ValueChange(V),
    /// A range's first anchor was placed.
    AddStartValue(NaiveDate),
    /// A panel's cursor moved.
    SetPanelDate { part: String, date: NaiveDate },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

pub type Listener<E> = Box<dyn FnMut(&E)>;

pub struct Listeners<E> {
    next_id: u64,
    entries: Vec<(ListenerId, Listener<E>)>,
}

impl<E> Default for Listeners<E> {
    fn default() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }
}

impl<E> fmt::Debug for Listeners<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .finish()
    }
}

impl<E> Listeners<E> {
    pub fn subscribe(&mut self, listener: impl FnMut(&E) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false when `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    /// Call every listener in subscription order.
    pub fn emit(&mut self, event: &E) {
        for (_, listener) in &mut self.entries {
            listener(event);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
