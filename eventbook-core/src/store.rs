//! The event store: sole owner of the event collection.
//!
//! Every mutation is built on a working copy, written to the slot, and only
//! then committed in memory. After any mutating call returns `Ok`, the
//! in-memory list and the persisted list agree. A failed write leaves both
//! untouched.

use std::collections::HashSet;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::error::{EventbookError, EventbookResult};
use crate::event::{Event, EventDraft, EventFields, EventId};
use crate::slot::EventSlot;
use crate::validation::{self, ValidationErrors};

pub struct EventStore<S, C = SystemClock> {
    events: Vec<Event>,
    slot: S,
    clock: C,
}

impl<S: EventSlot> EventStore<S, SystemClock> {
    /// Load from `slot` using the wall clock.
    pub fn open(slot: S) -> Self {
        EventStore::load(slot, SystemClock)
    }
}

impl<S: EventSlot, C: Clock> EventStore<S, C> {
    /// Read the persisted collection.
    ///
    /// Never fails: missing content is an empty collection, and unreadable or
    /// malformed content is logged and replaced by an empty collection. Past
    /// flags are recomputed straight away; if storing them fails the store
    /// still carries the recomputed flags.
    pub fn load(slot: S, clock: C) -> Self {
        let mut events = match read_events(&slot) {
            Ok(events) => events,
            Err(e) => {
                warn!(slot = %slot.describe(), error = %e, "Starting with an empty event list");
                Vec::new()
            }
        };
        debug!(slot = %slot.describe(), count = events.len(), "Loaded events");

        let now = clock.now();
        let changed = events
            .iter_mut()
            .map(|e| e.refresh_past(now))
            .filter(|&flipped| flipped)
            .count();

        let store = EventStore {
            events,
            slot,
            clock,
        };
        if changed > 0 {
            if let Err(e) = store.persist(&store.events) {
                warn!(error = %e, changed, "Could not store refreshed past flags");
            }
        }

        store
    }

    /// Replace the in-memory list with what the slot holds now.
    ///
    /// Picks up changes written by other processes. On a read or parse error
    /// the current list is kept and the error returned.
    pub fn reload(&mut self) -> EventbookResult<()> {
        self.events = read_events(&self.slot)?;
        Ok(())
    }

    /// Events in insertion order.
    pub fn list(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn get(&self, id: &EventId) -> Option<&Event> {
        self.events.iter().find(|e| &e.id == id)
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn has_collision(&self, venue: &str, date: NaiveDate, exclude: Option<&EventId>) -> bool {
        validation::has_collision(&self.events, venue, date, exclude)
    }

    /// Run every rule against the current contents without changing anything.
    pub fn validate(
        &self,
        draft: &EventDraft,
        exclude: Option<&EventId>,
    ) -> Result<EventFields, ValidationErrors> {
        validation::validate(draft, self.clock.today(), &self.events, exclude)
    }

    /// Validate `draft` and append it under a fresh id.
    pub fn add(&mut self, draft: &EventDraft) -> EventbookResult<Event> {
        let fields = self.validate(draft, None)?;

        let mut id = EventId::generate();
        while self.get(&id).is_some() {
            id = EventId::generate();
        }

        let event = Event::new(id, fields, self.clock.now());
        let mut next = self.events.clone();
        next.push(event.clone());
        self.commit(next)?;

        info!(id = %event.id, title = %event.title, "Added event");
        Ok(event)
    }

    /// Validate `draft` and replace every mutable field of event `id`.
    ///
    /// The event keeps its id and its position in the list.
    pub fn update(&mut self, id: &EventId, draft: &EventDraft) -> EventbookResult<Event> {
        let index = self.position(id)?;
        let fields = self.validate(draft, Some(id))?;

        let event = Event::new(id.clone(), fields, self.clock.now());
        let mut next = self.events.clone();
        next[index] = event.clone();
        self.commit(next)?;

        info!(id = %event.id, title = %event.title, "Updated event");
        Ok(event)
    }

    /// Remove event `id`, returning it. A missing id is reported as
    /// [`EventbookError::NotFound`] and changes nothing.
    pub fn delete(&mut self, id: &EventId) -> EventbookResult<Event> {
        let index = self.position(id)?;

        let mut next = self.events.clone();
        let removed = next.remove(index);
        self.commit(next)?;

        info!(id = %removed.id, title = %removed.title, "Deleted event");
        Ok(removed)
    }

    /// Reload from the slot, then recompute every past flag against the clock.
    ///
    /// Returns the ids whose flag flipped. The slot is only written when that
    /// list is non-empty, and the write starts from the freshly read list so
    /// events stored by another process survive.
    pub fn refresh_past_flags(&mut self) -> EventbookResult<Vec<EventId>> {
        self.reload()?;

        let now = self.clock.now();
        let mut next = self.events.clone();

        let changed: Vec<EventId> = next
            .iter_mut()
            .filter_map(|e| e.refresh_past(now).then(|| e.id.clone()))
            .collect();

        if changed.is_empty() {
            return Ok(changed);
        }

        self.commit(next)?;
        debug!(changed = changed.len(), "Refreshed past flags");
        Ok(changed)
    }

    fn position(&self, id: &EventId) -> EventbookResult<usize> {
        self.events
            .iter()
            .position(|e| &e.id == id)
            .ok_or_else(|| EventbookError::NotFound(id.clone()))
    }

    fn persist(&self, events: &[Event]) -> EventbookResult<()> {
        let json = serde_json::to_string_pretty(events)
            .map_err(|e| EventbookError::Serialization(e.to_string()))?;
        self.slot.write(&json)
    }

    fn commit(&mut self, next: Vec<Event>) -> EventbookResult<()> {
        self.persist(&next)?;
        self.events = next;
        Ok(())
    }
}

fn read_events(slot: &impl EventSlot) -> EventbookResult<Vec<Event>> {
    let Some(content) = slot.read()? else {
        return Ok(Vec::new());
    };

    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    let records: Vec<serde_json::Value> = serde_json::from_str(&content)
        .map_err(|e| EventbookError::PersistenceRead(format!("{}: {e}", slot.describe())))?;

    // A bad record costs only itself. Ids must stay unique; the first record
    // for any repeated id wins.
    let mut seen = HashSet::new();
    let mut events = Vec::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        match serde_json::from_value::<Event>(record) {
            Ok(event) if seen.insert(event.id.clone()) => events.push(event),
            Ok(event) => {
                warn!(slot = %slot.describe(), id = %event.id, "Dropped event with a duplicate id");
            }
            Err(e) => {
                warn!(slot = %slot.describe(), index, error = %e, "Skipped unreadable event record");
            }
        }
    }

    Ok(events)
}
