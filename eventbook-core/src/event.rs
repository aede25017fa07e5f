//! Event records as stored in the event book.
//!
//! An [`EventDraft`] is raw, untrusted input from flags or prompts.
//! Validation turns it into [`EventFields`], and the store wraps those fields
//! with an id and a derived past flag to form an [`Event`].

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque event identifier, assigned once when the event is added.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    pub fn new(id: impl Into<String>) -> Self {
        EventId(id.into())
    }

    /// A fresh random id.
    pub fn generate() -> Self {
        EventId(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for EventId {
    fn from(id: &str) -> Self {
        EventId::new(id)
    }
}

/// A recorded event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub description: String,
    pub venue: String,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organizer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    /// Derived from `date`; recomputed on load and by the refresher.
    #[serde(default)]
    pub is_past: bool,
}

impl Event {
    pub fn new(id: EventId, fields: EventFields, now: NaiveDateTime) -> Self {
        let is_past = is_past(fields.date, now);
        Event {
            id,
            title: fields.title,
            description: fields.description,
            venue: fields.venue,
            date: fields.date,
            time: fields.time,
            organizer: fields.organizer,
            capacity: fields.capacity,
            is_past,
        }
    }

    /// The mutable part of this event, e.g. to pre-fill an edit.
    pub fn fields(&self) -> EventFields {
        EventFields {
            title: self.title.clone(),
            description: self.description.clone(),
            venue: self.venue.clone(),
            date: self.date,
            time: self.time.clone(),
            organizer: self.organizer.clone(),
            capacity: self.capacity,
        }
    }

    /// Recompute `is_past` against `now`. Returns true if the flag flipped.
    pub fn refresh_past(&mut self, now: NaiveDateTime) -> bool {
        let past = is_past(self.date, now);
        let changed = past != self.is_past;
        self.is_past = past;
        changed
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// An event's date has elapsed once the current moment passes the start of
/// that day.
pub fn is_past(date: NaiveDate, now: NaiveDateTime) -> bool {
    date.and_time(NaiveTime::MIN) < now
}

/// Validated, normalised event content (everything except id and past flag).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventFields {
    pub title: String,
    pub description: String,
    pub venue: String,
    pub date: NaiveDate,
    pub time: Option<String>,
    pub organizer: Option<String>,
    pub capacity: Option<u32>,
}

/// Unvalidated event input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventDraft {
    pub title: String,
    pub description: String,
    pub venue: String,
    /// `YYYY-MM-DD`
    pub date: String,
    pub time: Option<String>,
    pub organizer: Option<String>,
    pub capacity: Option<u32>,
}

impl From<&Event> for EventDraft {
    fn from(event: &Event) -> Self {
        EventDraft {
            title: event.title.clone(),
            description: event.description.clone(),
            venue: event.venue.clone(),
            date: event.date.format("%Y-%m-%d").to_string(),
            time: event.time.clone(),
            organizer: event.organizer.clone(),
            capacity: event.capacity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn fields() -> EventFields {
        EventFields {
            title: "Launch".to_string(),
            description: "Product launch event".to_string(),
            venue: "Main Hall".to_string(),
            date: date(2099, 1, 1),
            time: Some("18:30".to_string()),
            organizer: None,
            capacity: Some(120),
        }
    }

    #[test]
    fn test_is_past_compares_start_of_day() {
        let now = date(2026, 10, 19).and_hms_opt(9, 0, 0).unwrap();
        assert!(is_past(date(2026, 10, 18), now));
        assert!(is_past(date(2026, 10, 19), now));
        assert!(!is_past(date(2026, 10, 20), now));
    }

    #[test]
    fn test_is_past_at_exact_midnight() {
        let midnight = date(2026, 10, 19).and_time(NaiveTime::MIN);
        assert!(!is_past(date(2026, 10, 19), midnight));
    }

    #[test]
    fn test_new_event_derives_past_flag() {
        let now = date(2026, 10, 19).and_hms_opt(12, 0, 0).unwrap();
        let event = Event::new(EventId::new("e1"), fields(), now);
        assert!(!event.is_past);

        let mut old = fields();
        old.date = date(2020, 1, 1);
        assert!(Event::new(EventId::new("e2"), old, now).is_past);
    }

    #[test]
    fn test_refresh_past_reports_flip() {
        let mut event = Event::new(
            EventId::new("e1"),
            fields(),
            date(2026, 10, 19).and_hms_opt(12, 0, 0).unwrap(),
        );
        assert!(!event.refresh_past(date(2050, 1, 1).and_hms_opt(0, 0, 0).unwrap()));
        assert!(event.refresh_past(date(2099, 1, 2).and_hms_opt(0, 0, 0).unwrap()));
        assert!(event.is_past);
        assert!(!event.refresh_past(date(2099, 1, 3).and_hms_opt(0, 0, 0).unwrap()));
    }

    #[test]
    fn test_serializes_camel_case_and_skips_absent_fields() {
        let mut f = fields();
        f.time = None;
        f.capacity = None;
        let event = Event::new(
            EventId::new("1718000000000"),
            f,
            date(2026, 10, 19).and_hms_opt(12, 0, 0).unwrap(),
        );
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["id"], "1718000000000");
        assert_eq!(json["date"], "2099-01-01");
        assert_eq!(json["isPast"], false);
        assert!(json.get("time").is_none());
        assert!(json.get("capacity").is_none());
    }

    #[test]
    fn test_deserializes_record_without_past_flag() {
        let json = r#"{
            "id": "42",
            "title": "Launch",
            "description": "Product launch event",
            "venue": "Main Hall",
            "date": "2099-01-01",
            "organizer": "Ops",
            "capacity": 50
        }"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.id, EventId::new("42"));
        assert_eq!(event.organizer.as_deref(), Some("Ops"));
        assert_eq!(event.capacity, Some(50));
        assert!(!event.is_past);
    }

    #[test]
    fn test_draft_from_event_round_trips_fields() {
        let event = Event::new(
            EventId::new("e1"),
            fields(),
            date(2026, 10, 19).and_hms_opt(12, 0, 0).unwrap(),
        );
        let draft = EventDraft::from(&event);
        assert_eq!(draft.date, "2099-01-01");
        assert_eq!(draft.venue, "Main Hall");
        assert_eq!(draft.capacity, Some(120));
    }

    #[test]
    fn test_generated_ids_are_distinct() {
        assert_ne!(EventId::generate(), EventId::generate());
    }
}
