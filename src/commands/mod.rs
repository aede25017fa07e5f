pub mod add;
pub mod delete;
pub mod edit;
pub mod list;
pub mod show;
pub mod watch;

use clap::Args;
use eventbook_core::config::EventbookConfig;
use eventbook_core::slot::FileSlot;
use eventbook_core::{EventDraft, EventId, EventStore, EventbookError};

use crate::render;

/// Event fields as command-line flags. Every flag is optional so the same set
/// serves `add` (missing ones are prompted) and `edit` (missing ones are kept).
#[derive(Args, Debug, Default, Clone)]
pub struct EventArgs {
    /// Event title (3-100 characters)
    #[arg(long)]
    pub title: Option<String>,

    /// What the event is about (10-500 characters)
    #[arg(long)]
    pub description: Option<String>,

    /// Where it takes place (3-100 characters)
    #[arg(long)]
    pub venue: Option<String>,

    /// Day of the event, YYYY-MM-DD (today or later)
    #[arg(long)]
    pub date: Option<String>,

    /// Start time, e.g. 19:30 (pass "" to clear)
    #[arg(long)]
    pub time: Option<String>,

    /// Who runs it (pass "" to clear)
    #[arg(long)]
    pub organizer: Option<String>,

    /// Maximum number of attendees
    #[arg(long)]
    pub capacity: Option<u32>,
}

impl EventArgs {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.venue.is_none()
            && self.date.is_none()
            && self.time.is_none()
            && self.organizer.is_none()
            && self.capacity.is_none()
    }

    /// Overlay the given flags on `draft`.
    pub fn apply_to(self, mut draft: EventDraft) -> EventDraft {
        if let Some(title) = self.title {
            draft.title = title;
        }
        if let Some(description) = self.description {
            draft.description = description;
        }
        if let Some(venue) = self.venue {
            draft.venue = venue;
        }
        if let Some(date) = self.date {
            draft.date = date;
        }
        if self.time.is_some() {
            draft.time = self.time;
        }
        if self.organizer.is_some() {
            draft.organizer = self.organizer;
        }
        if self.capacity.is_some() {
            draft.capacity = self.capacity;
        }
        draft
    }
}

pub fn open_store(config: &EventbookConfig) -> EventStore<FileSlot> {
    EventStore::open(config.slot())
}

/// Turn a store error into a user-facing one, printing field messages first.
pub fn report(err: EventbookError) -> anyhow::Error {
    match err {
        EventbookError::Validation(errors) => {
            for line in render::field_errors(&errors) {
                eprintln!("{line}");
            }
            anyhow::anyhow!("Event not saved")
        }
        EventbookError::NotFound(id) => not_found(&id),
        other => other.into(),
    }
}

pub fn not_found(id: &EventId) -> anyhow::Error {
    anyhow::anyhow!("Event '{}' not found. Run `eventbook list` to see ids.", id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_to_keeps_unset_fields() {
        let base = EventDraft {
            title: "Launch".to_string(),
            venue: "Main Hall".to_string(),
            organizer: Some("Ops".to_string()),
            ..Default::default()
        };
        let args = EventArgs {
            venue: Some("Rooftop".to_string()),
            capacity: Some(40),
            ..Default::default()
        };

        let draft = args.apply_to(base);
        assert_eq!(draft.title, "Launch");
        assert_eq!(draft.venue, "Rooftop");
        assert_eq!(draft.organizer.as_deref(), Some("Ops"));
        assert_eq!(draft.capacity, Some(40));
    }

    #[test]
    fn apply_to_passes_blank_optional_through() {
        let base = EventDraft {
            organizer: Some("Ops".to_string()),
            ..Default::default()
        };
        let args = EventArgs {
            organizer: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(args.apply_to(base).organizer.as_deref(), Some(""));
    }

    #[test]
    fn is_empty_detects_any_flag() {
        assert!(EventArgs::default().is_empty());
        assert!(!EventArgs {
            capacity: Some(1),
            ..Default::default()
        }
        .is_empty());
    }
}
