//! Core of the eventbook tool.
//!
//! - [`store::EventStore`] owns the event list and keeps it in step with an
//!   [`slot::EventSlot`] (a JSON file in normal use)
//! - [`validation`] holds the field rules and the venue/date collision check
//! - [`refresh::PastFlagRefresher`] periodically re-derives each event's past flag

pub mod clock;
pub mod config;
pub mod error;
pub mod event;
pub mod refresh;
pub mod slot;
pub mod store;
pub mod validation;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{EventbookError, EventbookResult};
pub use event::{Event, EventDraft, EventFields, EventId};
pub use store::EventStore;
