//! Error types for the event book.

use thiserror::Error;

use crate::event::EventId;
use crate::validation::ValidationErrors;

/// Errors that can occur in event book operations.
#[derive(Error, Debug)]
pub enum EventbookError {
    #[error("Invalid event: {0}")]
    Validation(ValidationErrors),

    #[error("Event not found: {0}")]
    NotFound(EventId),

    #[error("Could not read stored events: {0}")]
    PersistenceRead(String),

    #[error("Could not write stored events: {0}")]
    PersistenceWrite(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<ValidationErrors> for EventbookError {
    fn from(errors: ValidationErrors) -> Self {
        EventbookError::Validation(errors)
    }
}

/// Result type alias for event book operations.
pub type EventbookResult<T> = Result<T, EventbookError>;
