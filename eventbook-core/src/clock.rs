//! Source of "now" for past-flag derivation and date validation.

use chrono::{Local, NaiveDate, NaiveDateTime};

/// Supplies the current local moment.
///
/// The store and validator never read the system time directly, so tests can
/// pin "today" with a [`FixedClock`].
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Wall-clock time in the local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock frozen at a single moment.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl FixedClock {
    /// Noon on the given date.
    pub fn at_noon(date: NaiveDate) -> Self {
        FixedClock(date.and_hms_opt(12, 0, 0).unwrap_or_default())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

