//! Clock port for time-related operations

use chrono::{DateTime, Utc};

/// Port for getting the current time.
///
/// Timestamps (login stamps, report creation) go through this trait so
/// tests can pin time; countdowns never read it and are advanced as
/// logical ticks instead.
pub trait Clock: Send + Sync {
    /// Returns the current UTC timestamp.
    fn now(&self) -> DateTime<Utc>;
}
