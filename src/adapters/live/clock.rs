//! Live clock adapter using the system time.

use chrono::{DateTime, Utc};

use crate::ports::clock::Clock;

/// Live clock returning the real current time.
pub struct LiveClock;

impl Clock for LiveClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
