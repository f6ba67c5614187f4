//! Relative timestamps
//!
//! Every emitted line is stamped with the time elapsed since the clock
//! started, which the monitor does right after the port is ready.

use chrono::{DateTime, Utc};
use std::fmt;
use std::time::Instant;

/// Milliseconds elapsed since the clock started
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RelativeTime(pub u64);

/// Formats as `SSSSS.mmm`
impl fmt::Display for RelativeTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:05}.{:03}", self.0 / 1000, self.0 % 1000)
    }
}

/// Monotonic clock anchored at program start
#[derive(Debug, Clone)]
pub struct Clock {
    origin: Instant,
    started_at: DateTime<Utc>,
}

impl Clock {
    /// Start the clock now
    pub fn start() -> Self {
        Self {
            origin: Instant::now(),
            started_at: Utc::now(),
        }
    }

    /// Time elapsed since `start`, never decreasing
    pub fn elapsed(&self) -> RelativeTime {
        let millis = self.origin.elapsed().as_millis();
        RelativeTime(u64::try_from(millis).unwrap_or(u64::MAX))
    }

    /// Wall-clock time at which the clock started
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }
}
