//! Sync marker - the time boundary between synced and new activity
//!
//! The marker is a single process-wide timestamp owned by the orchestrator.
//! It is initialized to (now - history window) at startup and advanced to
//! (cycle start - 1 minute) only after a fully successful cycle. The
//! one-minute back-off guards against clock skew and edits that were still
//! in flight at the remote service when the cycle started.

use chrono::{DateTime, Duration, Utc};

/// Lower bound for "recent" activity, advanced across poll cycles
///
/// Invariant: the marker is monotonically non-decreasing. [`advanced`]
/// never produces a value earlier than the current one, even if a caller
/// passes a cycle start time from the past.
///
/// [`advanced`]: SyncMarker::advanced
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SyncMarker(DateTime<Utc>);

/// Back-off subtracted from the cycle start when advancing the marker
const ADVANCE_BACKOFF_MINUTES: i64 = 1;

impl SyncMarker {
    /// Creates the initial marker: `now - history_window_minutes`
    pub fn initial(now: DateTime<Utc>, history_window_minutes: u64) -> Self {
        Self(now - Duration::minutes(history_window_minutes as i64))
    }

    /// Creates a marker at an exact timestamp (tests, replay)
    pub fn at(timestamp: DateTime<Utc>) -> Self {
        Self(timestamp)
    }

    /// Returns the marker advanced for a successful cycle
    ///
    /// The new value is `cycle_start - 1 minute`, clamped so the marker
    /// never moves backwards.
    #[must_use]
    pub fn advanced(self, cycle_start: DateTime<Utc>) -> Self {
        let candidate = cycle_start - Duration::minutes(ADVANCE_BACKOFF_MINUTES);
        Self(candidate.max(self.0))
    }

    /// The marker's timestamp value
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.0
    }
}

impl std::fmt::Display for SyncMarker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}
