//! Deadline timers driven by an explicit clock.
//!
//! There is at most one pending deadline per [`TimerPurpose`]. Scheduling a
//! purpose again replaces its deadline and invalidates every handle handed out
//! before, so the latest schedule always wins.

use std::collections::HashMap;
use std::time::Duration;

/// Logical reason a deadline exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TimerPurpose {
    /// Debounced hover polygon rebuild
    HoverPolygon,
    /// Deferred `show` while the bubble is suppressed
    RetryShow,
    /// End of the suppress cooldown
    Unsuppress,
    /// Deferred commit of a typed field value
    FieldCommit,
}

/// Identifies one scheduling of a purpose; a later schedule gets a new handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerHandle {
    purpose: TimerPurpose,
    generation: u64,
}

impl TimerHandle {
    pub fn purpose(&self) -> TimerPurpose {
        self.purpose
    }
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    deadline: Duration,
    generation: u64,
}

/// Set of pending deadlines, one per purpose.
#[derive(Debug, Default)]
pub struct Timers {
    entries: HashMap<TimerPurpose, Entry>,
    next_generation: u64,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `purpose` to fire at `now + delay`, replacing any pending deadline.
    pub fn schedule(&mut self, purpose: TimerPurpose, now: Duration, delay: Duration) -> TimerHandle {
        self.next_generation += 1;
        let generation = self.next_generation;
        self.entries.insert(purpose, Entry { deadline: now + delay, generation });
        TimerHandle { purpose, generation }
    }

    /// Cancels the pending deadline of a purpose. Returns whether one existed.
    pub fn cancel(&mut self, purpose: TimerPurpose) -> bool {
        self.entries.remove(&purpose).is_some()
    }

    /// Earliest pending deadline, used by hosts to decide when to wake up.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.entries.values().map(|entry| entry.deadline).min()
    }

    /// Removes and returns the handle of the earliest timer due at `now`.
    ///
    /// Ties are broken by scheduling order. Callers fire one timer at a time
    /// so that a fired action can still cancel the ones behind it.
    pub fn pop_due(&mut self, now: Duration) -> Option<TimerHandle> {
        let (purpose, entry) = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.deadline <= now)
            .min_by_key(|(_, entry)| (entry.deadline, entry.generation))
            .map(|(purpose, entry)| (*purpose, *entry))?;
        self.entries.remove(&purpose);
        Some(TimerHandle { purpose, generation: entry.generation })
    }
}
