// src/trigger/pending.rs

//! Pure pending-trigger state.
//!
//! Two states: idle (no deadline) and armed (deadline `T`). A qualifying
//! change always sets `T = now + wait`, replacing any earlier deadline, so at
//! most one firing is ever pending. No Tokio timers, channels or processes
//! are involved; callers pass the current instant in.

use std::time::Duration;

use tokio::time::Instant;

#[derive(Debug, Clone)]
pub struct PendingTrigger {
    wait: Duration,
    deadline: Option<Instant>,
}

impl PendingTrigger {
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            deadline: None,
        }
    }

    pub fn wait(&self) -> Duration {
        self.wait
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Record a qualifying change at `now` and return the new deadline.
    pub fn arm(&mut self, now: Instant) -> Instant {
        let deadline = now + self.wait;
        self.deadline = Some(deadline);
        deadline
    }

    /// Disarm and return true if the deadline has passed at `now`.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
