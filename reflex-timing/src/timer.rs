use crate::queue::TimerQueue;
use std::time::{Duration, Instant};

/// Handle for a scheduled callback. Ids are never reused by one timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub(crate) u64);

impl TimerId {
    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// Clock plus one-shot schedule/cancel capability.
///
/// Timestamps are milliseconds since the timer was created. Scheduled ids are
/// not delivered by callback; the owner drains them with [`Timer::expired`]
/// from its own event loop.
pub trait Timer {
    fn now(&self) -> u64;

    fn elapsed(&self, since: u64) -> Duration {
        Duration::from_millis(self.now().saturating_sub(since))
    }

    fn schedule(&mut self, delay: Duration) -> TimerId;

    /// Returns false if the id was unknown or already expired
    fn cancel(&mut self, id: TimerId) -> bool;

    /// Removes and returns every timer whose deadline is at or before `now`,
    /// earliest first.
    fn expired(&mut self) -> Vec<TimerId>;

    fn next_deadline(&self) -> Option<u64>;
}

/// Wall-clock timer backed by a monotonic `Instant`
#[derive(Debug, Clone)]
pub struct HighPrecisionTimer {
    start: Instant,
    queue: TimerQueue,
}

impl HighPrecisionTimer {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            queue: TimerQueue::default(),
        }
    }

    /// Instant of the earliest pending deadline, for hosts that sleep until it
    pub fn next_deadline_instant(&self) -> Option<Instant> {
        self.queue
            .next_deadline()
            .map(|ms| self.start + Duration::from_millis(ms))
    }
}

impl Timer for HighPrecisionTimer {
    fn now(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    fn schedule(&mut self, delay: Duration) -> TimerId {
        let deadline = self.now().saturating_add(delay.as_millis() as u64);
        self.queue.push(deadline)
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        self.queue.cancel(id)
    }

    fn expired(&mut self) -> Vec<TimerId> {
        let now = self.now();
        self.queue.drain_due(now)
    }

    fn next_deadline(&self) -> Option<u64> {
        self.queue.next_deadline()
    }
}

impl Default for HighPrecisionTimer {
    fn default() -> Self {
        Self::new()
    }
}
