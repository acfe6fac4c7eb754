use crate::{Timer, TimerId, TimerQueue};
use std::time::Duration;

/// Simulated clock. Time only moves when the owner advances it.
#[derive(Debug, Clone, Default)]
pub struct ManualTimer {
    now_ms: u64,
    queue: TimerQueue,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(now_ms: u64) -> Self {
        Self {
            now_ms,
            queue: TimerQueue::default(),
        }
    }

    pub fn advance(&mut self, by: Duration) {
        self.now_ms = self.now_ms.saturating_add(by.as_millis() as u64);
    }

    pub fn advance_ms(&mut self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }

    /// Jumps to an absolute time; the clock never goes backwards.
    pub fn set_now(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}

impl Timer for ManualTimer {
    fn now(&self) -> u64 {
        self.now_ms
    }

    fn schedule(&mut self, delay: Duration) -> TimerId {
        self.queue
            .push(self.now_ms.saturating_add(delay.as_millis() as u64))
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        self.queue.cancel(id)
    }

    fn expired(&mut self) -> Vec<TimerId> {
        self.queue.drain_due(self.now_ms)
    }

    fn next_deadline(&self) -> Option<u64> {
        self.queue.next_deadline()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_only_after_advancing_past_deadline() {
        let mut t = ManualTimer::new();
        let id = t.schedule(Duration::from_millis(1000));
        t.advance_ms(999);
        assert!(t.expired().is_empty());
        t.advance_ms(1);
        assert_eq!(t.expired(), vec![id]);
        assert_eq!(t.pending(), 0);
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut t = ManualTimer::starting_at(50);
        let id = t.schedule(Duration::from_millis(10));
        assert!(t.cancel(id));
        t.advance_ms(100);
        assert!(t.expired().is_empty());
        assert_eq!(t.elapsed(50), Duration::from_millis(100));
    }

    #[test]
    fn set_now_is_monotonic() {
        let mut t = ManualTimer::starting_at(500);
        t.set_now(100);
        assert_eq!(t.now(), 500);
        t.set_now(1237);
        assert_eq!(t.now(), 1237);
    }
}
