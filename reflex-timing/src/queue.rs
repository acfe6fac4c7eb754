use crate::TimerId;

/// Pending one-shot deadlines, shared by every `Timer` implementation
#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    entries: Vec<(TimerId, u64)>,
    next_id: u64,
}

impl TimerQueue {
    pub fn push(&mut self, deadline: u64) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, deadline));
        log::trace!("timer {} scheduled for {} ms", id.0, deadline);
        id
    }

    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        let removed = self.entries.len() != before;
        if removed {
            log::trace!("timer {} cancelled", id.0);
        }
        removed
    }

    pub fn drain_due(&mut self, now: u64) -> Vec<TimerId> {
        let mut due: Vec<(TimerId, u64)> = Vec::new();
        self.entries.retain(|&(id, deadline)| {
            if deadline <= now {
                due.push((id, deadline));
                false
            } else {
                true
            }
        });
        due.sort_by_key(|&(id, deadline)| (deadline, id));
        due.into_iter().map(|(id, _)| id).collect()
    }

    pub fn next_deadline(&self) -> Option<u64> {
        self.entries.iter().map(|&(_, deadline)| deadline).min()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
