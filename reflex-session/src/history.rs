use reflex_core::Attempt;

/// Append-only record of reaction times with a running best
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    attempts: Vec<Attempt>,
    best: Option<Attempt>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_attempts(attempts: Vec<Attempt>) -> Self {
        let best = attempts.iter().copied().min();
        Self { attempts, best }
    }

    /// Appends an attempt and returns true if it is a new best
    pub fn record(&mut self, attempt: Attempt) -> bool {
        self.attempts.push(attempt);
        let improved = self.best.is_none_or(|best| attempt < best);
        if improved {
            self.best = Some(attempt);
        }
        improved
    }

    pub fn attempts(&self) -> &[Attempt] {
        &self.attempts
    }

    pub fn len(&self) -> usize {
        self.attempts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attempts.is_empty()
    }

    pub fn best(&self) -> Option<Attempt> {
        self.best
    }

    /// Mean reaction time rounded half up, `None` for an empty history
    pub fn average(&self) -> Option<u64> {
        let count = self.attempts.len() as u128;
        if count == 0 {
            return None;
        }
        let sum: u128 = self.attempts.iter().map(|a| a.as_millis() as u128).sum();
        Some(((sum + count / 2) / count) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(values: &[u64]) -> History {
        let mut h = History::new();
        for &v in values {
            h.record(Attempt::from_millis(v));
        }
        h
    }

    #[test]
    fn empty_history_has_no_stats() {
        let h = History::new();
        assert_eq!(h.best(), None);
        assert_eq!(h.average(), None);
        assert!(h.is_empty());
    }

    #[test]
    fn best_and_average_follow_records() {
        let h = history(&[300, 210, 250]);
        assert_eq!(h.best(), Some(Attempt::from_millis(210)));
        assert_eq!(h.average(), Some(253));
        assert_eq!(h.len(), 3);
        assert_eq!(h.attempts().last(), Some(&Attempt::from_millis(250)));
    }

    #[test]
    fn average_rounds_half_up() {
        assert_eq!(history(&[100, 101]).average(), Some(101));
        assert_eq!(history(&[100, 100, 101]).average(), Some(100));
        assert_eq!(history(&[1, 2, 2, 2]).average(), Some(2));
    }

    #[test]
    fn record_reports_new_best() {
        let mut h = History::new();
        assert!(h.record(Attempt::from_millis(240)));
        assert!(!h.record(Attempt::from_millis(260)));
        assert!(!h.record(Attempt::from_millis(240)));
        assert!(h.record(Attempt::from_millis(180)));
    }

    #[test]
    fn keeps_insertion_order_and_duplicates() {
        let h = history(&[250, 180, 250]);
        let ms: Vec<u64> = h.attempts().iter().map(Attempt::as_millis).collect();
        assert_eq!(ms, vec![250, 180, 250]);
    }

    #[test]
    fn from_attempts_derives_best() {
        let h = History::from_attempts(vec![Attempt::from_millis(320), Attempt::from_millis(199)]);
        assert_eq!(h.best(), Some(Attempt::from_millis(199)));
        assert_eq!(h, history(&[320, 199]));
    }

    #[test]
    fn huge_values_do_not_overflow_average() {
        let h = history(&[u64::MAX, u64::MAX]);
        assert_eq!(h.average(), Some(u64::MAX));
    }
}
