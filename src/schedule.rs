//! Deferred actions driven by elapsed time
//!
//! Nothing here owns a clock. The caller advances the scheduler with the
//! elapsed milliseconds of each frame, and every action whose due time has
//! been reached comes back out in due-time order. An action fires on the
//! first advance at or after its due time, so precision is one frame.

/// An action waiting for its due time
#[derive(Debug, Clone)]
struct Scheduled<T> {
    due_ms: f64,
    seq: u64,
    action: T,
}

/// Queue of deferred actions
#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    now_ms: f64,
    next_seq: u64,
    pending: Vec<Scheduled<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            now_ms: 0.0,
            next_seq: 0,
            pending: Vec::new(),
        }
    }

    /// Queue `action` to fire `delay_ms` from now
    pub fn schedule_in(&mut self, delay_ms: f64, action: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Scheduled {
            due_ms: self.now_ms + delay_ms.max(0.0),
            seq,
            action,
        });
    }

    /// Advance time and return every action that came due, oldest first
    pub fn advance(&mut self, dt_ms: f64) -> Vec<T> {
        self.now_ms += dt_ms.max(0.0);
        let now = self.now_ms;

        let (mut due, waiting): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|s| s.due_ms <= now);
        self.pending = waiting;

        // Stable order: due time first, then insertion order
        due.sort_by(|a, b| a.due_ms.total_cmp(&b.due_ms).then(a.seq.cmp(&b.seq)));
        due.into_iter().map(|s| s.action).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Count waiting actions matching a predicate
    pub fn count_where(&self, mut pred: impl FnMut(&T) -> bool) -> usize {
        self.pending.iter().filter(|s| pred(&s.action)).count()
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_at_or_after_due_time() {
        let mut s = Scheduler::new();
        s.schedule_in(100.0, "a");
        assert!(s.advance(50.0).is_empty());
        assert!(s.advance(49.0).is_empty());
        assert_eq!(s.advance(16.0), vec!["a"]);
        assert!(s.is_empty());
    }

    #[test]
    fn test_orders_by_due_then_insertion() {
        let mut s = Scheduler::new();
        s.schedule_in(30.0, 3);
        s.schedule_in(10.0, 1);
        s.schedule_in(10.0, 2);
        assert_eq!(s.advance(100.0), vec![1, 2, 3]);
    }

    #[test]
    fn test_delay_relative_to_current_time() {
        let mut s = Scheduler::new();
        s.advance(1000.0);
        s.schedule_in(500.0, ());
        assert!(s.advance(499.0).is_empty());
        assert_eq!(s.advance(1.0).len(), 1);
    }

    #[test]
    fn test_count_where_sees_only_waiting() {
        let mut s = Scheduler::new();
        s.schedule_in(10.0, 1);
        s.schedule_in(20.0, 2);
        s.schedule_in(20.0, 1);
        assert_eq!(s.count_where(|v| *v == 1), 2);
        assert_eq!(s.advance(10.0), vec![1]);
        assert_eq!(s.count_where(|v| *v == 1), 1);
        assert_eq!(s.count_where(|_| true), 2);
    }
}
