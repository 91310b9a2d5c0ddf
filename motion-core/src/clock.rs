//! Owned timer queues driven by host-supplied time.
//!
//! Nothing in this crate reads a wall clock. Hosts pass `now` into every
//! call and use [`TimerQueue::next_deadline`] to decide when to call back.
//! Each component instance owns its queue, so cancelling the queue cancels
//! every timer the instance ever scheduled.

/// Time in milliseconds, as supplied by the host.
pub type Millis = u64;

/// Handle to a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug, Clone)]
struct Pending<K> {
    id: TimerId,
    at: Millis,
    kind: K,
}

/// A queue of pending deadlines tagged with a timer kind.
///
/// Due timers pop in deadline order; ties pop in the order they were
/// scheduled.
#[derive(Debug, Clone)]
pub struct TimerQueue<K> {
    pending: Vec<Pending<K>>,
    next_id: u64,
}

impl<K> TimerQueue<K> {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
            next_id: 0,
        }
    }

    /// Schedule `kind` to fire at `at`.
    pub fn schedule(&mut self, at: Millis, kind: K) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.push(Pending { id, at, kind });
        id
    }

    /// Cancel one timer. Returns whether it was still pending.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.id != id);
        self.pending.len() != before
    }

    /// Cancel every pending timer.
    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    /// Earliest pending deadline, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Millis> {
        self.pending.iter().map(|p| p.at).min()
    }

    /// Remove and return the earliest timer due at or before `now`.
    pub fn pop_due(&mut self, now: Millis) -> Option<(Millis, K)> {
        let idx = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.at <= now)
            .min_by_key(|(_, p)| (p.at, p.id))
            .map(|(idx, _)| idx)?;
        let fired = self.pending.remove(idx);
        Some((fired.at, fired.kind))
    }

    /// Number of pending timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether no timers are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<K> Default for TimerQueue<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pop_due_in_deadline_order() {
        let mut timers = TimerQueue::new();
        timers.schedule(300, "c");
        timers.schedule(100, "a");
        timers.schedule(200, "b");

        assert_eq!(timers.pop_due(250), Some((100, "a")));
        assert_eq!(timers.pop_due(250), Some((200, "b")));
        assert_eq!(timers.pop_due(250), None);
        assert_eq!(timers.next_deadline(), Some(300));
    }

    #[test]
    fn test_ties_pop_in_schedule_order() {
        let mut timers = TimerQueue::new();
        timers.schedule(50, 1);
        timers.schedule(50, 2);

        assert_eq!(timers.pop_due(50), Some((50, 1)));
        assert_eq!(timers.pop_due(50), Some((50, 2)));
    }

    #[test]
    fn test_cancel_single_and_all() {
        let mut timers = TimerQueue::new();
        let first = timers.schedule(10, ());
        timers.schedule(20, ());

        assert!(timers.cancel(first));
        assert!(!timers.cancel(first));
        assert_eq!(timers.len(), 1);

        timers.cancel_all();
        assert!(timers.is_empty());
        assert_eq!(timers.next_deadline(), None);
    }
}
