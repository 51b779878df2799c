//! Cancelable one-shot and repeating timers over virtual time.
//!
//! Timers deliver messages instead of running callbacks: the owner of a
//! scheduler drains due messages with [`Scheduler::pop_due`] and applies
//! them to its own state, one at a time, with the scheduler clock set to
//! each message's deadline. A component that owns its scheduler therefore
//! owns every timer it created, and dropping the component drops them all.

use std::time::Duration;

/// Smallest accepted repeat interval. Shorter intervals are raised to it.
pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Handle returned when a timer is scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// Scheduling capability injected into time-driven components.
pub trait Scheduler<M: Clone> {
    /// Current virtual time.
    fn now(&self) -> Duration;

    /// Deliver `message` once, `delay` from now.
    fn after(&mut self, delay: Duration, message: M) -> TimerId;

    /// Deliver `message` every `interval`, starting one interval from now.
    fn every(&mut self, interval: Duration, message: M) -> TimerId;

    /// Cancel a pending timer.
    ///
    /// Returns `false` when the timer already fired (one-shot), was already
    /// cancelled, or never existed. Calling it repeatedly is safe.
    fn cancel(&mut self, id: TimerId) -> bool;

    /// Pop the earliest message due at or before `until`, moving the clock
    /// to its deadline. Repeating timers are re-armed one interval later.
    fn pop_due(&mut self, until: Duration) -> Option<M>;

    /// Move the clock forward to `until` once nothing more is due.
    fn settle(&mut self, until: Duration);

    /// Number of armed timers.
    fn pending(&self) -> usize;

    /// Whether `id` is still armed.
    fn is_pending(&self, id: TimerId) -> bool;
}

#[derive(Debug)]
struct Entry<M> {
    id: TimerId,
    /// `None` when the deadline lies beyond the representable range; such
    /// a timer stays armed but never fires.
    deadline: Option<Duration>,
    period: Option<Duration>,
    message: M,
}

/// Deterministic scheduler driven by explicit time advancement.
///
/// The terminal front-end advances it from the wall clock once per frame;
/// tests advance it by exact amounts.
#[derive(Debug)]
pub struct VirtualScheduler<M> {
    now: Duration,
    next_id: u64,
    entries: Vec<Entry<M>>,
}

impl<M> VirtualScheduler<M> {
    /// Create a scheduler with its clock at zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            entries: Vec::new(),
        }
    }

    fn arm(&mut self, deadline: Option<Duration>, period: Option<Duration>, message: M) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            deadline,
            period,
            message,
        });
        id
    }
}

impl<M> Default for VirtualScheduler<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Clone> Scheduler<M> for VirtualScheduler<M> {
    fn now(&self) -> Duration {
        self.now
    }

    fn after(&mut self, delay: Duration, message: M) -> TimerId {
        let id = self.arm(self.now.checked_add(delay), None, message);
        tracing::trace!(?id, ?delay, "armed one-shot timer");
        id
    }

    fn every(&mut self, interval: Duration, message: M) -> TimerId {
        let interval = interval.max(MIN_INTERVAL);
        let id = self.arm(self.now.checked_add(interval), Some(interval), message);
        tracing::trace!(?id, ?interval, "armed repeating timer");
        id
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        let removed = self.entries.len() != before;
        if removed {
            tracing::trace!(?id, "cancelled timer");
        }
        removed
    }

    fn pop_due(&mut self, until: Duration) -> Option<M> {
        // Ties fire in scheduling order.
        let index = self
            .entries
            .iter()
            .enumerate()
            .filter_map(|(i, e)| e.deadline.map(|d| (i, d, e.id)))
            .filter(|&(_, deadline, _)| deadline <= until)
            .min_by_key(|&(_, deadline, id)| (deadline, id))
            .map(|(i, _, _)| i)?;

        if let Some(deadline) = self.entries[index].deadline {
            self.now = self.now.max(deadline);
        }

        match self.entries[index].period {
            Some(period) => {
                let entry = &mut self.entries[index];
                entry.deadline = entry.deadline.and_then(|d| d.checked_add(period));
                Some(entry.message.clone())
            }
            None => Some(self.entries.swap_remove(index).message),
        }
    }

    fn settle(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }

    fn pending(&self) -> usize {
        self.entries.len()
    }

    fn is_pending(&self, id: TimerId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }
}
