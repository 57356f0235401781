//! Deferred actions keyed by simulation tick.

use enchantable_core::SimTick;
use std::collections::BTreeMap;
use tracing::trace;

/// Queue of actions that run on a later tick.
///
/// Actions due on the same tick are returned in scheduling order.
#[derive(Debug, Clone)]
pub struct TickScheduler<T> {
    current_tick: SimTick,
    pending: BTreeMap<SimTick, Vec<T>>,
}

impl<T> Default for TickScheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TickScheduler<T> {
    /// Create an empty scheduler at tick 0.
    pub fn new() -> Self {
        Self {
            current_tick: SimTick::ZERO,
            pending: BTreeMap::new(),
        }
    }

    /// The tick the scheduler is on.
    pub fn current_tick(&self) -> SimTick {
        self.current_tick
    }

    /// Queue `action` to run `delay` ticks from now. A delay of 0 runs on
    /// the next drain of the current tick.
    pub fn schedule_after(&mut self, delay: u64, action: T) -> SimTick {
        let due = self.current_tick.advance(delay);
        self.pending.entry(due).or_default().push(action);
        trace!(due = due.0, "scheduled deferred action");
        due
    }

    /// Advance one tick and return every action now due.
    pub fn advance(&mut self) -> Vec<T> {
        self.current_tick = self.current_tick.advance(1);
        self.drain_due()
    }

    /// Remove and return actions due at or before the current tick.
    pub fn drain_due(&mut self) -> Vec<T> {
        let later = self.pending.split_off(&self.current_tick.advance(1));
        let due = std::mem::replace(&mut self.pending, later);
        due.into_values().flatten().collect()
    }

    /// Number of queued actions.
    pub fn len(&self) -> usize {
        self.pending.values().map(Vec::len).sum()
    }

    /// Whether nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drop queued actions matching `predicate`.
    pub fn cancel_where(&mut self, mut predicate: impl FnMut(&T) -> bool) {
        self.pending.retain(|_, actions| {
            actions.retain(|action| !predicate(action));
            !actions.is_empty()
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actions_run_after_delay() {
        let mut scheduler = TickScheduler::new();
        scheduler.schedule_after(1, "a");
        scheduler.schedule_after(2, "b");

        assert!(scheduler.drain_due().is_empty());
        assert_eq!(scheduler.advance(), vec!["a"]);
        assert_eq!(scheduler.advance(), vec!["b"]);
        assert!(scheduler.is_empty());
    }

    #[test]
    fn same_tick_keeps_order() {
        let mut scheduler = TickScheduler::new();
        scheduler.schedule_after(1, 1);
        scheduler.schedule_after(1, 2);
        scheduler.schedule_after(1, 3);
        assert_eq!(scheduler.len(), 3);
        assert_eq!(scheduler.advance(), vec![1, 2, 3]);
    }

    #[test]
    fn zero_delay_is_due_immediately() {
        let mut scheduler = TickScheduler::new();
        scheduler.advance();
        let due = scheduler.schedule_after(0, ());
        assert_eq!(due, SimTick(1));
        assert_eq!(scheduler.drain_due().len(), 1);
    }

    #[test]
    fn cancel_removes_matching() {
        let mut scheduler = TickScheduler::new();
        scheduler.schedule_after(1, 1);
        scheduler.schedule_after(1, 2);
        scheduler.cancel_where(|v| *v == 1);
        assert_eq!(scheduler.advance(), vec![2]);
    }
}
