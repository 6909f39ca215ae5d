//! Tick sources for the focus timer.
//!
//! The timer engine never owns a platform timer. It registers interest in
//! ticks through the [`Clock`] trait and is driven by whoever pumps the
//! clock -- a real one-second [`IntervalClock`] in the CLI, or a
//! [`ManualClock`] advanced by hand in tests.
//!
//! Everything here assumes a single pump: subscription changes made during
//! an operation are visible before the next tick is delivered, so there is
//! no race with an in-flight tick.

use std::collections::HashSet;
use std::time::{Duration, Instant};

/// Handle identifying one subscription to a clock.
pub type SubscriberId = u64;

/// A periodic tick emitter with explicit subscribe/unsubscribe.
///
/// Ticking with no subscribers is tolerated; delivery is the pump's job,
/// the clock only tracks who wants ticks.
pub trait Clock {
    /// Register a new subscriber and return its handle.
    fn subscribe(&mut self) -> SubscriberId;

    /// Remove a subscriber. Unknown ids are ignored.
    fn unsubscribe(&mut self, id: SubscriberId);

    fn is_subscribed(&self, id: SubscriberId) -> bool;

    fn subscriber_count(&self) -> usize;
}

#[derive(Debug, Default)]
struct Registry {
    next_id: SubscriberId,
    active: HashSet<SubscriberId>,
}

impl Registry {
    fn subscribe(&mut self) -> SubscriberId {
        let id = self.next_id;
        self.next_id += 1;
        self.active.insert(id);
        id
    }
}

/// Deterministic clock for tests and headless drivers.
///
/// Carries no notion of real time; the caller decides when a tick
/// happens and delivers it to the subscriber itself.
#[derive(Debug, Default)]
pub struct ManualClock {
    registry: Registry,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clock for ManualClock {
    fn subscribe(&mut self) -> SubscriberId {
        self.registry.subscribe()
    }

    fn unsubscribe(&mut self, id: SubscriberId) {
        self.registry.active.remove(&id);
    }

    fn is_subscribed(&self, id: SubscriberId) -> bool {
        self.registry.active.contains(&id)
    }

    fn subscriber_count(&self) -> usize {
        self.registry.active.len()
    }
}

/// Wall-clock tick source with a fixed nominal period.
///
/// The pump alternates between [`IntervalClock::until_next_tick`] (to wait,
/// possibly multiplexed with other input) and [`IntervalClock::advance`]
/// (to mark the tick delivered). [`IntervalClock::wait`] combines both for
/// pumps with nothing else to do.
#[derive(Debug)]
pub struct IntervalClock {
    period: Duration,
    next_deadline: Option<Instant>,
    registry: Registry,
}

impl IntervalClock {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next_deadline: None,
            registry: Registry::default(),
        }
    }

    /// One-second clock, the nominal rate of the focus timer.
    pub fn per_second() -> Self {
        Self::new(Duration::from_secs(1))
    }

    fn deadline(&mut self) -> Instant {
        let period = self.period;
        *self
            .next_deadline
            .get_or_insert_with(|| Instant::now() + period)
    }

    /// Time remaining until the next scheduled tick. Arms the clock on
    /// first use. Returns zero when the tick is already due.
    pub fn until_next_tick(&mut self) -> Duration {
        self.deadline().saturating_duration_since(Instant::now())
    }

    /// Mark the scheduled tick as delivered and schedule the next one.
    ///
    /// If the pump fell behind by more than a period the schedule restarts
    /// from now rather than bursting catch-up ticks; the period is a
    /// nominal rate, not an exact cadence.
    pub fn advance(&mut self) {
        let due = self.deadline();
        let next = due + self.period;
        self.next_deadline = Some(if next <= Instant::now() {
            Instant::now() + self.period
        } else {
            next
        });
    }

    /// Restart the schedule so the next tick lands one full period from
    /// now. Used after a pause so the resumed countdown gets a whole
    /// second before its first decrement.
    pub fn rearm(&mut self) {
        self.next_deadline = Some(Instant::now() + self.period);
    }

    /// Block until the next tick boundary, then advance the schedule.
    pub fn wait(&mut self) {
        let remaining = self.until_next_tick();
        if !remaining.is_zero() {
            std::thread::sleep(remaining);
        }
        self.advance();
    }
}

impl Clock for IntervalClock {
    fn subscribe(&mut self) -> SubscriberId {
        self.registry.subscribe()
    }

    fn unsubscribe(&mut self, id: SubscriberId) {
        self.registry.active.remove(&id);
    }

    fn is_subscribed(&self, id: SubscriberId) -> bool {
        self.registry.active.contains(&id)
    }

    fn subscriber_count(&self) -> usize {
        self.registry.active.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscribe_returns_distinct_ids() {
        let mut clock = ManualClock::new();
        let a = clock.subscribe();
        let b = clock.subscribe();
        assert_ne!(a, b);
        assert_eq!(clock.subscriber_count(), 2);
    }

    #[test]
    fn unsubscribe_removes_only_the_given_id() {
        let mut clock = ManualClock::new();
        let a = clock.subscribe();
        let b = clock.subscribe();
        clock.unsubscribe(a);
        assert!(!clock.is_subscribed(a));
        assert!(clock.is_subscribed(b));
    }

    #[test]
    fn unsubscribe_unknown_id_is_ignored() {
        let mut clock = ManualClock::new();
        clock.unsubscribe(42);
        assert_eq!(clock.subscriber_count(), 0);
    }

    #[test]
    fn interval_clock_schedules_one_period_out() {
        let mut clock = IntervalClock::new(Duration::from_millis(50));
        let remaining = clock.until_next_tick();
        assert!(remaining <= Duration::from_millis(50));
        clock.advance();
        assert!(clock.until_next_tick() > Duration::ZERO);
    }

    #[test]
    fn rearm_pushes_the_deadline_a_full_period_out() {
        let mut clock = IntervalClock::new(Duration::from_millis(50));
        let _ = clock.until_next_tick();
        std::thread::sleep(Duration::from_millis(5));
        clock.rearm();
        assert!(clock.until_next_tick() > Duration::from_millis(40));
    }

    #[test]
    fn interval_clock_wait_delivers_roughly_on_period() {
        let mut clock = IntervalClock::new(Duration::from_millis(20));
        let before = Instant::now();
        clock.wait();
        clock.wait();
        assert!(before.elapsed() >= Duration::from_millis(30));
    }
}
