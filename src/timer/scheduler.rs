use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

/// Every timer the core can have pending. At most one timer per key is live;
/// scheduling a key again replaces the earlier one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKey {
    /// Advances the breathing cycle to its next phase.
    BreathPhase,
    /// One-second session clock shown while breathing.
    BreathClock,
    /// Ends the concentration game's wait and arms the target.
    GameArm,
    /// Expires an armed target that nobody tapped.
    GameTimeout,
}

impl fmt::Display for TimerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TimerKey::BreathPhase => "breath-phase",
            TimerKey::BreathClock => "breath-clock",
            TimerKey::GameArm => "game-arm",
            TimerKey::GameTimeout => "game-timeout",
        };
        f.write_str(name)
    }
}

/// The host's "call me back after N" facility.
///
/// Time is measured as an offset from when the scheduler was created.
/// Cancelling a key that is not pending does nothing.
pub trait Scheduler {
    fn now(&self) -> Duration;

    /// Arms `key` for the absolute offset `due`. A `due` already in the past
    /// fires as soon as the scheduler gets to it.
    fn schedule_at(&mut self, key: TimerKey, due: Duration);

    fn cancel(&mut self, key: TimerKey);

    fn schedule(&mut self, key: TimerKey, after: Duration) {
        let due = self.now() + after;
        self.schedule_at(key, due);
    }
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    due: Duration,
    seq: u64,
}

/// Virtual-time scheduler. Nothing fires until the owner pulls due timers
/// with [`ManualScheduler::pop_due`].
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    next_seq: u64,
    pending: HashMap<TimerKey, Pending>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pending(&self, key: TimerKey) -> bool {
        self.pending.contains_key(&key)
    }

    /// Absolute time at which `key` will fire, if it is pending.
    pub fn due_at(&self, key: TimerKey) -> Option<Duration> {
        self.pending.get(&key).map(|pending| pending.due)
    }

    /// Removes the earliest timer due at or before `until` and moves the
    /// clock to its due time. Ties fire in the order they were scheduled.
    pub fn pop_due(&mut self, until: Duration) -> Option<TimerKey> {
        let (key, pending) = self
            .pending
            .iter()
            .filter(|(_, pending)| pending.due <= until)
            .min_by_key(|(_, pending)| (pending.due, pending.seq))
            .map(|(key, pending)| (*key, *pending))?;

        self.pending.remove(&key);
        if pending.due > self.now {
            self.now = pending.due;
        }
        Some(key)
    }

    /// Moves the clock forward without firing anything. Never moves backwards.
    pub fn advance_clock(&mut self, to: Duration) {
        if to > self.now {
            self.now = to;
        }
    }
}

impl Scheduler for ManualScheduler {
    fn now(&self) -> Duration {
        self.now
    }

    fn schedule_at(&mut self, key: TimerKey, due: Duration) {
        let pending = Pending {
            due,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.pending.insert(key, pending);
    }

    fn cancel(&mut self, key: TimerKey) {
        self.pending.remove(&key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_timers_in_due_order() {
        let mut scheduler = ManualScheduler::new();
        scheduler.schedule(TimerKey::GameArm, Duration::from_secs(3));
        scheduler.schedule(TimerKey::BreathClock, Duration::from_secs(1));

        let until = Duration::from_secs(10);
        assert_eq!(scheduler.pop_due(until), Some(TimerKey::BreathClock));
        assert_eq!(scheduler.now(), Duration::from_secs(1));
        assert_eq!(scheduler.pop_due(until), Some(TimerKey::GameArm));
        assert_eq!(scheduler.now(), Duration::from_secs(3));
        assert_eq!(scheduler.pop_due(until), None);
    }

    #[test]
    fn ties_fire_in_scheduling_order() {
        let mut scheduler = ManualScheduler::new();
        scheduler.schedule(TimerKey::BreathPhase, Duration::from_secs(2));
        scheduler.schedule(TimerKey::BreathClock, Duration::from_secs(2));

        let until = Duration::from_secs(2);
        assert_eq!(scheduler.pop_due(until), Some(TimerKey::BreathPhase));
        assert_eq!(scheduler.pop_due(until), Some(TimerKey::BreathClock));
    }

    #[test]
    fn rescheduling_replaces_and_cancel_is_idempotent() {
        let mut scheduler = ManualScheduler::new();
        scheduler.schedule(TimerKey::GameTimeout, Duration::from_secs(2));
        scheduler.schedule(TimerKey::GameTimeout, Duration::from_secs(5));
        assert_eq!(
            scheduler.due_at(TimerKey::GameTimeout),
            Some(Duration::from_secs(5))
        );

        scheduler.cancel(TimerKey::GameTimeout);
        scheduler.cancel(TimerKey::GameTimeout);
        assert!(!scheduler.is_pending(TimerKey::GameTimeout));
        assert_eq!(scheduler.pop_due(Duration::from_secs(60)), None);
    }

    #[test]
    fn nothing_fires_before_it_is_due() {
        let mut scheduler = ManualScheduler::new();
        scheduler.schedule(TimerKey::GameArm, Duration::from_millis(2500));
        assert_eq!(scheduler.pop_due(Duration::from_secs(2)), None);
        scheduler.advance_clock(Duration::from_secs(2));
        assert_eq!(scheduler.now(), Duration::from_secs(2));
        assert!(scheduler.is_pending(TimerKey::GameArm));
    }
}
