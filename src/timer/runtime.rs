use std::collections::HashMap;
use std::time::Duration;

use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::{self, Instant},
};

use crate::log_debug;

use super::{Scheduler, TimerKey};

const ENABLE_LOGS: bool = true;

/// A timer that went off. Hand it back to [`TokioScheduler::accept`] before acting on it.
#[derive(Debug)]
pub struct FiredTimer {
    key: TimerKey,
    generation: u64,
    due: Duration,
}

struct PendingTimer {
    generation: u64,
    handle: JoinHandle<()>,
}

/// Scheduler backed by tokio sleeps.
///
/// Each timer runs as its own task and reports through one channel, so the
/// owner consumes fired timers from a single loop and callbacks never overlap.
/// A timer that fired but was cancelled or re-armed before the owner got to it
/// is filtered out by its generation number.
pub struct TokioScheduler {
    origin: Instant,
    tx: mpsc::UnboundedSender<FiredTimer>,
    pending: HashMap<TimerKey, PendingTimer>,
    next_generation: u64,
}

impl TokioScheduler {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<FiredTimer>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let scheduler = Self {
            origin: Instant::now(),
            tx,
            pending: HashMap::new(),
            next_generation: 0,
        };
        (scheduler, rx)
    }

    /// Returns the key and its deadline if `fired` is still the live timer for it.
    ///
    /// The deadline, not [`Scheduler::now`], is the time to act at: the loop
    /// may get to a timer late, and re-arming from the late time would drift.
    pub fn accept(&mut self, fired: FiredTimer) -> Option<(TimerKey, Duration)> {
        match self.pending.get(&fired.key) {
            Some(pending) if pending.generation == fired.generation => {
                self.pending.remove(&fired.key);
                Some((fired.key, fired.due))
            }
            _ => {
                log_debug!("Dropping stale {} timer (generation {})", fired.key, fired.generation);
                None
            }
        }
    }

    pub fn is_pending(&self, key: TimerKey) -> bool {
        self.pending.contains_key(&key)
    }
}

impl Scheduler for TokioScheduler {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn schedule_at(&mut self, key: TimerKey, due: Duration) {
        if let Some(previous) = self.pending.remove(&key) {
            previous.handle.abort();
        }

        self.next_generation += 1;
        let generation = self.next_generation;
        let deadline = self.origin + due;
        let tx = self.tx.clone();

        let handle = tokio::spawn(async move {
            time::sleep_until(deadline).await;
            // The receiver only goes away when the host loop is shutting down.
            let _ = tx.send(FiredTimer {
                key,
                generation,
                due,
            });
        });

        self.pending.insert(key, PendingTimer { generation, handle });
    }

    fn cancel(&mut self, key: TimerKey) {
        if let Some(pending) = self.pending.remove(&key) {
            pending.handle.abort();
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, pending) in self.pending.drain() {
            pending.handle.abort();
        }
    }
}
