use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::timer::TimerKey;

use super::BreathPhase;

const CLOCK_TICK: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum BreathStatus {
    Idle,
    Active,
}

impl Default for BreathStatus {
    fn default() -> Self {
        BreathStatus::Idle
    }
}

/// What the breathing screen needs after every phase change or clock tick.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BreathUpdate {
    pub active: bool,
    pub phase: BreathPhase,
    pub instruction_key: &'static str,
    pub target_size: u32,
    pub elapsed_secs: u64,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PhaseSnapshot {
    pub phase: BreathPhase,
    pub instruction_key: &'static str,
    pub target_size: u32,
    pub remaining: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BreathEffect {
    Arm(TimerKey, Duration),
    Cancel(TimerKey),
    Report(BreathUpdate),
    /// A session with at least one elapsed second was stopped.
    SessionCompleted { elapsed_secs: u64 },
}

/// Guided breathing state machine.
///
/// Transitions only return effects; arming timers and updating the session
/// counters is left to whoever owns the scheduler and the store.
#[derive(Debug, Clone, Default)]
pub struct BreathCycle {
    status: BreathStatus,
    phase: BreathPhase,
    phase_started_at: Duration,
    elapsed_secs: u64,
}

impl BreathCycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> BreathStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status == BreathStatus::Active
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    /// Starts from the top of the cycle. Restarts if already running.
    pub fn start(&mut self, now: Duration) -> Vec<BreathEffect> {
        *self = Self {
            status: BreathStatus::Active,
            phase: BreathPhase::Inhale,
            phase_started_at: now,
            elapsed_secs: 0,
        };

        vec![
            BreathEffect::Arm(TimerKey::BreathPhase, self.phase.duration()),
            BreathEffect::Arm(TimerKey::BreathClock, CLOCK_TICK),
            BreathEffect::Report(self.update()),
        ]
    }

    pub fn stop(&mut self) -> Vec<BreathEffect> {
        if self.status == BreathStatus::Idle {
            return Vec::new();
        }

        self.status = BreathStatus::Idle;
        let mut effects = vec![
            BreathEffect::Cancel(TimerKey::BreathPhase),
            BreathEffect::Cancel(TimerKey::BreathClock),
            BreathEffect::Report(self.update()),
        ];
        if self.elapsed_secs > 0 {
            effects.push(BreathEffect::SessionCompleted {
                elapsed_secs: self.elapsed_secs,
            });
        }
        effects
    }

    /// Handles one of the breathing timers going off. Other keys and late
    /// fires after `stop` are ignored.
    pub fn fire(&mut self, key: TimerKey, now: Duration) -> Vec<BreathEffect> {
        if self.status != BreathStatus::Active {
            return Vec::new();
        }

        match key {
            TimerKey::BreathPhase => {
                self.phase = self.phase.next();
                self.phase_started_at = now;
                vec![
                    BreathEffect::Arm(TimerKey::BreathPhase, self.phase.duration()),
                    BreathEffect::Report(self.update()),
                ]
            }
            TimerKey::BreathClock => {
                self.elapsed_secs += 1;
                vec![
                    BreathEffect::Arm(TimerKey::BreathClock, CLOCK_TICK),
                    BreathEffect::Report(self.update()),
                ]
            }
            TimerKey::GameArm | TimerKey::GameTimeout => Vec::new(),
        }
    }

    pub fn current_phase(&self, now: Duration) -> Option<PhaseSnapshot> {
        if self.status != BreathStatus::Active {
            return None;
        }

        let in_phase = now.saturating_sub(self.phase_started_at);
        Some(PhaseSnapshot {
            phase: self.phase,
            instruction_key: self.phase.instruction_key(),
            target_size: self.phase.target_size(),
            remaining: self.phase.duration().saturating_sub(in_phase),
        })
    }

    pub fn update(&self) -> BreathUpdate {
        BreathUpdate {
            active: self.is_active(),
            phase: self.phase,
            instruction_key: self.phase.instruction_key(),
            target_size: self.phase.target_size(),
            elapsed_secs: self.elapsed_secs,
        }
    }
}

/// Session clock text, `MM:SS`. Minutes keep counting past 99.
pub fn format_elapsed(elapsed_secs: u64) -> String {
    format!("{:02}:{:02}", elapsed_secs / 60, elapsed_secs % 60)
}
