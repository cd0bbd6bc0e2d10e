use std::time::Duration;

use serde::Serialize;

use crate::{
    breathing::{BreathCycle, BreathEffect, BreathUpdate},
    concentration::{DelaySource, GameEffect, GameUpdate, RandomDelays, ReactionGame, SignalOutcome},
    error::Result,
    i18n::{Language, Localizer},
    log_debug, log_info,
    models::MoodEntry,
    store::WellnessStore,
    timer::{ManualScheduler, Scheduler, TimerKey},
    tips::TipCarousel,
};

const ENABLE_LOGS: bool = true;

/// Something the presentation layer should redraw.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", tag = "kind", content = "payload")]
pub enum Update {
    Breath(BreathUpdate),
    Game(GameUpdate),
    #[serde(rename_all = "camelCase")]
    MeditationCompleted {
        elapsed_secs: u64,
        sessions_completed: u32,
    },
}

/// The app context: created once at start-up and handed to whatever drives it.
///
/// All mutation goes through `&mut self`, so controller callbacks run one at a
/// time and to completion.
pub struct MindWell<S, D = RandomDelays> {
    store: WellnessStore,
    localizer: Localizer,
    tips: TipCarousel,
    breath: BreathCycle,
    game: ReactionGame<D>,
    scheduler: S,
}

impl<S: Scheduler, D: DelaySource> MindWell<S, D> {
    pub fn new(scheduler: S, delays: D, language: Language) -> Self {
        Self {
            store: WellnessStore::new(),
            localizer: Localizer::new(language),
            tips: TipCarousel::new(),
            breath: BreathCycle::new(),
            game: ReactionGame::new(delays),
            scheduler,
        }
    }

    pub fn store(&self) -> &WellnessStore {
        &self.store
    }

    pub fn localizer(&self) -> &Localizer {
        &self.localizer
    }

    pub fn localizer_mut(&mut self) -> &mut Localizer {
        &mut self.localizer
    }

    pub fn tips_mut(&mut self) -> &mut TipCarousel {
        &mut self.tips
    }

    pub fn breath(&self) -> &BreathCycle {
        &self.breath
    }

    pub fn game(&self) -> &ReactionGame<D> {
        &self.game
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    pub fn record_mood(&mut self, level: u8, note: impl Into<String>) -> Result<MoodEntry> {
        self.store.record_mood(level, note)
    }

    pub fn recent_moods(&self, n: usize) -> Vec<u8> {
        self.store.recent_moods(n)
    }

    pub fn start_breathing(&mut self) -> Vec<Update> {
        log_info!("Breathing session started");
        let now = self.scheduler.now();
        let effects = self.breath.start(now);
        self.apply_breath(effects, now)
    }

    pub fn stop_breathing(&mut self) -> Vec<Update> {
        let now = self.scheduler.now();
        let effects = self.breath.stop();
        self.apply_breath(effects, now)
    }

    pub fn start_game(&mut self) -> Vec<Update> {
        log_info!("Concentration game started");
        let now = self.scheduler.now();
        let effects = self.game.start();
        self.apply_game(effects, now)
    }

    pub fn stop_game(&mut self) -> Vec<Update> {
        let now = self.scheduler.now();
        let effects = self.game.stop();
        self.apply_game(effects, now)
    }

    pub fn signal(&mut self) -> (SignalOutcome, Vec<Update>) {
        let now = self.scheduler.now();
        let (outcome, effects) = self.game.signal(now);
        (outcome, self.apply_game(effects, now))
    }

    /// Routes a timer that went off to the controller that owns it, treating
    /// the scheduler's current time as the moment it fired.
    pub fn fire(&mut self, key: TimerKey) -> Vec<Update> {
        let now = self.scheduler.now();
        self.fire_at(key, now)
    }

    /// Like [`MindWell::fire`], for a timer that was due at `at`. Follow-up
    /// timers are armed relative to `at`, so a late pickup does not shift the
    /// breathing schedule.
    pub fn fire_at(&mut self, key: TimerKey, at: Duration) -> Vec<Update> {
        log_debug!("Timer {} fired at {:?}", key, at);
        match key {
            TimerKey::BreathPhase | TimerKey::BreathClock => {
                let effects = self.breath.fire(key, at);
                self.apply_breath(effects, at)
            }
            TimerKey::GameArm | TimerKey::GameTimeout => {
                let effects = self.game.fire(key, at);
                self.apply_game(effects, at)
            }
        }
    }

    fn apply_breath(&mut self, effects: Vec<BreathEffect>, at: Duration) -> Vec<Update> {
        let mut updates = Vec::new();
        for effect in effects {
            match effect {
                BreathEffect::Arm(key, after) => self.scheduler.schedule_at(key, at + after),
                BreathEffect::Cancel(key) => self.scheduler.cancel(key),
                BreathEffect::Report(update) => updates.push(Update::Breath(update)),
                BreathEffect::SessionCompleted { elapsed_secs } => {
                    let sessions_completed = self.store.record_meditation_session();
                    log_info!(
                        "Breathing session completed after {}s ({} total)",
                        elapsed_secs,
                        sessions_completed
                    );
                    updates.push(Update::MeditationCompleted {
                        elapsed_secs,
                        sessions_completed,
                    });
                }
            }
        }
        updates
    }

    fn apply_game(&mut self, effects: Vec<GameEffect>, at: Duration) -> Vec<Update> {
        let mut updates = Vec::new();
        for effect in effects {
            match effect {
                GameEffect::Arm(key, after) => self.scheduler.schedule_at(key, at + after),
                GameEffect::Cancel(key) => self.scheduler.cancel(key),
                GameEffect::Report(update) => updates.push(Update::Game(update)),
                GameEffect::SubmitBest(score) => {
                    if self.store.submit_concentration_score(score) {
                        log_info!("New best concentration score: {}", score);
                    }
                }
            }
        }
        updates
    }
}

impl<D: DelaySource> MindWell<ManualScheduler, D> {
    /// Fires everything due up to `until` in order, then parks the clock there.
    pub fn advance_to(&mut self, until: Duration) -> Vec<Update> {
        let mut updates = Vec::new();
        while let Some(key) = self.scheduler.pop_due(until) {
            updates.extend(self.fire(key));
        }
        self.scheduler.advance_clock(until);
        updates
    }

    pub fn advance(&mut self, by: Duration) -> Vec<Update> {
        let until = self.scheduler.now() + by;
        self.advance_to(until)
    }
}
