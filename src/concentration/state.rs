use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::timer::TimerKey;

use super::{DelaySource, RandomDelays};

/// How long an armed target stays tappable.
pub const ARMED_TIMEOUT: Duration = Duration::from_secs(2);

const MAX_POINTS: u32 = 1_000;
/// Hits faster than this may raise the best score.
const FAST_REACTION_MS: f64 = 500.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum RoundState {
    Waiting,
    Armed,
}

impl Default for RoundState {
    fn default() -> Self {
        RoundState::Waiting
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", tag = "outcome")]
pub enum SignalOutcome {
    Hit { reaction_ms: u32, points: u32 },
    /// The tap landed while nothing was armed and was ignored.
    NotArmed,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GameUpdate {
    pub active: bool,
    pub state: RoundState,
    pub last_reaction_ms: Option<u32>,
    pub score: u32,
    pub rounds: u32,
    pub misses: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEffect {
    Arm(TimerKey, Duration),
    Cancel(TimerKey),
    Report(GameUpdate),
    /// A fast hit; the running score is a candidate for the best score.
    SubmitBest(u32),
}

/// Reaction-time game: wait a random while, arm the target, score the tap.
///
/// Hits are judged on [`RoundState`] alone.
#[derive(Debug, Clone)]
pub struct ReactionGame<D = RandomDelays> {
    delays: D,
    active: bool,
    state: RoundState,
    armed_at: Option<Duration>,
    score: u32,
    rounds: u32,
    misses: u32,
    last_reaction_ms: Option<u32>,
}

impl<D: DelaySource> ReactionGame<D> {
    pub fn new(delays: D) -> Self {
        Self {
            delays,
            active: false,
            state: RoundState::Waiting,
            armed_at: None,
            score: 0,
            rounds: 0,
            misses: 0,
            last_reaction_ms: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    /// Resets the score and schedules the first target. Restarts a running game.
    pub fn start(&mut self) -> Vec<GameEffect> {
        self.active = true;
        self.state = RoundState::Waiting;
        self.armed_at = None;
        self.score = 0;
        self.rounds = 0;
        self.misses = 0;
        self.last_reaction_ms = None;

        vec![
            GameEffect::Cancel(TimerKey::GameTimeout),
            GameEffect::Arm(TimerKey::GameArm, self.delays.next_delay()),
            GameEffect::Report(self.update()),
        ]
    }

    /// Cancels everything pending and drops back to the idle, unarmed state.
    pub fn stop(&mut self) -> Vec<GameEffect> {
        if !self.active {
            return Vec::new();
        }

        self.active = false;
        self.state = RoundState::Waiting;
        self.armed_at = None;

        vec![
            GameEffect::Cancel(TimerKey::GameArm),
            GameEffect::Cancel(TimerKey::GameTimeout),
            GameEffect::Report(self.update()),
        ]
    }

    pub fn fire(&mut self, key: TimerKey, now: Duration) -> Vec<GameEffect> {
        if !self.active {
            return Vec::new();
        }

        match (key, self.state) {
            (TimerKey::GameArm, RoundState::Waiting) => {
                self.state = RoundState::Armed;
                self.armed_at = Some(now);
                vec![
                    GameEffect::Arm(TimerKey::GameTimeout, ARMED_TIMEOUT),
                    GameEffect::Report(self.update()),
                ]
            }
            (TimerKey::GameTimeout, RoundState::Armed) => self.miss(),
            _ => Vec::new(),
        }
    }

    fn miss(&mut self) -> Vec<GameEffect> {
        self.misses += 1;
        self.state = RoundState::Waiting;
        self.armed_at = None;
        vec![
            GameEffect::Arm(TimerKey::GameArm, self.delays.next_delay()),
            GameEffect::Report(self.update()),
        ]
    }

    /// The player's tap. Counts only while the target is armed and inside
    /// its window; a tap that beats a late timeout is settled as that miss.
    pub fn signal(&mut self, now: Duration) -> (SignalOutcome, Vec<GameEffect>) {
        let armed_at = match (self.active, self.state, self.armed_at) {
            (true, RoundState::Armed, Some(armed_at)) => armed_at,
            _ => return (SignalOutcome::NotArmed, vec![GameEffect::Report(self.update())]),
        };

        let reaction = now.saturating_sub(armed_at);
        if reaction >= ARMED_TIMEOUT {
            let mut effects = vec![GameEffect::Cancel(TimerKey::GameTimeout)];
            effects.extend(self.miss());
            return (SignalOutcome::NotArmed, effects);
        }

        let reaction_ms = reaction.as_secs_f64() * 1_000.0;
        let rounded_ms = reaction_ms.round() as u32;
        let points = MAX_POINTS.saturating_sub(rounded_ms);

        self.score = self.score.saturating_add(points);
        self.rounds += 1;
        self.last_reaction_ms = Some(rounded_ms);
        self.state = RoundState::Waiting;
        self.armed_at = None;

        let mut effects = vec![GameEffect::Cancel(TimerKey::GameTimeout)];
        if reaction_ms < FAST_REACTION_MS {
            effects.push(GameEffect::SubmitBest(self.score));
        }
        effects.push(GameEffect::Arm(TimerKey::GameArm, self.delays.next_delay()));
        effects.push(GameEffect::Report(self.update()));

        (
            SignalOutcome::Hit {
                reaction_ms: rounded_ms,
                points,
            },
            effects,
        )
    }

    pub fn update(&self) -> GameUpdate {
        GameUpdate {
            active: self.active,
            state: self.state,
            last_reaction_ms: self.last_reaction_ms,
            score: self.score,
            rounds: self.rounds,
            misses: self.misses,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::concentration::SequenceDelays;

    fn game() -> ReactionGame<SequenceDelays> {
        ReactionGame::new(SequenceDelays::new(vec![Duration::from_secs(3)]))
    }

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn start_schedules_the_first_target() {
        let mut game = game();
        let effects = game.start();
        assert!(effects.contains(&GameEffect::Arm(TimerKey::GameArm, ms(3_000))));
        assert_eq!(game.state(), RoundState::Waiting);
        assert_eq!((game.score(), game.rounds()), (0, 0));
    }

    #[test]
    fn tap_while_waiting_changes_nothing() {
        let mut game = game();
        game.start();
        let before = game.update();

        let (outcome, effects) = game.signal(ms(1_000));
        assert_eq!(outcome, SignalOutcome::NotArmed);
        assert_eq!(effects, vec![GameEffect::Report(before.clone())]);
        assert_eq!(game.update(), before);
    }

    #[test]
    fn instant_tap_scores_full_points() {
        let mut game = game();
        game.start();
        game.fire(TimerKey::GameArm, ms(3_000));

        let (outcome, effects) = game.signal(ms(3_000));
        assert_eq!(
            outcome,
            SignalOutcome::Hit {
                reaction_ms: 0,
                points: 1_000
            }
        );
        assert_eq!(game.score(), 1_000);
        assert_eq!(game.rounds(), 1);
        assert_eq!(game.state(), RoundState::Waiting);
        assert_eq!(effects[0], GameEffect::Cancel(TimerKey::GameTimeout));
        assert!(effects.contains(&GameEffect::SubmitBest(1_000)));
        assert!(effects.contains(&GameEffect::Arm(TimerKey::GameArm, ms(3_000))));
    }

    #[test]
    fn slow_tap_scores_but_is_not_a_best_candidate() {
        let mut game = game();
        game.start();
        game.fire(TimerKey::GameArm, ms(3_000));

        let (outcome, effects) = game.signal(ms(3_750));
        assert_eq!(
            outcome,
            SignalOutcome::Hit {
                reaction_ms: 750,
                points: 250
            }
        );
        assert!(!effects.iter().any(|e| matches!(e, GameEffect::SubmitBest(_))));
        assert_eq!(game.update().last_reaction_ms, Some(750));
    }

    #[test]
    fn timeout_counts_a_miss_and_rearms() {
        let mut game = game();
        game.start();
        game.fire(TimerKey::GameArm, ms(3_000));
        let effects = game.fire(TimerKey::GameTimeout, ms(5_000));

        assert!(effects.contains(&GameEffect::Arm(TimerKey::GameArm, ms(3_000))));
        let update = game.update();
        assert_eq!(update.state, RoundState::Waiting);
        assert_eq!(update.misses, 1);
        assert_eq!((update.score, update.rounds), (0, 0));

        let (outcome, _) = game.signal(ms(5_500));
        assert_eq!(outcome, SignalOutcome::NotArmed);
    }

    #[test]
    fn tap_past_the_window_is_a_miss_even_before_the_timeout_fires() {
        let mut game = game();
        game.start();
        game.fire(TimerKey::GameArm, ms(3_000));

        let (outcome, effects) = game.signal(ms(5_500));
        assert_eq!(outcome, SignalOutcome::NotArmed);
        assert_eq!(effects[0], GameEffect::Cancel(TimerKey::GameTimeout));
        assert!(effects.contains(&GameEffect::Arm(TimerKey::GameArm, ms(3_000))));

        let update = game.update();
        assert_eq!(update.state, RoundState::Waiting);
        assert_eq!((update.score, update.rounds, update.misses), (0, 0, 1));
        assert_eq!(update.last_reaction_ms, None);

        // The timeout that was already in flight finds nothing armed.
        assert!(game.fire(TimerKey::GameTimeout, ms(5_000)).is_empty());
        assert_eq!(game.update().misses, 1);
    }

    #[test]
    fn tap_at_the_window_edge_is_a_miss() {
        let mut game = game();
        game.start();
        game.fire(TimerKey::GameArm, ms(3_000));
        assert_eq!(game.signal(ms(5_000)).0, SignalOutcome::NotArmed);
        assert_eq!(game.rounds(), 0);
    }

    #[test]
    fn stale_timeout_after_hit_is_ignored() {
        let mut game = game();
        game.start();
        game.fire(TimerKey::GameArm, ms(3_000));
        game.signal(ms(3_100));
        assert!(game.fire(TimerKey::GameTimeout, ms(5_000)).is_empty());
        assert_eq!(game.update().misses, 0);
    }

    #[test]
    fn stop_is_idempotent_and_disarms() {
        let mut game = game();
        game.start();
        game.fire(TimerKey::GameArm, ms(3_000));

        let effects = game.stop();
        assert!(effects.contains(&GameEffect::Cancel(TimerKey::GameArm)));
        assert!(effects.contains(&GameEffect::Cancel(TimerKey::GameTimeout)));
        let after_first = game.update();
        assert_eq!(after_first.state, RoundState::Waiting);
        assert!(!after_first.active);

        assert!(game.stop().is_empty());
        assert_eq!(game.update(), after_first);
        assert_eq!(game.signal(ms(3_100)).0, SignalOutcome::NotArmed);
    }
}
