use std::time::Duration;

use serde::{Deserialize, Serialize};

/// One segment of the 4-2-6-2 breathing pattern.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum BreathPhase {
    Inhale,
    HoldIn,
    Exhale,
    HoldOut,
}

impl Default for BreathPhase {
    fn default() -> Self {
        BreathPhase::Inhale
    }
}

impl BreathPhase {
    pub const ALL: [BreathPhase; 4] = [
        BreathPhase::Inhale,
        BreathPhase::HoldIn,
        BreathPhase::Exhale,
        BreathPhase::HoldOut,
    ];

    /// Length of one full cycle.
    pub const CYCLE: Duration = Duration::from_secs(14);

    pub fn duration(self) -> Duration {
        match self {
            BreathPhase::Inhale => Duration::from_secs(4),
            BreathPhase::HoldIn => Duration::from_secs(2),
            BreathPhase::Exhale => Duration::from_secs(6),
            BreathPhase::HoldOut => Duration::from_secs(2),
        }
    }

    pub fn instruction_key(self) -> &'static str {
        match self {
            BreathPhase::Inhale => "breathe_in",
            BreathPhase::HoldIn | BreathPhase::HoldOut => "hold",
            BreathPhase::Exhale => "breathe_out",
        }
    }

    /// Size the breathing circle grows or shrinks to over the phase.
    pub fn target_size(self) -> u32 {
        match self {
            BreathPhase::Inhale | BreathPhase::HoldIn => 250,
            BreathPhase::Exhale | BreathPhase::HoldOut => 150,
        }
    }

    pub fn next(self) -> Self {
        match self {
            BreathPhase::Inhale => BreathPhase::HoldIn,
            BreathPhase::HoldIn => BreathPhase::Exhale,
            BreathPhase::Exhale => BreathPhase::HoldOut,
            BreathPhase::HoldOut => BreathPhase::Inhale,
        }
    }

    /// Phase active `offset` after a cycle started, with the time left in it.
    pub fn at(offset: Duration) -> (Self, Duration) {
        let cycle_ms = Self::CYCLE.as_millis();
        let mut into_cycle = offset.as_millis() % cycle_ms;

        for phase in Self::ALL {
            let phase_ms = phase.duration().as_millis();
            if into_cycle < phase_ms {
                let remaining = Duration::from_millis((phase_ms - into_cycle) as u64);
                return (phase, remaining);
            }
            into_cycle -= phase_ms;
        }

        // into_cycle is always below the cycle length, which the loop covers.
        (BreathPhase::Inhale, BreathPhase::Inhale.duration())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phase_at(secs: f64) -> BreathPhase {
        BreathPhase::at(Duration::from_secs_f64(secs)).0
    }

    #[test]
    fn durations_add_up_to_the_cycle() {
        let total: Duration = BreathPhase::ALL.iter().map(|p| p.duration()).sum();
        assert_eq!(total, BreathPhase::CYCLE);
    }

    #[test]
    fn schedule_follows_four_two_six_two() {
        assert_eq!(phase_at(0.0), BreathPhase::Inhale);
        assert_eq!(phase_at(3.999), BreathPhase::Inhale);
        assert_eq!(phase_at(4.0), BreathPhase::HoldIn);
        assert_eq!(phase_at(5.5), BreathPhase::HoldIn);
        assert_eq!(phase_at(6.0), BreathPhase::Exhale);
        assert_eq!(phase_at(11.9), BreathPhase::Exhale);
        assert_eq!(phase_at(12.0), BreathPhase::HoldOut);
        assert_eq!(phase_at(14.0), BreathPhase::Inhale);
        assert_eq!(phase_at(17.0), BreathPhase::Inhale);
        assert_eq!(phase_at(18.0), BreathPhase::HoldIn);
        assert_eq!(phase_at(14.0 * 100.0 + 7.0), BreathPhase::Exhale);
    }

    #[test]
    fn reports_time_left_in_phase() {
        let (phase, remaining) = BreathPhase::at(Duration::from_millis(7_500));
        assert_eq!(phase, BreathPhase::Exhale);
        assert_eq!(remaining, Duration::from_millis(4_500));
    }

    #[test]
    fn next_wraps_after_hold_out() {
        let mut phase = BreathPhase::Inhale;
        let mut seen = Vec::new();
        for _ in 0..5 {
            seen.push(phase);
            phase = phase.next();
        }
        assert_eq!(
            seen,
            vec![
                BreathPhase::Inhale,
                BreathPhase::HoldIn,
                BreathPhase::Exhale,
                BreathPhase::HoldOut,
                BreathPhase::Inhale,
            ]
        );
    }

    #[test]
    fn hold_phases_share_an_instruction() {
        assert_eq!(BreathPhase::HoldIn.instruction_key(), "hold");
        assert_eq!(BreathPhase::HoldOut.instruction_key(), "hold");
        assert_eq!(BreathPhase::Exhale.target_size(), 150);
    }
}
