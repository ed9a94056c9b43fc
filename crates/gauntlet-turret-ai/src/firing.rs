//! Firing-cycle phase machine.
//!
//! `Anticipating -> FiringMuzzle(0) -> .. -> FiringMuzzle(n-1) -> Cooldown`,
//! then back to `Anticipating`. Each phase holds an elapsed counter that the
//! owner advances once per tick. At most one phase change happens per call and
//! the counter restarts from zero on every change.

use gauntlet_core::config::TurretConfig;
use gauntlet_core::constants::TIMER_EPSILON;
use gauntlet_core::enums::FiringPhase;

/// Phase durations in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleTiming {
    pub anticipation: f64,
    pub per_muzzle: f64,
    pub cycle_delay: f64,
}

impl From<&TurretConfig> for CycleTiming {
    fn from(config: &TurretConfig) -> Self {
        Self {
            anticipation: config.anticipation_duration,
            per_muzzle: config.per_muzzle_cooldown,
            cycle_delay: config.cycle_delay,
        }
    }
}

/// What a call to [`FiringCycle::advance`] changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleStep {
    /// The anticipation window closed and muzzle 0 fires now.
    AnticipationElapsed,
    /// Muzzle `i` (never 0) fires now.
    NextMuzzle(usize),
    /// The last muzzle's hold ended; the inter-cycle delay starts.
    CooldownStarted,
    /// The delay ended; a new anticipation window opens.
    Restarted,
}

impl CycleStep {
    /// Index of the muzzle that fires on this step, if any.
    pub fn fired_muzzle(self) -> Option<usize> {
        match self {
            CycleStep::AnticipationElapsed => Some(0),
            CycleStep::NextMuzzle(i) => Some(i),
            CycleStep::CooldownStarted | CycleStep::Restarted => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FiringCycle {
    phase: FiringPhase,
    elapsed: f64,
    muzzle_count: usize,
}

fn done(elapsed: f64, duration: f64) -> bool {
    elapsed + TIMER_EPSILON >= duration
}

impl FiringCycle {
    /// Start a cycle in the anticipation window. Returns `None` without muzzles.
    pub fn start(muzzle_count: usize) -> Option<Self> {
        (muzzle_count > 0).then_some(Self {
            phase: FiringPhase::Anticipating,
            elapsed: 0.0,
            muzzle_count,
        })
    }

    pub fn phase(&self) -> FiringPhase {
        self.phase
    }

    /// Seconds spent in the current phase.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn advance(&mut self, dt: f64, timing: &CycleTiming) -> Option<CycleStep> {
        self.elapsed += dt;
        let (next, step) = match self.phase {
            FiringPhase::Anticipating if done(self.elapsed, timing.anticipation) => (
                FiringPhase::FiringMuzzle(0),
                CycleStep::AnticipationElapsed,
            ),
            FiringPhase::FiringMuzzle(i) if done(self.elapsed, timing.per_muzzle) => {
                if i + 1 < self.muzzle_count {
                    (FiringPhase::FiringMuzzle(i + 1), CycleStep::NextMuzzle(i + 1))
                } else {
                    (FiringPhase::Cooldown, CycleStep::CooldownStarted)
                }
            }
            FiringPhase::Cooldown if done(self.elapsed, timing.cycle_delay) => {
                (FiringPhase::Anticipating, CycleStep::Restarted)
            }
            _ => return None,
        };
        self.phase = next;
        self.elapsed = 0.0;
        Some(step)
    }
}
