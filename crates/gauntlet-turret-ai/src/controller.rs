//! Per-turret controller.
//!
//! Each tick runs in a fixed order: state evaluation (and cancellation when
//! Engaging is left), then rotation, then the muzzle flash timer, then the
//! firing cycle. A turret that loses Engaging on a tick therefore never fires
//! on that tick.

use glam::DVec3;
use tracing::{debug, warn};

use gauntlet_core::config::TurretConfig;
use gauntlet_core::constants::TIMER_EPSILON;
use gauntlet_core::enums::{FiringPhase, TurretState};
use gauntlet_core::events::{TurretEvent, TurretWarning};
use gauntlet_core::types::{normalize_yaw, yaw_delta, yaw_of, TurretId};

use crate::aim::aim_shot;
use crate::firing::{CycleStep, CycleTiming, FiringCycle};
use crate::fsm::{evaluate, TurretContext};

/// Read-only per-tick inputs shared by every turret.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickContext {
    pub player_position: DVec3,
    pub player_incapacitated: bool,
    /// Scaled seconds advanced this tick.
    pub dt: f64,
    /// Simulation time at the end of this tick, drives the patrol sweep.
    pub time: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct MuzzleFlash {
    muzzle: usize,
    elapsed: f64,
}

#[derive(Debug, Clone)]
pub struct TurretController {
    id: TurretId,
    position: DVec3,
    base_yaw: f64,
    yaw: f64,
    state: TurretState,
    cycle: Option<FiringCycle>,
    flash: Option<MuzzleFlash>,
    config: TurretConfig,
    timing: CycleTiming,
    warning: Option<TurretWarning>,
    warned: bool,
    shut_down: bool,
    active: bool,
}

impl TurretController {
    /// Controller at a placed anchor, facing `base_yaw` and Idle.
    pub fn new(id: TurretId, position: DVec3, base_yaw: f64, config: TurretConfig) -> Self {
        let warning = if config.muzzles.is_empty() {
            Some(TurretWarning::MissingMuzzleConfiguration)
        } else if config.projectile.is_none() {
            Some(TurretWarning::MissingProjectileTemplate)
        } else {
            None
        };
        let timing = CycleTiming::from(&config);
        Self {
            id,
            position,
            base_yaw: normalize_yaw(base_yaw),
            yaw: normalize_yaw(base_yaw),
            state: TurretState::Idle,
            cycle: None,
            flash: None,
            config,
            timing,
            warning,
            warned: false,
            shut_down: false,
            active: true,
        }
    }

    pub fn id(&self) -> TurretId {
        self.id
    }

    pub fn position(&self) -> DVec3 {
        self.position
    }

    pub fn yaw(&self) -> f64 {
        self.yaw
    }

    pub fn base_yaw(&self) -> f64 {
        self.base_yaw
    }

    pub fn state(&self) -> TurretState {
        self.state
    }

    pub fn firing_phase(&self) -> Option<FiringPhase> {
        self.cycle.map(|c| c.phase())
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Configuration problem that keeps this turret from ever firing.
    pub fn warning(&self) -> Option<TurretWarning> {
        self.warning
    }

    pub fn config(&self) -> &TurretConfig {
        &self.config
    }

    /// Advance one tick, appending this turret's events to `out`.
    /// Inactive turrets are not evaluated.
    pub fn tick(&mut self, ctx: &TickContext, out: &mut Vec<TurretEvent>) {
        if !self.active {
            return;
        }

        if ctx.player_incapacitated {
            if !self.shut_down {
                self.force_shutdown(out);
            }
            return;
        }
        self.shut_down = false;

        // A cycle started by this tick's transition counts from the next tick.
        let cycle_running = self.cycle.is_some();
        self.update_state(ctx, out);
        self.rotate(ctx);
        self.update_flash(ctx.dt, out);
        if cycle_running {
            self.update_cycle(ctx, out);
        }
    }

    /// Hard override: drop to Idle, abort any cycle, and silence audio cues.
    pub fn force_shutdown(&mut self, out: &mut Vec<TurretEvent>) {
        self.shut_down = true;
        self.transition(TurretState::Idle, out);
        out.push(TurretEvent::AudioSilenced { turret: self.id });
    }

    /// Pool or unpool the turret. Going dormant behaves like leaving every
    /// band: the cycle is cancelled and the state drops to Idle.
    pub fn set_active(&mut self, active: bool, out: &mut Vec<TurretEvent>) {
        if self.active == active {
            return;
        }
        if !active {
            self.transition(TurretState::Idle, out);
        }
        self.active = active;
    }

    fn update_state(&mut self, ctx: &TickContext, out: &mut Vec<TurretEvent>) {
        let update = evaluate(&TurretContext {
            state: self.state,
            distance: self.position.distance(ctx.player_position),
            patrol_range: self.config.patrol_range,
            engage_range: self.config.engage_range,
            player_incapacitated: false,
            can_engage: self.warning.is_none(),
        });

        if update.engage_rejected && !self.warned {
            self.warned = true;
            if let Some(warning) = self.warning {
                warn!(turret = self.id.0, ?warning, "turret cannot engage");
                out.push(TurretEvent::Warning {
                    turret: self.id,
                    warning,
                });
            }
        }

        if update.state_changed {
            self.transition(update.new_state, out);
        }
    }

    fn transition(&mut self, to: TurretState, out: &mut Vec<TurretEvent>) {
        let from = self.state;
        if from == to {
            return;
        }
        self.state = to;
        debug!(turret = self.id.0, ?from, ?to, "turret state changed");
        out.push(TurretEvent::StateChanged {
            turret: self.id,
            from,
            to,
        });

        if from == TurretState::Engaging {
            self.cancel_cycle(out);
        }
        if to == TurretState::Engaging {
            self.cycle = FiringCycle::start(self.config.muzzles.len());
            if self.cycle.is_some() {
                out.push(TurretEvent::AnticipationBegin { turret: self.id });
            }
        }
    }

    fn cancel_cycle(&mut self, out: &mut Vec<TurretEvent>) {
        if let Some(flash) = self.flash.take() {
            out.push(TurretEvent::MuzzleFlashEnd {
                turret: self.id,
                muzzle: flash.muzzle,
            });
        }
        if self.cycle.take().is_some() {
            out.push(TurretEvent::CycleCancelled { turret: self.id });
        }
    }

    fn rotate(&mut self, ctx: &TickContext) {
        match self.state {
            TurretState::Idle => {}
            TurretState::Patrolling => {
                let patrol = &self.config.patrol;
                if patrol.enabled {
                    let sweep = patrol.sweep_angle_deg * (ctx.time * patrol.sweep_speed).sin();
                    self.yaw = normalize_yaw(self.base_yaw + sweep);
                }
            }
            TurretState::Engaging => {
                let Some(bearing) = yaw_of(ctx.player_position - self.position) else {
                    return;
                };
                let target = bearing + self.config.model_facing_offset_deg;
                let max_step = self.config.rotation_speed_deg_per_sec * ctx.dt;
                let step = yaw_delta(self.yaw, target).clamp(-max_step, max_step);
                self.yaw = normalize_yaw(self.yaw + step);
            }
        }
    }

    fn update_flash(&mut self, dt: f64, out: &mut Vec<TurretEvent>) {
        let Some(flash) = self.flash.as_mut() else {
            return;
        };
        flash.elapsed += dt;
        if flash.elapsed + TIMER_EPSILON >= self.config.muzzle_flash_duration {
            out.push(TurretEvent::MuzzleFlashEnd {
                turret: self.id,
                muzzle: flash.muzzle,
            });
            self.flash = None;
        }
    }

    fn update_cycle(&mut self, ctx: &TickContext, out: &mut Vec<TurretEvent>) {
        let Some(cycle) = self.cycle.as_mut() else {
            return;
        };
        let Some(step) = cycle.advance(ctx.dt, &self.timing) else {
            return;
        };

        let muzzle_count = self.config.muzzles.len();
        match step {
            CycleStep::AnticipationElapsed => {
                out.push(TurretEvent::AnticipationEnd { turret: self.id });
            }
            CycleStep::NextMuzzle(i) => {
                out.push(TurretEvent::MuzzleCueOn {
                    turret: self.id,
                    muzzle: i - 1,
                });
            }
            CycleStep::CooldownStarted => {
                out.push(TurretEvent::MuzzleCueOn {
                    turret: self.id,
                    muzzle: muzzle_count.saturating_sub(1),
                });
            }
            CycleStep::Restarted => {
                out.push(TurretEvent::AnticipationBegin { turret: self.id });
            }
        }

        if let Some(muzzle) = step.fired_muzzle() {
            out.push(TurretEvent::MuzzleCueOff {
                turret: self.id,
                muzzle,
            });
            self.fire(muzzle, ctx.player_position, out);
        }
    }

    fn fire(&mut self, muzzle: usize, target: DVec3, out: &mut Vec<TurretEvent>) {
        let (Some(mount), Some(template)) =
            (self.config.muzzles.get(muzzle), self.config.projectile.as_ref())
        else {
            return;
        };
        let spawn = aim_shot(
            self.id,
            muzzle,
            mount,
            self.position,
            self.yaw,
            target,
            template,
        );

        if let Some(previous) = self.flash.take() {
            out.push(TurretEvent::MuzzleFlashEnd {
                turret: self.id,
                muzzle: previous.muzzle,
            });
        }
        out.push(TurretEvent::MuzzleFlashBegin {
            turret: self.id,
            muzzle,
        });
        out.push(TurretEvent::Fire(spawn));
        self.flash = Some(MuzzleFlash {
            muzzle,
            elapsed: 0.0,
        });
    }
}
