//! Turret behavior finite state machine.
//!
//! Pure functions over plain data: the next state depends only on the current
//! distance to the player, the two configured ranges, the incapacitated
//! override, and whether the turret is able to fire at all.

use gauntlet_core::enums::TurretState;

/// Input to the turret FSM for a single evaluation.
pub struct TurretContext {
    pub state: TurretState,
    pub distance: f64,
    pub patrol_range: f64,
    pub engage_range: f64,
    /// Hard override: every turret drops to Idle.
    pub player_incapacitated: bool,
    /// False when the turret has no muzzles or no projectile template.
    pub can_engage: bool,
}

/// Output from the turret FSM.
pub struct TurretUpdate {
    pub new_state: TurretState,
    pub state_changed: bool,
    /// The distance band asked for Engaging but the turret cannot fire.
    pub engage_rejected: bool,
}

/// Distance band, ignoring overrides. Boundaries are inclusive on the inner band.
pub fn band_for_distance(distance: f64, patrol_range: f64, engage_range: f64) -> TurretState {
    if distance <= engage_range {
        TurretState::Engaging
    } else if distance <= patrol_range {
        TurretState::Patrolling
    } else {
        TurretState::Idle
    }
}

/// Evaluate the FSM for one turret.
pub fn evaluate(ctx: &TurretContext) -> TurretUpdate {
    if ctx.player_incapacitated {
        return TurretUpdate {
            new_state: TurretState::Idle,
            state_changed: ctx.state != TurretState::Idle,
            engage_rejected: false,
        };
    }

    let band = band_for_distance(ctx.distance, ctx.patrol_range, ctx.engage_range);
    let engage_rejected = band == TurretState::Engaging && !ctx.can_engage;
    let new_state = if engage_rejected {
        TurretState::Patrolling
    } else {
        band
    };

    TurretUpdate {
        new_state,
        state_changed: new_state != ctx.state,
        engage_rejected,
    }
}
