//! Activation pooling: turrets far from the player go dormant and stop being
//! evaluated until the player comes back within range.

use glam::DVec3;
use hecs::World;
use tracing::debug;

use gauntlet_core::events::SimEvent;
use gauntlet_core::types::TurretId;
use gauntlet_turret_ai::TurretController;

pub fn run(world: &mut World, player: DVec3, activation_range: f64, events: &mut Vec<SimEvent>) {
    let mut changes: Vec<(TurretId, bool)> = Vec::new();
    let mut turret_events = Vec::new();

    for (_entity, (id, controller)) in world.query_mut::<(&TurretId, &mut TurretController)>() {
        let in_range = controller.position().distance(player) <= activation_range;
        if in_range != controller.is_active() {
            controller.set_active(in_range, &mut turret_events);
            changes.push((*id, in_range));
        }
    }

    changes.sort_by_key(|(id, _)| *id);
    for (turret, awake) in changes {
        debug!(turret = turret.0, awake, "turret activation changed");
        events.push(if awake {
            SimEvent::TurretAwake { turret }
        } else {
            SimEvent::TurretDormant { turret }
        });
    }
    turret_events.sort_by_key(|e| e.turret());
    events.extend(turret_events.into_iter().map(SimEvent::Turret));
}
