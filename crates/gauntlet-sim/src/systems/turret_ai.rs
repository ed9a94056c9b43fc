//! Turret AI system: ticks every turret controller in id order and collects
//! projectile fire requests for the spawn step.

use hecs::World;

use gauntlet_core::events::{ProjectileSpawn, SimEvent, TurretEvent};
use gauntlet_core::types::TurretId;
use gauntlet_turret_ai::{TickContext, TurretController};

/// Run every controller once. Turret events are appended to `events`; every
/// `Fire` is also pushed to `fire_requests`.
pub fn run(
    world: &mut World,
    ctx: &TickContext,
    events: &mut Vec<SimEvent>,
    fire_requests: &mut Vec<ProjectileSpawn>,
) {
    let mut per_turret: Vec<(TurretId, Vec<TurretEvent>)> = Vec::new();

    for (_entity, (id, controller)) in world.query_mut::<(&TurretId, &mut TurretController)>() {
        let mut out = Vec::new();
        controller.tick(ctx, &mut out);
        if !out.is_empty() {
            per_turret.push((*id, out));
        }
    }
    per_turret.sort_by_key(|(id, _)| *id);

    for (_, out) in per_turret {
        for event in out {
            if let TurretEvent::Fire(spawn) = &event {
                fire_requests.push(*spawn);
            }
            events.push(SimEvent::Turret(event));
        }
    }
}
