//! Cleanup system: removes projectiles whose lifetime has run out, and
//! projectiles the collision layer reported as having hit something.

use hecs::{Entity, World};

use gauntlet_core::enums::{ExpiryReason, ImpactKind};
use gauntlet_core::events::SimEvent;
use gauntlet_core::projectile::Projectile;
use gauntlet_core::types::ProjectileId;

/// Remove expired projectiles, reporting each removal in id order.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>, events: &mut Vec<SimEvent>) {
    despawn_buffer.clear();

    let mut expired: Vec<ProjectileId> = Vec::new();
    for (entity, (id, projectile)) in world.query_mut::<(&ProjectileId, &Projectile)>() {
        if projectile.is_expired() {
            despawn_buffer.push(entity);
            expired.push(*id);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }

    expired.sort();
    events.extend(expired.into_iter().map(|projectile| SimEvent::ProjectileExpired {
        projectile,
        reason: ExpiryReason::LifetimeElapsed,
    }));
}

/// Remove one projectile on a reported impact. Unknown ids (already expired)
/// are ignored and return `false`.
pub fn expire_on_impact(
    world: &mut World,
    projectile: ProjectileId,
    kind: ImpactKind,
    events: &mut Vec<SimEvent>,
) -> bool {
    let entity = world
        .query_mut::<&ProjectileId>()
        .into_iter()
        .find(|(_, id)| **id == projectile)
        .map(|(entity, _)| entity);

    let Some(entity) = entity else {
        return false;
    };
    let _ = world.despawn(entity);
    events.push(SimEvent::ProjectileExpired {
        projectile,
        reason: ExpiryReason::Impact(kind),
    });
    true
}
