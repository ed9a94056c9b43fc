//! Kinematic integration system.
//!
//! Advances every projectile: position += direction * speed * dt, and burns
//! down its remaining lifetime.

use hecs::World;

use gauntlet_core::projectile::Projectile;

pub fn run(world: &mut World, dt: f64) {
    for (_entity, projectile) in world.query_mut::<&mut Projectile>() {
        projectile.advance(dt);
    }
}
