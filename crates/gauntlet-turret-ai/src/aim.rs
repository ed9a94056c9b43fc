//! Per-shot aiming.
//!
//! A muzzle's frame is the turret's yaw rotation composed with the mount's own
//! rotation, placed at the muzzle offset.
//! The shot direction is taken toward the target at the instant of firing and
//! re-expressed in that frame, so a rotated mount still hits what it aims at.

use glam::{DQuat, DVec3};

use gauntlet_core::config::{MuzzleMount, ProjectileTemplate};
use gauntlet_core::events::ProjectileSpawn;
use gauntlet_core::types::{yaw_rotation, TurretId};

/// World position and orientation of a muzzle on a turret at `yaw_deg`.
pub fn muzzle_frame(pivot: DVec3, yaw_deg: f64, mount: &MuzzleMount) -> (DVec3, DQuat) {
    let body = yaw_rotation(yaw_deg);
    (pivot + body * mount.offset, body * mount.rotation)
}

/// Build the spawn request for one muzzle aimed at `target`.
///
/// When the target sits on the muzzle itself the shot goes out along the
/// muzzle's configured projectile axis.
pub fn aim_shot(
    turret: TurretId,
    muzzle: usize,
    mount: &MuzzleMount,
    pivot: DVec3,
    yaw_deg: f64,
    target: DVec3,
    template: &ProjectileTemplate,
) -> ProjectileSpawn {
    let (origin, frame) = muzzle_frame(pivot, yaw_deg, mount);
    let axis = mount.forward.local_axis();
    let direction = (target - origin)
        .try_normalize()
        .unwrap_or(frame * axis);
    let local_direction = frame.inverse() * direction;
    let rotation = frame * DQuat::from_rotation_arc(axis, local_direction);

    ProjectileSpawn {
        turret,
        muzzle,
        origin,
        direction,
        local_direction,
        rotation,
        speed: template.speed,
        lifetime: template.lifetime,
    }
}
