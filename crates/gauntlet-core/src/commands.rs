//! Commands sent from collaborators to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::enums::ImpactKind;
use crate::types::ProjectileId;

/// All collaborator-initiated actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimCommand {
    /// The collision layer reports a projectile struck something.
    ReportImpact {
        projectile: ProjectileId,
        kind: ImpactKind,
    },
    /// Set time scale (1.0 = normal, 0.0 = frozen).
    SetTimeScale { scale: f64 },
    Pause,
    Resume,
}
