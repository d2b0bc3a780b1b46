//! Events emitted by the simulation for UI feedback.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Gameplay events for the frontend, drained into each snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// An enemy entered the field.
    EnemySpawned { kind: EnemyKind },
    /// An enemy died; `gold` is bounty plus the per-kill wave payout.
    EnemyKilled { kind: EnemyKind, gold: u64 },
    /// An enemy reached the end and struck the castle.
    EnemyLeaked { kind: EnemyKind, damage: f64 },
    /// A tower was placed.
    TowerPlaced { kind: TowerKind },
    /// A tower was sold.
    TowerSold { kind: TowerKind, refund: u64 },
    /// A support building was placed.
    BuildingPlaced { kind: BuildingKind },
    /// The forge reached a new level.
    ForgeUpgraded { level: u32 },
    /// A finite wave finished spawning and the field cleared.
    WaveCompleted { wave: u32 },
    /// The last wave of the level cleared.
    LevelCompleted,
    /// Castle health reached zero.
    CastleDestroyed,
}

/// Alert for the UI alert queue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub level: AlertLevel,
    pub message: String,
    pub tick: u64,
}

impl Alert {
    pub fn new(level: AlertLevel, message: impl Into<String>, tick: u64) -> Self {
        Self {
            level,
            message: message.into(),
            tick,
        }
    }
}
