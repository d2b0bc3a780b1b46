//! Game state snapshot — the complete visible state sent to the frontend each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::{Alert, GameEvent};
use crate::types::{GridPos, Position, SimTime};

/// Complete game state broadcast to the frontend after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub time_scale: f64,
    pub gold: u64,
    pub castle_health: f64,
    /// Current wave number (1-based; 0 before the mission starts).
    pub wave: u32,
    /// Whether the scheduler still has entries to release.
    pub spawning: bool,
    pub enemies: Vec<EnemyView>,
    pub towers: Vec<TowerView>,
    pub projectiles: Vec<ProjectileView>,
    pub zones: Vec<ZoneView>,
    pub buildings: Vec<BuildingView>,
    pub progression: ProgressionView,
    pub report: TickReport,
    pub events: Vec<GameEvent>,
    pub alerts: Vec<Alert>,
}

/// A visible enemy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    /// Stable entity id (entity bits).
    pub id: u64,
    pub kind: EnemyKind,
    pub position: Position,
    pub health: f64,
    pub max_health: f64,
    pub speed: f64,
    pub frozen: bool,
    pub slowed: bool,
    pub burning: bool,
    pub poisoned: bool,
}

/// A placed tower with its effective (buffed) stats.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TowerView {
    pub kind: TowerKind,
    pub grid: GridPos,
    pub position: Position,
    pub damage: f64,
    pub range: f64,
    pub fire_rate: f64,
    pub cooldown: f64,
    /// Entity id of the current target, if any.
    pub target: Option<u64>,
    /// Selected element (magic towers only).
    pub element: Option<Element>,
}

/// An in-flight projectile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub position: Position,
    pub lifetime: f64,
}

/// A ground zone (slow or poison).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneView {
    pub kind: ZoneKind,
    pub position: Position,
    pub radius: f64,
    pub remaining: f64,
}

/// A placed support building.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildingView {
    pub kind: BuildingKind,
    pub grid: GridPos,
    pub position: Position,
    /// Forge level (forges only).
    pub level: Option<u32>,
}

/// Unlock and economy progression for menu gating.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgressionView {
    pub unlocked_towers: Vec<String>,
    pub unlocked_buildings: Vec<String>,
    pub unlocked_upgrades: Vec<UpgradeId>,
    pub forge_level: u32,
    pub mine_count: u32,
    pub max_mines: u32,
    pub income_multiplier: f64,
}

/// Deltas produced by the last tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TickReport {
    pub gold_earned: u64,
    pub castle_damage: f64,
    pub enemies_killed: u32,
    pub wave_completed: bool,
    pub level_completed: bool,
}
