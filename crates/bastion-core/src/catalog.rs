//! Entity catalog — the stat registry for enemies, towers, and buildings.
//!
//! Built once at startup and injected into the engine; systems look up
//! specs by enum or by the string keys that arrive in commands and wave
//! definitions. Unknown keys return None; callers skip and alert rather
//! than panic.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::components::WeaponStats;
use crate::enums::{BuildingKind, EnemyKind, TowerKind};

/// Base stats for one enemy archetype.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EnemySpec {
    pub kind: EnemyKind,
    pub health: f64,
    pub speed: f64,
    pub armour: f64,
    /// Magic damage multiplier reduction in [0, 1).
    pub magic_resist: f64,
    /// Damage dealt to the castle on a leak.
    pub attack_damage: f64,
}

/// Base stats for one tower archetype.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TowerSpec {
    pub kind: TowerKind,
    pub cost: u64,
    pub damage: f64,
    pub range: f64,
    pub fire_rate: f64,
    pub splash_radius: Option<f64>,
}

/// Cost and footprint for one building archetype.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BuildingSpec {
    pub kind: BuildingKind,
    pub cost: u64,
}

/// The complete stat registry.
#[derive(Debug, Clone)]
pub struct EntityCatalog {
    enemies: HashMap<EnemyKind, EnemySpec>,
    towers: HashMap<TowerKind, TowerSpec>,
    buildings: HashMap<BuildingKind, BuildingSpec>,
}

impl EntityCatalog {
    /// The standard stat table.
    pub fn standard() -> Self {
        let enemies = [
            enemy(EnemyKind::Basic, 100.0, 50.0, 0.0, 0.0, 5.0),
            enemy(EnemyKind::Villager, 100.0, 50.0, 0.0, 0.0, 4.0),
            enemy(EnemyKind::Archer, 120.0, 60.0, 0.0, 0.0, 8.0),
            enemy(EnemyKind::Mage, 110.0, 45.0, 1.0, 0.5, 6.0),
            enemy(EnemyKind::Knight, 160.0, 40.0, 10.0, 0.0, 7.0),
            enemy(EnemyKind::ShieldKnight, 180.0, 35.0, 20.0, 0.0, 5.0),
            enemy(EnemyKind::Beefy, 150.0, 60.0, 5.0, 0.0, 9.0),
        ];
        let towers = [
            tower(TowerKind::Basic, 50, 20.0, 120.0, 1.0, None),
            tower(TowerKind::Archer, 75, 15.0, 140.0, 1.5, None),
            tower(TowerKind::Cannon, 100, 50.0, 100.0, 0.5, Some(35.0)),
            tower(TowerKind::Magic, 150, 30.0, 110.0, 0.8, None),
            tower(TowerKind::Poison, 120, 18.0, 130.0, 0.8, None),
            tower(TowerKind::Barricade, 90, 5.0, 100.0, 0.6, None),
        ];
        let buildings = [
            BuildingSpec {
                kind: BuildingKind::Forge,
                cost: 300,
            },
            BuildingSpec {
                kind: BuildingKind::Mine,
                cost: 200,
            },
            BuildingSpec {
                kind: BuildingKind::Academy,
                cost: 250,
            },
        ];

        Self {
            enemies: enemies.into_iter().map(|s| (s.kind, s)).collect(),
            towers: towers.into_iter().map(|s| (s.kind, s)).collect(),
            buildings: buildings.into_iter().map(|s| (s.kind, s)).collect(),
        }
    }

    pub fn enemy(&self, kind: EnemyKind) -> Option<&EnemySpec> {
        self.enemies.get(&kind)
    }

    /// Look up an enemy spec by string key (as used in wave definitions).
    pub fn enemy_by_key(&self, key: &str) -> Option<&EnemySpec> {
        EnemyKind::from_key(key).and_then(|k| self.enemy(k))
    }

    pub fn tower(&self, kind: TowerKind) -> Option<&TowerSpec> {
        self.towers.get(&kind)
    }

    pub fn tower_by_key(&self, key: &str) -> Option<&TowerSpec> {
        TowerKind::from_key(key).and_then(|k| self.tower(k))
    }

    pub fn building(&self, kind: BuildingKind) -> Option<&BuildingSpec> {
        self.buildings.get(&kind)
    }

    pub fn building_by_key(&self, key: &str) -> Option<&BuildingSpec> {
        BuildingKind::from_key(key).and_then(|k| self.building(k))
    }
}

impl TowerSpec {
    /// The weapon stat block this spec defines.
    pub fn weapon_stats(&self) -> WeaponStats {
        WeaponStats {
            damage: self.damage,
            range: self.range,
            fire_rate: self.fire_rate,
            splash_radius: self.splash_radius,
        }
    }
}

/// Gold paid for killing an enemy with the given (scaled) max health.
pub fn bounty_for(max_health: f64) -> u64 {
    (max_health / 10.0).ceil() as u64
}

fn enemy(
    kind: EnemyKind,
    health: f64,
    speed: f64,
    armour: f64,
    magic_resist: f64,
    attack_damage: f64,
) -> EnemySpec {
    EnemySpec {
        kind,
        health,
        speed,
        armour,
        magic_resist,
        attack_damage,
    }
}

fn tower(
    kind: TowerKind,
    cost: u64,
    damage: f64,
    range: f64,
    fire_rate: f64,
    splash_radius: Option<f64>,
) -> TowerSpec {
    TowerSpec {
        kind,
        cost,
        damage,
        range,
        fire_rate,
        splash_radius,
    }
}
