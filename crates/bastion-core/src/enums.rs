//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Tower archetype. The string key mirrors the catalog key used by the UI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TowerKind {
    /// Single-target hitscan, the baseline tower.
    #[default]
    Basic,
    /// Fast-firing arrow tower with a long reach.
    Archer,
    /// Slow mortar with splash damage.
    Cannon,
    /// Elemental caster (fire/water/air/earth slot).
    Magic,
    /// Lobs venom arrows that burst into poison clouds.
    Poison,
    /// Chip damage plus debris that leaves a slowing zone.
    Barricade,
}

/// Enemy archetype.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    #[default]
    Basic,
    Villager,
    Archer,
    Mage,
    Knight,
    ShieldKnight,
    Beefy,
}

/// Support building archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuildingKind {
    /// Buffs all towers; its level drives most progression unlocks.
    Forge,
    /// Passive gold income.
    Mine,
    /// Sells elemental upgrades for magic towers.
    Academy,
}

/// Forge upgrade line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeId {
    TowerRange,
    PoisonDamage,
    BarricadeDamage,
    FireArrows,
    ExplosiveRadius,
}

/// Magic tower element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Element {
    #[default]
    Fire,
    Water,
    Air,
    Earth,
}

/// Damage typing for mitigation: armour applies to physical, magic
/// resist to magic, elemental types bypass both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageType {
    #[default]
    Physical,
    Magic,
    Fire,
    Water,
    Air,
    Earth,
}

/// Area zone flavor, for snapshot views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoneKind {
    Slow,
    Poison,
}

/// Game phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Idle,
    Active,
    Paused,
    Victory,
    Defeat,
}

/// Alert severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AlertLevel {
    Info,
    Warning,
    Critical,
}

impl TowerKind {
    pub const ALL: [TowerKind; 6] = [
        TowerKind::Basic,
        TowerKind::Archer,
        TowerKind::Cannon,
        TowerKind::Magic,
        TowerKind::Poison,
        TowerKind::Barricade,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            TowerKind::Basic => "basic",
            TowerKind::Archer => "archer",
            TowerKind::Cannon => "cannon",
            TowerKind::Magic => "magic",
            TowerKind::Poison => "poison",
            TowerKind::Barricade => "barricade",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.key() == key)
    }
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 7] = [
        EnemyKind::Basic,
        EnemyKind::Villager,
        EnemyKind::Archer,
        EnemyKind::Mage,
        EnemyKind::Knight,
        EnemyKind::ShieldKnight,
        EnemyKind::Beefy,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            EnemyKind::Basic => "basic",
            EnemyKind::Villager => "villager",
            EnemyKind::Archer => "archer",
            EnemyKind::Mage => "mage",
            EnemyKind::Knight => "knight",
            EnemyKind::ShieldKnight => "shieldknight",
            EnemyKind::Beefy => "beefy",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.key() == key)
    }
}

impl BuildingKind {
    pub const ALL: [BuildingKind; 3] = [
        BuildingKind::Forge,
        BuildingKind::Mine,
        BuildingKind::Academy,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            BuildingKind::Forge => "forge",
            BuildingKind::Mine => "mine",
            BuildingKind::Academy => "academy",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.key() == key)
    }
}

impl Element {
    pub const ALL: [Element; 4] = [Element::Fire, Element::Water, Element::Air, Element::Earth];
}
