//! ECS components for hecs entities.
//!
//! Components are plain data structs; game logic lives in systems. The
//! one exception is the damage mitigation math on `Defense`, which is
//! shared by every system that deals damage.

use serde::{Deserialize, Serialize};

use crate::constants::{ARMOR_REDUCTION_CAP, ARMOR_REDUCTION_PER_POINT, MIN_DAMAGE};
use crate::enums::*;
use crate::types::{GridPos, Position};

/// Marks an entity as an enemy and records its archetype.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Enemy {
    pub kind: EnemyKind,
}

/// Hit points.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Health {
    pub current: f64,
    pub max: f64,
}

/// Movement speed state. `speed` is recomputed from `base_speed` every
/// tick by the status system; `zone_factor` is the persistent eased
/// slow-zone multiplier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Mobility {
    pub base_speed: f64,
    pub speed: f64,
    pub zone_factor: f64,
}

/// Physical and magical mitigation.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Defense {
    /// Armour points: 1% physical reduction each, capped at 80%.
    pub armour: f64,
    /// Magic resist fraction in [0, 1).
    pub magic_resist: f64,
}

/// Waypoint progress along the engine's path.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PathFollower {
    /// Index of the waypoint currently being approached.
    pub waypoint: usize,
    /// Set when the final waypoint is reached; cleanup strikes the castle.
    pub reached_end: bool,
}

/// Damage dealt to the castle if this enemy reaches the end.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Raider {
    pub attack_damage: f64,
}

/// Gold paid when this enemy dies, fixed at spawn from scaled max health.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Bounty {
    pub gold: u64,
}

/// A damage-over-time instance (burn or poison).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DotEffect {
    pub remaining: f64,
    pub tick_damage: f64,
    pub tick_period: f64,
    /// Counts down to the next damage application.
    pub tick_timer: f64,
}

/// A timed speed multiplier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SlowEffect {
    pub remaining: f64,
    pub factor: f64,
}

/// A timed full stop.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FreezeEffect {
    pub remaining: f64,
}

/// Per-enemy status slots. Re-application refreshes a slot in place
/// (longer remaining wins, latest tick damage wins); effects never stack.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct StatusEffects {
    pub burn: Option<DotEffect>,
    pub poison: Option<DotEffect>,
    pub slow: Option<SlowEffect>,
    pub freeze: Option<FreezeEffect>,
}

/// Marks an entity as a tower and records its footprint anchor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Tower {
    pub kind: TowerKind,
    pub grid: GridPos,
}

/// The stat block a weapon fires with.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WeaponStats {
    pub damage: f64,
    pub range: f64,
    /// Shots per second.
    pub fire_rate: f64,
    /// Splash radius for area towers, None for single-target.
    pub splash_radius: Option<f64>,
}

/// Firing state. `base` never changes after placement; `effective` is
/// recomputed from `base` every tick by the building effect system.
/// Holds a raw entity handle, so no serde; snapshots expose ids instead.
#[derive(Debug, Clone)]
pub struct Weapon {
    pub base: WeaponStats,
    pub effective: WeaponStats,
    /// Seconds until the weapon may fire again. Never negative.
    pub cooldown: f64,
    /// Current target, revalidated every tick.
    pub target: Option<hecs::Entity>,
}

/// Academy bonuses applied to a magic tower's element.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ElementalBonuses {
    pub fire_damage: f64,
    pub water_slow: f64,
    pub air_chain_range: f64,
    pub earth_pierce: f64,
}

/// A magic tower's selected element plus its academy bonuses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ElementSlot {
    pub element: Element,
    pub bonuses: ElementalBonuses,
}

/// Arrow modifiers flowed in from forge upgrades.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ArrowMods {
    pub fire_arrows: bool,
}

/// What a projectile does when it resolves.
#[derive(Debug, Clone)]
pub enum Payload {
    /// Damage one tracked target; fizzles if the target is gone.
    Direct {
        damage: f64,
        damage_type: DamageType,
        target: Option<hecs::Entity>,
        burn: bool,
    },
    /// Area damage around the resolve point with linear falloff.
    Splash { damage: f64, radius: f64 },
    /// Spawn a poison cloud at the resolve point.
    Venom { tick_damage: f64 },
    /// Spawn a slow zone at the resolve point.
    Debris,
}

/// An in-flight projectile. Gravity acts on velocity.y only.
#[derive(Debug, Clone)]
pub struct Projectile {
    pub gravity: f64,
    /// Remaining flight time; timed resolution at zero.
    pub lifetime: f64,
    pub max_lifetime: f64,
    /// Point aimed at when launched; area payloads resolve here.
    pub aim: Position,
    /// Proximity fuse radius around `aim`, None for timed-only fuses.
    pub fuse_radius: Option<f64>,
    /// Fraction of max_lifetime that must elapse before the fuse arms.
    pub arm_fraction: f64,
    pub payload: Payload,
}

/// Ground zone that slows enemies standing inside it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SlowZone {
    pub radius: f64,
    pub remaining: f64,
}

/// Ground zone that poisons enemies standing inside it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PoisonCloud {
    pub radius: f64,
    pub remaining: f64,
    pub tick_damage: f64,
}

/// Marks an entity as a support building.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Building {
    pub kind: BuildingKind,
    pub grid: GridPos,
}

/// Upgrade levels purchased at the forge.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ForgeUpgrades {
    pub tower_range: u32,
    pub poison_damage: u32,
    pub barricade_damage: u32,
    pub fire_arrows: u32,
    pub explosive_radius: u32,
}

/// Gold mine accrual state.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct MineState {
    /// Gold accrued since the last collection.
    pub accrued: f64,
    /// Counts down to the next collection.
    pub collect_timer: f64,
}

/// Elemental upgrade levels purchased at the academy.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct AcademyState {
    pub fire: u32,
    pub water: u32,
    pub air: u32,
    pub earth: u32,
}

impl Health {
    pub fn new(max: f64) -> Self {
        Self { current: max, max }
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }

    pub fn apply(&mut self, damage: f64) {
        self.current = (self.current - damage).max(0.0);
    }
}

impl Mobility {
    pub fn new(base_speed: f64) -> Self {
        Self {
            base_speed,
            speed: base_speed,
            zone_factor: 1.0,
        }
    }
}

impl Defense {
    /// Final damage after mitigation, never below MIN_DAMAGE.
    ///
    /// Physical and earth damage are reduced 1% per armour point (cap
    /// 80%), with `pierce` points of armour ignored first. Magic damage
    /// is scaled by (1 - magic_resist). Fire, water, and air bypass
    /// both. Armour shredding is the caller's concern.
    pub fn mitigate(&self, amount: f64, damage_type: DamageType, pierce: f64) -> f64 {
        let final_damage = match damage_type {
            DamageType::Physical | DamageType::Earth => {
                let effective_armour = (self.armour - pierce).max(0.0);
                let reduction =
                    (effective_armour * ARMOR_REDUCTION_PER_POINT).min(ARMOR_REDUCTION_CAP);
                amount * (1.0 - reduction)
            }
            DamageType::Magic => amount * (1.0 - self.magic_resist),
            _ => amount,
        };
        final_damage.max(MIN_DAMAGE)
    }
}

impl StatusEffects {
    /// Refresh the burn slot: the longer remaining wins, the new tick
    /// damage always wins.
    pub fn apply_burn(&mut self, new: DotEffect) {
        match &mut self.burn {
            Some(existing) => {
                existing.remaining = existing.remaining.max(new.remaining);
                existing.tick_damage = new.tick_damage;
                existing.tick_period = new.tick_period;
            }
            None => self.burn = Some(new),
        }
    }

    /// Refresh the poison slot with the same rules as burn.
    pub fn apply_poison(&mut self, new: DotEffect) {
        match &mut self.poison {
            Some(existing) => {
                existing.remaining = existing.remaining.max(new.remaining);
                existing.tick_damage = new.tick_damage;
                existing.tick_period = new.tick_period;
            }
            None => self.poison = Some(new),
        }
    }

    pub fn apply_slow(&mut self, new: SlowEffect) {
        match &mut self.slow {
            Some(existing) => {
                existing.remaining = existing.remaining.max(new.remaining);
                existing.factor = new.factor;
            }
            None => self.slow = Some(new),
        }
    }

    pub fn apply_freeze(&mut self, new: FreezeEffect) {
        match &mut self.freeze {
            Some(existing) => {
                existing.remaining = existing.remaining.max(new.remaining);
            }
            None => self.freeze = Some(new),
        }
    }
}

impl ForgeUpgrades {
    pub fn level_for(&self, id: UpgradeId) -> u32 {
        match id {
            UpgradeId::TowerRange => self.tower_range,
            UpgradeId::PoisonDamage => self.poison_damage,
            UpgradeId::BarricadeDamage => self.barricade_damage,
            UpgradeId::FireArrows => self.fire_arrows,
            UpgradeId::ExplosiveRadius => self.explosive_radius,
        }
    }

    pub fn set_level(&mut self, id: UpgradeId, level: u32) {
        match id {
            UpgradeId::TowerRange => self.tower_range = level,
            UpgradeId::PoisonDamage => self.poison_damage = level,
            UpgradeId::BarricadeDamage => self.barricade_damage = level,
            UpgradeId::FireArrows => self.fire_arrows = level,
            UpgradeId::ExplosiveRadius => self.explosive_radius = level,
        }
    }
}

impl AcademyState {
    pub fn level_for(&self, element: Element) -> u32 {
        match element {
            Element::Fire => self.fire,
            Element::Water => self.water,
            Element::Air => self.air,
            Element::Earth => self.earth,
        }
    }

    pub fn set_level(&mut self, element: Element, level: u32) {
        match element {
            Element::Fire => self.fire = level,
            Element::Water => self.water = level,
            Element::Air => self.air = level,
            Element::Earth => self.earth = level,
        }
    }
}
