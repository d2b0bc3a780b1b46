//! Simulation constants and tuning parameters.

// --- Time ---

/// Maximum allowed time scale.
pub const MAX_TIME_SCALE: f64 = 3.0;

// --- Path following ---

/// Base waypoint reach threshold (px). The effective threshold is
/// max(this, speed * dt * 2) so fast enemies never orbit a waypoint.
pub const WAYPOINT_REACH_DISTANCE: f64 = 5.0;

/// Maximum lateral spawn offset perpendicular to the first path segment (px).
pub const SPAWN_LATERAL_SPREAD: f64 = 15.0;

// --- Spawning ---

/// Default interval between spawns within a wave (seconds).
pub const DEFAULT_SPAWN_INTERVAL: f64 = 1.0;

/// Default interval for continuous (endless) spawning (seconds).
pub const CONTINUOUS_SPAWN_INTERVAL: f64 = 0.8;

/// Break between a wave clearing and the next wave starting (seconds).
pub const WAVE_BREAK_SECS: f64 = 2.0;

// --- Damage model ---

/// Physical damage reduction per armour point (1% each).
pub const ARMOR_REDUCTION_PER_POINT: f64 = 0.01;

/// Maximum physical damage reduction from armour.
pub const ARMOR_REDUCTION_CAP: f64 = 0.8;

/// Every hit deals at least this much.
pub const MIN_DAMAGE: f64 = 1.0;

/// Armour points shredded by each earth-element hit.
pub const EARTH_ARMOR_SHRED: f64 = 3.0;

// --- Status effects ---

/// Burn duration (seconds).
pub const BURN_DURATION: f64 = 3.0;

/// Burn damage per tick.
pub const BURN_TICK_DAMAGE: f64 = 5.0;

/// Burn tick period (seconds).
pub const BURN_TICK_PERIOD: f64 = 0.5;

/// Poison duration (seconds).
pub const POISON_DURATION: f64 = 5.0;

/// Poison tick period (seconds).
pub const POISON_TICK_PERIOD: f64 = 1.0;

/// Freeze applied by water-element hits (seconds).
pub const WATER_FREEZE_DURATION: f64 = 0.5;

/// Slow applied by water-element hits (seconds).
pub const WATER_SLOW_DURATION: f64 = 2.0;

/// Water slow factor: max(floor, base - slow_bonus).
pub const WATER_SLOW_BASE_FACTOR: f64 = 0.7;
pub const WATER_SLOW_MIN_FACTOR: f64 = 0.3;

// --- Slow zones ---

/// Debris slow zone radius (px).
pub const SLOW_ZONE_RADIUS: f64 = 30.0;

/// Debris slow zone lifetime (seconds).
pub const SLOW_ZONE_DURATION: f64 = 5.0;

/// Speed factor a slow zone eases toward while an enemy stands inside.
pub const SLOW_ZONE_TARGET_FACTOR: f64 = 0.25;

/// Per-second easing base while inside a zone: f += (target - f) * (1 - base^dt).
pub const SLOW_ZONE_DECAY_BASE: f64 = 0.1;

/// Per-second easing base while recovering outside all zones.
pub const SLOW_RESTORE_DECAY_BASE: f64 = 0.2;

// --- Poison clouds ---

/// Poison cloud radius (px).
pub const POISON_CLOUD_RADIUS: f64 = 40.0;

/// Poison cloud lifetime (seconds).
pub const POISON_CLOUD_DURATION: f64 = 4.0;

// --- Projectiles ---

/// Arrow launch speed (px/s) and gravity (px/s²).
pub const ARROW_SPEED: f64 = 400.0;
pub const ARROW_GRAVITY: f64 = 200.0;

/// Arrow proximity fuse radius (px).
pub const ARROW_FUSE_RADIUS: f64 = 15.0;

/// Cannon shell gravity (px/s²) and launch angle (radians).
pub const SHELL_GRAVITY: f64 = 250.0;
pub const SHELL_LAUNCH_ANGLE: f64 = std::f64::consts::FRAC_PI_6;

/// Cannon shell proximity fuse radius (px); armed in the second half of flight.
pub const SHELL_FUSE_RADIUS: f64 = 20.0;
pub const SHELL_ARM_FRACTION: f64 = 0.5;

/// Venom arrow launch speed (px/s) and gravity (px/s²).
pub const VENOM_ARROW_SPEED: f64 = 350.0;
pub const VENOM_ARROW_GRAVITY: f64 = 180.0;

/// Debris launch speed (px/s) and gravity (px/s²). Timed fuse only.
pub const DEBRIS_SPEED: f64 = 200.0;
pub const DEBRIS_GRAVITY: f64 = 150.0;

/// Extra flight time granted to debris past the nominal distance/speed (seconds).
pub const DEBRIS_LIFETIME_PAD: f64 = 1.0;

/// Splash damage falloff: damage * (1 - this * d / radius).
pub const SPLASH_FALLOFF: f64 = 0.5;

// --- Magic tower ---

/// Chain lightning base hop range (px) and hop count.
pub const CHAIN_BASE_RANGE: f64 = 50.0;
pub const CHAIN_MAX_HOPS: usize = 3;

/// Damage multiplier applied per chain hop.
pub const CHAIN_DAMAGE_FALLOFF: f64 = 0.5;

/// Earth element base armour piercing (percent points of armour ignored).
pub const EARTH_BASE_PIERCE: f64 = 3.0;

// --- Forge ---

/// Only one forge may ever be built.
pub const MAX_FORGES: u32 = 1;

/// Only one academy may ever be built.
pub const MAX_ACADEMIES: u32 = 1;

/// Forge level cap.
pub const FORGE_MAX_LEVEL: u32 = 10;

/// Global forge multipliers applied to every tower.
pub const FORGE_DAMAGE_MULT: f64 = 1.25;
pub const FORGE_RANGE_MULT: f64 = 1.15;

/// Extra range per towerRange upgrade level (+10% each).
pub const TOWER_RANGE_BONUS_PER_LEVEL: f64 = 0.1;

/// Forge level-up base cost; level n -> n+1 costs floor(base * 1.5^(n-1)).
pub const FORGE_LEVEL_BASE_COST: u64 = 250;

/// Geometric growth applied to all upgrade costs.
pub const UPGRADE_COST_GROWTH: f64 = 1.5;

// --- Economy ---

/// Gold paid per kill on top of the bounty: 10 + wave/2.
pub const KILL_GOLD_BASE: u64 = 10;

/// Mine income per second at income multiplier 1.0.
pub const MINE_GOLD_PER_SEC: f64 = 2.0;

/// Mines bank accrued gold every this many seconds.
pub const MINE_COLLECT_PERIOD: f64 = 2.0;

/// Fraction of the purchase price returned when selling a tower.
pub const SELL_REFUND_FRACTION: f64 = 0.5;

// --- Footprints ---

/// Tower footprint in grid cells (2x2).
pub const TOWER_FOOTPRINT: i32 = 2;

/// Building footprint in grid cells (4x4).
pub const BUILDING_FOOTPRINT: i32 = 4;
