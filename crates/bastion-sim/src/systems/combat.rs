//! Combat resolution: targeting, cooldowns, and firing.
//!
//! Runs in two phases to keep hecs borrows simple: a read pass collects
//! targetable enemies and per-tower fire orders, then an apply pass
//! mutates enemies and spawns projectiles. Targets are revalidated every
//! tick; a stale handle is simply dropped and reacquired.

use hecs::{Entity, World};

use bastion_core::components::{
    ArrowMods, Defense, DotEffect, ElementSlot, ElementalBonuses, Enemy, FreezeEffect, Health,
    Mobility, PathFollower, Payload, Projectile, SlowEffect, StatusEffects, Tower, Weapon,
    WeaponStats,
};
use bastion_core::constants::*;
use bastion_core::enums::{DamageType, Element, TowerKind};
use bastion_core::types::{Position, Velocity};

/// A firing decision made during the read pass.
struct FireOrder {
    kind: TowerKind,
    origin: Position,
    stats: WeaponStats,
    target: Entity,
    aim: Position,
    element: Option<(Element, ElementalBonuses)>,
    fire_arrows: bool,
}

/// Advance cooldowns, acquire targets, and fire ready weapons.
pub fn run(world: &mut World, dt: f64) {
    // Read pass: enemies that can be shot at.
    let candidates: Vec<(Entity, Position)> = world
        .query::<(&Enemy, &Position, &Health, &PathFollower)>()
        .iter()
        .filter(|(_, (_, _, health, follower))| !health.is_dead() && !follower.reached_end)
        .map(|(entity, (_, pos, _, _))| (entity, *pos))
        .collect();

    let mut orders: Vec<FireOrder> = Vec::new();

    for (_entity, (tower, weapon, pos, slot, mods)) in world.query_mut::<(
        &Tower,
        &mut Weapon,
        &Position,
        Option<&ElementSlot>,
        Option<&ArrowMods>,
    )>() {
        weapon.cooldown = (weapon.cooldown - dt).max(0.0);

        // Nearest enemy wins; the range boundary is inclusive.
        let range = weapon.effective.range;
        let mut best: Option<(Entity, Position, f64)> = None;
        for &(enemy, enemy_pos) in &candidates {
            let distance = pos.distance_to(&enemy_pos);
            if distance <= range && best.map_or(true, |(_, _, d)| distance < d) {
                best = Some((enemy, enemy_pos, distance));
            }
        }
        weapon.target = best.map(|(enemy, _, _)| enemy);

        if weapon.cooldown > 0.0 {
            continue;
        }
        let (target, aim, _) = match best {
            Some(b) => b,
            None => continue,
        };

        weapon.cooldown = 1.0 / weapon.effective.fire_rate;
        orders.push(FireOrder {
            kind: tower.kind,
            origin: *pos,
            stats: weapon.effective,
            target,
            aim,
            element: slot.map(|s| (s.element, s.bonuses)),
            fire_arrows: mods.map(|m| m.fire_arrows).unwrap_or(false),
        });
    }

    // Apply pass.
    for order in orders {
        match order.kind {
            TowerKind::Basic => {
                hit(world, order.target, order.stats.damage, DamageType::Physical, 0.0);
            }
            TowerKind::Magic => {
                fire_magic(world, &order, &candidates);
            }
            TowerKind::Barricade => {
                // Chip damage lands instantly, the debris lob follows.
                hit(world, order.target, order.stats.damage, DamageType::Physical, 0.0);
                spawn_lob(
                    world,
                    order.origin,
                    order.aim,
                    DEBRIS_SPEED,
                    DEBRIS_GRAVITY,
                    None,
                    1.0,
                    DEBRIS_LIFETIME_PAD,
                    Payload::Debris,
                );
            }
            TowerKind::Archer => {
                spawn_lob(
                    world,
                    order.origin,
                    order.aim,
                    ARROW_SPEED,
                    ARROW_GRAVITY,
                    Some(ARROW_FUSE_RADIUS),
                    0.0,
                    0.5,
                    Payload::Direct {
                        damage: order.stats.damage,
                        damage_type: DamageType::Physical,
                        target: Some(order.target),
                        burn: order.fire_arrows,
                    },
                );
            }
            TowerKind::Poison => {
                spawn_lob(
                    world,
                    order.origin,
                    order.aim,
                    VENOM_ARROW_SPEED,
                    VENOM_ARROW_GRAVITY,
                    Some(ARROW_FUSE_RADIUS),
                    0.0,
                    0.5,
                    Payload::Venom {
                        tick_damage: order.stats.damage,
                    },
                );
            }
            TowerKind::Cannon => {
                spawn_shell(world, &order);
            }
        }
    }
}

/// Apply mitigated damage to one enemy. Returns the damage dealt, or
/// None if the entity is gone.
pub fn hit(
    world: &mut World,
    target: Entity,
    amount: f64,
    damage_type: DamageType,
    pierce: f64,
) -> Option<f64> {
    let (health, defense) = world
        .query_one_mut::<(&mut Health, &mut Defense)>(target)
        .ok()?;
    let dealt = defense.mitigate(amount, damage_type, pierce);
    health.apply(dealt);
    if damage_type == DamageType::Earth {
        defense.armour = (defense.armour - EARTH_ARMOR_SHRED).max(0.0);
    }
    Some(dealt)
}

/// Apply a burn DoT to one enemy, refreshing any existing burn.
pub fn apply_burn(world: &mut World, target: Entity, tick_damage: f64) {
    if let Ok(status) = world.query_one_mut::<&mut StatusEffects>(target) {
        status.apply_burn(DotEffect {
            remaining: BURN_DURATION,
            tick_damage,
            tick_period: BURN_TICK_PERIOD,
            tick_timer: BURN_TICK_PERIOD,
        });
    }
}

/// Resolve a magic tower's instant elemental attack.
fn fire_magic(world: &mut World, order: &FireOrder, candidates: &[(Entity, Position)]) {
    let (element, bonuses) = order
        .element
        .unwrap_or((Element::Fire, ElementalBonuses::default()));

    match element {
        Element::Fire => {
            let damage = order.stats.damage + bonuses.fire_damage;
            hit(world, order.target, damage, DamageType::Magic, 0.0);
            apply_burn(world, order.target, BURN_TICK_DAMAGE + bonuses.fire_damage);
        }
        Element::Water => {
            hit(world, order.target, order.stats.damage, DamageType::Magic, 0.0);
            if let Ok((status, mobility)) =
                world.query_one_mut::<(&mut StatusEffects, &Mobility)>(order.target)
            {
                // Crawling enemies are not slowed further, only frozen.
                if mobility.base_speed > 20.0 {
                    let factor =
                        (WATER_SLOW_BASE_FACTOR - bonuses.water_slow).max(WATER_SLOW_MIN_FACTOR);
                    status.apply_slow(SlowEffect {
                        remaining: WATER_SLOW_DURATION,
                        factor,
                    });
                }
                status.apply_freeze(FreezeEffect {
                    remaining: WATER_FREEZE_DURATION,
                });
            }
        }
        Element::Air => {
            hit(world, order.target, order.stats.damage, DamageType::Magic, 0.0);
            chain_lightning(world, order, candidates);
        }
        Element::Earth => {
            hit(
                world,
                order.target,
                order.stats.damage,
                DamageType::Earth,
                bonuses.earth_pierce,
            );
        }
    }
}

/// Arc to up to CHAIN_MAX_HOPS extra targets, halving damage per hop.
fn chain_lightning(world: &mut World, order: &FireOrder, candidates: &[(Entity, Position)]) {
    let (_, bonuses) = order
        .element
        .unwrap_or((Element::Air, ElementalBonuses::default()));
    let hop_range = CHAIN_BASE_RANGE + bonuses.air_chain_range;

    let mut struck = vec![order.target];
    let mut from = order.aim;
    let mut damage = order.stats.damage;

    for _ in 0..CHAIN_MAX_HOPS {
        damage *= CHAIN_DAMAGE_FALLOFF;
        let next = candidates
            .iter()
            .filter(|(entity, _)| !struck.contains(entity))
            .map(|&(entity, pos)| (entity, pos, from.distance_to(&pos)))
            .filter(|(_, _, d)| *d <= hop_range)
            .min_by(|a, b| a.2.total_cmp(&b.2));
        let (entity, pos, _) = match next {
            Some(n) => n,
            None => break,
        };
        hit(world, entity, damage, DamageType::Air, 0.0);
        struck.push(entity);
        from = pos;
    }
}

/// Spawn an arcing projectile whose vertical launch compensates gravity
/// so it lands on the aim point.
#[allow(clippy::too_many_arguments)]
fn spawn_lob(
    world: &mut World,
    origin: Position,
    aim: Position,
    speed: f64,
    gravity: f64,
    fuse_radius: Option<f64>,
    arm_fraction: f64,
    lifetime_pad: f64,
    payload: Payload,
) {
    let to_aim = aim.to_vec2() - origin.to_vec2();
    let distance = to_aim.length().max(1.0);
    let dir = to_aim / distance;
    let flight_time = distance / speed;

    let mut vel = dir * speed;
    // Half the gravity drop up front, the other half pulls it back down.
    vel.y -= 0.5 * gravity * flight_time;

    world.spawn((
        origin,
        Velocity::new(vel.x, vel.y),
        Projectile {
            gravity,
            lifetime: flight_time + lifetime_pad,
            max_lifetime: flight_time + lifetime_pad,
            aim,
            fuse_radius,
            arm_fraction,
            payload,
        },
    ));
}

/// Spawn a cannon shell on a fixed-angle ballistic arc.
fn spawn_shell(world: &mut World, order: &FireOrder) {
    let to_aim = order.aim.to_vec2() - order.origin.to_vec2();
    let distance = to_aim.length().max(1.0);
    let dir = to_aim / distance;

    // Launch speed that lands the shell at `distance` for the fixed angle.
    let launch_speed =
        (distance * SHELL_GRAVITY / (2.0 * SHELL_LAUNCH_ANGLE).sin()).sqrt();
    let horizontal = launch_speed * SHELL_LAUNCH_ANGLE.cos();
    let vertical = launch_speed * SHELL_LAUNCH_ANGLE.sin();
    let flight_time = distance / horizontal;

    world.spawn((
        order.origin,
        Velocity::new(dir.x * horizontal, dir.y * horizontal - vertical),
        Projectile {
            gravity: SHELL_GRAVITY,
            lifetime: flight_time,
            max_lifetime: flight_time,
            aim: order.aim,
            fuse_radius: Some(SHELL_FUSE_RADIUS),
            arm_fraction: SHELL_ARM_FRACTION,
            payload: Payload::Splash {
                damage: order.stats.damage,
                radius: order.stats.splash_radius.unwrap_or(SHELL_FUSE_RADIUS),
            },
        },
    ));
}
