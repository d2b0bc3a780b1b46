//! Projectile integration and resolution.
//!
//! Projectiles fly under simple gravity and resolve either on a timed
//! fuse (lifetime expiry) or an armed proximity fuse around the point
//! they were aimed at. Area payloads always resolve at the aim point,
//! so a shell whose target died mid-flight still lands where it was
//! aimed. Resolved projectiles are queued for despawn in cleanup.

use hecs::{Entity, World};

use bastion_core::components::{
    Defense, Enemy, Health, Payload, PoisonCloud, Projectile, SlowZone,
};
use bastion_core::constants::*;
use bastion_core::enums::DamageType;
use bastion_core::types::{Position, Velocity};

use super::combat;

/// Integrate flight and resolve due projectiles.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>, dt: f64) {
    let mut resolved: Vec<(Entity, Position, Payload)> = Vec::new();

    for (entity, (pos, vel, projectile)) in
        world.query_mut::<(&mut Position, &mut Velocity, &mut Projectile)>()
    {
        pos.x += vel.x * dt;
        pos.y += vel.y * dt;
        vel.y += projectile.gravity * dt;
        projectile.lifetime -= dt;

        let elapsed = projectile.max_lifetime - projectile.lifetime;
        let armed = elapsed >= projectile.arm_fraction * projectile.max_lifetime;
        let fused = match projectile.fuse_radius {
            Some(radius) if armed => pos.distance_to(&projectile.aim) <= radius,
            _ => false,
        };

        if fused || projectile.lifetime <= 0.0 {
            resolved.push((entity, projectile.aim, projectile.payload.clone()));
        }
    }

    for (entity, aim, payload) in resolved {
        apply_payload(world, aim, payload);
        despawn_buffer.push(entity);
    }
}

/// Deliver a resolved projectile's payload at its aim point.
fn apply_payload(world: &mut World, aim: Position, payload: Payload) {
    match payload {
        Payload::Direct {
            damage,
            damage_type,
            target,
            burn,
        } => {
            // Fizzles if the tracked target is already gone.
            if let Some(target) = target {
                if combat::hit(world, target, damage, damage_type, 0.0).is_some() && burn {
                    combat::apply_burn(world, target, BURN_TICK_DAMAGE);
                }
            }
        }
        Payload::Splash { damage, radius } => {
            splash(world, aim, damage, radius);
        }
        Payload::Venom { tick_damage } => {
            world.spawn((
                aim,
                PoisonCloud {
                    radius: POISON_CLOUD_RADIUS,
                    remaining: POISON_CLOUD_DURATION,
                    tick_damage,
                },
            ));
        }
        Payload::Debris => {
            world.spawn((
                aim,
                SlowZone {
                    radius: SLOW_ZONE_RADIUS,
                    remaining: SLOW_ZONE_DURATION,
                },
            ));
        }
    }
}

/// Area damage with linear falloff: full at the centre, half at the
/// rim, nothing beyond.
fn splash(world: &mut World, centre: Position, damage: f64, radius: f64) {
    let victims: Vec<(Entity, f64)> = world
        .query::<(&Enemy, &Position, &Health)>()
        .iter()
        .filter(|(_, (_, _, health))| !health.is_dead())
        .map(|(entity, (_, pos, _))| (entity, centre.distance_to(pos)))
        .filter(|(_, d)| *d <= radius)
        .collect();

    for (entity, distance) in victims {
        let scaled = damage * (1.0 - SPLASH_FALLOFF * distance / radius);
        if let Ok((health, defense)) = world.query_one_mut::<(&mut Health, &mut Defense)>(entity) {
            let dealt = defense.mitigate(scaled, DamageType::Physical, 0.0);
            health.apply(dealt);
        }
    }
}
