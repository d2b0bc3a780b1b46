//! Ground zones: debris slow fields and poison clouds.
//!
//! Slow zones do not set speed directly. They ease each occupant's
//! persistent `zone_factor` toward the target factor, and the factor
//! eases back toward 1.0 once the enemy leaves (or the zone expires).
//! The exponential form is frame-rate independent and cannot overshoot.

use hecs::{Entity, World};

use bastion_core::components::{
    DotEffect, Enemy, Health, Mobility, PoisonCloud, SlowZone, StatusEffects,
};
use bastion_core::constants::*;
use bastion_core::types::Position;

/// Age zones, ease slow factors, and apply poison to cloud occupants.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>, dt: f64) {
    // Age zones and collect the live ones.
    let mut slow_zones: Vec<(Position, f64)> = Vec::new();
    for (entity, (pos, zone)) in world.query_mut::<(&Position, &mut SlowZone)>() {
        zone.remaining -= dt;
        if zone.remaining <= 0.0 {
            despawn_buffer.push(entity);
        } else {
            slow_zones.push((*pos, zone.radius));
        }
    }

    let mut clouds: Vec<(Position, f64, f64)> = Vec::new();
    for (entity, (pos, cloud)) in world.query_mut::<(&Position, &mut PoisonCloud)>() {
        cloud.remaining -= dt;
        if cloud.remaining <= 0.0 {
            despawn_buffer.push(entity);
        } else {
            clouds.push((*pos, cloud.radius, cloud.tick_damage));
        }
    }

    // Ease zone factors toward the slow target inside, back to 1.0 outside.
    let ease_in = 1.0 - SLOW_ZONE_DECAY_BASE.powf(dt);
    let ease_out = 1.0 - SLOW_RESTORE_DECAY_BASE.powf(dt);
    for (_entity, (_enemy, pos, mobility)) in
        world.query_mut::<(&Enemy, &Position, &mut Mobility)>()
    {
        let inside = slow_zones
            .iter()
            .any(|(centre, radius)| centre.distance_to(pos) <= *radius);
        let factor = &mut mobility.zone_factor;
        if inside {
            *factor += (SLOW_ZONE_TARGET_FACTOR - *factor) * ease_in;
        } else {
            *factor += (1.0 - *factor) * ease_out;
        }
    }

    // Poison cloud occupants pick up the DoT once any previous poison
    // has run out; clouds refresh after expiry rather than stacking.
    for (_entity, (_enemy, pos, health, status)) in
        world.query_mut::<(&Enemy, &Position, &Health, &mut StatusEffects)>()
    {
        if health.is_dead() || status.poison.is_some() {
            continue;
        }
        for &(centre, radius, tick_damage) in &clouds {
            if centre.distance_to(pos) <= radius {
                status.apply_poison(DotEffect {
                    remaining: POISON_DURATION,
                    tick_damage,
                    tick_period: POISON_TICK_PERIOD,
                    tick_timer: POISON_TICK_PERIOD,
                });
                break;
            }
        }
    }
}
