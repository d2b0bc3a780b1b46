//! Status effect timers and speed finalization.
//!
//! DoT timers are sub-tick accurate: a large dt can fire several damage
//! ticks at once, so total damage over a duration does not depend on
//! frame rate. Speed is rebuilt from base every tick, which makes
//! expiry restoration automatic and lets effects applied later in the
//! same tick win.

use hecs::World;

use bastion_core::components::{DotEffect, Health, Mobility, StatusEffects};

/// Advance status timers, apply DoT damage, and finalize speed.
pub fn run(world: &mut World, dt: f64) {
    for (_entity, (status, health, mobility)) in
        world.query_mut::<(&mut StatusEffects, &mut Health, &mut Mobility)>()
    {
        if let Some(burn) = &mut status.burn {
            tick_dot(burn, health, dt);
            if burn.remaining <= 0.0 {
                status.burn = None;
            }
        }
        if let Some(poison) = &mut status.poison {
            tick_dot(poison, health, dt);
            if poison.remaining <= 0.0 {
                status.poison = None;
            }
        }
        if let Some(slow) = &mut status.slow {
            slow.remaining -= dt;
            if slow.remaining <= 0.0 {
                status.slow = None;
            }
        }
        if let Some(freeze) = &mut status.freeze {
            freeze.remaining -= dt;
            if freeze.remaining <= 0.0 {
                status.freeze = None;
            }
        }

        // Rebuild speed from base: zone easing first, then the harder of
        // any timed slow, then freeze wins outright.
        let mut speed = mobility.base_speed * mobility.zone_factor;
        if let Some(slow) = &status.slow {
            speed = speed.min(mobility.base_speed * slow.factor);
        }
        if status.freeze.is_some() {
            speed = 0.0;
        }
        mobility.speed = speed;
    }
}

/// Count a DoT's timer down, dealing its tick damage as many times as
/// the elapsed time covers. DoT damage bypasses mitigation.
fn tick_dot(dot: &mut DotEffect, health: &mut Health, dt: f64) {
    dot.remaining -= dt;
    dot.tick_timer -= dt;
    while dot.tick_timer <= 0.0 {
        health.apply(dot.tick_damage);
        dot.tick_timer += dot.tick_period;
    }
}
