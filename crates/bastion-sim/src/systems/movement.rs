//! Path-following movement for enemies.
//!
//! Enemies steer toward their current waypoint at their finalized speed.
//! The reach threshold scales with per-tick travel so fast enemies at
//! high time scale never orbit a waypoint.

use hecs::World;

use bastion_core::components::{Mobility, PathFollower};
use bastion_core::constants::WAYPOINT_REACH_DISTANCE;
use bastion_core::types::{Position, Velocity};

/// Advance every path follower by one tick of scaled time.
pub fn run(world: &mut World, path: &[Position], dt: f64) {
    if path.is_empty() {
        return;
    }

    for (_entity, (pos, vel, mobility, follower)) in
        world.query_mut::<(&mut Position, &mut Velocity, &Mobility, &mut PathFollower)>()
    {
        if follower.reached_end {
            *vel = Velocity::default();
            continue;
        }

        let target = match path.get(follower.waypoint) {
            Some(p) => *p,
            None => {
                follower.reached_end = true;
                continue;
            }
        };

        let step = mobility.speed * dt;
        let to_target = target.to_vec2() - pos.to_vec2();
        let distance = to_target.length();

        let reach = WAYPOINT_REACH_DISTANCE.max(step * 2.0);
        if distance <= reach {
            // Snap to the waypoint so corners stay tight.
            *pos = target;
            follower.waypoint += 1;
            if follower.waypoint >= path.len() {
                follower.reached_end = true;
                *vel = Velocity::default();
            }
            continue;
        }

        let dir = to_target / distance;
        vel.x = dir.x * mobility.speed;
        vel.y = dir.y * mobility.speed;
        pos.x += vel.x * dt;
        pos.y += vel.y * dt;
    }
}
