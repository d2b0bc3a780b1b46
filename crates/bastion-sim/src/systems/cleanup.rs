//! Cleanup system: reaps dead and leaked enemies and drains the
//! despawn buffer.
//!
//! Runs last in the tick so every damage source (direct fire, splash,
//! DoT ticks) has already landed; an enemy killed by any of them in
//! this tick is reaped here and nowhere else.

use hecs::{Entity, World};

use bastion_core::components::{Bounty, Enemy, Health, PathFollower, Raider};
use bastion_core::events::GameEvent;
use bastion_core::state::TickReport;

/// Outcome of the reap pass, applied to engine ledgers by the caller.
#[derive(Debug, Default)]
pub struct ReapOutcome {
    pub gold_earned: u64,
    pub castle_damage: f64,
    pub enemies_killed: u32,
}

/// Reap dead and leaked enemies, then despawn everything buffered.
pub fn run(
    world: &mut World,
    despawn_buffer: &mut Vec<Entity>,
    kill_gold: u64,
    events: &mut Vec<GameEvent>,
    report: &mut TickReport,
) -> ReapOutcome {
    let mut outcome = ReapOutcome::default();

    for (entity, (enemy, health, follower, raider, bounty)) in
        world.query_mut::<(&Enemy, &Health, &PathFollower, &Raider, &Bounty)>()
    {
        if health.is_dead() {
            let gold = bounty.gold + kill_gold;
            outcome.gold_earned += gold;
            outcome.enemies_killed += 1;
            events.push(GameEvent::EnemyKilled {
                kind: enemy.kind,
                gold,
            });
            despawn_buffer.push(entity);
        } else if follower.reached_end {
            outcome.castle_damage += raider.attack_damage;
            events.push(GameEvent::EnemyLeaked {
                kind: enemy.kind,
                damage: raider.attack_damage,
            });
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }

    report.gold_earned += outcome.gold_earned;
    report.castle_damage += outcome.castle_damage;
    report.enemies_killed += outcome.enemies_killed;
    outcome
}
