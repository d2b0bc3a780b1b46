//! Mine income accrual.

use hecs::World;

use bastion_core::components::MineState;
use bastion_core::constants::{MINE_COLLECT_PERIOD, MINE_GOLD_PER_SEC};

use crate::progression::UnlockState;

/// Accrue mine income and bank it every collection period.
/// Returns the gold earned this tick.
pub fn run(world: &mut World, unlocks: &UnlockState, dt: f64) -> u64 {
    let rate = MINE_GOLD_PER_SEC * unlocks.income_multiplier();
    let mut earned = 0;

    for (_entity, mine) in world.query_mut::<&mut MineState>() {
        mine.accrued += rate * dt;
        mine.collect_timer -= dt;
        if mine.collect_timer <= 0.0 {
            let banked = mine.accrued.floor();
            earned += banked as u64;
            mine.accrued -= banked;
            mine.collect_timer += MINE_COLLECT_PERIOD;
        }
    }

    earned
}
