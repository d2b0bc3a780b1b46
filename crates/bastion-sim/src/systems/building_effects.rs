//! Building effect recomputation.
//!
//! Every tick each tower's effective stats are rebuilt from its base
//! spec and the current progression ledgers. Recomputing from originals
//! makes the pass idempotent: running it twice in one tick yields the
//! same stats, and selling the forge's bonuses can never compound.

use hecs::World;

use bastion_core::components::{ArrowMods, ElementSlot, ElementalBonuses, Tower, Weapon};
use bastion_core::constants::{
    EARTH_BASE_PIERCE, FORGE_DAMAGE_MULT, FORGE_RANGE_MULT, TOWER_RANGE_BONUS_PER_LEVEL,
};
use bastion_core::enums::{TowerKind, UpgradeId};

use crate::progression::UnlockState;

/// Rebuild effective weapon stats from base stats plus active buffs.
pub fn run(world: &mut World, unlocks: &UnlockState) {
    let forge_built = unlocks.forge_level > 0;
    let upgrades = &unlocks.forge_upgrades;

    for (_entity, (tower, weapon)) in world.query_mut::<(&Tower, &mut Weapon)>() {
        let mut eff = weapon.base;

        if forge_built {
            eff.damage *= FORGE_DAMAGE_MULT;
            eff.range *= FORGE_RANGE_MULT;
            if unlocks.upgrade_unlocked(UpgradeId::TowerRange) {
                eff.range *= 1.0 + TOWER_RANGE_BONUS_PER_LEVEL * upgrades.tower_range as f64;
            }
        }

        match tower.kind {
            TowerKind::Poison if unlocks.upgrade_unlocked(UpgradeId::PoisonDamage) => {
                eff.damage += 2.0 * upgrades.poison_damage as f64;
            }
            TowerKind::Barricade if unlocks.upgrade_unlocked(UpgradeId::BarricadeDamage) => {
                eff.damage += 5.0 * upgrades.barricade_damage as f64;
            }
            TowerKind::Cannon if unlocks.upgrade_unlocked(UpgradeId::ExplosiveRadius) => {
                if let Some(radius) = &mut eff.splash_radius {
                    *radius += 20.0 * upgrades.explosive_radius as f64;
                }
            }
            _ => {}
        }

        weapon.effective = eff;
    }

    // Fire arrows flow onto arrow-firing towers.
    let fire_arrows =
        unlocks.upgrade_unlocked(UpgradeId::FireArrows) && upgrades.fire_arrows > 0;
    for (_entity, mods) in world.query_mut::<&mut ArrowMods>() {
        mods.fire_arrows = fire_arrows;
    }

    // Academy bonuses flow onto magic towers.
    let academy = &unlocks.academy;
    for (_entity, slot) in world.query_mut::<&mut ElementSlot>() {
        slot.bonuses = ElementalBonuses {
            fire_damage: 5.0 * academy.fire as f64,
            water_slow: 0.1 * academy.water as f64,
            air_chain_range: 20.0 * academy.air as f64,
            earth_pierce: EARTH_BASE_PIERCE + 3.0 * academy.earth as f64,
        };
    }
}
