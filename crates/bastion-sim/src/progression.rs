//! Progression state: unlocks, building caps, and upgrade purchases.
//!
//! `UnlockState` is the single authority for what may be built and for
//! the forge/academy upgrade ledgers. Cap checks increment their counter
//! in the same call that validates them, so two purchases racing through
//! one command batch can never both pass.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use bastion_core::components::{AcademyState, ForgeUpgrades};
use bastion_core::constants::{
    FORGE_LEVEL_BASE_COST, FORGE_MAX_LEVEL, MAX_ACADEMIES, MAX_FORGES, UPGRADE_COST_GROWTH,
};
use bastion_core::enums::{BuildingKind, Element, TowerKind, UpgradeId};

/// Max level and base cost per forge upgrade line.
/// Cost at the current level is floor(base * 1.5^level).
pub fn upgrade_line(id: UpgradeId) -> (u32, u64) {
    match id {
        UpgradeId::TowerRange => (5, 100),
        UpgradeId::PoisonDamage => (5, 150),
        UpgradeId::BarricadeDamage => (5, 120),
        UpgradeId::FireArrows => (3, 200),
        UpgradeId::ExplosiveRadius => (4, 250),
    }
}

/// Max level and base cost per academy element.
pub fn element_line(_element: Element) -> (u32, u64) {
    (5, 150)
}

fn scaled_cost(base: u64, level: u32) -> u64 {
    (base as f64 * UPGRADE_COST_GROWTH.powi(level as i32)).floor() as u64
}

/// Unlocks, caps, and upgrade ledgers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnlockState {
    unlocked_towers: HashSet<TowerKind>,
    unlocked_buildings: HashSet<BuildingKind>,
    unlocked_upgrades: HashSet<UpgradeId>,
    pub forge_level: u32,
    pub forge_upgrades: ForgeUpgrades,
    pub academy: AcademyState,
    forge_count: u32,
    mine_count: u32,
    academy_count: u32,
}

impl Default for UnlockState {
    fn default() -> Self {
        Self::new()
    }
}

impl UnlockState {
    /// Fresh campaign state: basic and barricade towers plus the forge.
    pub fn new() -> Self {
        Self {
            unlocked_towers: [TowerKind::Basic, TowerKind::Barricade].into_iter().collect(),
            unlocked_buildings: [BuildingKind::Forge].into_iter().collect(),
            unlocked_upgrades: HashSet::new(),
            forge_level: 0,
            forge_upgrades: ForgeUpgrades::default(),
            academy: AcademyState::default(),
            forge_count: 0,
            mine_count: 0,
            academy_count: 0,
        }
    }

    pub fn tower_unlocked(&self, kind: TowerKind) -> bool {
        self.unlocked_towers.contains(&kind)
    }

    pub fn building_unlocked(&self, kind: BuildingKind) -> bool {
        self.unlocked_buildings.contains(&kind)
    }

    pub fn upgrade_unlocked(&self, id: UpgradeId) -> bool {
        self.unlocked_upgrades.contains(&id)
    }

    pub fn mine_count(&self) -> u32 {
        self.mine_count
    }

    /// Mine cap by forge level.
    pub fn max_mines(&self) -> u32 {
        match self.forge_level {
            0..=4 => 1,
            5..=7 => 2,
            8..=9 => 3,
            _ => 4,
        }
    }

    /// Mine income multiplier by forge level.
    pub fn income_multiplier(&self) -> f64 {
        match self.forge_level {
            0 => 1.0,
            1 => 1.5,
            2 => 2.0,
            3 => 2.5,
            level => 3.0 + 0.2 * (level - 4) as f64,
        }
    }

    /// Validate and register a building placement in one step. On Ok the
    /// counter is already incremented; unlock side effects have fired.
    pub fn register_building(&mut self, kind: BuildingKind) -> Result<(), String> {
        if !self.building_unlocked(kind) {
            return Err(format!("{} not yet unlocked", kind.key()));
        }
        match kind {
            BuildingKind::Forge => {
                if self.forge_count >= MAX_FORGES {
                    return Err("Forge already built".into());
                }
                self.forge_count += 1;
                self.forge_level = 1;
                self.apply_forge_unlocks();
            }
            BuildingKind::Academy => {
                if self.academy_count >= MAX_ACADEMIES {
                    return Err("Academy already built".into());
                }
                self.academy_count += 1;
                self.unlocked_towers.insert(TowerKind::Magic);
            }
            BuildingKind::Mine => {
                if self.mine_count >= self.max_mines() {
                    return Err(format!("Mine cap reached ({})", self.max_mines()));
                }
                self.mine_count += 1;
            }
        }
        Ok(())
    }

    /// Cost to raise the forge from its current level.
    pub fn forge_level_cost(&self) -> Option<u64> {
        if self.forge_count == 0 || self.forge_level >= FORGE_MAX_LEVEL {
            return None;
        }
        Some(scaled_cost(FORGE_LEVEL_BASE_COST, self.forge_level - 1))
    }

    /// Level the forge up by one. Returns the cost, or an error.
    pub fn upgrade_forge(&mut self, gold: u64) -> Result<u64, String> {
        if self.forge_count == 0 {
            return Err("No forge built".into());
        }
        if self.forge_level >= FORGE_MAX_LEVEL {
            return Err("Forge at max level".into());
        }
        let cost = scaled_cost(FORGE_LEVEL_BASE_COST, self.forge_level - 1);
        if gold < cost {
            return Err(format!("Insufficient gold: have {}, need {}", gold, cost));
        }
        self.forge_level += 1;
        self.apply_forge_unlocks();
        Ok(cost)
    }

    /// Buy one level of a forge upgrade line. Returns the cost, or an error.
    pub fn buy_upgrade(&mut self, id: UpgradeId, gold: u64) -> Result<u64, String> {
        if !self.upgrade_unlocked(id) {
            return Err("Upgrade not yet unlocked".into());
        }
        let (max_level, base_cost) = upgrade_line(id);
        let level = self.forge_upgrades.level_for(id);
        if level >= max_level {
            return Err("Upgrade at max level".into());
        }
        let cost = scaled_cost(base_cost, level);
        if gold < cost {
            return Err(format!("Insufficient gold: have {}, need {}", gold, cost));
        }
        self.forge_upgrades.set_level(id, level + 1);
        Ok(cost)
    }

    /// Buy one level of an academy elemental upgrade. Returns the cost,
    /// or an error.
    pub fn buy_element_upgrade(&mut self, element: Element, gold: u64) -> Result<u64, String> {
        if self.academy_count == 0 {
            return Err("No academy built".into());
        }
        let (max_level, base_cost) = element_line(element);
        let level = self.academy.level_for(element);
        if level >= max_level {
            return Err("Upgrade at max level".into());
        }
        let cost = scaled_cost(base_cost, level);
        if gold < cost {
            return Err(format!("Insufficient gold: have {}, need {}", gold, cost));
        }
        self.academy.set_level(element, level + 1);
        Ok(cost)
    }

    /// Unlocks granted at the current forge level.
    fn apply_forge_unlocks(&mut self) {
        if self.forge_level >= 1 {
            self.unlocked_buildings.insert(BuildingKind::Mine);
            self.unlocked_towers.insert(TowerKind::Archer);
            self.unlocked_upgrades.insert(UpgradeId::TowerRange);
            self.unlocked_upgrades.insert(UpgradeId::BarricadeDamage);
        }
        if self.forge_level >= 2 {
            self.unlocked_towers.insert(TowerKind::Poison);
            self.unlocked_upgrades.insert(UpgradeId::PoisonDamage);
        }
        if self.forge_level >= 3 {
            self.unlocked_towers.insert(TowerKind::Cannon);
            self.unlocked_upgrades.insert(UpgradeId::ExplosiveRadius);
        }
        if self.forge_level >= 4 {
            self.unlocked_buildings.insert(BuildingKind::Academy);
            self.unlocked_upgrades.insert(UpgradeId::FireArrows);
        }
    }

    /// Sorted key lists for the snapshot (stable across runs).
    pub fn unlocked_tower_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .unlocked_towers
            .iter()
            .map(|k| k.key().to_string())
            .collect();
        keys.sort();
        keys
    }

    pub fn unlocked_building_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .unlocked_buildings
            .iter()
            .map(|k| k.key().to_string())
            .collect();
        keys.sort();
        keys
    }

    pub fn unlocked_upgrade_ids(&self) -> Vec<UpgradeId> {
        let mut ids: Vec<UpgradeId> = self.unlocked_upgrades.iter().copied().collect();
        ids.sort_by_key(|id| upgrade_line(*id).1);
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_unlocks() {
        let state = UnlockState::new();
        assert!(state.tower_unlocked(TowerKind::Basic));
        assert!(state.tower_unlocked(TowerKind::Barricade));
        assert!(!state.tower_unlocked(TowerKind::Archer));
        assert!(state.building_unlocked(BuildingKind::Forge));
        assert!(!state.building_unlocked(BuildingKind::Mine));
    }

    #[test]
    fn test_forge_cap_is_atomic() {
        let mut state = UnlockState::new();
        assert!(state.register_building(BuildingKind::Forge).is_ok());
        assert!(state.register_building(BuildingKind::Forge).is_err());
        assert_eq!(state.forge_level, 1);
    }

    #[test]
    fn test_forge_unlock_chain() {
        let mut state = UnlockState::new();
        state.register_building(BuildingKind::Forge).unwrap();
        assert!(state.tower_unlocked(TowerKind::Archer));
        assert!(state.building_unlocked(BuildingKind::Mine));
        assert!(state.upgrade_unlocked(UpgradeId::TowerRange));
        assert_eq!(state.max_mines(), 1);

        // Level to 4: poison, cannon, academy, fire arrows unlock in order.
        for expected_level in 2..=4 {
            state.upgrade_forge(u64::MAX).unwrap();
            assert_eq!(state.forge_level, expected_level);
        }
        assert!(state.tower_unlocked(TowerKind::Poison));
        assert!(state.tower_unlocked(TowerKind::Cannon));
        assert!(state.building_unlocked(BuildingKind::Academy));
        assert!(state.upgrade_unlocked(UpgradeId::FireArrows));
        assert!((state.income_multiplier() - 3.0).abs() < 1e-9);
        assert_eq!(state.max_mines(), 1);

        state.upgrade_forge(u64::MAX).unwrap();
        assert_eq!(state.forge_level, 5);
        assert_eq!(state.max_mines(), 2);
        assert!((state.income_multiplier() - 3.2).abs() < 1e-9);
    }

    #[test]
    fn test_mine_cap_tracks_forge_level() {
        let mut state = UnlockState::new();
        state.register_building(BuildingKind::Forge).unwrap();
        assert!(state.register_building(BuildingKind::Mine).is_ok());
        assert!(state.register_building(BuildingKind::Mine).is_err());
        for _ in 0..4 {
            state.upgrade_forge(u64::MAX).unwrap();
        }
        // Level 5 raises the cap to 2.
        assert!(state.register_building(BuildingKind::Mine).is_ok());
        assert_eq!(state.mine_count(), 2);
    }

    #[test]
    fn test_magic_tower_requires_academy() {
        let mut state = UnlockState::new();
        state.register_building(BuildingKind::Forge).unwrap();
        for _ in 0..3 {
            state.upgrade_forge(u64::MAX).unwrap();
        }
        assert!(!state.tower_unlocked(TowerKind::Magic));
        state.register_building(BuildingKind::Academy).unwrap();
        assert!(state.tower_unlocked(TowerKind::Magic));
        assert!(state.register_building(BuildingKind::Academy).is_err());
    }

    #[test]
    fn test_upgrade_costs_grow_geometrically() {
        let mut state = UnlockState::new();
        state.register_building(BuildingKind::Forge).unwrap();
        assert_eq!(state.buy_upgrade(UpgradeId::TowerRange, 1000).unwrap(), 100);
        assert_eq!(state.buy_upgrade(UpgradeId::TowerRange, 1000).unwrap(), 150);
        assert_eq!(state.buy_upgrade(UpgradeId::TowerRange, 1000).unwrap(), 225);
    }

    #[test]
    fn test_purchase_failures_leave_state_untouched() {
        let mut state = UnlockState::new();
        state.register_building(BuildingKind::Forge).unwrap();
        // Locked line.
        assert!(state.buy_upgrade(UpgradeId::FireArrows, 1000).is_err());
        // Not enough gold.
        assert!(state.buy_upgrade(UpgradeId::TowerRange, 10).is_err());
        assert_eq!(state.forge_upgrades.tower_range, 0);
    }
}
