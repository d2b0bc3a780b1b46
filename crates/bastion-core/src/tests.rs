#[cfg(test)]
mod tests {
    use crate::catalog::{bounty_for, EntityCatalog};
    use crate::commands::PlayerCommand;
    use crate::components::{Defense, DotEffect, StatusEffects};
    use crate::enums::*;
    use crate::events::GameEvent;
    use crate::types::{GridPos, Position};
    use crate::waves::{HealthSpec, SpawnEntry, WaveDefinition};

    // ---- Enum keys ----

    /// Every archetype key must round-trip through from_key.
    #[test]
    fn test_tower_kind_keys() {
        for kind in TowerKind::ALL {
            assert_eq!(TowerKind::from_key(kind.key()), Some(kind));
        }
        assert_eq!(TowerKind::from_key("ballista"), None);
    }

    #[test]
    fn test_enemy_kind_keys() {
        for kind in EnemyKind::ALL {
            assert_eq!(EnemyKind::from_key(kind.key()), Some(kind));
        }
        assert_eq!(EnemyKind::from_key("dragon"), None);
    }

    #[test]
    fn test_building_kind_keys() {
        for kind in BuildingKind::ALL {
            assert_eq!(BuildingKind::from_key(kind.key()), Some(kind));
        }
        assert_eq!(BuildingKind::from_key("barracks"), None);
    }

    // ---- Catalog ----

    #[test]
    fn test_catalog_covers_all_archetypes() {
        let catalog = EntityCatalog::standard();
        for kind in EnemyKind::ALL {
            assert!(catalog.enemy(kind).is_some(), "missing enemy {:?}", kind);
        }
        for kind in TowerKind::ALL {
            assert!(catalog.tower(kind).is_some(), "missing tower {:?}", kind);
        }
        for kind in BuildingKind::ALL {
            assert!(
                catalog.building(kind).is_some(),
                "missing building {:?}",
                kind
            );
        }
    }

    #[test]
    fn test_catalog_unknown_key() {
        let catalog = EntityCatalog::standard();
        assert!(catalog.enemy_by_key("dragon").is_none());
        assert!(catalog.tower_by_key("ballista").is_none());
    }

    #[test]
    fn test_bounty_rounds_up() {
        assert_eq!(bounty_for(100.0), 10);
        assert_eq!(bounty_for(101.0), 11);
        assert_eq!(bounty_for(150.0), 15);
    }

    // ---- Damage model ----

    #[test]
    fn test_mitigate_armour_reduction() {
        let defense = Defense {
            armour: 20.0,
            magic_resist: 0.0,
        };
        // 20 armour = 20% reduction.
        let dealt = defense.mitigate(100.0, DamageType::Physical, 0.0);
        assert!((dealt - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_mitigate_armour_cap() {
        let defense = Defense {
            armour: 200.0,
            magic_resist: 0.0,
        };
        // Reduction caps at 80%.
        let dealt = defense.mitigate(100.0, DamageType::Physical, 0.0);
        assert!((dealt - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_mitigate_pierce_subtracts_armour() {
        let defense = Defense {
            armour: 20.0,
            magic_resist: 0.0,
        };
        let dealt = defense.mitigate(100.0, DamageType::Physical, 15.0);
        assert!((dealt - 95.0).abs() < 1e-9);
    }

    #[test]
    fn test_mitigate_magic_resist() {
        let defense = Defense {
            armour: 50.0,
            magic_resist: 0.5,
        };
        // Armour is irrelevant for magic damage.
        let dealt = defense.mitigate(100.0, DamageType::Magic, 0.0);
        assert!((dealt - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_mitigate_elemental_bypasses_both() {
        let defense = Defense {
            armour: 80.0,
            magic_resist: 0.9,
        };
        for dtype in [DamageType::Fire, DamageType::Water, DamageType::Air] {
            let dealt = defense.mitigate(40.0, dtype, 0.0);
            assert!((dealt - 40.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_mitigate_earth_respects_armour_minus_pierce() {
        let defense = Defense {
            armour: 10.0,
            magic_resist: 0.0,
        };
        // 10 armour, 3 pierced: 7% reduction.
        let dealt = defense.mitigate(100.0, DamageType::Earth, 3.0);
        assert!((dealt - 93.0).abs() < 1e-9);
    }

    #[test]
    fn test_mitigate_minimum_damage() {
        let defense = Defense {
            armour: 500.0,
            magic_resist: 0.0,
        };
        let dealt = defense.mitigate(1.0, DamageType::Physical, 0.0);
        assert_eq!(dealt, 1.0);
    }

    // ---- Status refresh semantics ----

    #[test]
    fn test_burn_refresh_keeps_longer_remaining() {
        let mut status = StatusEffects::default();
        status.apply_burn(DotEffect {
            remaining: 3.0,
            tick_damage: 5.0,
            tick_period: 0.5,
            tick_timer: 0.5,
        });
        // Weaker, shorter re-application: remaining stays, damage updates.
        status.apply_burn(DotEffect {
            remaining: 1.0,
            tick_damage: 9.0,
            tick_period: 0.5,
            tick_timer: 0.5,
        });
        let burn = status.burn.unwrap();
        assert_eq!(burn.remaining, 3.0);
        assert_eq!(burn.tick_damage, 9.0);
    }

    #[test]
    fn test_poison_does_not_stack() {
        let mut status = StatusEffects::default();
        let dot = DotEffect {
            remaining: 5.0,
            tick_damage: 4.0,
            tick_period: 1.0,
            tick_timer: 1.0,
        };
        status.apply_poison(dot);
        status.apply_poison(dot);
        // Still a single instance.
        assert_eq!(status.poison.unwrap().tick_damage, 4.0);
    }

    // ---- Wave data ----

    #[test]
    fn test_health_spec_normalization() {
        assert_eq!(HealthSpec::Multiplier(2.0).multiplier(100.0), 2.0);
        assert_eq!(HealthSpec::Absolute(150.0).multiplier(100.0), 1.5);
        // Non-positive base falls back to 1.0.
        assert_eq!(HealthSpec::Absolute(150.0).multiplier(0.0), 1.0);
    }

    #[test]
    fn test_patterned_wave_round_robin() {
        let wave = WaveDefinition::patterned(&["basic", "knight"], 5, 1.0, 0.5);
        let kinds: Vec<&str> = wave.entries.iter().map(|e| e.kind.as_str()).collect();
        assert_eq!(kinds, vec!["basic", "knight", "basic", "knight", "basic"]);
    }

    // ---- Serde ----

    /// Verify PlayerCommand round-trips through serde (tagged union).
    #[test]
    fn test_player_command_serde() {
        let commands = vec![
            PlayerCommand::PlaceTower {
                kind: "cannon".into(),
                grid: GridPos::new(4, 6),
                x: 160.0,
                y: 240.0,
            },
            PlayerCommand::SellTower {
                grid: GridPos::new(4, 6),
            },
            PlayerCommand::SelectElement {
                grid: GridPos::new(2, 2),
                element: Element::Water,
            },
            PlayerCommand::UpgradeForge,
            PlayerCommand::BuyForgeUpgrade {
                upgrade: UpgradeId::TowerRange,
            },
            PlayerCommand::StartWave {
                wave: WaveDefinition {
                    entries: vec![SpawnEntry::basic("basic")],
                    interval: 1.0,
                },
            },
            PlayerCommand::StartContinuous {
                interval: 0.8,
                pattern: vec!["basic".into(), "beefy".into()],
            },
            PlayerCommand::SetTimeScale { scale: 2.0 },
            PlayerCommand::Pause,
            PlayerCommand::Resume,
            PlayerCommand::StartMission,
        ];
        for cmd in &commands {
            let json = serde_json::to_string(cmd).unwrap();
            let back: PlayerCommand = serde_json::from_str(&json).unwrap();
            // Compare JSON representations since PlayerCommand doesn't derive PartialEq
            assert_eq!(json, serde_json::to_string(&back).unwrap());
        }
    }

    /// Verify GameEvent round-trips through serde.
    #[test]
    fn test_game_event_serde() {
        let events = vec![
            GameEvent::EnemySpawned {
                kind: EnemyKind::Beefy,
            },
            GameEvent::EnemyKilled {
                kind: EnemyKind::Basic,
                gold: 22,
            },
            GameEvent::EnemyLeaked {
                kind: EnemyKind::Knight,
                damage: 7.0,
            },
            GameEvent::WaveCompleted { wave: 3 },
            GameEvent::LevelCompleted,
            GameEvent::CastleDestroyed,
        ];
        for event in &events {
            let json = serde_json::to_string(event).unwrap();
            let back: GameEvent = serde_json::from_str(&json).unwrap();
            assert_eq!(json, serde_json::to_string(&back).unwrap());
        }
    }

    // ---- Geometry ----

    #[test]
    fn test_position_distance() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(3.0, 4.0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-12);
    }
}
