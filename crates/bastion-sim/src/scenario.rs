//! Scenario data: level plans handed to the engine at construction.

use bastion_core::types::Position;
use bastion_core::waves::WaveDefinition;

/// Everything the engine needs to run one level.
#[derive(Debug, Clone)]
pub struct LevelPlan {
    /// Waypoints enemies walk, spawn point first, castle last.
    pub path: Vec<Position>,
    /// Finite waves, auto-advanced with a short break between them.
    pub waves: Vec<WaveDefinition>,
    pub starting_gold: u64,
    pub castle_health: f64,
}

impl LevelPlan {
    /// Default campaign level: an S-shaped road with escalating waves.
    ///
    /// Wave scaling: count grows with the wave number, health multiplier
    /// +5% per wave, spawn interval shrinking toward 0.3s.
    pub fn meadow_road() -> Self {
        let waves = (0..10)
            .map(|i| {
                let count = 5 + (i as f64 * 1.2) as usize;
                let health_mult = 1.0 + 0.05 * i as f64;
                let interval = (1.0 - 0.03 * i as f64).max(0.3);
                let pattern: &[&str] = match i {
                    0..=2 => &["basic", "villager"],
                    3..=5 => &["basic", "beefy", "archer"],
                    6..=8 => &["knight", "beefy", "mage", "villager"],
                    _ => &["shieldknight", "knight", "mage", "archer"],
                };
                WaveDefinition::patterned(pattern, count, health_mult, interval)
            })
            .collect();

        Self {
            path: vec![
                Position::new(0.0, 120.0),
                Position::new(260.0, 120.0),
                Position::new(260.0, 320.0),
                Position::new(60.0, 320.0),
                Position::new(60.0, 520.0),
                Position::new(640.0, 520.0),
            ],
            waves,
            starting_gold: 100,
            castle_health: 20.0,
        }
    }

    /// Sandbox pattern cycling through every archetype.
    pub fn sandbox_pattern() -> Vec<String> {
        ["basic", "basic", "beefy", "knight", "shieldknight", "mage", "villager", "archer"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }
}
