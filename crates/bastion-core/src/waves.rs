//! Wave definitions — the data handed to the spawn scheduler.
//!
//! Entries carry string enemy keys rather than enums so externally
//! authored wave tables degrade gracefully: an unknown key is skipped
//! with a warning instead of failing the whole wave.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_SPAWN_INTERVAL;

/// How an entry's health relates to the catalog base.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum HealthSpec {
    /// Multiply the catalog base health.
    Multiplier(f64),
    /// Absolute health, normalized to a multiplier against the base.
    Absolute(f64),
}

impl Default for HealthSpec {
    fn default() -> Self {
        HealthSpec::Multiplier(1.0)
    }
}

impl HealthSpec {
    /// Resolve to a multiplier against the given base health.
    /// A non-positive base falls back to 1.0.
    pub fn multiplier(&self, base_health: f64) -> f64 {
        match *self {
            HealthSpec::Multiplier(m) => m,
            HealthSpec::Absolute(h) => {
                if base_health > 0.0 {
                    h / base_health
                } else {
                    1.0
                }
            }
        }
    }
}

/// One enemy to spawn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnEntry {
    /// Catalog key of the enemy archetype.
    pub kind: String,
    #[serde(default)]
    pub health: HealthSpec,
    /// Override the catalog base speed (px/s).
    #[serde(default)]
    pub speed: Option<f64>,
}

impl SpawnEntry {
    pub fn basic(kind: &str) -> Self {
        Self {
            kind: kind.to_string(),
            health: HealthSpec::default(),
            speed: None,
        }
    }
}

/// A finite wave: entries released one per interval until drained.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaveDefinition {
    pub entries: Vec<SpawnEntry>,
    /// Seconds between spawns.
    pub interval: f64,
}

impl WaveDefinition {
    /// A uniform wave of one archetype with a health multiplier.
    pub fn uniform(kind: &str, count: usize, health_mult: f64, interval: f64) -> Self {
        Self {
            entries: (0..count)
                .map(|_| SpawnEntry {
                    kind: kind.to_string(),
                    health: HealthSpec::Multiplier(health_mult),
                    speed: None,
                })
                .collect(),
            interval,
        }
    }

    /// A wave cycling round-robin over a pattern of archetype keys.
    pub fn patterned(pattern: &[&str], count: usize, health_mult: f64, interval: f64) -> Self {
        Self {
            entries: (0..count)
                .map(|i| SpawnEntry {
                    kind: pattern[i % pattern.len()].to_string(),
                    health: HealthSpec::Multiplier(health_mult),
                    speed: None,
                })
                .collect(),
            interval,
        }
    }
}

impl Default for WaveDefinition {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            interval: DEFAULT_SPAWN_INTERVAL,
        }
    }
}
