//! Player commands sent from the frontend to the simulation.
//!
//! Commands are validated and queued for processing at the next tick
//! boundary. Every purchase is atomic: unlock, cap, occupancy, and gold
//! checks all pass before anything mutates, otherwise the command is
//! rejected with an alert and state is untouched.

use serde::{Deserialize, Serialize};

use crate::enums::{Element, UpgradeId};
use crate::types::GridPos;
use crate::waves::WaveDefinition;

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Construction ---
    /// Place a tower of the given catalog key anchored at a grid cell.
    PlaceTower {
        kind: String,
        grid: GridPos,
        x: f64,
        y: f64,
    },
    /// Place a support building anchored at a grid cell.
    PlaceBuilding {
        kind: String,
        grid: GridPos,
        x: f64,
        y: f64,
    },
    /// Sell the tower anchored at a grid cell (50% refund).
    SellTower { grid: GridPos },
    /// Set the element of the magic tower anchored at a grid cell.
    SelectElement { grid: GridPos, element: Element },

    // --- Progression purchases ---
    /// Level the forge up by one.
    UpgradeForge,
    /// Buy one level of a forge upgrade line.
    BuyForgeUpgrade { upgrade: UpgradeId },
    /// Buy one level of an academy elemental upgrade.
    BuyAcademyUpgrade { element: Element },

    // --- Spawning ---
    /// Queue a finite wave immediately (replaces any pending schedule).
    StartWave { wave: WaveDefinition },
    /// Switch to endless spawning, cycling over the pattern.
    StartContinuous { interval: f64, pattern: Vec<String> },

    // --- Simulation control ---
    /// Start the loaded level (wave 1 begins spawning).
    StartMission,
    /// Set time scale (1.0 = normal). Clamped to (0, 3].
    SetTimeScale { scale: f64 },
    /// Pause the simulation.
    Pause,
    /// Resume the simulation.
    Resume,
}
